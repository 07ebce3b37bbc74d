use crate::chip::Chip8;
use crate::context::Context;
use crate::error::Error;
use crate::layout::DEFAULT_MEMORY_SIZE;

pub struct Builder<'a, C: Context, const MEMORY_SIZE: usize = { DEFAULT_MEMORY_SIZE }> {
    context: Option<C>,
    program: Option<&'a [u8]>,
}

impl<'a, C: Context> Builder<'a, C> {
    pub fn new() -> Self {
        Self {
            context: None,
            program: None,
        }
    }
}

impl<'a, C: Context> Default for Builder<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C: Context, const MEMORY_SIZE: usize> Builder<'a, C, MEMORY_SIZE> {
    /// Builder for a chip with non-default amount of memory
    pub fn sized() -> Self {
        Self {
            context: None,
            program: None,
        }
    }

    pub fn with_context(mut self, ctx: C) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn with_program(mut self, prog: &'a [u8]) -> Self {
        self.program = Some(prog);
        self
    }

    pub fn build(self) -> Result<Chip8<C, MEMORY_SIZE>, Error> {
        let context = self.context.ok_or(Error::MissingContext)?;
        let program = self.program.ok_or(Error::MissingProgram)?;
        Chip8::load(context, program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{testing::TestingContext, Headless};

    #[test]
    fn with_context_and_prog() {
        let result = Builder::new()
            .with_context(TestingContext::new(0))
            .with_program(&[])
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn with_context_only() {
        let result = Builder::new().with_context(TestingContext::new(0)).build();
        assert_eq!(result.err(), Some(Error::MissingProgram));
    }

    #[test]
    fn with_program_only() {
        let result = Builder::<'_, TestingContext>::new()
            .with_program(&[])
            .build();
        assert_eq!(result.err(), Some(Error::MissingContext));
    }

    #[test]
    fn with_too_large_program() {
        let result = Builder::<'_, Headless, 1024>::sized()
            .with_context(Headless)
            .with_program(&[0u8; 200])
            .build();
        assert_eq!(
            result.err(),
            Some(Error::ProgramTooLarge {
                len: 200,
                capacity: 160,
            })
        );
    }

    #[test]
    fn sized_memory() {
        let chip = Builder::<'_, Headless, 2048>::sized()
            .with_context(Headless)
            .with_program(&[0x00, 0xE0])
            .build()
            .unwrap();
        assert_eq!(chip.memory().len(), 2048);
        assert_eq!(chip.program_counter(), 0x200);
    }
}
