//! Context for accessing functionalities of platform that `Chip8` is
//! emulated on.
//!
//! Rendering, sound and pacing are driven by the host polling the emulator,
//! so the context only answers the two questions an instruction can ask:
//! which keys are pressed and what the next random byte is.

/// Trait aggregating platform functionalities
pub trait Context {
    /// Get state of each key on 4x4 keyboard
    ///
    /// Called by `step` for `EX9E`, `EXA1` and while waiting for a key after `FX0A`
    fn get_keys(&mut self) -> &[bool; 16];
    /// Generate random 8-bit number
    ///
    /// Called by `step` whenever requested by executing program
    fn gen_random(&mut self) -> u8;
}

/// Context without any input, every key is released and every random
/// number is zero
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Headless;

impl Context for Headless {
    fn get_keys(&mut self) -> &[bool; 16] {
        &[false; 16]
    }

    fn gen_random(&mut self) -> u8 {
        0
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    use nanorand::{rand::pcg64::Pcg64 as Rng, RNG};

    pub struct TestingContext {
        keys: [bool; 16],
        rng: Rng,
    }

    impl TestingContext {
        pub fn new(seed: u128) -> Self {
            Self {
                keys: [false; 16],
                rng: Rng::new_seed(seed),
            }
        }

        pub fn set_key(&mut self, n: u8) {
            self.keys[n as usize] = true;
        }

        pub fn reset_key(&mut self, n: u8) {
            self.keys[n as usize] = false;
        }
    }

    impl Context for TestingContext {
        fn gen_random(&mut self) -> u8 {
            self.rng.generate::<u8>()
        }

        fn get_keys(&mut self) -> &[bool; 16] {
            &self.keys
        }
    }

    #[test]
    fn testing_context() {
        let mut ctx = TestingContext::new(0);
        assert_eq!(ctx.get_keys(), &[false; 16]);

        ctx.set_key(0x01u8);
        ctx.set_key(0x0Fu8);
        assert_eq!(ctx.get_keys().iter().filter(|&&k| k).count(), 2);
        assert_eq!((ctx.keys[0x01], ctx.keys[0x0F]), (true, true));

        ctx.reset_key(0x0Fu8);
        assert_eq!(ctx.get_keys().iter().filter(|&&k| k).count(), 1);
        assert_eq!((ctx.keys[0x01], ctx.keys[0x0F]), (true, false));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut lhs = TestingContext::new(42);
        let mut rhs = TestingContext::new(42);
        for _ in 0..32 {
            assert_eq!(lhs.gen_random(), rhs.gen_random());
        }
    }

    #[test]
    fn headless_context() {
        let mut ctx = Headless;
        assert_eq!(ctx.get_keys(), &[false; 16]);
        assert_eq!(ctx.gen_random(), 0);
    }
}
