//! Partitioning of the emulator memory.
//!
//! ```text
//! 0x000 ┬ font glyphs, interpreter area
//! 0x200 ┼ program
//!       ┼ call stack (MAX_STACKS * 4 bytes)
//!       ┼ address register slot
//!       ┼ display (DISPLAY_WIDTH * DISPLAY_HEIGHT / 8 bytes)
//! end   ┘
//! ```
//!
//! Offsets are derived from the memory size alone, so they are computed in
//! `const` context once per memory size.

use core::ops::Range;

pub const DEFAULT_MEMORY_SIZE: usize = 4096;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_MEMORY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT / 8;

pub const MAX_STACKS: usize = 12;
const STACK_SLOT_SIZE: usize = 4;
pub const STACK_SIZE: usize = MAX_STACKS * STACK_SLOT_SIZE;
/// Call stack together with the address register slot
const RESERVED_MEMORY_SIZE: usize = 96;

/// First 512 bytes are for internal use only
pub const PROGRAM_MEMORY_START: usize = 0x200;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub memory_size: usize,
    pub program_memory_start: usize,
    pub program_memory_end: usize,
    pub call_stack_start: usize,
    pub address_register: usize,
    pub display_memory_start: usize,
}

impl Layout {
    pub const fn new(memory_size: usize) -> Self {
        let display_memory_start = memory_size.saturating_sub(DISPLAY_MEMORY_SIZE);
        let call_stack_start = display_memory_start.saturating_sub(RESERVED_MEMORY_SIZE);
        Self {
            memory_size,
            program_memory_start: PROGRAM_MEMORY_START,
            program_memory_end: call_stack_start,
            call_stack_start,
            address_register: call_stack_start + STACK_SIZE,
            display_memory_start,
        }
    }

    /// Whether any program fits between the interpreter area and the call stack
    pub const fn is_valid(&self) -> bool {
        self.program_memory_end > self.program_memory_start
    }

    pub const fn program_capacity(&self) -> usize {
        self.program_memory_end.saturating_sub(self.program_memory_start)
    }

    pub fn program(&self) -> Range<usize> {
        self.program_memory_start..self.program_memory_end
    }

    pub fn display(&self) -> Range<usize> {
        self.display_memory_start..self.memory_size
    }
}
