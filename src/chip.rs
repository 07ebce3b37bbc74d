use core::convert::TryFrom;
use core::ops::Range;

use heapless::{consts::U12, Vec};
use log::{debug, trace, warn};

use crate::context::Context;
use crate::error::Error;
use crate::font::{self, FONT, FONT_START};
use crate::frame::{FrameMut, FrameView};
use crate::layout::{Layout, DEFAULT_MEMORY_SIZE};
use crate::opcode::OpCode;
use crate::timer::{Timer, TimerState};

/// Register doubling as carry, borrow and collision flag
const VF: usize = 0xF;
const TIMER_START_VALUE: u8 = 60;
const MAX_SPRITE_HEIGHT: usize = 15;
/// Upper bound of instructions executed by a single `run`
pub const MAX_RUN_STEPS: usize = 1 << 20;

/// Reason for `run` to give control back
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// Program counter left the loaded program
    EndOfProgram,
    /// `FX0A` is waiting and no key is pressed
    AwaitingKey,
    /// Instruction reported an error, program counter points at it
    Fault(Error),
    /// `MAX_RUN_STEPS` instructions executed without halting
    StepLimit,
}

/// Program counter movement requested by an instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Next,
    Skip,
    Jump(u16),
    WaitForKey(u8),
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// CHIP-8 CPU together with its memory
///
/// Everything is owned by the struct and allocated inline, nothing is shared
/// between instances. The display occupies the last bytes of `memory`, see
/// [`Layout`](crate::layout::Layout) for the whole partitioning.
pub struct Chip8<C: Context, const MEMORY_SIZE: usize = { DEFAULT_MEMORY_SIZE }> {
    ctx: C,
    v: [u8; 16],
    i: u16,
    pc: u16,
    memory: [u8; MEMORY_SIZE],
    stack: Vec<u16, U12>,
    delay_timer: Timer,
    sound_timer: Timer,
    awaiting_key: Option<u8>,
    program_len: usize,
}

impl<C: Context> Chip8<C> {
    /// Load program into 4KiB of memory
    pub fn new(ctx: C, program: &[u8]) -> Result<Self, Error> {
        Self::load(ctx, program)
    }
}

impl<C: Context, const MEMORY_SIZE: usize> Chip8<C, MEMORY_SIZE> {
    pub const LAYOUT: Layout = Layout::new(MEMORY_SIZE);
    const LAYOUT_CHECK: () = assert!(Self::LAYOUT.is_valid(), "No memory for programs");

    /// Load program from slice of bytes to memory from 0x200 (_start address)
    pub fn load(ctx: C, program: &[u8]) -> Result<Self, Error> {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_CHECK;

        let capacity = Self::LAYOUT.program_capacity();
        if program.len() > capacity {
            return Err(Error::ProgramTooLarge {
                len: program.len(),
                capacity,
            });
        }

        let mut memory = [0u8; MEMORY_SIZE];
        memory[FONT_START..FONT_START + FONT.len()].copy_from_slice(&FONT);
        let start = Self::LAYOUT.program_memory_start;
        memory[start..start + program.len()].copy_from_slice(program);
        debug!(
            "loaded {} of {} bytes of program memory",
            program.len(),
            capacity
        );

        Ok(Self {
            ctx,
            v: [0; 16],
            i: 0,
            pc: start as u16,
            memory,
            stack: Vec::new(),
            delay_timer: Timer::new(TIMER_START_VALUE),
            sound_timer: Timer::new(TIMER_START_VALUE),
            awaiting_key: None,
            program_len: program.len(),
        })
    }

    /// Execute a single instruction
    ///
    /// Returns `WouldBlock` without doing anything while `FX0A` waits for a
    /// key. An error leaves the state as it was before the call, so the same
    /// instruction is fetched again on the next call.
    pub fn step(&mut self) -> nb::Result<(), Error> {
        if let Some(x) = self.awaiting_key {
            return self.poll_key(x);
        }
        self.cycle().map_err(|err| {
            warn!("pc={:#05x}: {}", self.pc, err);
            nb::Error::Other(err)
        })
    }

    /// Step until the program counter leaves the loaded program, or until
    /// a step cannot complete
    ///
    /// Timers are not ticked.
    pub fn run(&mut self) -> Halt {
        let program_end = Self::LAYOUT.program_memory_start + self.program_len;
        for _ in 0..MAX_RUN_STEPS {
            if usize::from(self.pc) >= program_end {
                return Halt::EndOfProgram;
            }
            match self.step() {
                Ok(()) => {}
                Err(nb::Error::WouldBlock) => return Halt::AwaitingKey,
                Err(nb::Error::Other(err)) => return Halt::Fault(err),
            }
        }
        Halt::StepLimit
    }

    /// Decrement delay and sound timers, to be called at 60Hz
    ///
    /// Returns the state of the sound timer, so that a beeper can be
    /// switched on `On` and off on `Finished`.
    pub fn tick_timers(&mut self) -> TimerState {
        self.delay_timer.decrement();
        self.sound_timer.decrement()
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    /// Registers V0 to VF
    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    /// Value of register VX, only the low nibble of `x` is used
    pub fn register(&self, x: u8) -> u8 {
        self.v[(x & 0x0F) as usize]
    }

    pub fn address_register(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.pc
    }

    /// Number of subroutines currently entered
    pub fn stack_pointer(&self) -> usize {
        self.stack.len()
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.load()
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.load()
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Whether `FX0A` is blocking execution
    pub fn is_awaiting_key(&self) -> bool {
        self.awaiting_key.is_some()
    }

    pub fn frame(&self) -> FrameView<'_> {
        FrameView::new(&self.memory[Self::LAYOUT.display()])
    }

    /// Pixels outside of the 64x32 screen are never set
    pub fn is_pixel_set(&self, x: usize, y: usize) -> bool {
        self.frame().get_bit(x, y).unwrap_or(false)
    }

    fn frame_mut(&mut self) -> FrameMut<'_> {
        FrameMut::new(&mut self.memory[Self::LAYOUT.display()])
    }

    fn memory_range(&self, start: u16, len: usize) -> Result<Range<usize>, Error> {
        let start = usize::from(start);
        if start + len <= MEMORY_SIZE {
            Ok(start..start + len)
        } else {
            Err(Error::AddressOutOfRange(start.max(MEMORY_SIZE)))
        }
    }

    fn fetch(&self) -> Result<u16, Error> {
        let word = &self.memory[self.memory_range(self.pc, 2)?];
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    fn cycle(&mut self) -> Result<(), Error> {
        let raw = self.fetch()?;
        let opcode = OpCode::try_from(raw)?;
        trace!("{:#05x}: {:04X} {:?}", self.pc, raw, opcode);
        self.apply(opcode)
    }

    fn apply(&mut self, opcode: OpCode) -> Result<(), Error> {
        let flow = self.execute(opcode)?;
        match flow {
            Flow::Next => self.pc = self.pc.wrapping_add(2),
            Flow::Skip => self.pc = self.pc.wrapping_add(4),
            Flow::Jump(addr) => self.pc = addr,
            Flow::WaitForKey(x) => {
                debug!("pc={:#05x}: waiting for a key for V{:X}", self.pc, x);
                self.awaiting_key = Some(x);
            }
        }
        Ok(())
    }

    fn poll_key(&mut self, x: u8) -> nb::Result<(), Error> {
        let key = self
            .ctx
            .get_keys()
            .iter()
            .position(|&pressed| pressed)
            .ok_or(nb::Error::WouldBlock)?;
        debug!("key {:X} pressed, stored in V{:X}", key, x);
        self.v[x as usize] = key as u8;
        self.awaiting_key = None;
        self.pc = self.pc.wrapping_add(2);
        Ok(())
    }
}

// OpCodes impls
impl<C: Context, const MEMORY_SIZE: usize> Chip8<C, MEMORY_SIZE> {
    #[rustfmt::skip]
    fn execute(&mut self, opcode: OpCode) -> Result<Flow, Error> {
        match opcode {
            OpCode::_00E0             => self.clear_screen(),
            OpCode::_00EE             => self.subroutine_return(),
            OpCode::_1NNN { nnn }     => self.jump_to(nnn),
            OpCode::_2NNN { nnn }     => self.exec_subroutine_at(nnn),
            OpCode::_3XNN { x, nn }   => self.skip_if_vx_eq_nn(x, nn),
            OpCode::_4XNN { x, nn }   => self.skip_if_vx_ne_nn(x, nn),
            OpCode::_5XY0 { x, y }    => self.skip_if_vx_eq_vy(x, y),
            OpCode::_6XNN { x, nn }   => self.assign_vx_nn(x, nn),
            OpCode::_7XNN { x, nn }   => self.assign_add_vx_nn(x, nn),
            OpCode::_8XY0 { x, y }    => self.assign_vx_vy(x, y),
            OpCode::_8XY1 { x, y }    => self.assign_or_vx_vy(x, y),
            OpCode::_8XY2 { x, y }    => self.assign_and_vx_vy(x, y),
            OpCode::_8XY3 { x, y }    => self.assign_xor_vx_vy(x, y),
            OpCode::_8XY4 { x, y }    => self.assign_add_vx_vy(x, y),
            OpCode::_8XY5 { x, y }    => self.assign_sub_vx_vy(x, y),
            OpCode::_8XY6 { x, .. }   => self.assign_vx_shifted_r(x),
            OpCode::_8XY7 { x, y }    => self.assign_vx_vy_sub_vx(x, y),
            OpCode::_8XYE { x, .. }   => self.assign_vx_shifted_l(x),
            OpCode::_9XY0 { x, y }    => self.skip_if_vx_ne_vy(x, y),
            OpCode::_ANNN { nnn }     => self.assign_i_nnn(nnn),
            OpCode::_BNNN { nnn }     => self.jump_to_nnn_add_v0(nnn),
            OpCode::_CXNN { x, nn }   => self.assign_vx_random_and_nn(x, nn),
            OpCode::_DXYN { x, y, n } => self.draw_n_at_vx_vy(x, y, n),
            OpCode::_EX9E { x }       => self.skip_if_vx_in_keys(x),
            OpCode::_EXA1 { x }       => self.skip_if_vx_not_in_keys(x),
            OpCode::_FX07 { x }       => self.assign_vx_delay_t(x),
            OpCode::_FX0A { x }       => self.assign_vx_wait_for_key(x),
            OpCode::_FX15 { x }       => self.assign_delay_t_vx(x),
            OpCode::_FX18 { x }       => self.assign_sound_t_vx(x),
            OpCode::_FX1E { x }       => self.assign_add_i_vx(x),
            OpCode::_FX29 { x }       => self.assign_i_addr_of_sprite_vx(x),
            OpCode::_FX33 { x }       => self.assign_mem_at_i_bcd_of_vx(x),
            OpCode::_FX55 { x }       => self.assign_mem_at_i_v0_to_vx(x),
            OpCode::_FX65 { x }       => self.assign_v0_to_vx_mem_at_i(x),
        }
    }

    /// Clear the screen
    /// 00E0,
    fn clear_screen(&mut self) -> Result<Flow, Error> {
        self.frame_mut().clear();
        Ok(Flow::Next)
    }

    /// Return from a subroutine
    /// 00EE,
    fn subroutine_return(&mut self) -> Result<Flow, Error> {
        self.stack.pop().map(Flow::Jump).ok_or(Error::StackUnderflow)
    }

    /// Jump to address NNN
    /// 1NNN { nnn: u16 },
    fn jump_to(&mut self, nnn: u16) -> Result<Flow, Error> {
        Ok(Flow::Jump(nnn))
    }

    /// Execute subroutine starting at address NNN
    /// 2NNN { nnn: u16 },
    fn exec_subroutine_at(&mut self, nnn: u16) -> Result<Flow, Error> {
        self.stack
            .push(self.pc.wrapping_add(2))
            .map_err(|_| Error::StackOverflow)
            .map(|_| Flow::Jump(nnn))
    }

    /// Skip the following instruction if the value of register VX equals NN
    /// 3XNN { x: u8, nn: u8 },
    fn skip_if_vx_eq_nn(&mut self, x: u8, nn: u8) -> Result<Flow, Error> {
        Ok(Flow::skip_if(self.v[x as usize] == nn))
    }

    /// Skip the following instruction if the value of register VX is not equal to NN
    /// 4XNN { x: u8, nn: u8 },
    fn skip_if_vx_ne_nn(&mut self, x: u8, nn: u8) -> Result<Flow, Error> {
        Ok(Flow::skip_if(self.v[x as usize] != nn))
    }

    /// Skip the following instruction if the value of register VX is equal to the value of register VY
    /// 5XY0 { x: u8, y: u8 },
    fn skip_if_vx_eq_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        Ok(Flow::skip_if(self.v[x as usize] == self.v[y as usize]))
    }

    /// Store number NN in register VX
    /// 6XNN { x: u8, nn: u8 },
    fn assign_vx_nn(&mut self, x: u8, nn: u8) -> Result<Flow, Error> {
        self.v[x as usize] = nn;
        Ok(Flow::Next)
    }

    /// Add the value NN to register VX
    /// 7XNN { x: u8, nn: u8 },
    fn assign_add_vx_nn(&mut self, x: u8, nn: u8) -> Result<Flow, Error> {
        self.v[x as usize] = self.v[x as usize].wrapping_add(nn);
        Ok(Flow::Next)
    }

    /// Store the value of register VY in register VX
    /// 8XY0 { x: u8, y: u8 },
    fn assign_vx_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        self.v[x as usize] = self.v[y as usize];
        Ok(Flow::Next)
    }

    /// Set VX to VX OR VY
    /// 8XY1 { x: u8, y: u8 },
    fn assign_or_vx_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        self.v[x as usize] |= self.v[y as usize];
        Ok(Flow::Next)
    }

    /// Set VX to VX AND VY
    /// 8XY2 { x: u8, y: u8 },
    fn assign_and_vx_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        self.v[x as usize] &= self.v[y as usize];
        Ok(Flow::Next)
    }

    /// Set VX to VX XOR VY
    /// 8XY3 { x: u8, y: u8 },
    fn assign_xor_vx_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        self.v[x as usize] ^= self.v[y as usize];
        Ok(Flow::Next)
    }

    // Flag is written last in the arithmetic below, so it wins when VX is VF.

    /// Add the value of register VY to register VX, Set VF to 01 if a carry occurs, Set VF to 00 if a carry does not occur
    /// 8XY4 { x: u8, y: u8 },
    fn assign_add_vx_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        let (value, carry) = self.v[x as usize].overflowing_add(self.v[y as usize]);
        self.v[x as usize] = value;
        self.v[VF] = carry as u8;
        Ok(Flow::Next)
    }

    /// Subtract the value of register VY from register VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY5 { x: u8, y: u8 },
    fn assign_sub_vx_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        let (value, borrow) = self.v[x as usize].overflowing_sub(self.v[y as usize]);
        self.v[x as usize] = value;
        self.v[VF] = !borrow as u8;
        Ok(Flow::Next)
    }

    /// Shift VX right by one bit, Set register VF to the least significant bit prior to the shift
    /// 8XY6 { x: u8, y: u8 },
    fn assign_vx_shifted_r(&mut self, x: u8) -> Result<Flow, Error> {
        let lsb = self.v[x as usize] & 1u8;
        self.v[x as usize] = self.v[x as usize].wrapping_shr(1);
        self.v[VF] = lsb;
        Ok(Flow::Next)
    }

    /// Set register VX to the value of VY minus VX, Set VF to 00 if a borrow occurs, Set VF to 01 if a borrow does not occur
    /// 8XY7 { x: u8, y: u8 },
    fn assign_vx_vy_sub_vx(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        let (value, borrow) = self.v[y as usize].overflowing_sub(self.v[x as usize]);
        self.v[x as usize] = value;
        self.v[VF] = !borrow as u8;
        Ok(Flow::Next)
    }

    /// Shift VX left by one bit, Set register VF to the most significant bit prior to the shift
    /// 8XYE { x: u8, y: u8 },
    fn assign_vx_shifted_l(&mut self, x: u8) -> Result<Flow, Error> {
        let msb = self.v[x as usize] >> 7;
        self.v[x as usize] = self.v[x as usize].wrapping_shl(1);
        self.v[VF] = msb;
        Ok(Flow::Next)
    }

    /// Skip the following instruction if the value of register VX is not equal to the value of register VY
    /// 9XY0 { x: u8, y: u8 },
    fn skip_if_vx_ne_vy(&mut self, x: u8, y: u8) -> Result<Flow, Error> {
        Ok(Flow::skip_if(self.v[x as usize] != self.v[y as usize]))
    }

    /// Store memory address NNN in register I
    /// ANNN { nnn: u16 },
    fn assign_i_nnn(&mut self, nnn: u16) -> Result<Flow, Error> {
        self.i = nnn;
        Ok(Flow::Next)
    }

    /// Jump to address NNN + V0
    /// BNNN { nnn: u16 },
    fn jump_to_nnn_add_v0(&mut self, nnn: u16) -> Result<Flow, Error> {
        Ok(Flow::Jump(nnn + self.v[0] as u16))
    }

    /// Set VX to a random number with a mask of NN
    /// CXNN { x: u8, nn: u8 },
    fn assign_vx_random_and_nn(&mut self, x: u8, nn: u8) -> Result<Flow, Error> {
        self.v[x as usize] = self.ctx.gen_random() & nn;
        Ok(Flow::Next)
    }

    /// Draw a sprite at position VX, VY with N bytes of sprite data starting at the address stored in I, Set VF to 01 if any set pixels are changed to unset, and 00 otherwise
    /// DXYN { x: u8, y: u8, n: u8 },
    fn draw_n_at_vx_vy(&mut self, x: u8, y: u8, n: u8) -> Result<Flow, Error> {
        let range = self.memory_range(self.i, n as usize)?;
        let mut buffer = [0u8; MAX_SPRITE_HEIGHT];
        let sprite = &mut buffer[..range.len()];
        sprite.copy_from_slice(&self.memory[range]);

        let (px, py) = (self.v[x as usize] as usize, self.v[y as usize] as usize);
        let collision = self.frame_mut().draw_sprite(px, py, sprite);
        self.v[VF] = collision as u8;
        Ok(Flow::Next)
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is pressed
    /// EX9E { x: u8 },
    fn skip_if_vx_in_keys(&mut self, x: u8) -> Result<Flow, Error> {
        let key = (self.v[x as usize] & 0x0F) as usize;
        Ok(Flow::skip_if(self.ctx.get_keys()[key]))
    }

    /// Skip the following instruction if the key corresponding to the hex value currently stored in register VX is not pressed
    /// EXA1 { x: u8 },
    fn skip_if_vx_not_in_keys(&mut self, x: u8) -> Result<Flow, Error> {
        let key = (self.v[x as usize] & 0x0F) as usize;
        Ok(Flow::skip_if(!self.ctx.get_keys()[key]))
    }

    /// Store the current value of the delay timer in register VX
    /// FX07 { x: u8 },
    fn assign_vx_delay_t(&mut self, x: u8) -> Result<Flow, Error> {
        self.v[x as usize] = self.delay_timer.load();
        Ok(Flow::Next)
    }

    /// Wait for a keypress and store the result in register VX
    /// FX0A { x: u8 },
    fn assign_vx_wait_for_key(&mut self, x: u8) -> Result<Flow, Error> {
        Ok(Flow::WaitForKey(x))
    }

    /// Set the delay timer to the value of register VX
    /// FX15 { x: u8 },
    fn assign_delay_t_vx(&mut self, x: u8) -> Result<Flow, Error> {
        self.delay_timer.store(self.v[x as usize]);
        Ok(Flow::Next)
    }

    /// Set the sound timer to the value of register VX
    /// FX18 { x: u8 },
    fn assign_sound_t_vx(&mut self, x: u8) -> Result<Flow, Error> {
        self.sound_timer.store(self.v[x as usize]);
        Ok(Flow::Next)
    }

    /// Add the value stored in register VX to register I, Set VF to 01 if I leaves the address space
    /// FX1E { x: u8 },
    fn assign_add_i_vx(&mut self, x: u8) -> Result<Flow, Error> {
        let vx = u16::from(self.v[x as usize]);
        let (i, wrapped) = self.i.overflowing_add(vx);
        // I saturates instead of wrapping, so accesses through it keep faulting
        self.i = self.i.saturating_add(vx);
        self.v[VF] = (wrapped || usize::from(i) >= MEMORY_SIZE) as u8;
        Ok(Flow::Next)
    }

    /// Set I to the memory address of the sprite data corresponding to the hexadecimal digit stored in register VX
    /// FX29 { x: u8 },
    fn assign_i_addr_of_sprite_vx(&mut self, x: u8) -> Result<Flow, Error> {
        self.i = font::glyph_address(self.v[x as usize]);
        Ok(Flow::Next)
    }

    /// Store the binary-coded decimal equivalent of the value stored in register VX at addresses I, I+1, and I+2
    /// FX33 { x: u8 },
    fn assign_mem_at_i_bcd_of_vx(&mut self, x: u8) -> Result<Flow, Error> {
        let range = self.memory_range(self.i, 3)?;
        let value = self.v[x as usize];
        self.memory[range].copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
        Ok(Flow::Next)
    }

    /// Store the values of registers V0 to VX inclusive in memory starting at address I
    /// FX55 { x: u8 },
    fn assign_mem_at_i_v0_to_vx(&mut self, x: u8) -> Result<Flow, Error> {
        let range = self.memory_range(self.i, x as usize + 1)?;
        self.memory[range].copy_from_slice(&self.v[..=x as usize]);
        Ok(Flow::Next)
    }

    /// Fill registers V0 to VX inclusive with the values stored in memory starting at address I
    /// FX65 { x: u8 },
    fn assign_v0_to_vx_mem_at_i(&mut self, x: u8) -> Result<Flow, Error> {
        let range = self.memory_range(self.i, x as usize + 1)?;
        self.v[..=x as usize].copy_from_slice(&self.memory[range]);
        Ok(Flow::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{testing::TestingContext, Headless};
    use crate::layout::MAX_STACKS;

    #[test]
    fn initial_state() {
        let chip = Chip8::new(TestingContext::new(0), &[0x12, 0x34]).unwrap();
        assert_eq!(chip.program_counter(), 0x0200u16);
        assert_eq!(chip.stack_pointer(), 0);
        assert_eq!(chip.address_register(), 0);
        assert_eq!(chip.registers(), &[0; 16]);
        assert_eq!(chip.delay_timer(), 60);
        assert_eq!(chip.sound_timer(), 60);
        assert!(!chip.is_awaiting_key());
        assert_eq!(&chip.memory()[0x200..0x204], &[0x12, 0x34, 0x00, 0x00]);
        assert_eq!(&chip.memory()[..FONT.len()], &FONT[..]);
        assert!(chip.frame().is_blank());
        assert_eq!(chip.stack.capacity(), MAX_STACKS);
    }

    #[test]
    fn program_too_large() {
        let capacity = Chip8::<Headless>::LAYOUT.program_capacity();
        let program = [0xFFu8; 3233];
        assert_eq!(capacity, 3232);
        assert!(Chip8::new(Headless, &program[..capacity]).is_ok());
        assert_eq!(
            Chip8::new(Headless, &program).err(),
            Some(Error::ProgramTooLarge {
                len: 3233,
                capacity: 3232,
            }),
        );
    }

    #[test]
    fn custom_memory_size() {
        let chip = Chip8::<Headless, 1024>::load(Headless, &[0x00, 0xE0]).unwrap();
        assert_eq!(chip.memory().len(), 1024);
        assert_eq!(Chip8::<Headless, 1024>::LAYOUT.display(), 768..1024);
        assert_eq!(
            Chip8::<Headless, 1024>::load(Headless, &[0; 161]).err(),
            Some(Error::ProgramTooLarge {
                len: 161,
                capacity: 160,
            }),
        );
    }

    #[test]
    fn unknown_opcode_leaves_state() {
        let mut chip = Chip8::new(TestingContext::new(0), &[0x01, 0x23]).unwrap();
        assert_eq!(chip.step(), Err(nb::Error::Other(Error::UnknownOpCode(0x0123))));
        assert_eq!(chip.program_counter(), 0x200);
        assert_eq!(chip.step(), Err(nb::Error::Other(Error::UnknownOpCode(0x0123))));
    }

    #[test]
    fn fetch_out_of_address_space() {
        let mut chip = Chip8::new(TestingContext::new(0), &[]).unwrap();
        chip.pc = 0x0FFF;
        assert_eq!(chip.step(), Err(nb::Error::Other(Error::AddressOutOfRange(0x1000))));
        chip.pc = 0x0FFE;
        assert_eq!(chip.step(), Err(nb::Error::Other(Error::UnknownOpCode(0x0000))));
    }

    #[test]
    fn tick_timers() {
        let mut chip = Chip8::new(TestingContext::new(0), &[]).unwrap();
        chip.delay_timer.store(3);
        chip.sound_timer.store(2);

        assert_eq!(chip.tick_timers(), TimerState::On);
        assert_eq!(chip.tick_timers(), TimerState::Finished);
        assert_eq!(chip.tick_timers(), TimerState::Off);
        assert_eq!((chip.delay_timer(), chip.sound_timer()), (0, 0));
        assert_eq!(chip.tick_timers(), TimerState::Off);
        assert_eq!((chip.delay_timer(), chip.sound_timer()), (0, 0));
    }
}
