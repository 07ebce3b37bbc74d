use core::fmt;

/// Conditions reported by the emulator
///
/// Apart from `ProgramTooLarge` and the builder errors, all of them are
/// recoverable: the instruction which raised one has no effect on the state,
/// and the caller decides whether to halt or carry on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Program doesn't fit into the program region
    ProgramTooLarge { len: usize, capacity: usize },
    /// Fetched word doesn't decode into any known instruction
    UnknownOpCode(u16),
    /// Subroutine call while all stack slots are taken
    StackOverflow,
    /// Return from a subroutine with an empty stack
    StackUnderflow,
    /// Memory access at an address outside of the memory
    AddressOutOfRange(usize),
    MissingContext,
    MissingProgram,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::ProgramTooLarge { len, capacity } => write!(
                f,
                "program of {} bytes exceeds program memory of {} bytes",
                len, capacity
            ),
            Error::UnknownOpCode(raw) => write!(f, "unknown operation code {:#06x}", raw),
            Error::StackOverflow => write!(f, "cannot enter subroutine, stack is full"),
            Error::StackUnderflow => write!(f, "cannot return, not in subroutine"),
            Error::AddressOutOfRange(addr) => {
                write!(f, "address {:#06x} is out of address space", addr)
            }
            Error::MissingContext => write!(f, "context not provided"),
            Error::MissingProgram => write!(f, "program not provided"),
        }
    }
}

impl core::error::Error for Error {}
