//! Trap classification. A trap is the only exit from [`run_loop`](super::Machine::run_loop).

use std::fmt;

/// Why the machine halted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapType {
    /// Single-step trap fired after every executed instruction when
    /// `trap_mode_enabled` is set.
    TrapMode,
    InvalidOpcode,
    InvalidRead,
    InvalidWrite,
    InvalidRegister,
    ProgramExit,
}

impl TrapType {
    pub fn as_str(self) -> &'static str {
        match self {
            TrapType::TrapMode => "trap_mode",
            TrapType::InvalidOpcode => "invalid_opcode",
            TrapType::InvalidRead => "invalid_read",
            TrapType::InvalidWrite => "invalid_write",
            TrapType::InvalidRegister => "invalid_register",
            TrapType::ProgramExit => "program_exit",
        }
    }
}

impl fmt::Display for TrapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
