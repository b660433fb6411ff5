use std::fmt;

/// Errors raised while loading a hex-dump code image (spec §6), as opposed
/// to runtime traps, which are reported through [`TrapType`](super::TrapType).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineError {
    InvalidHexByte { line: usize, token: String },
    CodeDoesNotFit { needed: usize, base: usize, vmem_bytes: usize },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::InvalidHexByte { line, token } => {
                write!(f, "line {line}: invalid hex byte {token:?}")
            }
            MachineError::CodeDoesNotFit { needed, base, vmem_bytes } => write!(
                f,
                "code image of {needed} bytes at base 0x{base:x} does not fit in {vmem_bytes}-byte vmem"
            ),
        }
    }
}

impl std::error::Error for MachineError {}
