pub mod assembler;
pub mod config;
pub mod debugger;
pub mod disassembler;
pub mod machine;

pub mod prelude {
    pub use crate::assembler::{AssembleError, Assembler};
    pub use crate::config::{EncodingConfig, Flag, Opcode, Register, Syscall};
    pub use crate::debugger::{Debugger, DebuggerObserver};
    pub use crate::disassembler::Disassembler;
    pub use crate::machine::{Machine, MachineError, TrapType};
}
