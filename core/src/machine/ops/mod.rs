//! One module per opcode family, grouping each instruction's effect
//! (`add`, `jmp`, `stk`, `mem`, ...) into its own small file.

mod add;
mod cmp;
mod imm;
mod jmp;
mod mem;
mod stk;
mod sys;

pub(crate) use add::add;
pub(crate) use cmp::cmp;
pub(crate) use imm::imm;
pub(crate) use jmp::jmp;
pub(crate) use mem::{ldm, stm};
pub(crate) use stk::stk;
pub(crate) use sys::sys;
