use crate::config::{Register, Syscall};
use crate::machine::{Machine, TrapType};

/// `SYS call_mask, reg` — dispatch on `call_mask`; `reg` receives a result
/// count for calls that return one.
///
/// Only `exit` and `read_memory` have real effects; the rest are stubbed
/// but must not crash.
pub(crate) fn sys(m: &mut Machine, call_byte: u8, reg_byte: u8) {
    let Some(reg) = m.resolve_reg(reg_byte) else { return };
    let Some(call) = m.config().syscall_for_byte(call_byte) else {
        m.raise(TrapType::InvalidOpcode);
        return;
    };

    match call {
        Syscall::Exit => m.raise(TrapType::ProgramExit),
        Syscall::ReadMemory => {
            let buf = m.read_register(Register::B);
            let n = m.read_register(Register::C);
            let count = m.read_from_stdin(buf, n);
            m.write_register(reg, count);
        }
        Syscall::ReadCode | Syscall::Write | Syscall::Open | Syscall::Sleep => {
            m.write_register(reg, 0);
        }
    }
}
