use crate::config::Register;
use crate::machine::Machine;

/// `JMP mask, tgt_reg` — if `mask == 0` or `(f & mask) != 0`, `i <- tgt_reg`.
pub(crate) fn jmp(m: &mut Machine, mask: u8, tgt_byte: u8) {
    let Some(tgt) = m.resolve_reg(tgt_byte) else { return };
    let f = m.read_register(Register::F);
    if mask == 0 || (f & mask) != 0 {
        let target = m.read_register(tgt);
        m.write_register(Register::I, target);
    }
}
