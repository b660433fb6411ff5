use crate::machine::Machine;

/// `IMM reg, imm` — `reg <- imm`.
pub(crate) fn imm(m: &mut Machine, reg_byte: u8, imm: u8) {
    let Some(reg) = m.resolve_reg(reg_byte) else { return };
    m.write_register(reg, imm);
}
