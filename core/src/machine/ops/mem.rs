use crate::machine::Machine;

/// `STM addr_reg, src` — `mem[addr_reg] <- src`.
pub(crate) fn stm(m: &mut Machine, addr_byte: u8, src_byte: u8) {
    let Some(addr_reg) = m.resolve_reg(addr_byte) else { return };
    let Some(src_reg) = m.resolve_reg(src_byte) else { return };
    let addr = m.read_register(addr_reg);
    let val = m.read_register(src_reg);
    m.write_mem(addr, val);
}

/// `LDM dst, addr_reg` — `dst <- mem[addr_reg]`.
pub(crate) fn ldm(m: &mut Machine, dst_byte: u8, addr_byte: u8) {
    let Some(dst) = m.resolve_reg(dst_byte) else { return };
    let Some(addr_reg) = m.resolve_reg(addr_byte) else { return };
    let addr = m.read_register(addr_reg);
    let val = m.read_mem(addr);
    if m.trap_halted() {
        return;
    }
    m.write_register(dst, val);
}
