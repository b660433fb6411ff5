use crate::machine::Machine;

/// `ADD r1, r2` — `r1 <- (r1 + r2) mod 256`.
pub(crate) fn add(m: &mut Machine, p1: u8, p2: u8) {
    let Some(r1) = m.resolve_reg(p1) else { return };
    let Some(r2) = m.resolve_reg(p2) else { return };
    let sum = m.read_register(r1).wrapping_add(m.read_register(r2));
    m.write_register(r1, sum);
}
