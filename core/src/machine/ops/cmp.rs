use crate::config::{Flag, Register};
use crate::machine::Machine;

/// `CMP r1, r2` — sets exactly: `E` iff equal, `N` iff not equal, `Z` iff both
/// zero, `L` iff `r1 < r2`, `G` iff `r1 > r2`. Bits are OR-combined into `f`.
pub(crate) fn cmp(m: &mut Machine, p1: u8, p2: u8) {
    let Some(r1) = m.resolve_reg(p1) else { return };
    let Some(r2) = m.resolve_reg(p2) else { return };
    let v1 = m.read_register(r1);
    let v2 = m.read_register(r2);

    let mut mask = 0u8;
    if v1 < v2 {
        mask |= m.flag_bit(Flag::L);
    }
    if v1 > v2 {
        mask |= m.flag_bit(Flag::G);
    }
    if v1 == v2 {
        mask |= m.flag_bit(Flag::E);
    }
    if v1 != v2 {
        mask |= m.flag_bit(Flag::N);
    }
    if v1 == 0 && v2 == 0 {
        mask |= m.flag_bit(Flag::Z);
    }

    m.write_register(Register::F, mask);
}
