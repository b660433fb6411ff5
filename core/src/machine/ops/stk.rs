use crate::config::Register;
use crate::machine::Machine;

/// `STK dst, src` — push-then-pop.
///
/// If `src != N`: `s <- s+1; mem[s] <- src`.
/// Then if `dst != N`: `dst <- mem[s]; s <- s-1`.
///
/// `STK r,r` is therefore a copy (net stack-pointer change is zero); `STK N,N`
/// is a true no-op; `PUSH r`/`POP r` are the one-sided pseudo-ops.
pub(crate) fn stk(m: &mut Machine, dst_byte: u8, src_byte: u8) {
    let Some(dst) = m.resolve_reg(dst_byte) else { return };
    let Some(src) = m.resolve_reg(src_byte) else { return };

    if src != Register::N {
        let s = m.read_register(Register::S).wrapping_add(1);
        m.write_register(Register::S, s);
        let val = m.read_register(src);
        m.write_mem(s, val);
        if m.trap_halted() {
            return;
        }
    }

    if dst != Register::N {
        let s = m.read_register(Register::S);
        let val = m.read_mem(s);
        if m.trap_halted() {
            return;
        }
        m.write_register(dst, val);
        m.write_register(Register::S, s.wrapping_sub(1));
    }
}
