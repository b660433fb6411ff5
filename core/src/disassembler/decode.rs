use crate::config::{EncodingConfig, Opcode, Param, Register};

use super::entity::{Entity, EntityKind, ParamValue};

/// Decode the 3 physical bytes at `addr` into a single entity, including
/// readability annotations (pseudo-op comments, flow-change marking,
/// syscall name resolution).
pub(super) fn decode_entity(cfg: &EncodingConfig, vmem: &[u8], addr: usize) -> Entity {
    let physical = [vmem[addr], vmem[addr + 1], vmem[addr + 2]];
    let logical = cfg.physical_to_logical(physical);
    let (opcode_byte, p1_byte, p2_byte) = (logical[0], logical[1], logical[2]);

    let Some(opcode) = cfg.opcode_for_byte(opcode_byte) else {
        return Entity::byte(addr, physical, "Invalid Opcode");
    };

    let schema = opcode.params();
    let raw = [p1_byte, p2_byte];
    let mut params: [Option<ParamValue>; 2] = [None, None];
    for i in 0..2 {
        match schema[i] {
            Param::Reg8 => match cfg.register_for_byte(raw[i]) {
                Some(r) => params[i] = Some(ParamValue::Reg(r)),
                None => {
                    let msg = format!("{} Invalid Register", opcode.mnemonic());
                    return Entity::byte(addr, physical, msg);
                }
            },
            Param::Imm8 => params[i] = Some(ParamValue::Imm(raw[i])),
        }
    }

    let mut entity = Entity {
        kind: EntityKind::Code,
        address: addr,
        bytes: physical,
        opcode: Some(opcode),
        params,
        line_comment: String::new(),
        plate_comment: String::new(),
        changes_flow: false,
    };
    annotate(cfg, &mut entity);
    entity
}

fn annotate(cfg: &EncodingConfig, e: &mut Entity) {
    match e.opcode {
        Some(Opcode::Stk) => annotate_stk(e),
        Some(Opcode::Imm) => annotate_imm(e),
        Some(Opcode::Jmp) => annotate_jmp(cfg, e),
        Some(Opcode::Sys) => annotate_sys(cfg, e),
        _ => {}
    }
}

fn annotate_stk(e: &mut Entity) {
    let (Some(ParamValue::Reg(p1)), Some(ParamValue::Reg(p2))) = (e.params[0], e.params[1]) else {
        return;
    };
    e.line_comment = match (p1, p2) {
        (Register::N, Register::N) => "nop".to_string(),
        (_, Register::N) => format!("pop {p1}"),
        (Register::N, _) => format!("push {p2}"),
        _ => format!("{p1} = {p2}"),
    };
    if p1 == Register::I || p2 == Register::I {
        e.changes_flow = true;
    }
}

fn annotate_imm(e: &mut Entity) {
    let (Some(ParamValue::Reg(p1)), Some(ParamValue::Imm(p2))) = (e.params[0], e.params[1]) else {
        return;
    };
    if p1 == Register::I {
        e.line_comment = format!("JMP {:#x}", p2 as usize * 3);
        e.changes_flow = true;
    } else if (b' '..=b'~').contains(&p2) {
        e.line_comment = format!("'{}'", p2 as char);
    }
}

fn annotate_jmp(cfg: &EncodingConfig, e: &mut Entity) {
    e.changes_flow = true;
    if let Some(ParamValue::Imm(mask)) = e.params[0] {
        let flags: String = cfg.flags_in_mask(mask).iter().map(|f| f.letter()).collect();
        e.line_comment = format!("({flags})");
    }
}

fn annotate_sys(cfg: &EncodingConfig, e: &mut Entity) {
    let Some(ParamValue::Imm(call_byte)) = e.params[0] else {
        return;
    };
    e.line_comment = match cfg.syscall_for_byte(call_byte) {
        Some(call) => format!("{}()", call.name()),
        None => format!("Invalid number {call_byte:#x}"),
    };
}
