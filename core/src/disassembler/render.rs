use super::entity::{Entity, EntityKind, ParamValue};

/// Render one entity as a listing line: sidebar (cursor + flow marker), hex
/// bytes, decoded body, and trailing comment.
pub(super) fn render_entity(e: &Entity, is_current: bool) -> String {
    let cursor = if is_current { ">>" } else { "  " };
    let flow = if e.changes_flow { "--" } else { "  " };
    let sidebar = format!("   {cursor} {flow} ");
    let hex: String = e.bytes.iter().map(|b| format!("{b:02X} ")).collect();

    let body = match e.kind {
        EntityKind::Byte => {
            let readable: String = e.bytes.iter().map(|b| format!("{b:02} ")).collect();
            format!("{:04X}  {hex}??    {readable}", e.address)
        }
        EntityKind::Code => {
            let opcode = e.opcode.expect("code entity always carries an opcode");
            format!(
                "{:04X}  {hex}{:<4}  {} {}",
                e.address,
                opcode.mnemonic(),
                fmt_param(e.params[0]),
                fmt_param(e.params[1]),
            )
        }
    };

    if e.line_comment.is_empty() {
        format!("{sidebar}{body}")
    } else {
        format!("{sidebar}{body}    {}", e.line_comment)
    }
}

fn fmt_param(p: Option<ParamValue>) -> String {
    match p {
        Some(ParamValue::Imm(v)) => format!("{v:#x}"),
        Some(ParamValue::Reg(r)) => r.to_string(),
        None => "??".to_string(),
    }
}
