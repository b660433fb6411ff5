use std::collections::HashMap;

use crate::config::EncodingConfig;

use super::error::{err, AssembleError, AssembleErrorReason};
use super::parse::UnlinkedInstruction;

/// Resolve every label reference and emit the final physical-order byte
/// stream. Labels are addresses (one per instruction slot), not byte
/// offsets: a reference resolves to `(defining_index + code_base_address) mod 256`.
pub(super) fn link(cfg: &EncodingConfig, unlinked: Vec<UnlinkedInstruction>) -> Result<Vec<u8>, AssembleError> {
    let mut label_index: HashMap<String, usize> = HashMap::new();
    for (idx, instr) in unlinked.iter().enumerate() {
        for label in &instr.labels {
            if label_index.insert(label.clone(), idx).is_some() {
                return Err(err(&instr.tokens, AssembleErrorReason::DuplicateLabel(label.clone())));
            }
        }
    }

    let mut out = Vec::with_capacity(unlinked.len() * 3);
    for instr in &unlinked {
        let mut logical = instr.bytes;
        for (&byte_idx, label) in &instr.unresolved_labels {
            let Some(&target_idx) = label_index.get(label) else {
                return Err(err(&instr.tokens, AssembleErrorReason::UnknownLabel(label.clone())));
            };
            let addr = (target_idx + cfg.code_base_address) % 256;
            logical[byte_idx] = addr as u8;
        }
        out.extend_from_slice(&cfg.logical_to_physical(logical));
    }
    Ok(out)
}
