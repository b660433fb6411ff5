//! Static disassembler: a pure function over `(Machine, comments)` that
//! renders the current memory image as annotated assembly by linear sweep.

mod decode;
mod entity;
mod render;

pub use entity::{Entity, EntityKind, ParamValue};

use std::collections::HashMap;

use crate::config::Register;
use crate::machine::Machine;

/// Walks a machine's vmem from `code_base_address` in 3-byte steps, turning
/// each slot into an [`Entity`]. Recursive-descent sweeping is a possible
/// future mode; linear sweep is the only contract today.
pub struct Disassembler<'m> {
    machine: &'m Machine,
    comments: HashMap<usize, String>,
}

impl<'m> Disassembler<'m> {
    pub fn new(machine: &'m Machine) -> Self {
        Disassembler { machine, comments: HashMap::new() }
    }

    /// Attach caller-supplied plate/inline comments keyed by address.
    pub fn with_comments(machine: &'m Machine, comments: HashMap<usize, String>) -> Self {
        Disassembler { machine, comments }
    }

    /// The decoded entities in address order, with no rendering applied.
    pub fn entities(&self) -> Vec<Entity> {
        let cfg = self.machine.config();
        let vmem = self.machine.vmem();
        let mut addr = cfg.code_base_address;
        let mut out = Vec::new();
        while addr + 3 <= vmem.len() {
            out.push(decode::decode_entity(cfg, vmem, addr));
            addr += 3;
        }
        out
    }

    /// Full annotated listing, with a `>>` cursor at the machine's current
    /// instruction and caller comments interleaved by address.
    pub fn disassemble(&self) -> String {
        let cfg = self.machine.config();
        let i = self.machine.read_register(Register::I);
        let current_addr = cfg.code_base_address + i as usize * 3;

        let mut out = String::new();
        for entity in self.entities() {
            if let Some(comment) = self.comments.get(&entity.address) {
                out.push_str("         ");
                out.push_str(comment);
                out.push('\n');
            }
            let is_current = entity.address == current_addr;
            out.push_str(&render::render_entity(&entity, is_current));
            out.push('\n');
        }
        out
    }
}
