//! Time-travel debugger: a `Machine` in `trap_mode_enabled`, a snapshot
//! stack for reverse-stepping, and a breakpoint set checked against the
//! post-increment instruction address.

mod hexdump;

use std::collections::HashSet;

use crate::config::{Flag, Register};
use crate::disassembler::Disassembler;
use crate::machine::{Machine, TrapType};

/// Register/flag readout, disassembly listing, and hexdump text a view
/// layer needs to render one debugger frame. Computed on demand, never
/// cached, so it's always consistent with the machine at the time of the call.
#[derive(Clone, Debug)]
pub struct DebuggerContext {
    pub registers: Vec<(Register, u8)>,
    pub flags: Vec<Flag>,
    pub disassembly: String,
    pub hexdump: String,
    pub stack_address: usize,
}

/// A view layer's contract with the debugger engine. `on_trap` fires after
/// every debugger operation that changes visible state: a step, a reverse
/// step, or the final step of a `continue` run.
pub trait DebuggerObserver {
    fn on_trap(&mut self, trap: TrapType, ctx: &DebuggerContext);
}

/// Owns the `Machine` directly — no shared ownership, no interior
/// mutability. The observer is invoked synchronously from inside
/// `step`/`reverse_step`/`continue_`, mirroring the original's trap-handler
/// callback without needing a reference cycle back into this struct.
pub struct Debugger {
    machine: Machine,
    snapshots: Vec<Vec<u8>>,
    breakpoints: HashSet<usize>,
    continue_until_break: bool,
    halted_on: Option<TrapType>,
    observer: Option<Box<dyn DebuggerObserver>>,
}

impl Debugger {
    pub fn new(mut machine: Machine) -> Self {
        machine.trap_mode_enabled = true;
        Debugger {
            machine,
            snapshots: Vec::new(),
            breakpoints: HashSet::new(),
            continue_until_break: false,
            halted_on: None,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl DebuggerObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn add_breakpoint(&mut self, byte_addr: usize) {
        self.breakpoints.insert(byte_addr);
    }

    pub fn remove_breakpoint(&mut self, byte_addr: usize) {
        self.breakpoints.remove(&byte_addr);
    }

    pub fn breakpoints(&self) -> impl Iterator<Item = &usize> {
        self.breakpoints.iter()
    }

    pub fn can_reverse_step(&self) -> bool {
        !self.snapshots.is_empty()
    }

    /// Set once the machine has stopped on a trap other than `trap_mode`;
    /// `step` and `continue_` become no-ops (besides re-notifying) until a
    /// `reverse_step` clears it.
    pub fn halted_on(&self) -> Option<TrapType> {
        self.halted_on
    }

    /// Snapshot vmem, then execute exactly one instruction.
    pub fn step(&mut self) {
        if self.halted_on.is_some() {
            self.notify_halted();
            return;
        }
        self.snapshots.push(self.machine.vmem().to_vec());
        let trap = self.machine.run_loop();
        if trap != TrapType::TrapMode {
            self.halted_on = Some(trap);
        }
        self.notify(trap);
    }

    /// Pop the last snapshot and restore it, clearing any halt. A no-op
    /// when there is nothing left to rewind to; check [`Self::can_reverse_step`] first.
    pub fn reverse_step(&mut self) {
        let Some(vmem) = self.snapshots.pop() else { return };
        self.machine.set_vmem(vmem);
        self.halted_on = None;
        self.notify(TrapType::TrapMode);
    }

    /// Tail-stepping loop: single-step until a breakpoint address is about
    /// to execute, or a non-`trap_mode` trap halts the machine. Every
    /// intermediate step still snapshots vmem, so reverse-stepping after a
    /// `continue_` walks back one instruction at a time.
    pub fn continue_(&mut self) {
        if self.halted_on.is_some() {
            self.notify_halted();
            return;
        }
        self.continue_until_break = true;
        while self.continue_until_break {
            self.snapshots.push(self.machine.vmem().to_vec());
            let trap = self.machine.run_loop();
            if trap != TrapType::TrapMode {
                self.continue_until_break = false;
                self.halted_on = Some(trap);
                self.notify(trap);
                break;
            }
            if self.is_at_breakpoint() {
                self.continue_until_break = false;
                self.notify(trap);
            }
        }
    }

    pub fn context(&self) -> DebuggerContext {
        let registers = [Register::A, Register::B, Register::C, Register::D, Register::S, Register::I, Register::F]
            .into_iter()
            .map(|r| (r, self.machine.read_register(r)))
            .collect();
        let flags = self.machine.config().flags_in_mask(self.machine.read_register(Register::F));
        let disassembly = Disassembler::new(&self.machine).disassemble();
        let hexdump = hexdump::render_hexdump(self.machine.vmem());
        let stack_address =
            self.machine.config().memory_base_address + self.machine.read_register(Register::S) as usize;
        DebuggerContext { registers, flags, disassembly, hexdump, stack_address }
    }

    fn is_at_breakpoint(&self) -> bool {
        let i = self.machine.read_register(Register::I);
        self.breakpoints.contains(&(i as usize * 3))
    }

    fn notify(&mut self, trap: TrapType) {
        if self.observer.is_none() {
            return;
        }
        let ctx = self.context();
        if let Some(observer) = &mut self.observer {
            observer.on_trap(trap, &ctx);
        }
    }

    fn notify_halted(&mut self) {
        if let Some(trap) = self.halted_on {
            self.notify(trap);
        }
    }
}
