//! The yan85 emulator: a flat byte buffer, an [`EncodingConfig`], and a
//! fetch-execute loop.

mod error;
mod ops;
mod trap;

pub use error::MachineError;
pub use trap::TrapType;

use crate::config::{EncodingConfig, Flag, Register};

/// Owns vmem, the variant config, and the current trap state. Registers,
/// data, and code all live in the same flat buffer: a register write is
/// observably a byte edit at a known offset, and this is intentional.
pub struct Machine {
    vmem: Vec<u8>,
    config: EncodingConfig,
    trap_halt: bool,
    trap_type: Option<TrapType>,
    /// When set, `run_loop` executes exactly one instruction before trapping.
    pub trap_mode_enabled: bool,
    stdin_buffer: Vec<u8>,
    trap_handler: Option<Box<dyn FnMut(TrapType)>>,
}

impl Machine {
    pub fn new(config: EncodingConfig) -> Self {
        let vmem = vec![0u8; config.vmem_bytes];
        Machine {
            vmem,
            config,
            trap_halt: false,
            trap_type: None,
            trap_mode_enabled: false,
            stdin_buffer: Vec::new(),
            trap_handler: None,
        }
    }

    pub fn config(&self) -> &EncodingConfig {
        &self.config
    }

    pub fn vmem(&self) -> &[u8] {
        &self.vmem
    }

    /// Replace the whole vmem image, e.g. to restore a debugger snapshot.
    pub fn set_vmem(&mut self, vmem: Vec<u8>) {
        self.vmem = vmem;
    }

    pub fn set_stdin(&mut self, data: impl Into<Vec<u8>>) {
        self.stdin_buffer = data.into();
    }

    pub fn set_trap_handler(&mut self, handler: impl FnMut(TrapType) + 'static) {
        self.trap_handler = Some(Box::new(handler));
    }

    pub fn trap_type(&self) -> Option<TrapType> {
        self.trap_type
    }

    fn trap_halted(&self) -> bool {
        self.trap_halt
    }

    fn raise(&mut self, trap: TrapType) {
        self.trap_type = Some(trap);
        self.trap_halt = true;
    }

    /// Reset vmem to all zero, keeping the current config.
    pub fn reset_memory(&mut self) {
        self.vmem.iter_mut().for_each(|b| *b = 0);
    }

    /// Load a hex-dump code image at `code_base_address`.
    pub fn load_code(&mut self, code_dump: &str) -> Result<(), MachineError> {
        let mut bytes = Vec::new();
        for (line_no, raw_line) in code_dump.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            for token in line.split_whitespace() {
                let byte = u8::from_str_radix(token, 16).map_err(|_| MachineError::InvalidHexByte {
                    line: line_no + 1,
                    token: token.to_string(),
                })?;
                bytes.push(byte);
            }
        }
        let base = self.config.code_base_address;
        if base + bytes.len() > self.vmem.len() {
            return Err(MachineError::CodeDoesNotFit {
                needed: bytes.len(),
                base,
                vmem_bytes: self.vmem.len(),
            });
        }
        self.vmem[base..base + bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn read_register(&self, reg: Register) -> u8 {
        if reg == Register::N {
            return 0;
        }
        match self.config.register_offset(reg) {
            Some(offset) => self.vmem[self.config.registers_base_address + offset],
            None => 0,
        }
    }

    pub fn write_register(&mut self, reg: Register, value: u8) {
        if reg == Register::N {
            return;
        }
        if let Some(offset) = self.config.register_offset(reg) {
            let addr = self.config.registers_base_address + offset;
            if addr < self.vmem.len() {
                self.vmem[addr] = value;
            }
        }
    }

    /// Read one byte relative to `memory_base_address`. Out-of-range raises
    /// `invalid_read` and returns 0.
    pub fn read_mem(&mut self, offset: u8) -> u8 {
        let addr = self.config.memory_base_address + offset as usize;
        if addr >= self.vmem.len() {
            self.raise(TrapType::InvalidRead);
            return 0;
        }
        self.vmem[addr]
    }

    /// Write one byte relative to `memory_base_address`. Out-of-range raises
    /// `invalid_write` and discards the write.
    pub fn write_mem(&mut self, offset: u8, value: u8) {
        let addr = self.config.memory_base_address + offset as usize;
        if addr >= self.vmem.len() {
            self.raise(TrapType::InvalidWrite);
            return;
        }
        self.vmem[addr] = value;
    }

    fn resolve_reg(&mut self, byte: u8) -> Option<Register> {
        match self.config.register_for_byte(byte) {
            Some(reg) => Some(reg),
            None => {
                self.raise(TrapType::InvalidRegister);
                None
            }
        }
    }

    fn flag_bit(&self, flag: Flag) -> u8 {
        self.config.byte_for_flag(flag).unwrap_or(0)
    }

    /// Copy up to `n` bytes from the stdin buffer into memory starting at
    /// `buf_offset`, returning the actual count copied. The stdin buffer is
    /// never advanced between calls: repeated reads always restart at
    /// offset 0.
    pub fn read_from_stdin(&mut self, buf_offset: u8, n: u8) -> u8 {
        let take = (n as usize).min(self.stdin_buffer.len());
        let bytes = self.stdin_buffer[..take].to_vec();
        for (i, byte) in bytes.iter().enumerate() {
            let off = buf_offset.wrapping_add(i as u8);
            self.write_mem(off, *byte);
            if self.trap_halt {
                return i as u8;
            }
        }
        bytes.len() as u8
    }

    fn fetch3(&mut self, addr: usize) -> Option<[u8; 3]> {
        if addr + 3 > self.vmem.len() {
            self.raise(TrapType::InvalidRead);
            return None;
        }
        Some([self.vmem[addr], self.vmem[addr + 1], self.vmem[addr + 2]])
    }

    fn dispatch(&mut self, opcode_byte: u8, p1: u8, p2: u8) {
        use crate::config::Opcode::*;
        let Some(opcode) = self.config.opcode_for_byte(opcode_byte) else {
            self.raise(TrapType::InvalidOpcode);
            return;
        };
        match opcode {
            Imm => ops::imm(self, p1, p2),
            Add => ops::add(self, p1, p2),
            Stk => ops::stk(self, p1, p2),
            Stm => ops::stm(self, p1, p2),
            Ldm => ops::ldm(self, p1, p2),
            Cmp => ops::cmp(self, p1, p2),
            Jmp => ops::jmp(self, p1, p2),
            Sys => ops::sys(self, p1, p2),
        }
    }

    /// Fetch-execute cycle. Executes instructions until a
    /// trap halts the machine: under `trap_mode_enabled` that is always
    /// exactly one instruction; otherwise it runs to the next invalid
    /// access, invalid opcode/register, or `exit` syscall.
    ///
    /// The instruction counter is incremented *before* the opcode's effect
    /// runs, so a taken JMP observes the pre-incremented `i` and then
    /// overwrites it.
    pub fn run_loop(&mut self) -> TrapType {
        self.trap_halt = false;
        self.trap_type = None;

        loop {
            let pc = self.read_register(Register::I);
            let instr_addr = pc as usize * 3 + self.config.code_base_address;

            let Some(physical) = self.fetch3(instr_addr) else { break };
            let logical = self.config.physical_to_logical(physical);

            self.write_register(Register::I, pc.wrapping_add(1));
            self.dispatch(logical[0], logical[1], logical[2]);

            if self.trap_halt {
                break;
            }
            if self.trap_mode_enabled {
                self.raise(TrapType::TrapMode);
                break;
            }
        }

        let trap = self.trap_type.unwrap_or(TrapType::TrapMode);
        if let Some(handler) = &mut self.trap_handler {
            handler(trap);
        }
        trap
    }
}
