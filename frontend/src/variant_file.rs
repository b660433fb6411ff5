//! Loads a variant from a TOML file into the same shape
//! [`EncodingConfig::builder`] expects. A variant can also be selected by
//! name from the `yan85-variants` registry; this module is only consulted
//! for a `path.toml` argument.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use yan85_core::config::{ConfigError, EncodingConfig, Flag, InstructionByte, Opcode, Register, Syscall};

#[derive(Debug, Deserialize)]
pub struct VariantFile {
    vmem_bytes: usize,
    code_base_address: usize,
    memory_base_address: usize,
    registers_base_address: usize,
    /// register letter ("A", "s", "N", ...) -> byte
    register_bytes: HashMap<String, u8>,
    /// register letter -> offset within the register file (omitted for N)
    #[serde(default)]
    registers_address_offset: HashMap<String, usize>,
    /// opcode mnemonic ("IMM", "ADD", ...) -> byte
    opcode_bytes: HashMap<String, u8>,
    /// flag letter ("N", "E", "Z", "G", "L") -> byte
    flag_bytes: HashMap<String, u8>,
    /// syscall name ("exit", "read", ...) -> byte
    #[serde(default)]
    syscall_bytes: HashMap<String, u8>,
    /// physical slot 0, 1, 2 -> logical slot name ("opcode", "param1", "param2")
    instruction_bytes_order: [String; 3],
}

#[derive(Debug)]
pub enum VariantFileError {
    Toml(toml::de::Error),
    Io(std::io::Error),
    UnknownRegisterLetter(String),
    UnknownOpcodeMnemonic(String),
    UnknownFlagLetter(String),
    UnknownSyscallName(String),
    UnknownInstructionSlot(String),
    MissingOffset(String),
    Config(ConfigError),
}

impl fmt::Display for VariantFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantFileError::Toml(e) => write!(f, "invalid variant TOML: {e}"),
            VariantFileError::Io(e) => write!(f, "could not read variant file: {e}"),
            VariantFileError::UnknownRegisterLetter(s) => write!(f, "'{s}' is not a register letter"),
            VariantFileError::UnknownOpcodeMnemonic(s) => write!(f, "'{s}' is not an opcode mnemonic"),
            VariantFileError::UnknownFlagLetter(s) => write!(f, "'{s}' is not a flag letter"),
            VariantFileError::UnknownSyscallName(s) => write!(f, "'{s}' is not a syscall name"),
            VariantFileError::UnknownInstructionSlot(s) => {
                write!(f, "'{s}' is not an instruction slot (want opcode/param1/param2)")
            }
            VariantFileError::MissingOffset(letter) => {
                write!(f, "register '{letter}' has no entry in registers_address_offset")
            }
            VariantFileError::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for VariantFileError {}

impl From<ConfigError> for VariantFileError {
    fn from(e: ConfigError) -> Self {
        VariantFileError::Config(e)
    }
}

fn register_by_letter(letter: &str) -> Option<Register> {
    let ch = letter.chars().next()?;
    if letter.chars().count() != 1 {
        return None;
    }
    Register::ALL.into_iter().find(|r| r.letter() == ch)
}

fn slot_by_name(name: &str) -> Option<InstructionByte> {
    match name {
        "opcode" => Some(InstructionByte::Opcode),
        "param1" => Some(InstructionByte::Param1),
        "param2" => Some(InstructionByte::Param2),
        _ => None,
    }
}

pub fn load(path: &Path) -> Result<EncodingConfig, VariantFileError> {
    let text = std::fs::read_to_string(path).map_err(VariantFileError::Io)?;
    let file: VariantFile = toml::from_str(&text).map_err(VariantFileError::Toml)?;
    file.into_encoding_config()
}

impl VariantFile {
    pub fn into_encoding_config(self) -> Result<EncodingConfig, VariantFileError> {
        let mut builder = EncodingConfig::builder()
            .vmem_bytes(self.vmem_bytes)
            .code_base_address(self.code_base_address)
            .memory_base_address(self.memory_base_address)
            .registers_base_address(self.registers_base_address);

        for (letter, byte) in &self.register_bytes {
            let reg = register_by_letter(letter).ok_or_else(|| VariantFileError::UnknownRegisterLetter(letter.clone()))?;
            if reg == Register::N {
                builder = builder.null_register(*byte);
                continue;
            }
            let offset = *self
                .registers_address_offset
                .get(letter)
                .ok_or_else(|| VariantFileError::MissingOffset(letter.clone()))?;
            builder = builder.register(*byte, reg, offset);
        }

        for (mnemonic, byte) in &self.opcode_bytes {
            let op = Opcode::from_mnemonic(mnemonic).ok_or_else(|| VariantFileError::UnknownOpcodeMnemonic(mnemonic.clone()))?;
            builder = builder.opcode(*byte, op);
        }

        for (letter, byte) in &self.flag_bytes {
            let ch = letter.chars().next().filter(|_| letter.chars().count() == 1);
            let flag = ch
                .and_then(Flag::from_letter)
                .ok_or_else(|| VariantFileError::UnknownFlagLetter(letter.clone()))?;
            builder = builder.flag(*byte, flag);
        }

        for (name, byte) in &self.syscall_bytes {
            let call = Syscall::from_name(name).ok_or_else(|| VariantFileError::UnknownSyscallName(name.clone()))?;
            builder = builder.syscall(*byte, call);
        }

        let mut order = [InstructionByte::Opcode; 3];
        for (i, name) in self.instruction_bytes_order.iter().enumerate() {
            order[i] = slot_by_name(name).ok_or_else(|| VariantFileError::UnknownInstructionSlot(name.clone()))?;
        }
        builder = builder.instruction_bytes_order(order);

        Ok(builder.build()?)
    }
}
