use std::collections::HashMap;

use crate::config::{EncodingConfig, Flag, Opcode, Param, Register};

use super::error::{err, AssembleError, AssembleErrorReason};
use super::token::{Token, TokenType};

/// One instruction's worth of work: its logical bytes, with any label
/// operands left as a sentinel (`0xff`) and recorded in `unresolved_labels`
/// so the link pass can patch them once every label's address is known.
#[derive(Clone, Debug, Default)]
pub(super) struct UnlinkedInstruction {
    pub tokens: Vec<Token>,
    pub bytes: [u8; 3],
    /// Labels defined immediately before this instruction (usually zero or one).
    pub labels: Vec<String>,
    /// logical byte index (0..3) -> label name (including leading `:`)
    pub unresolved_labels: HashMap<usize, String>,
}

const LABEL_SENTINEL: u8 = 0xff;

pub(super) fn parse_instruction(
    cfg: &EncodingConfig,
    tokens: &[Token],
    current_label: Option<String>,
) -> Result<UnlinkedInstruction, AssembleError> {
    let mut instr = UnlinkedInstruction { tokens: tokens.to_vec(), ..Default::default() };
    if let Some(label) = current_label {
        instr.labels.push(label);
    }

    if tokens.is_empty() {
        return Err(err(tokens, AssembleErrorReason::UnknownOpcode));
    }

    let head = tokens[0].text.as_str();

    match head {
        "PUSH" => {
            require_arity(tokens, 2)?;
            let r = register_byte(cfg, tokens, 1)?;
            let n = null_byte(cfg, tokens)?;
            instr.bytes = [opcode_byte(cfg, tokens, Opcode::Stk)?, n, r];
        }
        "POP" => {
            require_arity(tokens, 2)?;
            let r = register_byte(cfg, tokens, 1)?;
            let n = null_byte(cfg, tokens)?;
            instr.bytes = [opcode_byte(cfg, tokens, Opcode::Stk)?, r, n];
        }
        "NOP" => {
            require_arity(tokens, 1)?;
            let n = null_byte(cfg, tokens)?;
            instr.bytes = [opcode_byte(cfg, tokens, Opcode::Stk)?, n, n];
        }
        _ if head.starts_with("J_") => {
            require_arity(tokens, 2)?;
            let mask = pseudo_jmp_mask(cfg, head, tokens)?;
            let r = register_byte(cfg, tokens, 1)?;
            instr.bytes = [opcode_byte(cfg, tokens, Opcode::Jmp)?, mask, r];
        }
        "STM" if tokens.len() == 5 => {
            instr.bytes = parse_decorated(cfg, tokens, Opcode::Stm)?;
        }
        "LDM" if tokens.len() == 5 => {
            instr.bytes = parse_decorated(cfg, tokens, Opcode::Ldm)?;
        }
        "IMM" if tokens.len() == 3 && tokens[2].kind == TokenType::Label => {
            let r = register_byte(cfg, tokens, 1)?;
            instr.bytes = [opcode_byte(cfg, tokens, Opcode::Imm)?, r, LABEL_SENTINEL];
            instr.unresolved_labels.insert(2, tokens[2].text.clone());
        }
        "SYS" if tokens.len() == 3 && tokens[1].kind == TokenType::Sysname => {
            let call_byte = syscall_byte(cfg, tokens, 1)?;
            let r = register_byte(cfg, tokens, 2)?;
            instr.bytes = [opcode_byte(cfg, tokens, Opcode::Sys)?, call_byte, r];
        }
        _ => {
            instr.bytes = parse_generic(cfg, tokens)?;
        }
    }

    Ok(instr)
}

fn parse_decorated(cfg: &EncodingConfig, tokens: &[Token], op: Opcode) -> Result<[u8; 3], AssembleError> {
    // STM [r1] r2  -> tokens: STM [ r1 ] r2   (brackets on the *written* address)
    // LDM r1 [r2]  -> tokens: LDM r1 [ r2 ]   (brackets on the *read* address)
    let bracketed_first = tokens[1].kind == TokenType::SquareOpen && tokens[3].kind == TokenType::SquareClose;
    let bracketed_second = tokens[2].kind == TokenType::SquareOpen && tokens[4].kind == TokenType::SquareClose;

    let (addr_idx, value_idx) = match op {
        Opcode::Stm if bracketed_first => (2, 4),
        Opcode::Ldm if bracketed_second => (1, 3),
        _ if bracketed_first || bracketed_second => return Err(err(tokens, AssembleErrorReason::BracketMisuse)),
        _ => return Err(err(tokens, AssembleErrorReason::BracketMisuse)),
    };

    let addr_reg = register_byte(cfg, tokens, addr_idx)?;
    let value_reg = register_byte(cfg, tokens, value_idx)?;
    let opb = opcode_byte(cfg, tokens, op)?;
    match op {
        Opcode::Stm => Ok([opb, addr_reg, value_reg]),
        Opcode::Ldm => Ok([opb, value_reg, addr_reg]),
        _ => unreachable!("parse_decorated only ever called with Stm or Ldm"),
    }
}

fn parse_generic(cfg: &EncodingConfig, tokens: &[Token]) -> Result<[u8; 3], AssembleError> {
    let Some(opcode) = Opcode::from_mnemonic(&tokens[0].text) else {
        return Err(err(tokens, AssembleErrorReason::UnknownOpcode));
    };

    let schema = opcode.params();
    if tokens.len() - 1 != schema.len() {
        return Err(err(
            tokens,
            AssembleErrorReason::ArityMismatch { expected: schema.len(), got: tokens.len() - 1 },
        ));
    }

    let mut bytes = [opcode_byte(cfg, tokens, opcode)?, 0, 0];
    for (i, param) in schema.iter().enumerate() {
        bytes[i + 1] = match param {
            Param::Reg8 => register_byte(cfg, tokens, i + 1)?,
            Param::Imm8 => parse_hex_literal(cfg, tokens, i + 1)?,
        };
    }
    Ok(bytes)
}

fn require_arity(tokens: &[Token], expected: usize) -> Result<(), AssembleError> {
    if tokens.len() != expected {
        return Err(err(
            tokens,
            AssembleErrorReason::ArityMismatch { expected, got: tokens.len() },
        ));
    }
    Ok(())
}

fn register_byte(cfg: &EncodingConfig, tokens: &[Token], idx: usize) -> Result<u8, AssembleError> {
    let text = &tokens[idx].text;
    let mut chars = text.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return Err(err(tokens, AssembleErrorReason::UnknownRegister(text.clone())));
    };
    let reg = Register::ALL
        .into_iter()
        .find(|r| r.letter() == ch)
        .ok_or_else(|| err(tokens, AssembleErrorReason::UnknownRegister(text.clone())))?;
    cfg.byte_for_register(reg)
        .ok_or_else(|| err(tokens, AssembleErrorReason::UnknownRegister(text.clone())))
}

fn null_byte(cfg: &EncodingConfig, tokens: &[Token]) -> Result<u8, AssembleError> {
    cfg.byte_for_register(Register::N)
        .ok_or_else(|| err(tokens, AssembleErrorReason::UnknownRegister("N".to_string())))
}

fn opcode_byte(cfg: &EncodingConfig, tokens: &[Token], op: Opcode) -> Result<u8, AssembleError> {
    cfg.byte_for_opcode(op).ok_or_else(|| err(tokens, AssembleErrorReason::UnknownOpcode))
}

fn syscall_byte(cfg: &EncodingConfig, tokens: &[Token], idx: usize) -> Result<u8, AssembleError> {
    let text = &tokens[idx].text;
    let name = text.strip_suffix("()").unwrap_or(text);
    let call = crate::config::Syscall::from_name(name)
        .ok_or_else(|| err(tokens, AssembleErrorReason::UnknownSyscall(name.to_string())))?;
    cfg.byte_for_syscall(call)
        .ok_or_else(|| err(tokens, AssembleErrorReason::UnknownSyscall(name.to_string())))
}

fn pseudo_jmp_mask(cfg: &EncodingConfig, head: &str, tokens: &[Token]) -> Result<u8, AssembleError> {
    let flags = &head[2..];
    let mut mask = 0u8;
    for ch in flags.chars() {
        let flag = Flag::from_letter(ch).ok_or_else(|| err(tokens, AssembleErrorReason::UnknownFlag(ch)))?;
        let bit = cfg.byte_for_flag(flag).ok_or_else(|| err(tokens, AssembleErrorReason::UnknownFlag(ch)))?;
        mask |= bit;
    }
    Ok(mask)
}

fn parse_hex_literal(_cfg: &EncodingConfig, tokens: &[Token], idx: usize) -> Result<u8, AssembleError> {
    let text = &tokens[idx].text;
    let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
    u8::from_str_radix(digits, 16).map_err(|_| err(tokens, AssembleErrorReason::InvalidImmediate(text.clone())))
}
