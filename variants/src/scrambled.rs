//! A variant with a different physical instruction byte order than
//! [`crate::default`], demonstrating that `instruction_bytes_order` — not a
//! hard-coded layout — is what the Machine/Assembler/Disassembler consult.
//! Byte assignments are otherwise identical to the default variant.

use yan85_core::config::{EncodingConfig, Flag, InstructionByte, Opcode, Register, Syscall};

pub fn build() -> EncodingConfig {
    EncodingConfig::builder()
        .vmem_bytes(1080)
        .code_base_address(0x000)
        .memory_base_address(0x300)
        .registers_base_address(0x400)
        .null_register(0x00)
        .register(0x10, Register::A, 0x00)
        .register(0x20, Register::B, 0x01)
        .register(0x02, Register::C, 0x02)
        .register(0x08, Register::D, 0x03)
        .register(0x04, Register::S, 0x04)
        .register(0x40, Register::I, 0x05)
        .register(0x01, Register::F, 0x06)
        .opcode(0x40, Opcode::Imm)
        .opcode(0x01, Opcode::Add)
        .opcode(0x10, Opcode::Stk)
        .opcode(0x08, Opcode::Stm)
        .opcode(0x02, Opcode::Ldm)
        .opcode(0x20, Opcode::Cmp)
        .opcode(0x04, Opcode::Jmp)
        .opcode(0x80, Opcode::Sys)
        .flag(0x01, Flag::N)
        .flag(0x02, Flag::E)
        .flag(0x04, Flag::Z)
        .flag(0x08, Flag::G)
        .flag(0x10, Flag::L)
        .syscall(0x01, Syscall::Open)
        .syscall(0x02, Syscall::ReadCode)
        .syscall(0x04, Syscall::ReadMemory)
        .syscall(0x08, Syscall::Write)
        .syscall(0x10, Syscall::Sleep)
        .syscall(0x20, Syscall::Exit)
        // param1 stored first, then the opcode, then param2 — physically
        // unrelated to the default's layout.
        .instruction_bytes_order([InstructionByte::Param1, InstructionByte::Opcode, InstructionByte::Param2])
        .build()
        .expect("scrambled variant is a well-formed config")
}
