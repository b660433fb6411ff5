use yan85_core::assembler::AssembleErrorReason;
use yan85_core::config::InstructionByte;
use yan85_core::config::Register;
use yan85_core::machine::Machine;
use yan85_variants::default;

fn assembler(cfg: &yan85_core::config::EncodingConfig) -> yan85_core::assembler::Assembler<'_> {
    yan85_core::assembler::Assembler::new(cfg)
}

#[test]
fn unknown_opcode_reports_reason_and_tokens() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let err = asm.assemble("FROB A B\n").unwrap_err();
    assert_eq!(err.reason, AssembleErrorReason::UnknownOpcode);
    assert_eq!(err.tokens[0].text, "FROB");
}

#[test]
fn arity_mismatch_is_reported() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let err = asm.assemble("ADD A\n").unwrap_err();
    assert_eq!(err.reason, AssembleErrorReason::ArityMismatch { expected: 2, got: 1 });
}

#[test]
fn bracket_on_wrong_operand_is_an_error() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let err = asm.assemble("STM A [B]\n").unwrap_err();
    assert_eq!(err.reason, AssembleErrorReason::BracketMisuse);
}

#[test]
fn unknown_flag_letter_is_reported() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let err = asm.assemble("J_Q A\n").unwrap_err();
    assert_eq!(err.reason, AssembleErrorReason::UnknownFlag('Q'));
}

#[test]
fn duplicate_label_is_a_link_error() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let err = asm.assemble(":start\nNOP\n:start\nNOP\n").unwrap_err();
    assert_eq!(err.reason, AssembleErrorReason::DuplicateLabel(":start".to_string()));
}

#[test]
fn unresolved_label_is_a_link_error() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let err = asm.assemble("IMM A :nowhere\n").unwrap_err();
    assert_eq!(err.reason, AssembleErrorReason::UnknownLabel(":nowhere".to_string()));
}

/// Invariant 7: assemble-then-disassemble round-trip for non-pseudo-op
/// source. The byte sequence the assembler emits decodes back to the same
/// opcode and operand fields via the disassembler.
#[test]
fn assemble_then_disassemble_round_trips() {
    let cfg = default::build();
    let asm = assembler(&cfg);
    let bytes = asm.assemble("IMM A 0x9\nADD A B\nCMP A B\n").unwrap();

    let mut m = Machine::new(cfg.clone());
    let dump: String = bytes.iter().map(|b| format!("{b:02x} ")).collect();
    m.load_code(&dump).unwrap();

    let entities = yan85_core::disassembler::Disassembler::new(&m).entities();
    assert_eq!(entities[0].opcode, Some(yan85_core::config::Opcode::Imm));
    assert_eq!(entities[1].opcode, Some(yan85_core::config::Opcode::Add));
    assert_eq!(entities[2].opcode, Some(yan85_core::config::Opcode::Cmp));
}

#[test]
fn assembler_respects_variant_physical_order() {
    use yan85_core::config::{Flag, Opcode};
    let cfg = yan85_core::config::EncodingConfig::builder()
        .vmem_bytes(16)
        .code_base_address(0)
        .memory_base_address(0)
        .registers_base_address(8)
        .null_register(0x00)
        .register(0x10, Register::A, 0x00)
        .opcode(0x40, Opcode::Imm)
        .flag(0x01, Flag::N)
        .instruction_bytes_order([InstructionByte::Param1, InstructionByte::Opcode, InstructionByte::Param2])
        .build()
        .unwrap();
    let asm = assembler(&cfg);
    let bytes = asm.assemble("IMM A 0x5\n").unwrap();
    assert_eq!(bytes, vec![0x10, 0x40, 0x05]);
}
