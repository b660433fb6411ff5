//! The machine's core invariants, each pinned down with a direct test (the
//! randomized, cross-program version of these same properties lives in the
//! `conformance` crate).

use yan85_core::config::Register;
use yan85_core::debugger::Debugger;
use yan85_core::machine::Machine;
use yan85_variants::default;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x} ")).collect()
}

/// 1. After any instruction except a taken JMP, `i` increases by exactly 1 mod 256.
#[test]
fn instruction_counter_advances_by_one() {
    let mut m = Machine::new(default::build());
    m.load_code(&hex(&[0x01, 0x10, 0x20])).unwrap(); // ADD A B
    assert_eq!(m.read_register(Register::I), 0);
    m.run_loop();
    assert_eq!(m.read_register(Register::I), 1);
}

/// 2. After a taken JMP, `i` equals the value stored in the target register
/// before dispatch.
#[test]
fn taken_jmp_sets_i_to_target_register_value() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    // IMM C 0x2f ; J_ C  (mask 0 => unconditional)
    let bytes = asm.assemble("IMM C 0x2f\nJ_ C\n").unwrap();
    m.load_code(&hex(&bytes)).unwrap();
    m.run_loop();
    m.run_loop();
    assert_eq!(m.read_register(Register::I), 0x2f);
}

/// 3. `STK r r` leaves `s` unchanged and copies `r` to itself.
#[test]
fn stk_same_register_is_a_copy_with_unchanged_stack_pointer() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let bytes = asm.assemble("IMM A 0x9\nIMM s 0x3\nSTK A A\n").unwrap();
    m.load_code(&hex(&bytes)).unwrap();
    m.run_loop();
    m.run_loop();
    let s_before = m.read_register(Register::S);
    m.run_loop();
    assert_eq!(m.read_register(Register::A), 0x9);
    assert_eq!(m.read_register(Register::S), s_before);
}

/// 4. `STK N N` leaves `s` and memory unchanged.
#[test]
fn stk_null_null_is_a_true_noop() {
    let mut m = Machine::new(default::build());
    m.load_code(&hex(&[0x10, 0x00, 0x00])).unwrap(); // STK N N
    let before = m.vmem().to_vec();
    m.run_loop();
    let after = m.vmem().to_vec();
    // only the instruction counter's register byte may differ
    let i_offset = 0x400 + 0x05;
    for (idx, (b, a)) in before.iter().zip(after.iter()).enumerate() {
        if idx != i_offset {
            assert_eq!(b, a, "byte at {idx:#x} changed under STK N N");
        }
    }
}

/// 5. PUSH r; POP r at offset 0 leaves vmem identical except the transient
/// stack slot.
#[test]
fn push_then_pop_round_trips() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let bytes = asm.assemble("IMM A 0x42\nPUSH A\nPOP A\n").unwrap();
    m.load_code(&hex(&bytes)).unwrap();
    m.run_loop();
    let before_push = m.vmem().to_vec();
    m.run_loop(); // PUSH
    m.run_loop(); // POP
    assert_eq!(m.read_register(Register::A), 0x42);
    // stack pointer returns to its pre-push value
    assert_eq!(m.read_register(Register::S), before_push[0x400 + 0x04]);
}

/// 6. `CMP r1 r2` sets exactly the flags the spec defines.
#[test]
fn cmp_sets_exact_flag_set() {
    let cfg = default::build();
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let cases: &[(u8, u8, &[yan85_core::config::Flag])] = &[
        (1, 2, &[yan85_core::config::Flag::N, yan85_core::config::Flag::L]),
        (2, 1, &[yan85_core::config::Flag::N, yan85_core::config::Flag::G]),
        (5, 5, &[yan85_core::config::Flag::E]),
        (0, 0, &[yan85_core::config::Flag::E, yan85_core::config::Flag::Z]),
    ];
    for &(a, b, expected) in cases {
        let mut m = Machine::new(cfg.clone());
        let src = format!("IMM A {a:#x}\nIMM B {b:#x}\nCMP A B\n");
        let bytes = asm.assemble(&src).unwrap();
        m.load_code(&hex(&bytes)).unwrap();
        m.run_loop();
        m.run_loop();
        m.run_loop();
        let mask = m.read_register(Register::F);
        let mut got = cfg.flags_in_mask(mask);
        got.sort_by_key(|f| f.letter());
        let mut want: Vec<_> = expected.to_vec();
        want.sort_by_key(|f| f.letter());
        assert_eq!(got, want, "CMP {a:#x} {b:#x}");
    }
}

/// 8. Under `trap_mode_enabled`, every `run_loop` call executes exactly one
/// instruction.
#[test]
fn debugger_trap_mode_executes_one_instruction_per_step() {
    let mut m = Machine::new(default::build());
    m.load_code(&hex(&[0x40, 0x10, 0x01, 0x40, 0x10, 0x02, 0x40, 0x10, 0x03])).unwrap();
    let mut dbg = Debugger::new(m);
    dbg.step();
    assert_eq!(dbg.machine().read_register(Register::A), 1);
    dbg.step();
    assert_eq!(dbg.machine().read_register(Register::A), 2);
    dbg.step();
    assert_eq!(dbg.machine().read_register(Register::A), 3);
}

/// 9. `reverse_step` after `step` restores vmem bit-for-bit.
#[test]
fn reverse_step_restores_vmem_exactly() {
    let mut m = Machine::new(default::build());
    m.load_code(&hex(&[0x40, 0x10, 0x07])).unwrap(); // IMM A 0x7
    let before = m.vmem().to_vec();
    let mut dbg = Debugger::new(m);
    dbg.step();
    assert_ne!(dbg.machine().vmem(), before.as_slice());
    dbg.reverse_step();
    assert_eq!(dbg.machine().vmem(), before.as_slice());
}

/// 10. All arithmetic wraps at 256.
#[test]
fn add_wraps_at_256() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let bytes = asm.assemble("IMM A 0xff\nIMM B 0x2\nADD A B\n").unwrap();
    m.load_code(&hex(&bytes)).unwrap();
    m.run_loop();
    m.run_loop();
    m.run_loop();
    assert_eq!(m.read_register(Register::A), 1);
}

/// Invalid opcode/register bytes trap and halt instead of silently recovering.
#[test]
fn invalid_opcode_traps() {
    let mut m = Machine::new(default::build());
    m.load_code(&hex(&[0xfe, 0x00, 0x00])).unwrap();
    let trap = m.run_loop();
    assert_eq!(trap, yan85_core::machine::TrapType::InvalidOpcode);
}

#[test]
fn out_of_range_memory_access_traps_and_discards() {
    use yan85_core::config::{EncodingConfig, InstructionByte};

    // A deliberately tiny vmem, so a memory offset near the top of the u8
    // range lands outside it and traps.
    let cfg = EncodingConfig::builder()
        .vmem_bytes(4)
        .code_base_address(0)
        .memory_base_address(0)
        .registers_base_address(0)
        .null_register(0x00)
        .register(0x10, Register::A, 0x00)
        .opcode(0x40, yan85_core::config::Opcode::Imm)
        .flag(0x01, yan85_core::config::Flag::N)
        .instruction_bytes_order([InstructionByte::Opcode, InstructionByte::Param1, InstructionByte::Param2])
        .build()
        .unwrap();

    let mut m = Machine::new(cfg);
    assert_eq!(m.read_mem(0xff), 0);
    assert_eq!(m.trap_type(), Some(yan85_core::machine::TrapType::InvalidRead));

    let mut m2 = Machine::new(EncodingConfig::builder()
        .vmem_bytes(4)
        .code_base_address(0)
        .memory_base_address(0)
        .registers_base_address(0)
        .null_register(0x00)
        .register(0x10, Register::A, 0x00)
        .opcode(0x40, yan85_core::config::Opcode::Imm)
        .flag(0x01, yan85_core::config::Flag::N)
        .instruction_bytes_order([InstructionByte::Opcode, InstructionByte::Param1, InstructionByte::Param2])
        .build()
        .unwrap());
    m2.write_mem(0xff, 0x42);
    assert_eq!(m2.trap_type(), Some(yan85_core::machine::TrapType::InvalidWrite));
    // the write was discarded: no byte in the tiny vmem equals the value written
    assert!(!m2.vmem().contains(&0x42));
}
