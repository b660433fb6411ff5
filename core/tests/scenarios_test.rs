//! Worked end-to-end scenarios (S1-S6), run against the default variant.

use yan85_core::config::Register;
use yan85_core::machine::Machine;
use yan85_variants::default;

fn machine() -> Machine {
    Machine::new(default::build())
}

fn load_hex(m: &mut Machine, bytes: &[u8]) {
    let dump: String = bytes.iter().map(|b| format!("{b:02x} ")).collect();
    m.load_code(&dump).unwrap();
}

/// S1: IMM + ADD.
#[test]
fn s1_imm_add() {
    let mut m = machine();
    load_hex(&mut m, &[0x40, 0x10, 0x05, 0x40, 0x20, 0x03, 0x01, 0x10, 0x20]);
    m.run_loop();
    m.run_loop();
    m.run_loop();
    assert_eq!(m.read_register(Register::A), 0x08);
    assert_eq!(m.read_register(Register::B), 0x03);
}

/// S2: PUSH/POP.
#[test]
fn s2_push_pop() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let bytes = asm.assemble("IMM A 0x7\nPUSH A\nPOP B\n").unwrap();
    m.load_code(&bytes.iter().map(|b| format!("{b:02x} ")).collect::<String>()).unwrap();
    m.run_loop();
    m.run_loop();
    m.run_loop();
    assert_eq!(m.read_register(Register::B), 7);
    assert_eq!(m.read_register(Register::S), 0);
}

/// S3: CMP + taken JMP.
#[test]
fn s3_cmp_jmp_taken() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let source = "\
IMM A 0x1
IMM B 0x2
CMP A B
IMM C :tgt
J_L C
IMM A 0xff
:tgt
IMM A 0x55
";
    let bytes = asm.assemble(source).unwrap();
    m.load_code(&bytes.iter().map(|b| format!("{b:02x} ")).collect::<String>()).unwrap();
    for _ in 0..5 {
        m.run_loop();
    }
    assert_eq!(m.read_register(Register::A), 0x55);
}

/// S4: STM/LDM.
#[test]
fn s4_stm_ldm() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let source = "\
IMM A 0x10
IMM B 0x42
STM [A] B
IMM C 0x10
LDM D [C]
";
    let bytes = asm.assemble(source).unwrap();
    m.load_code(&bytes.iter().map(|b| format!("{b:02x} ")).collect::<String>()).unwrap();
    for _ in 0..5 {
        m.run_loop();
    }
    assert_eq!(m.read_register(Register::D), 0x42);
    assert_eq!(m.vmem()[0x300 + 0x10], 0x42);
}

/// S5: syscall read.
#[test]
fn s5_syscall_read() {
    let cfg = default::build();
    let mut m = Machine::new(cfg.clone());
    m.set_stdin(b"hi".to_vec());
    let asm = yan85_core::assembler::Assembler::new(&cfg);
    let source = "\
IMM A 0
IMM B 0
IMM C 0x2
SYS read() D
";
    let bytes = asm.assemble(source).unwrap();
    m.load_code(&bytes.iter().map(|b| format!("{b:02x} ")).collect::<String>()).unwrap();
    for _ in 0..4 {
        m.run_loop();
    }
    assert_eq!(m.read_register(Register::D), 2);
    assert_eq!(&m.vmem()[0x300..0x302], b"hi");
}

/// S6: reverse step restores vmem bit-for-bit.
#[test]
fn s6_reverse_step() {
    use yan85_core::debugger::Debugger;

    let mut m = machine();
    load_hex(&mut m, &[0x40, 0x10, 0x05, 0x40, 0x20, 0x03, 0x01, 0x10, 0x20]);
    let initial = m.vmem().to_vec();

    let mut dbg = Debugger::new(m);
    dbg.step();
    dbg.step();
    dbg.step();
    dbg.reverse_step();
    dbg.reverse_step();
    dbg.reverse_step();

    assert_eq!(dbg.machine().vmem(), initial.as_slice());
}
