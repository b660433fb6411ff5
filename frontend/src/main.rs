mod debug_loop;
mod variant_file;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use yan85_core::config::EncodingConfig;
use yan85_core::debugger::Debugger;
use yan85_core::disassembler::Disassembler;
use yan85_core::machine::Machine;

/// yan85 toolchain: run, disassemble, assemble, and debug yan85 bytecode.
#[derive(Parser)]
#[command(name = "yan85", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a hex-dump image and run it to completion (or the first trap).
    Run {
        #[arg(long)]
        variant: String,
        hexdump_file: PathBuf,
    },
    /// Print the disassembly of a hex-dump image.
    Disasm {
        #[arg(long)]
        variant: String,
        hexdump_file: PathBuf,
    },
    /// Assemble yan85 source into a hex-dump image.
    Asm {
        #[arg(long)]
        variant: String,
        source_file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Enter the interactive time-travel debugger.
    Debug {
        #[arg(long)]
        variant: String,
        hexdump_file: PathBuf,
    },
    /// List variants registered in the yan85-variants crate.
    Variants,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { variant, hexdump_file } => cmd_run(&variant, &hexdump_file),
        Command::Disasm { variant, hexdump_file } => cmd_disasm(&variant, &hexdump_file),
        Command::Asm { variant, source_file, output } => cmd_asm(&variant, &source_file, output.as_deref()),
        Command::Debug { variant, hexdump_file } => cmd_debug(&variant, &hexdump_file),
        Command::Variants => cmd_variants(),
    }
}

/// Resolve `--variant` as, in order: a name registered in `yan85-variants`,
/// a direct path to a variant TOML file, or a name looked up under the
/// user's config directory (`$XDG_CONFIG_HOME/yan85/variants/<name>.toml`).
fn resolve_variant(name_or_path: &str) -> EncodingConfig {
    if let Some(entry) = yan85_variants::find(name_or_path) {
        return (entry.build)();
    }

    let direct = Path::new(name_or_path);
    if direct.exists() {
        return variant_file::load(direct).expect("failed to load variant file");
    }

    if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join("yan85").join("variants").join(format!("{name_or_path}.toml"));
        if candidate.exists() {
            return variant_file::load(&candidate).expect("failed to load variant file");
        }
    }

    let known: Vec<&str> = yan85_variants::all().iter().map(|e| e.name).collect();
    panic!("unknown variant {name_or_path:?}; registered variants: {known:?}, or pass a path to a variant TOML file");
}

fn load_machine(variant: &str, hexdump_file: &Path) -> Machine {
    let cfg = resolve_variant(variant);
    let mut machine = Machine::new(cfg);
    let dump = std::fs::read_to_string(hexdump_file).expect("failed to read hex-dump file");
    machine.load_code(&dump).expect("failed to load code image");
    machine
}

fn cmd_run(variant: &str, hexdump_file: &Path) {
    let mut machine = load_machine(variant, hexdump_file);
    let trap = machine.run_loop();
    println!("halted: {trap}");
    for r in [
        yan85_core::config::Register::A,
        yan85_core::config::Register::B,
        yan85_core::config::Register::C,
        yan85_core::config::Register::D,
        yan85_core::config::Register::S,
        yan85_core::config::Register::I,
        yan85_core::config::Register::F,
    ] {
        println!("{r} = {:#04x}", machine.read_register(r));
    }
}

fn cmd_disasm(variant: &str, hexdump_file: &Path) {
    let machine = load_machine(variant, hexdump_file);
    print!("{}", Disassembler::new(&machine).disassemble());
}

fn cmd_asm(variant: &str, source_file: &Path, output: Option<&Path>) {
    let cfg = resolve_variant(variant);
    let source = std::fs::read_to_string(source_file).expect("failed to read source file");
    let assembler = yan85_core::assembler::Assembler::new(&cfg);
    let bytes = match assembler.assemble(&source) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let dump: String = bytes.chunks(16).map(|row| row.iter().map(|b| format!("{b:02x} ")).collect::<String>() + "\n").collect();

    match output {
        Some(path) => std::fs::write(path, dump).expect("failed to write output file"),
        None => print!("{dump}"),
    }
}

fn cmd_debug(variant: &str, hexdump_file: &Path) {
    let machine = load_machine(variant, hexdump_file);
    debug_loop::run(Debugger::new(machine));
}

fn cmd_variants() {
    for entry in yan85_variants::all() {
        println!("{:<12} {}", entry.name, entry.description);
    }
}
