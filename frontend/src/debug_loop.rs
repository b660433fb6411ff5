//! A line-oriented stand-in for an interactive key surface: each line of
//! stdin is exactly one debugger operation, so control returns to the
//! caller after each one, the same way a keystroke would in a real TUI.
//! Rendering is plain `println!` — the rendered TUI this mirrors is an
//! external collaborator, not something this crate builds.

use std::io::{self, BufRead, Write};

use yan85_core::debugger::{Debugger, DebuggerContext, DebuggerObserver};
use yan85_core::machine::TrapType;

struct PrintObserver;

impl DebuggerObserver for PrintObserver {
    fn on_trap(&mut self, trap: TrapType, ctx: &DebuggerContext) {
        render(trap, ctx);
    }
}

fn render(trap: TrapType, ctx: &DebuggerContext) {
    println!("-- trap: {trap} --");
    let regs: String = ctx.registers.iter().map(|(r, v)| format!("{r}={v:#04x} ")).collect();
    println!("{regs}flags={:?}", ctx.flags);
    println!("{}", ctx.disassembly);
}

/// Runs the interactive command loop until `q`/EOF. Commands: `s` step,
/// `r` reverse-step, `c` continue, `x` context, `q` quit.
pub fn run(mut debugger: Debugger) {
    debugger.set_observer(PrintObserver);
    println!("{}", render_context(&debugger.context()));

    let stdin = io::stdin();
    loop {
        print!("(yan85-dbg) ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        match line.trim() {
            "s" | "step" => debugger.step(),
            "r" | "reverse_step" => {
                if debugger.can_reverse_step() {
                    debugger.reverse_step();
                } else {
                    eprintln!("nothing to reverse-step past");
                }
            }
            "c" | "continue" => debugger.continue_(),
            "x" | "context" => println!("{}", render_context(&debugger.context())),
            "q" | "quit" => break,
            "" => continue,
            other => eprintln!("unrecognized command: {other:?} (expected s/r/c/x/q)"),
        }
    }
}

fn render_context(ctx: &DebuggerContext) -> String {
    let regs: String = ctx.registers.iter().map(|(r, v)| format!("{r}={v:#04x} ")).collect();
    format!("{regs}flags={:?}\n{}", ctx.flags, ctx.disassembly)
}
