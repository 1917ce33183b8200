//! The `comet>` read-eval-print loop (spec.md §4.H).

use crate::commands::{self, Command};
use comet::exec::StepResult;
use comet::syscall::StdConsole;
use comet::word::signed;
use comet::{Machine, RunOutcome, Word};
use std::io::{self, Write};

/// Drives one interactive session against a `Machine`, the way the
/// teacher's `main.rs` drives a `Processor` from a `rustyline`-free stdin
/// loop, but with COMET's prefix-matched command table and its
/// "blank line repeats the previous command" convention instead of plain
/// assembly-source stepping.
pub struct Repl {
    machine: Machine,
    console: StdConsole,
    last_line: Option<String>,
    quiet: bool,
    /// Process exit code to use on a clean `quit`: 0 until the running
    /// program hits EXIT at least once, then 1 (spec.md §4.F/§6: EXIT
    /// aborts the program, not the REPL, but leaves a failure indication
    /// for the eventual process exit code).
    exit_code: i32,
}

impl Repl {
    pub fn new(machine: Machine, quiet: bool) -> Repl {
        Repl {
            machine,
            console: StdConsole,
            last_line: None,
            quiet,
            exit_code: 0,
        }
    }

    pub fn run(&mut self) -> i32 {
        if !self.quiet {
            println!("comet — a 16-bit pedagogical machine");
        }

        let stdin = io::stdin();
        loop {
            print!("comet> ");
            if io::stdout().flush().is_err() {
                return 1;
            }

            let mut line = String::new();
            if stdin.read_line(&mut line).unwrap_or(0) == 0 {
                println!();
                return 0;
            }
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            let line = line.as_str();

            let effective = if line.trim().is_empty() {
                match &self.last_line {
                    Some(prev) => prev.clone(),
                    None => continue,
                }
            } else {
                line.to_string()
            };

            let tokens: Vec<&str> = effective.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }

            match commands::parse(&tokens) {
                Ok((Command::Quit, _)) => return self.exit_code,
                Ok((command, list)) => {
                    self.execute(command);
                    if list {
                        self.print_state();
                    }
                }
                Err(message) => eprintln!("comet: {}", message),
            }

            self.last_line = Some(effective);
        }
    }

    /// EXIT during `run`/`step` aborts only the running program (spec.md
    /// §5): the REPL keeps reading commands, but `exit_code` is latched so
    /// a later `quit` reports failure.
    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => unreachable!("handled by the caller"),
            Command::Run => match self.machine.run(&mut self.console) {
                RunOutcome::Breakpoint(adr, index) => {
                    println!("breakpoint {} at #{:04X}", index, adr)
                }
                RunOutcome::Exited => {
                    println!("program exited");
                    self.exit_code = 1;
                }
                RunOutcome::Illegal(err) => eprintln!("comet: {}", err),
            },
            Command::Step(n) => {
                for _ in 0..n {
                    match self.machine.step(&mut self.console) {
                        Ok(StepResult::Exited) => {
                            println!("program exited");
                            self.exit_code = 1;
                            break;
                        }
                        Ok(StepResult::Continue) => {}
                        Err(err) => {
                            eprintln!("comet: {}", err);
                            break;
                        }
                    }
                }
            }
            Command::Break(adr) => {
                // Duplicate addresses are allowed; each copy gets its own
                // index and is deleted independently (spec design note on
                // breakpoints).
                self.machine.cpu.bp.push(adr);
                let index = self.machine.cpu.bp.len();
                println!("breakpoint {} at #{:04X}", index, adr);
            }
            Command::Del(Some(index)) => {
                if index >= 1 && index <= self.machine.cpu.bp.len() {
                    self.machine.cpu.bp.remove(index - 1);
                    println!("deleted breakpoint {}", index);
                } else {
                    eprintln!("comet: no such breakpoint: {}", index);
                }
            }
            Command::Del(None) => {
                print!("Delete all breakpoints? (y or n) ");
                let _ = io::stdout().flush();
                let mut answer = String::new();
                if io::stdin().read_line(&mut answer).unwrap_or(0) > 0
                    && answer.trim().eq_ignore_ascii_case("y")
                {
                    self.machine.cpu.bp.clear();
                }
            }
            Command::Info => {
                if self.machine.cpu.bp.is_empty() {
                    println!("no breakpoints set");
                } else {
                    for (i, adr) in self.machine.cpu.bp.iter().enumerate() {
                        println!("{}: #{:04X}", i + 1, adr);
                    }
                }
            }
            Command::Print => self.print_state(),
            Command::Dump(adr) => self.dump(adr.unwrap_or(self.machine.cpu.pc)),
            Command::Stack => self.dump(self.machine.cpu.gr4),
            Command::File(path) => match self.machine.load_file(&path) {
                Ok(()) => println!("loaded {}", path),
                Err(err) => eprintln!("comet: {}: {}", path, err),
            },
            Command::Jump(adr) => self.machine.cpu.pc = adr,
            Command::Memory(adr, val) => self.machine.memory.write(adr, val),
            Command::Disasm(adr) => self.disasm(adr.unwrap_or(self.machine.cpu.pc)),
            Command::Help => print_help(),
        }
    }

    fn print_state(&self) {
        let cpu = &self.machine.cpu;
        let (mnem, operand, _) = comet::parse(&self.machine.memory, cpu.pc);
        println!("PC  #{:04X}  {} {}", cpu.pc, mnem, operand);
        for i in 0..4u16 {
            let v = cpu.gr(i);
            println!("GR{} #{:04X} {:6}", i, v, signed(v));
        }
        println!("GR4 #{:04X} {:6}", cpu.gr4, signed(cpu.gr4));
        println!("FR  {:?}", cpu.fr);
    }

    fn dump(&self, start: Word) {
        const ROWS: u16 = 16;
        const COLS: u16 = 8;
        for row in 0..ROWS {
            let base = start.wrapping_add(row * COLS);
            print!("#{:04X}: ", base);
            let mut ascii = String::new();
            for col in 0..COLS {
                let v = self.machine.memory.read(base.wrapping_add(col));
                print!("{:04X} ", v);
                let lo = (v & 0xFF) as u8;
                ascii.push(if (0x20..0x7F).contains(&lo) { lo as char } else { '.' });
            }
            println!(" {}", ascii);
        }
    }

    fn disasm(&self, start: Word) {
        let mut pc = start;
        for _ in 0..16 {
            let (mnem, operand, size) = comet::parse(&self.machine.memory, pc);
            println!("#{:04X}: {:<5} {}", pc, mnem, operand);
            pc = pc.wrapping_add(size);
        }
    }
}

fn print_help() {
    println!("run (r)              run until breakpoint, illegal instruction, or exit");
    println!("step (s) [n]         execute n instructions (default 1)");
    println!("break (b) adr        set a breakpoint");
    println!("del (de) [i]         delete breakpoint i, or all with no argument");
    println!("info (i)             list breakpoints");
    println!("print (p)            show PC, GR0-GR4, FR");
    println!("dump (du) [adr]      show 128 words starting at adr (default PC)");
    println!("stack (st)           show 128 words starting at GR4");
    println!("file (f) path        load an object file");
    println!("jump (j) adr         set PC");
    println!("memory (m) adr val   write one word");
    println!("disasm (di) [adr]    disassemble 16 instructions starting at adr (default PC)");
    println!("help (h)             show this text");
    println!("quit (q)             leave the debugger");
}
