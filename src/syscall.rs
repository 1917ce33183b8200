//! The IN/OUT/EXIT system-call trap (spec.md §4.F).
//!
//! I/O is reached only through the `Console` trait, the way the teacher
//! decouples memory writes from an `IOHandler` in `src/memory/io.rs`: the
//! executor core never touches `std::io` directly, which keeps `step`/`run`
//! unit-testable with an in-memory console instead of real stdin/stdout.

use super::constants::IN_LINE_LIMIT;
use super::memory::Memory;
use super::Word;
use std::io;

pub trait Console {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
    fn write_line(&mut self, prefix: &str, text: &str) -> io::Result<()>;
}

/// Console backed by the process's real standard streams.
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        use std::io::Write;
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn write_line(&mut self, prefix: &str, text: &str) -> io::Result<()> {
        println!("{}{}", prefix, text);
        Ok(())
    }
}

/// Outcome of the trap: EXIT halts the running program; IN/OUT resume it.
pub enum SyscallOutcome {
    Resumed,
    Exited,
}

/// Address of one of the three syscall magic addresses, already matched by
/// the caller; dispatches to IN, OUT, or EXIT.
pub enum SyscallKind {
    In,
    Out,
    Exit,
}

/// Runs one syscall trap. `gr4` is the caller's stack pointer on entry:
/// `mem[gr4]` is CALL's return address, `mem[gr4+1]`/`mem[gr4+2]` are the
/// two argument words (themselves addresses, per the calling convention).
pub fn handle(
    kind: SyscallKind,
    memory: &mut Memory,
    pc: &mut Word,
    gr4: &mut Word,
    console: &mut dyn Console,
) -> io::Result<SyscallOutcome> {
    match kind {
        SyscallKind::Exit => Ok(SyscallOutcome::Exited),
        SyscallKind::In => {
            let arg1 = memory.read(gr4.wrapping_add(1));
            let arg2 = memory.read(gr4.wrapping_add(2));

            let mut line = console.read_line("IN > ")?;
            line.truncate(IN_LINE_LIMIT);

            memory.write(arg1, line.len() as Word);
            for (i, byte) in line.bytes().enumerate() {
                memory.write(arg2.wrapping_add(i as Word), byte as Word);
            }

            restore_from_trap(memory, pc, gr4);
            Ok(SyscallOutcome::Resumed)
        }
        SyscallKind::Out => {
            let arg1 = memory.read(gr4.wrapping_add(1));
            let arg2 = memory.read(gr4.wrapping_add(2));

            let length = memory.read(arg1);
            let mut text = String::with_capacity(length as usize);
            for n in 0..length {
                text.push(memory.read(arg2.wrapping_add(n)) as u8 as char);
            }
            console.write_line("OUT> ", &text)?;

            restore_from_trap(memory, pc, gr4);
            Ok(SyscallOutcome::Resumed)
        }
    }
}

fn restore_from_trap(memory: &Memory, pc: &mut Word, gr4: &mut Word) {
    *pc = memory.read(*gr4);
    *gr4 = gr4.wrapping_add(1);
}

#[cfg(test)]
pub struct BufferConsole {
    pub input: std::collections::VecDeque<String>,
    pub output: Vec<String>,
}

#[cfg(test)]
impl BufferConsole {
    pub fn new(lines: &[&str]) -> BufferConsole {
        BufferConsole {
            input: lines.iter().map(|s| s.to_string()).collect(),
            output: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Console for BufferConsole {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        Ok(self.input.pop_front().unwrap_or_default())
    }

    fn write_line(&mut self, prefix: &str, text: &str) -> io::Result<()> {
        self.output.push(format!("{}{}", prefix, text));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_then_out_echoes_the_line() {
        let mut memory = Memory::new();
        let mut console = BufferConsole::new(&["hello"]);

        // Caller's frame: return address, arg1 (len-out addr), arg2 (buf addr).
        let mut gr4: Word = 0x1000;
        memory.write(gr4, 0x0050); // return address
        memory.write(gr4.wrapping_add(1), 0x2000); // arg1: length out-param
        memory.write(gr4.wrapping_add(2), 0x2100); // arg2: buffer

        let mut pc: Word = 0xFFF0;
        handle(SyscallKind::In, &mut memory, &mut pc, &mut gr4, &mut console).unwrap();

        assert_eq!(pc, 0x0050);
        assert_eq!(gr4, 0x1001);
        assert_eq!(memory.read(0x2000), 5);
        assert_eq!(memory.read(0x2100), b'h' as Word);
        assert_eq!(memory.read(0x2104), b'o' as Word);

        // OUT reuses arg1/arg2, which the callee must not have popped.
        let mut gr4b: Word = 0x1001;
        memory.write(gr4b, 0x0060);
        memory.write(gr4b.wrapping_add(1), 0x2000);
        memory.write(gr4b.wrapping_add(2), 0x2100);
        let mut pc2: Word = 0xFFF2;
        handle(SyscallKind::Out, &mut memory, &mut pc2, &mut gr4b, &mut console).unwrap();

        assert_eq!(console.output, vec!["OUT> hello".to_string()]);
        assert_eq!(pc2, 0x0060);
    }

    #[test]
    fn exit_reports_exited_without_touching_state() {
        let mut memory = Memory::new();
        let mut console = BufferConsole::new(&[]);
        let mut pc: Word = 0xFFF4;
        let mut gr4: Word = 0x1000;
        let outcome = handle(SyscallKind::Exit, &mut memory, &mut pc, &mut gr4, &mut console).unwrap();
        assert!(matches!(outcome, SyscallOutcome::Exited));
        assert_eq!(pc, 0xFFF4);
        assert_eq!(gr4, 0x1000);
    }
}
