//! Command table and dispatch (spec.md §4.H).

use crate::args::{parse_index, parse_word};
use comet::error::ArgError;
use comet::Word;

#[derive(Clone, Debug)]
pub enum Command {
    Run,
    Step(u32),
    Break(Word),
    Del(Option<usize>),
    Info,
    Print,
    Dump(Option<Word>),
    Stack,
    File(String),
    Jump(Word),
    Memory(Word, Word),
    Disasm(Option<Word>),
    Help,
    Quit,
}

/// One row of the command table: canonical name, and whether executing it
/// should auto-print CPU state afterward (spec.md §4.H, "list" entries).
struct Entry {
    name: &'static str,
    list: bool,
}

const TABLE: &[Entry] = &[
    Entry { name: "run", list: true },
    Entry { name: "step", list: true },
    Entry { name: "break", list: false },
    Entry { name: "del", list: false },
    Entry { name: "info", list: false },
    Entry { name: "print", list: false },
    Entry { name: "dump", list: false },
    Entry { name: "stack", list: false },
    Entry { name: "file", list: false },
    Entry { name: "jump", list: true },
    Entry { name: "memory", list: false },
    Entry { name: "disasm", list: false },
    Entry { name: "help", list: false },
    Entry { name: "quit", list: false },
];

/// Resolves a user-typed token to exactly one command name by prefix match.
/// Returns `None` when no command matches or more than one does (e.g. a
/// bare `"d"` is ambiguous between `del`/`dump`/`disasm`).
fn resolve(token: &str) -> Option<&'static str> {
    let lower = token.to_ascii_lowercase();
    let mut matches = TABLE.iter().filter(|e| e.name.starts_with(&lower));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first.name)
    }
}

fn is_list(name: &str) -> bool {
    TABLE.iter().find(|e| e.name == name).map_or(false, |e| e.list)
}

/// Parses one already-tokenized command line. Returns `(command, list)`
/// where `list` says whether CPU state should be auto-printed after
/// executing it.
pub fn parse(tokens: &[&str]) -> Result<(Command, bool), ArgError> {
    let head = tokens.first().ok_or(ArgError::Missing("command"))?;
    let name = resolve(head).ok_or_else(|| ArgError::Unknown(head.to_string()))?;
    let rest = &tokens[1..];
    let list = is_list(name);

    let command = match name {
        "run" => Command::Run,
        "step" => {
            let n = match rest.first() {
                Some(s) => parse_word(s)? as u32,
                None => 1,
            };
            Command::Step(n)
        }
        "break" => {
            let adr = rest.first().ok_or(ArgError::Missing("break address"))?;
            Command::Break(parse_word(adr)?)
        }
        "del" => match rest.first() {
            Some(s) => Command::Del(Some(parse_index(s)?)),
            None => Command::Del(None),
        },
        "info" => Command::Info,
        "print" => Command::Print,
        "dump" => match rest.first() {
            Some(s) => Command::Dump(Some(parse_word(s)?)),
            None => Command::Dump(None),
        },
        "stack" => Command::Stack,
        "file" => {
            let path = rest.first().ok_or(ArgError::Missing("file path"))?;
            Command::File((*path).to_string())
        }
        "jump" => {
            let adr = rest.first().ok_or(ArgError::Missing("jump address"))?;
            Command::Jump(parse_word(adr)?)
        }
        "memory" => {
            let adr = rest.first().ok_or(ArgError::Missing("memory address"))?;
            let val = rest.get(1).ok_or(ArgError::Missing("memory value"))?;
            Command::Memory(parse_word(adr)?, parse_word(val)?)
        }
        "disasm" => match rest.first() {
            Some(s) => Command::Disasm(Some(parse_word(s)?)),
            None => Command::Disasm(None),
        },
        "help" => Command::Help,
        "quit" => Command::Quit,
        _ => unreachable!("resolve() only returns names from TABLE"),
    };

    Ok((command, list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_forms_resolve_as_documented() {
        for (short, full) in [
            ("r", "run"),
            ("s", "step"),
            ("b", "break"),
            ("de", "del"),
            ("i", "info"),
            ("p", "print"),
            ("du", "dump"),
            ("st", "stack"),
            ("f", "file"),
            ("j", "jump"),
            ("m", "memory"),
            ("di", "disasm"),
            ("h", "help"),
            ("q", "quit"),
        ] {
            assert_eq!(resolve(short), Some(full), "short form {}", short);
        }
    }

    #[test]
    fn bare_d_is_ambiguous() {
        assert_eq!(resolve("d"), None);
    }

    #[test]
    fn step_defaults_to_one() {
        let (cmd, list) = parse(&["step"]).unwrap();
        assert!(matches!(cmd, Command::Step(1)));
        assert!(list);
    }

    #[test]
    fn break_requires_address() {
        assert!(parse(&["break"]).is_err());
        let (cmd, _) = parse(&["break", "#0100"]).unwrap();
        assert!(matches!(cmd, Command::Break(0x0100)));
    }
}
