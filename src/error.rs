//! Error types for the executor and the object loader (spec.md §7).
//!
//! Shaped like the teacher's `processor::Error`: a small enum, a manual
//! `Display`, and `std::error::Error` so callers can propagate with `?` and
//! format with `{}` uniformly.

use super::Word;
use std::error::Error as StdError;
use std::fmt;
use util::ParseError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExecError {
    /// The opcode at `pc` is not in the opcode table and `pc` is not a
    /// syscall magic address.
    IllegalInstruction(Word),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecError::IllegalInstruction(pc) => {
                write!(f, "illegal instruction at #{:04X}", pc)
            }
        }
    }
}

impl StdError for ExecError {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoadError {
    /// The file's first four bytes were not the ASCII tag `CASL`.
    BadMagic,
    /// The payload would write past `STACK_TOP`.
    OutOfMemory,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::BadMagic => write!(f, "not a CASL object file"),
            LoadError::OutOfMemory => write!(f, "object file does not fit below the stack"),
        }
    }
}

impl StdError for LoadError {}

/// Argument errors from the debugger's command parser: either a numeric
/// token that didn't parse (wraps `util::ParseError`) or a required
/// argument that was never given.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ArgError {
    Parse(ParseError),
    Missing(&'static str),
    Unknown(String),
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArgError::Parse(e) => write!(f, "{}", e),
            ArgError::Missing(what) => write!(f, "missing {}", what),
            ArgError::Unknown(cmd) => write!(f, "unknown command: {}", cmd),
        }
    }
}

impl StdError for ArgError {}

impl From<ParseError> for ArgError {
    fn from(e: ParseError) -> ArgError {
        ArgError::Parse(e)
    }
}
