//! COMET — a 16-bit pedagogical machine in the CASL assembler/runtime
//! tradition. This crate is the interpretation core (spec.md §1-2): word
//! arithmetic, the linear address space, CPU state, the decoder and
//! executor, the IN/OUT/EXIT system-call trap, and the object loader.
//!
//! The debugger REPL and argument parsing live in the `comet-cli` crate;
//! the object file's binary shape lives in `comet-format`.

pub mod constants;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod exec;
pub mod loader;
pub mod machine;
pub mod memory;
pub mod syscall;
pub mod word;

/// A 16-bit unsigned word: the atomic storage and transfer unit (spec.md
/// GLOSSARY). Registers, memory cells, and instruction fields are all this
/// type; signedness is only ever a reinterpretation at the edges (see
/// `word::signed`/`word::unsigned`).
pub type Word = u16;

pub use cpu::CpuState;
pub use decode::{parse, Op};
pub use error::{ArgError, ExecError, LoadError};
pub use machine::{Machine, RunOutcome};
pub use memory::Memory;
pub use syscall::Console;
pub use word::Flag;
