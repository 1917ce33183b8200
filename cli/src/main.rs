//! The `comet` debugger binary (spec.md §6): loads an optional object file
//! and drops into the interactive REPL, in the same shape as the teacher's
//! `vex` binary (`App::new`/`Arg::with_name`, a positional program file)
//! but with a `-q` quiet flag instead of an assembly/size argument group,
//! since COMET has no assembler and a fixed 64K address space.

#[macro_use]
extern crate clap;

mod args;
mod commands;
mod repl;

use clap::Arg;
use comet::{LoadError, Machine};
use repl::Repl;
use std::fmt;

/// Aggregates the binary's fallible startup sources into one type, the way
/// `vex/src/main.rs` aggregates `vex::Error`/`clap::Error`: each source gets
/// its own variant and a `From` impl, and `main` prints it with `eprintln!`
/// and turns it into a process exit code.
#[derive(Debug)]
enum Error {
    Load(String, LoadError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(path, err) => write!(f, "{}: {}", path, err),
        }
    }
}

fn run() -> Result<i32, Error> {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Object file to load before starting the debugger")
                .index(1),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Suppress the startup banner"),
        )
        .get_matches();

    let mut machine = Machine::new();
    if let Some(path) = matches.value_of("PROGRAM") {
        machine
            .load_file(path)
            .map_err(|err| Error::Load(path.to_string(), err))?;
    }

    let quiet = matches.is_present("quiet");
    Ok(Repl::new(machine, quiet).run())
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("comet: {}", err);
            std::process::exit(1);
        }
    }
}
