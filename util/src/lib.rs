use std::{error::Error, fmt};

/// Byte order for the object file's payload words (spec.md §6: "big-endian
/// 16-bit words"). The teacher's own `Endian` alias picks `LittleEndian`
/// for its wire format; COMET's `.com` format is big-endian instead.
pub type Endian = byteorder::BigEndian;

/// A small, reusable "couldn't parse this text as a `kind`" error, used by
/// the debugger's command-argument parser the way the teacher's
/// `ParseEnumError` was used by the assembler's mnemonic parser.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub value: String,
    pub kind: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" is not a valid {}", &self.value, &self.kind)
    }
}

impl Error for ParseError {}
