//! The `.com` object file format (spec.md §4.G, §6).
//!
//! Grounded on the teacher's `vexfile` crate, which plays the identical
//! role: a standalone crate that only knows the file's binary shape, with
//! the higher-level "does this fit in memory" decision left to the caller
//! (here, `comet::loader`).

use byteorder::ReadBytesExt;
use std::error::Error as StdError;
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use util::Endian;

pub const HEADER_LEN: usize = 16;
pub const MAGIC: &[u8; 4] = b"CASL";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormatError {
    /// Bytes 0..3 were not the ASCII tag `CASL`, or the file was shorter
    /// than the 16-byte header.
    BadMagic,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::BadMagic => write!(f, "missing or invalid CASL header"),
        }
    }
}

impl StdError for FormatError {}

/// The payload of a `.com` file: big-endian 16-bit words, in file order,
/// meant to be loaded starting at address 0.
#[derive(Debug)]
pub struct ObjectFile {
    pub words: Vec<u16>,
}

/// Reads and validates the header, then decodes the remaining bytes as
/// big-endian words. Bytes 4..16 (reserved) are read but ignored. A
/// trailing odd byte, if any, is dropped rather than treated as a partial
/// word.
pub fn read<R: Read>(reader: &mut R) -> Result<ObjectFile, FormatError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).map_err(|_| FormatError::BadMagic)?;
    if &header[0..4] != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let mut words = Vec::new();
    loop {
        match reader.read_u16::<Endian>() {
            Ok(word) => words.push(word),
            Err(_) => break,
        }
    }

    Ok(ObjectFile { words })
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<ObjectFile, FormatError> {
    let file = File::open(path).map_err(|_| FormatError::BadMagic)?;
    read(&mut BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    fn image(words: &[u16]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&[0u8; HEADER_LEN - 4]);
        for w in words {
            bytes.write_u16::<Endian>(*w).unwrap();
        }
        bytes
    }

    #[test]
    fn reads_a_well_formed_image() {
        let bytes = image(&[0x1234, 0x5678]);
        let object = read(&mut &bytes[..]).unwrap();
        assert_eq!(object.words, vec![0x1234, 0x5678]);
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut bytes = image(&[1]);
        bytes[0] = b'X';
        assert_eq!(read(&mut &bytes[..]).unwrap_err(), FormatError::BadMagic);
    }

    #[test]
    fn rejects_file_shorter_than_header() {
        let bytes = vec![b'C', b'A', b'S', b'L'];
        assert_eq!(read(&mut &bytes[..]).unwrap_err(), FormatError::BadMagic);
    }
}
