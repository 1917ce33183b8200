//! Orchestrates the object-file format with the core's memory/state
//! (spec.md §4.G). The byte-level parsing itself lives in `comet-format`.

use super::constants::STACK_TOP;
use super::cpu::CpuState;
use super::error::LoadError;
use super::memory::Memory;
use super::Word;
use comet_format::FormatError;
use std::path::Path;

/// Loads `path`, replacing `memory` and `cpu` only on success. Per spec.md
/// §7, a failed load must not leave memory in a partial state, so the
/// payload is decoded into a scratch buffer first and only swapped in once
/// every word is known to fit below `STACK_TOP`.
pub fn load_file<P: AsRef<Path>>(
    path: P,
    memory: &mut Memory,
    cpu: &mut CpuState,
) -> Result<(), LoadError> {
    let object = comet_format::read_file(path).map_err(|e| match e {
        FormatError::BadMagic => LoadError::BadMagic,
    })?;

    if object.words.len() > STACK_TOP as usize {
        return Err(LoadError::OutOfMemory);
    }

    let mut scratch = Memory::new();
    for (addr, word) in object.words.iter().enumerate() {
        scratch.write(addr as Word, *word);
    }

    *memory = scratch;
    *cpu = CpuState::new();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Write;
    use util::Endian;

    fn write_image(path: &Path, header_ok: bool, words: &[u16]) {
        let mut bytes = Vec::new();
        if header_ok {
            bytes.extend_from_slice(b"CASL");
        } else {
            bytes.extend_from_slice(b"NOPE");
        }
        bytes.extend_from_slice(&[0u8; 12]);
        for w in words {
            bytes.write_u16::<Endian>(*w).unwrap();
        }
        std::fs::File::create(path).unwrap().write_all(&bytes).unwrap();
    }

    #[test]
    fn loads_image_and_resets_registers() {
        let dir = std::env::temp_dir().join("comet_loader_test_ok.com");
        write_image(&dir, true, &[0x1234, 0x5678]);

        let mut memory = Memory::new();
        let mut cpu = CpuState::new();
        cpu.set_gr(0, 42);
        cpu.bp.push(5);

        load_file(&dir, &mut memory, &mut cpu).unwrap();

        assert_eq!(memory.read(0), 0x1234);
        assert_eq!(memory.read(1), 0x5678);
        assert_eq!(cpu.pc, 0);
        assert_eq!(cpu.gr(0), 0);
        assert!(cpu.bp.is_empty());

        let _ = std::fs::remove_file(&dir);
    }

    #[test]
    fn bad_magic_leaves_fresh_memory_untouched() {
        let dir = std::env::temp_dir().join("comet_loader_test_badmagic.com");
        write_image(&dir, false, &[1, 2, 3]);

        let mut memory = Memory::new();
        let mut cpu = CpuState::new();

        let err = load_file(&dir, &mut memory, &mut cpu).unwrap_err();
        assert_eq!(err, LoadError::BadMagic);
        assert_eq!(memory.read(0), 0);

        let _ = std::fs::remove_file(&dir);
    }

    #[test]
    fn oversized_image_is_out_of_memory() {
        let dir = std::env::temp_dir().join("comet_loader_test_oom.com");
        let words = vec![0u16; STACK_TOP as usize + 1];
        write_image(&dir, true, &words);

        let mut memory = Memory::new();
        let mut cpu = CpuState::new();

        let err = load_file(&dir, &mut memory, &mut cpu).unwrap_err();
        assert_eq!(err, LoadError::OutOfMemory);

        let _ = std::fs::remove_file(&dir);
    }
}
