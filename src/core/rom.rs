use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::consts;
use crate::error::LoadError;

/// A raw program image: big-endian opcodes, no header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rom {
    pub buffer: Vec<u8>,
}

impl Rom {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let unreadable = |source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(unreadable)?;
        Self::from_reader(&mut file).map_err(|e| match e {
            LoadError::Read(source) => unreadable(source),
            other => other,
        })
    }

    /// Reads the whole source. Size is not checked here; the processor
    /// rejects oversized images before touching memory.
    pub fn from_reader(reader: &mut impl Read) -> Result<Self, LoadError> {
        let mut data = Rom::default();
        reader
            .read_to_end(&mut data.buffer)
            .map_err(LoadError::Read)?;
        Ok(data)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Rom {
            buffer: bytes.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn fits(&self) -> bool {
        self.len() <= consts::MAX_ROM_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_from_reader() -> Result<(), LoadError> {
        let mut src: &[u8] = &[0x00, 0xE0, 0x12, 0x00];
        let rom = Rom::from_reader(&mut src)?;
        assert_eq!(rom.buffer, vec![0x00, 0xE0, 0x12, 0x00]);
        assert!(rom.fits());
        Ok(())
    }

    #[test]
    fn test_from_reader_unreadable() {
        match Rom::from_reader(&mut BrokenReader) {
            Err(err @ LoadError::Read(_)) => {
                assert_eq!(err.to_string(), "could not read rom: disk on fire")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        match Rom::new("definitely/not/a/real/rom.ch8") {
            Err(LoadError::Unreadable { path, .. }) => {
                assert_eq!(path, PathBuf::from("definitely/not/a/real/rom.ch8"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_oversized_rom_is_kept_whole() -> Result<(), LoadError> {
        let bytes = vec![0xAA; consts::MAX_ROM_BYTES + 1];
        let rom = Rom::from_reader(&mut bytes.as_slice())?;
        assert_eq!(rom.len(), consts::MAX_ROM_BYTES + 1);
        assert!(!rom.fits());
        Ok(())
    }
}
