use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while bringing a program image into memory. The machine is never
/// left half-loaded when one of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read rom {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read rom: {0}")]
    Read(#[source] io::Error),
    #[error("rom is {size} bytes, at most {max} fit above the entry point")]
    TooLarge { size: usize, max: usize },
}

/// Program-triggered conditions that stop the machine. Latched by the
/// processor until the next successful load.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MachineFault {
    #[error("call stack overflow at {pc:#05x}")]
    StackOverflow { pc: u16 },
    #[error("return with empty call stack at {pc:#05x}")]
    StackUnderflow { pc: u16 },
}

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("sdl: {0}")]
    Sdl(String),
    #[error("machine halted: {0}")]
    Fault(#[from] MachineFault),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message() {
        let err = LoadError::TooLarge {
            size: 3585,
            max: 3584,
        };
        assert_eq!(
            err.to_string(),
            "rom is 3585 bytes, at most 3584 fit above the entry point"
        );
    }

    #[test]
    fn test_read_message_has_no_path() {
        let err = LoadError::Read(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert_eq!(err.to_string(), "could not read rom: disk on fire");
    }

    #[test]
    fn test_fault_message() {
        let err = MachineFault::StackOverflow { pc: 0x204 };
        assert_eq!(err.to_string(), "call stack overflow at 0x204");
    }

    #[test]
    fn test_fault_converts_to_emulator_error() {
        let err: EmulatorError = MachineFault::StackUnderflow { pc: 0x200 }.into();
        assert!(matches!(err, EmulatorError::Fault(_)));
    }
}
