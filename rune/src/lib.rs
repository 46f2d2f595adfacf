//! Shared plumbing for the `rune` and `runed` binaries: loading or
//! assembling a program image and running it on a fresh machine.

use std::fmt;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use runevm::{Machine, Memory, RunError, Termination};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error, PathBuf),
    Asm(runeasm::AsmErrors),
    Load(runevm::LoadError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err, path) => writeln!(f, "Reading \"{}\" failed: {}", path.display(), err),
            Error::Asm(errors) => {
                for error in &errors.0 {
                    writeln!(f, "ASM ERROR: {}", error)?;
                }
                Ok(())
            }
            Error::Load(err) => writeln!(f, "{}", err),
        }
    }
}

/// Reads an assembled image from disk.
pub fn load_image(path: &str) -> Result<Vec<u8>, Error> {
    fs::read(path).map_err(|err| Error::Io(err, PathBuf::from(path)))
}

/// Reads assembly source from disk and assembles it in-process.
pub fn assemble_source(path: &str) -> Result<Vec<u8>, Error> {
    let source =
        fs::read_to_string(path).map_err(|err| Error::Io(err, PathBuf::from(path)))?;
    runeasm::assemble(&source).map_err(Error::Asm)
}

/// Runs `image` on a fresh machine bound to the given streams. The outer
/// error is a setup failure; the inner result is how the run itself ended.
pub fn run_image(
    image: &[u8],
    mem_size: u64,
    trace: bool,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<Result<Termination, RunError>, Error> {
    let mut machine = Machine::new(Memory::new(mem_size), input, output).with_trace(trace);
    machine.load_image(image).map_err(Error::Load)?;
    Ok(machine.run())
}
