//! Virtual machine core for the Unknown Runes instruction set.
//!
//! The machine has three general-purpose 24-bit signed registers, a 64-bit
//! program counter and stack pointer, and executes fixed-size 42-bit
//! instructions packed into 6 little-endian bytes. Programs are flat byte
//! images loaded at address 0; I/O happens through a set of syscalls bound to
//! caller-provided input/output streams.
//!
//! The [`instruction`] module is the bit-level codec shared with the
//! assembler, [`memory`] is the sparse segmented byte store, and [`machine`]
//! is the fetch/decode/execute loop.
//!
//! Note that the `OS_EXEC` syscall hands a string from guest memory to the
//! host shell. That is by design; do not expose the machine to untrusted
//! programs unless that is what you want.

pub mod constants;
pub mod instruction;
pub mod machine;
pub mod memory;

pub use instruction::*;
pub use machine::*;
pub use memory::{LoadError, Memory};

/// Endianness of all multi-byte values: instruction words, memory words and
/// stack slots.
pub type Endian = byteorder::LittleEndian;

/// Folds an intermediate result back into the 24-bit signed range:
/// truncate to 24 bits, then reinterpret as two's complement.
#[inline]
pub fn fold24(value: i64) -> i32 {
    let truncated = (value as u64 & u64::from(constants::WORD_MASK)) as u32;
    if truncated >= 1 << 23 {
        truncated as i32 - (1 << 24)
    } else {
        truncated as i32
    }
}

/// Sign-extends a raw 24-bit immediate field.
#[inline]
pub fn sign_extend24(raw: u32) -> i32 {
    fold24(i64::from(raw))
}
