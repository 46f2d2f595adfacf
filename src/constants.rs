//! Widths, bit-field layout and memory map of the Unknown Runes machine.

/// Native value width of registers and memory words.
pub const WORD_WIDTH: u32 = 24;
pub const WORD_MASK: u32 = 0xFF_FFFF;
pub const WORD_BYTES: u64 = 3;
pub const WORD_MIN: i32 = -(1 << 23);
pub const WORD_MAX: i32 = (1 << 23) - 1;

/// Instructions are 42 bits packed into 6 little-endian bytes.
pub const INSTR_BYTES: u64 = 6;

// Field layout of the 42-bit instruction word, MSB to LSB:
// opcode(8) | reserved(2) | reg1(2) | reg2(2) | reg3(2) | reserved(2) | imm(24)
pub const OPCODE_OFFSET: u32 = 34;
pub const RESERVED1_OFFSET: u32 = 32;
pub const REG1_OFFSET: u32 = 30;
pub const REG2_OFFSET: u32 = 28;
pub const REG3_OFFSET: u32 = 26;
pub const RESERVED2_OFFSET: u32 = 24;

pub const OPCODE_MASK: u64 = 0xFF;
pub const FIELD_MASK: u64 = 0b11;
pub const IMMEDIATE_MASK: u64 = 0xFF_FFFF;

pub const REGISTER_COUNT: usize = 3;

// Memory map. Code and data share the low segment; the stack occupies the
// top 0x100000 bytes of the 64-bit address space and grows downward in
// 8-byte slots. Everything in between faults.
pub const CODE_BASE: u64 = 0;
pub const CODE_SIZE: u64 = 0x10_0000;
pub const DEFAULT_MEM_SIZE: u64 = 0x1_0000_0000;
pub const STACK_BASE: u64 = 0xFFFF_FFFF_FFFF_FFFF;
pub const STACK_LOW: u64 = 0xFFFF_FFFF_FFF0_0000;
pub const STACK_SLOT_BYTES: u64 = 8;

/// Hard ceiling on instructions executed per run.
pub const MAX_INSTRUCTIONS: u64 = 1_000_000;

/// Wall-clock timeout applied to host commands spawned by `OS_EXEC`.
pub const EXEC_TIMEOUT_SECS: u64 = 10;
