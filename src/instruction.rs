//! Bit-level codec for the 42-bit instruction word, shared by the assembler
//! and the machine.
//!
//! Register fields are 2 bits wide with an asymmetric encoding: the raw field
//! value `00` means "slot unused" and `01`/`10`/`11` name RA/RB/RC. Decoded
//! code therefore works with `Option<Reg>`, and only the codec touches the
//! raw field values.

use byteorder::ByteOrder;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::{constants, Endian};

/// One of the three general-purpose registers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Reg {
    RA,
    RB,
    RC,
}

impl Reg {
    /// Decodes a raw 2-bit register field. `00` is the unused-slot sentinel.
    pub fn from_field(field: u8) -> Option<Reg> {
        Reg::from_u8(field.checked_sub(1)?)
    }

    /// The raw 2-bit field value naming this register.
    pub fn field(self) -> u8 {
        self as u8 + 1
    }

    /// Parses a register name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Reg> {
        match name.to_ascii_uppercase().as_str() {
            "RA" => Some(Reg::RA),
            "RB" => Some(Reg::RB),
            "RC" => Some(Reg::RC),
            _ => None,
        }
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Raw field value of an optional register slot.
pub fn reg_field(reg: Option<Reg>) -> u8 {
    reg.map_or(0, Reg::field)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum Opcode {
    //  Mnemonic | Format | Effect
    //-----------+--------+----------------------------------------------
    HALT, //     | -      | Stops the machine
    MOV,  //     | ri     | r1 = extend(imm)
    MOVR, //     | rr     | r1 = r2
    ADD,  //     | rrr    | r1 = r2 + r3
    SUB,  //     | rrr    | r1 = r2 - r3
    ADDI, //     | ri     | r1 = r1 + extend(imm)
    SUBI, //     | ri     | r1 = r1 - extend(imm)
    MUL,  //     | rrr    | r1 = r2 * r3
    DIV,  //     | rrr    | r1 = r2 / r3 (truncating; divisor 0 faults)
    MOD,  //     | rrr    | r1 = r2 mod r3 (floor; divisor 0 faults)
    AND,  //     | rrr    | r1 = r2 & r3
    OR,   //     | rrr    | r1 = r2 | r3
    XOR,  //     | rrr    | r1 = r2 ^ r3
    NOT,  //     | r      | r1 = -r1 (arithmetic negation)
    SHL,  //     | ri     | r1 = r1 << (imm & 0x1F)
    SHR,  //     | ri     | r1 = r1 >> (imm & 0x1F), logical over 24 bits
    LOAD, //     | rr     | r1 = MEM[r2]
    STORE, //    | rr     | MEM[r1] = r2
    LOADI, //    | ri     | r1 = MEM[extend(imm)]
    STOREI, //   | ri     | MEM[extend(imm)] = r1
    JMP,  //     | i      | PC = extend(imm)
    JEQ,  //     | rri    | PC = extend(imm) if r1 == r2
    JNE,  //     | rri    | PC = extend(imm) if r1 != r2
    JLT,  //     | rri    | PC = extend(imm) if r1 < r2
    JGT,  //     | rri    | PC = extend(imm) if r1 > r2
    JLE,  //     | rri    | PC = extend(imm) if r1 <= r2
    JGE,  //     | rri    | PC = extend(imm) if r1 >= r2
    MZERO, //    | r      | r1 = 0
    INC,  //     | r      | r1 = r1 + 1
    DEC,  //     | r      | r1 = r1 - 1
    NEG,  //     | r      | r1 = ~r1 (bitwise complement)
    SYSCALL, //  | regs   | invoke syscall regs[r1](regs[r2], regs[r3])
    PUSH, //     | r      | SP -= 8; STACK[SP] = r1
    POP,  //     | r      | r1 = STACK[SP]; SP += 8
    CALL, //     | r      | SP -= 8; STACK[SP] = PC + 6; PC = r1
    RET,  //     | -      | PC = STACK[SP]; SP += 8
    PUSHI, //    | i      | SP -= 8; STACK[SP] = extend(imm)
    PUSHA, //    | rrr    | push r1, r2, r3 as one 24-byte block
    POPA, //     | rrr    | pop a 24-byte block back into r1, r2, r3
}

// NOT and NEG are intentionally swapped relative to their common meanings;
// existing rune programs depend on it.

/// Operand kind expected at one slot of a fixed instruction format.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandKind {
    Register,
    Immediate,
}

/// Operand format of an opcode, as written in assembly source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandFormat {
    /// Fixed sequence of operands.
    Fixed(&'static [OperandKind]),
    /// One to three register operands (SYSCALL).
    Registers,
}

const FMT_NONE: &[OperandKind] = &[];
const FMT_R: &[OperandKind] = &[OperandKind::Register];
const FMT_RR: &[OperandKind] = &[OperandKind::Register, OperandKind::Register];
const FMT_RRR: &[OperandKind] = &[
    OperandKind::Register,
    OperandKind::Register,
    OperandKind::Register,
];
const FMT_RI: &[OperandKind] = &[OperandKind::Register, OperandKind::Immediate];
const FMT_RRI: &[OperandKind] = &[
    OperandKind::Register,
    OperandKind::Register,
    OperandKind::Immediate,
];
const FMT_I: &[OperandKind] = &[OperandKind::Immediate];

impl Opcode {
    pub fn format(self) -> OperandFormat {
        use Opcode::*;
        match self {
            HALT | RET => OperandFormat::Fixed(FMT_NONE),
            NOT | MZERO | INC | DEC | NEG | PUSH | POP | CALL => OperandFormat::Fixed(FMT_R),
            MOVR | LOAD | STORE => OperandFormat::Fixed(FMT_RR),
            ADD | SUB | MUL | DIV | MOD | AND | OR | XOR | PUSHA | POPA => {
                OperandFormat::Fixed(FMT_RRR)
            }
            MOV | ADDI | SUBI | SHL | SHR | LOADI | STOREI => OperandFormat::Fixed(FMT_RI),
            JEQ | JNE | JLT | JGT | JLE | JGE => OperandFormat::Fixed(FMT_RRI),
            JMP | PUSHI => OperandFormat::Fixed(FMT_I),
            SYSCALL => OperandFormat::Registers,
        }
    }

    /// Parses a mnemonic, case-insensitively.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        use Opcode::*;
        let op = match mnemonic.to_ascii_uppercase().as_str() {
            "HALT" => HALT,
            "MOV" => MOV,
            "MOVR" => MOVR,
            "ADD" => ADD,
            "SUB" => SUB,
            "ADDI" => ADDI,
            "SUBI" => SUBI,
            "MUL" => MUL,
            "DIV" => DIV,
            "MOD" => MOD,
            "AND" => AND,
            "OR" => OR,
            "XOR" => XOR,
            "NOT" => NOT,
            "SHL" => SHL,
            "SHR" => SHR,
            "LOAD" => LOAD,
            "STORE" => STORE,
            "LOADI" => LOADI,
            "STOREI" => STOREI,
            "JMP" => JMP,
            "JEQ" => JEQ,
            "JNE" => JNE,
            "JLT" => JLT,
            "JGT" => JGT,
            "JLE" => JLE,
            "JGE" => JGE,
            "MZERO" => MZERO,
            "INC" => INC,
            "DEC" => DEC,
            "NEG" => NEG,
            "SYSCALL" => SYSCALL,
            "PUSH" => PUSH,
            "POP" => POP,
            "CALL" => CALL,
            "RET" => RET,
            "PUSHI" => PUSHI,
            "PUSHA" => PUSHA,
            "POPA" => POPA,
            _ => return None,
        };
        Some(op)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A decoded instruction word. The opcode and reserved fields are kept raw so
/// the executor can validate them; register slots are decoded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: u8,
    pub reserved1: u8,
    pub reg1: Option<Reg>,
    pub reg2: Option<Reg>,
    pub reg3: Option<Reg>,
    pub reserved2: u8,
    pub immediate: u32,
}

impl Instruction {
    /// The immediate field as a sign-extended 24-bit value.
    pub fn immediate_signed(&self) -> i32 {
        crate::sign_extend24(self.immediate)
    }
}

/// Composes a 42-bit instruction word from raw field values. The immediate
/// is masked to 24 bits.
pub fn encode(opcode: u8, reg1: u8, reg2: u8, reg3: u8, immediate: u32) -> u64 {
    (u64::from(opcode) << constants::OPCODE_OFFSET)
        | ((u64::from(reg1) & constants::FIELD_MASK) << constants::REG1_OFFSET)
        | ((u64::from(reg2) & constants::FIELD_MASK) << constants::REG2_OFFSET)
        | ((u64::from(reg3) & constants::FIELD_MASK) << constants::REG3_OFFSET)
        | (u64::from(immediate) & constants::IMMEDIATE_MASK)
}

/// [`encode`], emitted as 6 little-endian bytes.
pub fn encode_bytes(
    opcode: u8,
    reg1: u8,
    reg2: u8,
    reg3: u8,
    immediate: u32,
) -> [u8; constants::INSTR_BYTES as usize] {
    let mut bytes = [0u8; constants::INSTR_BYTES as usize];
    Endian::write_u48(&mut bytes, encode(opcode, reg1, reg2, reg3, immediate));
    bytes
}

/// Splits a 42-bit instruction word into its fields, decoding the register
/// slots and keeping both reserved fields for validation.
pub fn decode(word: u64) -> Instruction {
    Instruction {
        opcode: ((word >> constants::OPCODE_OFFSET) & constants::OPCODE_MASK) as u8,
        reserved1: ((word >> constants::RESERVED1_OFFSET) & constants::FIELD_MASK) as u8,
        reg1: Reg::from_field(((word >> constants::REG1_OFFSET) & constants::FIELD_MASK) as u8),
        reg2: Reg::from_field(((word >> constants::REG2_OFFSET) & constants::FIELD_MASK) as u8),
        reg3: Reg::from_field(((word >> constants::REG3_OFFSET) & constants::FIELD_MASK) as u8),
        reserved2: ((word >> constants::RESERVED2_OFFSET) & constants::FIELD_MASK) as u8,
        immediate: (word & constants::IMMEDIATE_MASK) as u32,
    }
}

/// Reads a 6-byte instruction back into its 42-bit word form.
pub fn read_word(bytes: &[u8]) -> u64 {
    Endian::read_u48(bytes)
}

// Instruction construction macros for tests and generated programs, one per
// operand format.

#[macro_export]
macro_rules! instr_n {
    ($op:ident) => {
        $crate::instruction::encode_bytes($crate::Opcode::$op as u8, 0, 0, 0, 0)
    };
}

#[macro_export]
macro_rules! instr_r {
    ($op:ident, $r1:ident) => {
        $crate::instruction::encode_bytes(
            $crate::Opcode::$op as u8,
            $crate::Reg::$r1.field(),
            0,
            0,
            0,
        )
    };
}

#[macro_export]
macro_rules! instr_rr {
    ($op:ident, $r1:ident, $r2:ident) => {
        $crate::instruction::encode_bytes(
            $crate::Opcode::$op as u8,
            $crate::Reg::$r1.field(),
            $crate::Reg::$r2.field(),
            0,
            0,
        )
    };
}

#[macro_export]
macro_rules! instr_rrr {
    ($op:ident, $r1:ident, $r2:ident, $r3:ident) => {
        $crate::instruction::encode_bytes(
            $crate::Opcode::$op as u8,
            $crate::Reg::$r1.field(),
            $crate::Reg::$r2.field(),
            $crate::Reg::$r3.field(),
            0,
        )
    };
}

#[macro_export]
macro_rules! instr_ri {
    ($op:ident, $r1:ident, $imm:expr) => {
        $crate::instruction::encode_bytes(
            $crate::Opcode::$op as u8,
            $crate::Reg::$r1.field(),
            0,
            0,
            ($imm as i64) as u32,
        )
    };
}

#[macro_export]
macro_rules! instr_rri {
    ($op:ident, $r1:ident, $r2:ident, $imm:expr) => {
        $crate::instruction::encode_bytes(
            $crate::Opcode::$op as u8,
            $crate::Reg::$r1.field(),
            $crate::Reg::$r2.field(),
            0,
            ($imm as i64) as u32,
        )
    };
}

#[macro_export]
macro_rules! instr_i {
    ($op:ident, $imm:expr) => {
        $crate::instruction::encode_bytes($crate::Opcode::$op as u8, 0, 0, 0, ($imm as i64) as u32)
    };
}
