//! Single-instruction execution: the opcode dispatch.

use num_traits::FromPrimitive;

use super::{Fault, Machine};
use crate::instruction::{Instruction, Opcode, Reg};
use crate::{constants, fold24};

/// What the executed instruction asks the loop to do next. Branches hand back
/// the target so the loop can skip the post-advance.
pub(crate) enum StepResult {
    Next,
    Jump(u64),
    Halt,
    Exit(i32),
}

/// A required register slot; NoReg here is an operand fault.
fn require(reg: Option<Reg>) -> Result<Reg, Fault> {
    reg.ok_or(Fault::NoRegister)
}

/// Register contents reinterpreted as an unsigned 64-bit byte address
/// (negative values reach the stack segment near the top of the space).
fn as_address(value: i32) -> u64 {
    value as i64 as u64
}

impl Machine<'_> {
    fn reg(&self, reg: Reg) -> i32 {
        self.registers[reg as usize]
    }

    fn set(&mut self, reg: Reg, value: i64) {
        self.registers[reg as usize] = fold24(value);
    }

    fn binary_op(
        &mut self,
        instr: &Instruction,
        op: impl Fn(i64, i64) -> i64,
    ) -> Result<(), Fault> {
        let dst = require(instr.reg1)?;
        let lhs = self.reg(require(instr.reg2)?);
        let rhs = self.reg(require(instr.reg3)?);
        self.set(dst, op(i64::from(lhs), i64::from(rhs)));
        Ok(())
    }

    fn conditional_jump(
        &mut self,
        instr: &Instruction,
        relation: impl Fn(i32, i32) -> bool,
    ) -> Result<StepResult, Fault> {
        let lhs = self.reg(require(instr.reg1)?);
        let rhs = self.reg(require(instr.reg2)?);
        if relation(lhs, rhs) {
            Ok(StepResult::Jump(as_address(instr.immediate_signed())))
        } else {
            Ok(StepResult::Next)
        }
    }

    fn push_slot(&mut self, value: u64) -> Result<(), Fault> {
        self.sp = self.sp.wrapping_sub(constants::STACK_SLOT_BYTES);
        self.memory.write_slot(self.sp, value)
    }

    fn pop_slot(&mut self) -> Result<u64, Fault> {
        let slot = self.memory.read_slot(self.sp)?;
        self.sp = self.sp.wrapping_add(constants::STACK_SLOT_BYTES);
        Ok(slot)
    }

    pub(crate) fn exec(&mut self, instr: &Instruction) -> Result<StepResult, Fault> {
        let opcode = Opcode::from_u8(instr.opcode).ok_or(Fault::UnknownOpcode(instr.opcode))?;
        let imm = instr.immediate_signed();

        match opcode {
            Opcode::HALT => return Ok(StepResult::Halt),

            Opcode::MOV => {
                let dst = require(instr.reg1)?;
                self.set(dst, i64::from(imm));
            }

            Opcode::MOVR => {
                let dst = require(instr.reg1)?;
                let src = require(instr.reg2)?;
                self.set(dst, i64::from(self.reg(src)));
            }

            Opcode::ADD => self.binary_op(instr, |a, b| a + b)?,
            Opcode::SUB => self.binary_op(instr, |a, b| a - b)?,
            Opcode::MUL => self.binary_op(instr, |a, b| a * b)?,

            Opcode::DIV => {
                let dst = require(instr.reg1)?;
                let dividend = i64::from(self.reg(require(instr.reg2)?));
                let divisor = i64::from(self.reg(require(instr.reg3)?));
                if divisor == 0 {
                    return Err(Fault::DivisionByZero);
                }
                // Truncates toward zero.
                self.set(dst, dividend / divisor);
            }

            Opcode::MOD => {
                let dst = require(instr.reg1)?;
                let dividend = i64::from(self.reg(require(instr.reg2)?));
                let divisor = i64::from(self.reg(require(instr.reg3)?));
                if divisor == 0 {
                    return Err(Fault::ModuloByZero);
                }
                // Floor modulo: the result takes the divisor's sign. This is
                // deliberately not C-style remainder.
                let mut remainder = dividend % divisor;
                if remainder != 0 && (remainder < 0) != (divisor < 0) {
                    remainder += divisor;
                }
                self.set(dst, remainder);
            }

            Opcode::AND => self.binary_op(instr, |a, b| a & b)?,
            Opcode::OR => self.binary_op(instr, |a, b| a | b)?,
            Opcode::XOR => self.binary_op(instr, |a, b| a ^ b)?,

            Opcode::ADDI => {
                let dst = require(instr.reg1)?;
                self.set(dst, i64::from(self.reg(dst)) + i64::from(imm));
            }

            Opcode::SUBI => {
                let dst = require(instr.reg1)?;
                self.set(dst, i64::from(self.reg(dst)) - i64::from(imm));
            }

            // NOT is arithmetic negation and NEG is bitwise complement; the
            // swap is part of the instruction set.
            Opcode::NOT => {
                let dst = require(instr.reg1)?;
                self.set(dst, -i64::from(self.reg(dst)));
            }

            Opcode::NEG => {
                let dst = require(instr.reg1)?;
                self.set(dst, !i64::from(self.reg(dst)));
            }

            Opcode::SHL => {
                let dst = require(instr.reg1)?;
                let amount = imm & 0x1F;
                self.set(dst, i64::from(self.reg(dst)) << amount);
            }

            Opcode::SHR => {
                let dst = require(instr.reg1)?;
                let amount = imm & 0x1F;
                // Logical shift over the 24-bit field.
                let value = (self.reg(dst) as u32) & constants::WORD_MASK;
                self.set(dst, i64::from(value >> amount));
            }

            Opcode::LOAD => {
                let dst = require(instr.reg1)?;
                let addr = as_address(self.reg(require(instr.reg2)?));
                let value = self.memory.read_word(addr)?;
                self.set(dst, i64::from(value));
            }

            Opcode::STORE => {
                let addr = as_address(self.reg(require(instr.reg1)?));
                let value = self.reg(require(instr.reg2)?);
                self.memory.write_word(addr, value)?;
            }

            Opcode::LOADI => {
                let dst = require(instr.reg1)?;
                let value = self.memory.read_word(as_address(imm))?;
                self.set(dst, i64::from(value));
            }

            Opcode::STOREI => {
                let src = require(instr.reg1)?;
                let value = self.reg(src);
                self.memory.write_word(as_address(imm), value)?;
            }

            Opcode::JMP => return Ok(StepResult::Jump(as_address(imm))),
            Opcode::JEQ => return self.conditional_jump(instr, |a, b| a == b),
            Opcode::JNE => return self.conditional_jump(instr, |a, b| a != b),
            Opcode::JLT => return self.conditional_jump(instr, |a, b| a < b),
            Opcode::JGT => return self.conditional_jump(instr, |a, b| a > b),
            Opcode::JLE => return self.conditional_jump(instr, |a, b| a <= b),
            Opcode::JGE => return self.conditional_jump(instr, |a, b| a >= b),

            Opcode::MZERO => {
                let dst = require(instr.reg1)?;
                self.set(dst, 0);
            }

            Opcode::INC => {
                let dst = require(instr.reg1)?;
                self.set(dst, i64::from(self.reg(dst)) + 1);
            }

            Opcode::DEC => {
                let dst = require(instr.reg1)?;
                self.set(dst, i64::from(self.reg(dst)) - 1);
            }

            Opcode::SYSCALL => {
                let dst = require(instr.reg1)?;
                let number = self.reg(dst);
                match self.syscall(number, instr.reg2, instr.reg3)? {
                    super::syscall::Outcome::Value(value) => self.set(dst, value),
                    super::syscall::Outcome::Exit(code) => return Ok(StepResult::Exit(code)),
                }
            }

            Opcode::PUSH => {
                let src = require(instr.reg1)?;
                let value = self.reg(src);
                self.push_slot(value as i64 as u64)?;
            }

            Opcode::POP => {
                let dst = require(instr.reg1)?;
                let slot = self.pop_slot()?;
                self.set(dst, slot as i64);
            }

            Opcode::CALL => {
                let target = require(instr.reg1)?;
                let return_address = self.pc + constants::INSTR_BYTES;
                self.push_slot(return_address)?;
                return Ok(StepResult::Jump(as_address(self.reg(target))));
            }

            Opcode::RET => {
                let target = self.pop_slot()?;
                return Ok(StepResult::Jump(target));
            }

            Opcode::PUSHI => {
                self.push_slot(imm as i64 as u64)?;
            }

            Opcode::PUSHA => {
                let r1 = require(instr.reg1)?;
                let r2 = require(instr.reg2)?;
                let r3 = require(instr.reg3)?;
                // First register lands at the lowest address.
                self.sp = self.sp.wrapping_sub(3 * constants::STACK_SLOT_BYTES);
                self.memory.write_slot(self.sp, self.reg(r1) as i64 as u64)?;
                self.memory
                    .write_slot(self.sp.wrapping_add(8), self.reg(r2) as i64 as u64)?;
                self.memory
                    .write_slot(self.sp.wrapping_add(16), self.reg(r3) as i64 as u64)?;
            }

            Opcode::POPA => {
                let r1 = require(instr.reg1)?;
                let r2 = require(instr.reg2)?;
                let r3 = require(instr.reg3)?;
                let first = self.memory.read_slot(self.sp)?;
                let second = self.memory.read_slot(self.sp.wrapping_add(8))?;
                let third = self.memory.read_slot(self.sp.wrapping_add(16))?;
                self.set(r1, first as i64);
                self.set(r2, second as i64);
                self.set(r3, third as i64);
                self.sp = self.sp.wrapping_add(3 * constants::STACK_SLOT_BYTES);
            }
        }

        Ok(StepResult::Next)
    }
}
