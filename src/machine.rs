//! The fetch/decode/execute loop and its fault model.

mod exec;
mod syscall;

use std::io::{BufRead, Write};

use num_traits::FromPrimitive;
use thiserror::Error;

use self::exec::StepResult;
use crate::instruction::{self, Instruction, Opcode, Reg};
use crate::memory::{LoadError, Memory};
use crate::constants;

/// A fatal condition raised while executing a single instruction.
#[derive(Debug, Error)]
pub enum Fault {
    #[error("reserved bits must be zero (got {0:#04b})")]
    ReservedBits(u8),
    #[error("no register provided")]
    NoRegister,
    #[error("unknown opcode: {0:#04X}")]
    UnknownOpcode(u8),
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("memory address out of bounds: {0:#X}")]
    OutOfBounds(u64),
    #[error("instruction fetch out of bounds")]
    FetchOutOfBounds,
    #[error("unknown syscall: {0}")]
    UnknownSyscall(i32),
    #[error("stream error during syscall: {0}")]
    Io(#[from] std::io::Error),
}

/// How a run ended, short of a fault.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Termination {
    /// HALT was executed.
    Halted,
    /// The EXIT syscall was invoked with this code.
    Exited(i32),
    /// The per-run instruction ceiling was reached.
    InstructionLimit,
}

/// A fault, annotated with where the run stood when it was raised.
#[derive(Debug, Error)]
#[error("Error at PC=0x{pc:016X} (instr {instructions}): {fault}")]
pub struct RunError {
    pub pc: u64,
    pub instructions: u64,
    pub fault: Fault,
}

/// A single Unknown Runes machine: three 24-bit registers, PC, a downward
/// stack, sparse memory and the I/O streams its syscalls talk to.
///
/// Machines share no state; running many of them in parallel only requires
/// giving each its own streams.
pub struct Machine<'io> {
    memory: Memory,
    registers: [i32; constants::REGISTER_COUNT],
    pc: u64,
    sp: u64,
    instructions_retired: u64,
    max_instructions: u64,
    trace: bool,
    input: &'io mut dyn BufRead,
    output: &'io mut dyn Write,
}

impl<'io> Machine<'io> {
    pub fn new(
        memory: Memory,
        input: &'io mut dyn BufRead,
        output: &'io mut dyn Write,
    ) -> Machine<'io> {
        Machine {
            memory,
            registers: [0; constants::REGISTER_COUNT],
            pc: constants::CODE_BASE,
            sp: constants::STACK_BASE,
            instructions_retired: 0,
            max_instructions: constants::MAX_INSTRUCTIONS,
            trace: false,
            input,
            output,
        }
    }

    /// Enables the per-instruction trace on stdout.
    pub fn with_trace(mut self, trace: bool) -> Machine<'io> {
        self.trace = trace;
        self
    }

    /// Overrides the instruction ceiling.
    pub fn with_instruction_limit(mut self, limit: u64) -> Machine<'io> {
        self.max_instructions = limit;
        self
    }

    pub fn load_image(&mut self, image: &[u8]) -> Result<(), LoadError> {
        self.memory.load_image(image)
    }

    pub fn register(&self, reg: Reg) -> i32 {
        self.registers[reg as usize]
    }

    pub fn set_register(&mut self, reg: Reg, value: i32) {
        self.registers[reg as usize] = crate::fold24(i64::from(value));
    }

    pub fn pc(&self) -> u64 {
        self.pc
    }

    pub fn sp(&self) -> u64 {
        self.sp
    }

    pub fn instructions_retired(&self) -> u64 {
        self.instructions_retired
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Runs until HALT, EXIT, the instruction ceiling, or a fault.
    pub fn run(&mut self) -> Result<Termination, RunError> {
        loop {
            if self.instructions_retired >= self.max_instructions {
                return Ok(Termination::InstructionLimit);
            }
            match self.step() {
                Ok(None) => {}
                Ok(Some(termination)) => return Ok(termination),
                Err(fault) => {
                    return Err(RunError {
                        pc: self.pc,
                        instructions: self.instructions_retired,
                        fault,
                    })
                }
            }
        }
    }

    /// Fetches, decodes and executes one instruction.
    pub fn step(&mut self) -> Result<Option<Termination>, Fault> {
        let word = self.memory.fetch(self.pc)?;
        let instr = instruction::decode(word);

        if self.trace {
            self.print_trace(&instr);
        }

        if instr.reserved1 != 0 {
            return Err(Fault::ReservedBits(instr.reserved1));
        }
        if instr.reserved2 != 0 {
            return Err(Fault::ReservedBits(instr.reserved2));
        }

        match self.exec(&instr)? {
            StepResult::Next => {
                self.instructions_retired += 1;
                self.pc += constants::INSTR_BYTES;
                Ok(None)
            }
            StepResult::Jump(target) => {
                self.instructions_retired += 1;
                self.pc = target;
                Ok(None)
            }
            StepResult::Halt => {
                self.instructions_retired += 1;
                self.pc += constants::INSTR_BYTES;
                Ok(Some(Termination::Halted))
            }
            StepResult::Exit(code) => Ok(Some(Termination::Exited(code))),
        }
    }

    fn print_trace(&self, instr: &Instruction) {
        let mnemonic = match Opcode::from_u8(instr.opcode) {
            Some(opcode) => opcode.to_string(),
            None => "UNKNOWN".to_string(),
        };
        println!(
            "[{:06}] PC=0x{:016X} {} R0={} R1={} R2={} IMM={}",
            self.instructions_retired,
            self.pc,
            mnemonic,
            self.trace_reg(instr.reg1),
            self.trace_reg(instr.reg2),
            self.trace_reg(instr.reg3),
            instr.immediate,
        );
    }

    fn trace_reg(&self, reg: Option<Reg>) -> String {
        match reg {
            Some(reg) => {
                let value = self.register(reg);
                if value < 0 {
                    format!("-0x{:X}", -i64::from(value))
                } else {
                    format!("0x{:X}", value)
                }
            }
            None => "--".to_string(),
        }
    }
}
