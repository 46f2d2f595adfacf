//! The syscall table: I/O, string primitives, randomness and host command
//! execution, multiplexed over the machine's input/output streams.
//!
//! The syscall number is read from the first named register, arguments from
//! the second and third; the result is folded to 24 bits and written back
//! into the first. Output-producing syscalls flush after writing so that
//! interactive programs stay responsive over buffered streams (sockets in
//! particular).

use std::cmp;
use std::io::{BufRead, Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use rand::Rng;

use super::{Fault, Machine};
use crate::instruction::Reg;
use crate::constants;

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
enum Syscall {
    Exit = 0,
    PrintInt = 1,
    PrintStr = 2,
    ReadInt = 3,
    ReadStr = 4,
    Strlen = 5,
    Strcmp = 6,
    PrintHex = 7,
    Random = 8,
    SysInfo = 9,
    OsExec = 10,
}

/// What a syscall hands back to the executor.
pub(crate) enum Outcome {
    /// Result value, to be folded into the syscall-number register.
    Value(i64),
    /// Terminate the machine with this exit code.
    Exit(i32),
}

fn require(reg: Option<Reg>) -> Result<Reg, Fault> {
    reg.ok_or(Fault::NoRegister)
}

impl Machine<'_> {
    pub(crate) fn syscall(
        &mut self,
        number: i32,
        arg1: Option<Reg>,
        arg2: Option<Reg>,
    ) -> Result<Outcome, Fault> {
        let syscall = Syscall::from_i32(number).ok_or(Fault::UnknownSyscall(number))?;

        match syscall {
            Syscall::Exit => {
                let code = self.registers[require(arg1)? as usize];
                if code < 0 {
                    write!(self.output, "Program exited with error code {}\n", code)?;
                    self.output.flush()?;
                }
                Ok(Outcome::Exit(code))
            }

            Syscall::PrintInt => {
                let text = self.registers[require(arg1)? as usize].to_string();
                self.output.write_all(text.as_bytes())?;
                self.output.flush()?;
                Ok(Outcome::Value(text.len() as i64))
            }

            Syscall::PrintStr => {
                let address = self.register_address(require(arg1)?);
                let length = self.registers[require(arg2)? as usize];
                let bytes = if length == 0 {
                    self.read_c_string(address)
                } else if length > 0 {
                    (0..length as u64)
                        .map(|i| self.memory.byte_at(address, i))
                        .collect()
                } else {
                    Vec::new()
                };
                self.output.write_all(&bytes)?;
                self.output.flush()?;
                Ok(Outcome::Value(bytes.len() as i64))
            }

            Syscall::ReadInt => {
                let line = self.read_line()?;
                Ok(Outcome::Value(line.trim().parse::<i64>().unwrap_or(0)))
            }

            Syscall::ReadStr => {
                let address = self.register_address(require(arg1)?);
                let max_len = self.registers[require(arg2)? as usize];
                let mut line = self.read_line()?;
                if line.ends_with('\n') {
                    line.pop();
                }
                let written = cmp::min(line.len() as i64, i64::from(max_len));
                for (i, &byte) in line.as_bytes().iter().enumerate() {
                    if (i as i64) >= written {
                        break;
                    }
                    self.memory.set_byte_at(address, i as u64, byte);
                }
                Ok(Outcome::Value(written))
            }

            Syscall::Strlen => {
                let address = self.register_address(require(arg1)?);
                Ok(Outcome::Value(self.read_c_string(address).len() as i64))
            }

            Syscall::Strcmp => {
                let left = self.register_address(require(arg1)?);
                let right = self.register_address(require(arg2)?);
                let mut i = 0u64;
                let order = loop {
                    let a = self.memory.byte_at(left, i);
                    let b = self.memory.byte_at(right, i);
                    if a == 0 || b == 0 || a != b {
                        break match a.cmp(&b) {
                            cmp::Ordering::Less => -1,
                            cmp::Ordering::Equal => 0,
                            cmp::Ordering::Greater => 1,
                        };
                    }
                    i += 1;
                };
                Ok(Outcome::Value(order))
            }

            Syscall::PrintHex => {
                let value = self.registers[require(arg1)? as usize];
                let text = format!("0x{:X}", (value as u32) & constants::WORD_MASK);
                self.output.write_all(text.as_bytes())?;
                self.output.flush()?;
                Ok(Outcome::Value(text.len() as i64))
            }

            Syscall::Random => {
                let value = rand::thread_rng()
                    .gen_range(constants::WORD_MIN..=constants::WORD_MAX);
                Ok(Outcome::Value(i64::from(value)))
            }

            Syscall::SysInfo => self.sys_info(arg1, arg2),

            Syscall::OsExec => {
                let address = self.register_address(require(arg1)?);
                let length = self.registers[require(arg2)? as usize];
                let mut bytes = Vec::new();
                for i in 0..cmp::max(0, length) as u64 {
                    let byte = self.memory.byte_at(address, i);
                    if byte == 0 {
                        break;
                    }
                    bytes.push(byte);
                }
                let command = String::from_utf8_lossy(&bytes).into_owned();
                match exec_host_command(&command) {
                    Ok((output, code)) => {
                        self.output.write_all(&output)?;
                        self.output.flush()?;
                        Ok(Outcome::Value(i64::from(code)))
                    }
                    Err(message) => {
                        write!(self.output, "OS error: {}\n", message)?;
                        self.output.flush()?;
                        Ok(Outcome::Value(-1))
                    }
                }
            }
        }
    }

    /// Diagnostic name lookup: with `0xFFF` in the second argument register,
    /// writes the name of the syscall numbered by the first.
    fn sys_info(&mut self, arg1: Option<Reg>, arg2: Option<Reg>) -> Result<Outcome, Fault> {
        let queried = self.registers[require(arg1)? as usize];
        let key = self.registers[require(arg2)? as usize];
        if key != 0xFFF {
            self.output.write_all(b"Unknown syscall\n")?;
            self.output.flush()?;
            return Ok(Outcome::Exit(1));
        }
        let name = match queried {
            0 => "EXIT",
            1 => "PRINT INT",
            2 => "PRINT STR",
            3 => "READ INT",
            4 => "READ STR",
            5 => "STRLEN",
            6 => "STRCMP",
            7 => "PRINT HEX",
            8 => "RANDOM",
            9 => "SYSINFO",
            10 => "OS CMD",
            _ => {
                self.output.write_all(b"Unknown SYSCALL\n")?;
                self.output.flush()?;
                return Ok(Outcome::Exit(1));
            }
        };
        self.output.write_all(name.as_bytes())?;
        self.output.flush()?;
        Ok(Outcome::Value(0))
    }

    fn register_address(&self, reg: Reg) -> u64 {
        self.registers[reg as usize] as i64 as u64
    }

    /// Walks guest memory from `address` to the first NUL.
    fn read_c_string(&self, address: u64) -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut i = 0u64;
        loop {
            let byte = self.memory.byte_at(address, i);
            if byte == 0 {
                break bytes;
            }
            bytes.push(byte);
            i += 1;
        }
    }

    /// Reads one line from the input stream; partial lines stay unconsumed.
    fn read_line(&mut self) -> Result<String, Fault> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }
}

/// Runs `command` through the host shell with a wall-clock timeout, capturing
/// stdout and stderr.
fn exec_host_command(command: &str) -> Result<(Vec<u8>, i32), String> {
    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| err.to_string())?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || drain(stdout));
    let stderr_reader = thread::spawn(move || drain(stderr));

    let deadline = Instant::now() + Duration::from_secs(constants::EXEC_TIMEOUT_SECS);
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(format!(
                        "command timed out after {} seconds",
                        constants::EXEC_TIMEOUT_SECS
                    ));
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(err) => return Err(err.to_string()),
        }
    };

    let mut output = stdout_reader.join().unwrap_or_default();
    output.extend(stderr_reader.join().unwrap_or_default());
    Ok((output, status.code().unwrap_or(-1)))
}

fn drain<R: Read>(reader: Option<R>) -> Vec<u8> {
    let mut bytes = Vec::new();
    if let Some(mut reader) = reader {
        let _ = reader.read_to_end(&mut bytes);
    }
    bytes
}
