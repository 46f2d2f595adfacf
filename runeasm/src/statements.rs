//! Semantic processing of parsed lines: size accounting, label collection
//! and byte emission.

use std::collections::HashMap;

use byteorder::ByteOrder;
use pest::iterators::Pair;
use runevm::{constants, instruction, Endian, Opcode, OperandFormat, OperandKind, Reg};

use crate::error::AsmError;
use crate::parser::Rule;
use crate::strings;

pub type LabelMap = HashMap<String, u64>;

/// One source line, reduced to its parts.
pub struct Line<'i> {
    pub number: usize,
    pub label: Option<&'i str>,
    pub statement: Option<Statement<'i>>,
}

pub struct Statement<'i> {
    pub mnemonic: &'i str,
    pub operands: Vec<Operand<'i>>,
}

/// A raw operand: a bare token, or the undecoded body of a string literal.
pub enum Operand<'i> {
    Token(&'i str),
    Str(&'i str),
}

impl<'i> Operand<'i> {
    fn text(&self) -> &'i str {
        match *self {
            Operand::Token(token) => token,
            Operand::Str(body) => body,
        }
    }
}

pub fn collect_lines(program: Pair<Rule>) -> Vec<Line> {
    let mut lines = Vec::new();
    for pair in program.into_inner() {
        if pair.as_rule() != Rule::line {
            continue;
        }
        let number = pair.as_span().start_pos().line_col().0;
        let mut label = None;
        let mut statement = None;
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::label => {
                    label = part.into_inner().next().map(|ident| ident.as_str());
                }
                Rule::statement => statement = Some(collect_statement(part)),
                _ => {}
            }
        }
        lines.push(Line {
            number,
            label,
            statement,
        });
    }
    lines
}

fn collect_statement(pair: Pair<Rule>) -> Statement {
    let mut pairs = pair.into_inner();
    let mnemonic = pairs.next().map(|pair| pair.as_str()).unwrap_or("");
    let operands = pairs
        .filter(|pair| pair.as_rule() == Rule::operand)
        .map(|operand| {
            let inner = operand.into_inner().next().unwrap();
            match inner.as_rule() {
                Rule::string => Operand::Str(inner.into_inner().next().unwrap().as_str()),
                _ => Operand::Token(inner.as_str()),
            }
        })
        .collect();
    Statement { mnemonic, operands }
}

/// First pass: walk the lines, record each label at the current byte offset
/// and advance by the size of the labeled construct. Returns the label table
/// and the final offset (the image length, barring errors).
pub fn pass1(lines: &[Line]) -> (LabelMap, u64) {
    let mut labels = LabelMap::new();
    let mut position = 0u64;
    for line in lines {
        if let Some(name) = line.label {
            labels.insert(name.to_string(), position);
        }
        if let Some(statement) = &line.statement {
            position += statement_size(statement, position);
        }
    }
    (labels, position)
}

/// Bytes a statement contributes to the image. Unknown mnemonics size to
/// zero here; pass 2 reports them.
fn statement_size(statement: &Statement, position: u64) -> u64 {
    match statement.mnemonic.to_ascii_uppercase().as_str() {
        ".DB" | ".BYTE" => statement.operands.len() as u64,
        ".DW" | ".WORD" => statement.operands.len() as u64 * constants::WORD_BYTES,
        ".DS" | ".STRING" => match first_string(statement) {
            Some(body) => strings::decode_escapes(body).len() as u64 + 1,
            None => 0,
        },
        ".ALIGN" => alignment_padding(position),
        mnemonic => {
            if Opcode::from_mnemonic(mnemonic).is_some() {
                constants::INSTR_BYTES
            } else {
                0
            }
        }
    }
}

fn alignment_padding(position: u64) -> u64 {
    match position % constants::INSTR_BYTES {
        0 => 0,
        rem => constants::INSTR_BYTES - rem,
    }
}

fn first_string<'i>(statement: &Statement<'i>) -> Option<&'i str> {
    statement.operands.iter().find_map(|operand| match operand {
        Operand::Str(body) => Some(*body),
        Operand::Token(_) => None,
    })
}

/// Second pass: emit directive bytes and encoded instructions, resolving
/// label references against the pass-1 table. Errors accumulate; the caller
/// discards the image if any were recorded.
pub fn pass2(lines: &[Line], labels: &LabelMap, errors: &mut Vec<AsmError>) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        if let Some(statement) = &line.statement {
            emit_statement(line.number, statement, labels, &mut out, errors);
        }
    }
    out
}

fn emit_statement(
    line: usize,
    statement: &Statement,
    labels: &LabelMap,
    out: &mut Vec<u8>,
    errors: &mut Vec<AsmError>,
) {
    let upper = statement.mnemonic.to_ascii_uppercase();
    match upper.as_str() {
        ".DB" | ".BYTE" => {
            for operand in &statement.operands {
                if let Some(value) = parse_value(line, operand, labels, errors) {
                    out.push((value & 0xFF) as u8);
                }
            }
        }
        ".DW" | ".WORD" => {
            for operand in &statement.operands {
                if let Some(value) = parse_value(line, operand, labels, errors) {
                    let mut word = [0u8; constants::WORD_BYTES as usize];
                    Endian::write_u24(&mut word, (value as u32) & constants::WORD_MASK);
                    out.extend_from_slice(&word);
                }
            }
        }
        ".DS" | ".STRING" => match first_string(statement) {
            Some(body) => {
                out.extend_from_slice(&strings::decode_escapes(body));
                out.push(0);
            }
            None => errors.push(AsmError::new(line, "Missing string literal")),
        },
        ".ALIGN" => {
            while out.len() as u64 % constants::INSTR_BYTES != 0 {
                out.push(0);
            }
        }
        mnemonic => emit_instruction(line, mnemonic, statement, labels, out, errors),
    }
}

fn emit_instruction(
    line: usize,
    mnemonic: &str,
    statement: &Statement,
    labels: &LabelMap,
    out: &mut Vec<u8>,
    errors: &mut Vec<AsmError>,
) {
    let opcode = match Opcode::from_mnemonic(mnemonic) {
        Some(opcode) => opcode,
        None => {
            errors.push(AsmError::new(
                line,
                format!("Unknown mnemonic: {}", statement.mnemonic),
            ));
            return;
        }
    };

    let mut regs: [Option<Reg>; 3] = [None; 3];
    let mut immediate = 0i64;

    match opcode.format() {
        OperandFormat::Registers => {
            if statement.operands.is_empty() {
                errors.push(AsmError::new(line, "SYSCALL requires at least 1 register"));
            }
            for (slot, operand) in statement.operands.iter().take(3).enumerate() {
                match Reg::from_name(operand.text()) {
                    Some(reg) => regs[slot] = Some(reg),
                    None => {
                        errors.push(AsmError::new(
                            line,
                            format!("Expected register, got: {}", operand.text()),
                        ));
                        break;
                    }
                }
            }
        }
        OperandFormat::Fixed(kinds) => {
            if statement.operands.len() != kinds.len() {
                errors.push(AsmError::new(
                    line,
                    format!(
                        "{} expects {} operand(s), got {}",
                        mnemonic,
                        kinds.len(),
                        statement.operands.len()
                    ),
                ));
            } else {
                let mut slot = 0;
                for (kind, operand) in kinds.iter().zip(&statement.operands) {
                    match kind {
                        OperandKind::Register => match Reg::from_name(operand.text()) {
                            Some(reg) => {
                                regs[slot] = Some(reg);
                                slot += 1;
                            }
                            None => {
                                errors.push(AsmError::new(
                                    line,
                                    format!("Expected register: {}", operand.text()),
                                ));
                                break;
                            }
                        },
                        OperandKind::Immediate => {
                            if let Some(value) = parse_value(line, operand, labels, errors) {
                                immediate = value;
                            }
                        }
                    }
                }
            }
        }
    }

    out.extend_from_slice(&instruction::encode_bytes(
        opcode as u8,
        instruction::reg_field(regs[0]),
        instruction::reg_field(regs[1]),
        instruction::reg_field(regs[2]),
        immediate as u32,
    ));
}

/// Resolves an operand as a known label or an integer literal (decimal,
/// `0x…` hex, `0b…` binary). Label lookup is case-sensitive.
fn parse_value(
    line: usize,
    operand: &Operand,
    labels: &LabelMap,
    errors: &mut Vec<AsmError>,
) -> Option<i64> {
    let value = match operand {
        Operand::Token(token) => literal_or_label(token, labels),
        Operand::Str(_) => None,
    };
    if value.is_none() {
        errors.push(AsmError::new(
            line,
            format!("Bad immediate/label: {}", operand.text()),
        ));
    }
    value
}

fn literal_or_label(token: &str, labels: &LabelMap) -> Option<i64> {
    if let Some(value) = labels.get(token) {
        return Some(*value as i64);
    }
    if let Some(digits) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return i64::from_str_radix(digits, 16).ok();
    }
    if let Some(digits) = token.strip_prefix("0b").or_else(|| token.strip_prefix("0B")) {
        return i64::from_str_radix(digits, 2).ok();
    }
    token.parse::<i64>().ok()
}
