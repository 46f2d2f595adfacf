//! Assembler for the [Unknown Runes](../runevm/index.html) virtual machine.
//!
//! [`assemble`](fn.assemble.html) takes assembly source and produces the flat
//! byte image the machine loads at address 0. Assembly is two-pass: the first
//! pass walks the source computing byte offsets and recording labels, the
//! second emits directive bytes and encoded instructions, resolving label
//! references through the pass-1 table. Semantic errors accumulate with their
//! source line numbers, so one run reports everything that is wrong.
//!
//! Parsing is implemented with [pest]; the grammar lives in `runeasm.pest`.
//!
//! # Source dialect
//!
//! The language is line-oriented. A `;` starts a comment running to the end
//! of the line. Each line may carry an optional `label:` prefix, followed by
//! an instruction or directive whose operands are separated by whitespace
//! and/or commas:
//!
//! ```text
//! ; greet whoever connects
//!         MOV RA, 2          ; PRINT_STR
//!         MOV RB, greeting
//!         MZERO RC
//!         SYSCALL RA, RB, RC
//!         HALT
//! greeting: .DS "hello\n"
//! ```
//!
//! Mnemonics and register names are case-insensitive; label names are
//! case-sensitive. Immediate operands accept signed decimal, `0x…` hex and
//! `0b…` binary literals, or the name of any label defined in the program
//! (forward references included).
//!
//! ## Directives
//!
//!  Keyword | Description | Syntax
//! ---------|-------------|--------
//! `.DB`/`.BYTE` | one byte per value | `.DB <int> [, <int>]*`
//! `.DW`/`.WORD` | one 24-bit little-endian word per value | `.DW <int> [, <int>]*`
//! `.DS`/`.STRING` | escape-decoded string bytes plus a NUL | `.DS "text"`
//! `.ALIGN` | zero-pad to the next 6-byte boundary | `.ALIGN`
//!
//! String literals may use `"…"` or `'…'` delimiters and understand the
//! escapes `\n`, `\t`, `\r`, `\0`, `\\`, `\"`, `\'` and `\xHH`; any other
//! escaped character stands for itself.
//!
//! [pest]: https://docs.rs/pest/

mod error;
mod parser;
mod statements;
mod strings;


use pest::error::LineColLocation;
use pest::Parser;

pub use error::{AsmError, AsmErrors};
use parser::{Rule, RuneAsmParser};

/// Assembles source text into a program image. On failure, every collected
/// error is returned in source order and no image is produced.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmErrors> {
    let program = RuneAsmParser::parse(Rule::program, source)
        .map_err(syntax_error)?
        .next()
        .unwrap();

    let lines = statements::collect_lines(program);
    let (labels, expected_len) = statements::pass1(&lines);

    let mut errors = Vec::new();
    let image = statements::pass2(&lines, &labels, &mut errors);

    if !errors.is_empty() {
        return Err(AsmErrors(errors));
    }
    debug_assert_eq!(image.len() as u64, expected_len);
    Ok(image)
}

fn syntax_error(error: pest::error::Error<Rule>) -> AsmErrors {
    let line = match error.line_col {
        LineColLocation::Pos((line, _)) => line,
        LineColLocation::Span((line, _), _) => line,
    };
    let message = match &error.variant {
        pest::error::ErrorVariant::CustomError { message } => message.clone(),
        _ => "unexpected token".to_string(),
    };
    AsmErrors(vec![AsmError::new(line, format!("Syntax error: {}", message))])
}
