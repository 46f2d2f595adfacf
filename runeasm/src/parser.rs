use pest_derive::Parser;

/// Pest parser for the rune assembly dialect.
#[derive(Parser)]
#[grammar = "runeasm.pest"]
pub struct RuneAsmParser;
