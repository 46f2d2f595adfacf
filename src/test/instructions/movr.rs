use super::*;

#[test]
fn copies_between_registers() {
    instruction_runs! {
        instr_rr!(MOVR, RB, RA),
        [RA = -1234] => [RB = -1234]
    }
}

#[test]
fn missing_source_faults() {
    instruction_faults! {
        raw_instruction(encode(Opcode::MOVR as u8, 1, 0, 0, 0)),
        [],
        Fault::NoRegister
    }
}
