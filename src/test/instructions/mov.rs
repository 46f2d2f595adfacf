use super::*;

#[test]
fn loads_an_immediate() {
    instruction_runs! {
        instr_ri!(MOV, RA, 42),
        [] => [RA = 42]
    }
}

#[test]
fn loads_a_negative_immediate() {
    instruction_runs! {
        instr_ri!(MOV, RB, -1),
        [RB = 7] => [RB = -1]
    }
}

#[test]
fn high_bit_sign_extends() {
    instruction_runs! {
        instr_ri!(MOV, RC, 0x80_0000),
        [] => [RC = constants::WORD_MIN]
    }
}

#[test]
fn missing_register_faults() {
    instruction_faults! {
        raw_instruction(encode(Opcode::MOV as u8, 0, 0, 0, 5)),
        [],
        Fault::NoRegister
    }
}
