use super::*;

#[test]
fn adds() {
    instruction_runs! {
        instr_rrr!(ADD, RC, RA, RB),
        [RA = 3, RB = 4] => [RC = 7]
    }
}

#[test]
fn wraps_past_the_maximum() {
    instruction_runs! {
        instr_rrr!(ADD, RA, RA, RB),
        [RA = constants::WORD_MAX, RB = 1] => [RA = constants::WORD_MIN]
    }
}

#[test]
fn missing_operand_faults() {
    instruction_faults! {
        raw_instruction(encode(Opcode::ADD as u8, 1, 2, 0, 0)),
        [],
        Fault::NoRegister
    }
}
