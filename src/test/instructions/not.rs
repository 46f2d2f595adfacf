use super::*;

// NOT is arithmetic negation (the complement lives on NEG).

#[test]
fn negates() {
    instruction_runs! {
        instr_r!(NOT, RA),
        [RA = 5] => [RA = -5]
    }
}

#[test]
fn negates_back() {
    instruction_runs! {
        instr_r!(NOT, RA),
        [RA = -5] => [RA = 5]
    }
}

#[test]
fn minimum_wraps_to_itself() {
    instruction_runs! {
        instr_r!(NOT, RA),
        [RA = constants::WORD_MIN] => [RA = constants::WORD_MIN]
    }
}
