use super::*;

#[test]
fn divides() {
    instruction_runs! {
        instr_rrr!(DIV, RC, RA, RB),
        [RA = 7, RB = 2] => [RC = 3]
    }
}

#[test]
fn truncates_toward_zero_for_negative_dividends() {
    instruction_runs! {
        instr_rrr!(DIV, RC, RA, RB),
        [RA = -7, RB = 2] => [RC = -3]
    }
}

#[test]
fn truncates_toward_zero_for_negative_divisors() {
    instruction_runs! {
        instr_rrr!(DIV, RC, RA, RB),
        [RA = 7, RB = -2] => [RC = -3]
    }
}

#[test]
fn by_zero_faults() {
    instruction_faults! {
        instr_rrr!(DIV, RC, RA, RB),
        [RA = 7],
        Fault::DivisionByZero
    }
}
