use super::*;

#[test]
fn adds_an_immediate_in_place() {
    instruction_runs! {
        instr_ri!(ADDI, RA, 10),
        [RA = 32] => [RA = 42]
    }
}

#[test]
fn negative_immediate_subtracts() {
    instruction_runs! {
        instr_ri!(ADDI, RA, -4),
        [RA = 16] => [RA = 12]
    }
}
