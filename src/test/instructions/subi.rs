use super::*;

#[test]
fn subtracts_an_immediate_in_place() {
    instruction_runs! {
        instr_ri!(SUBI, RB, 7),
        [RB = 5] => [RB = -2]
    }
}
