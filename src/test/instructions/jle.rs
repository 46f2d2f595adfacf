use super::*;

#[test]
fn taken_when_equal() {
    assert_eq!(branch_arm(instr_rri!(JLE, RA, RB, 18), 5, 5), 2);
}

#[test]
fn not_taken_when_greater() {
    assert_eq!(branch_arm(instr_rri!(JLE, RA, RB, 18), 6, 5), 1);
}
