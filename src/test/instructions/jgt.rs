use super::*;

#[test]
fn taken_when_greater() {
    assert_eq!(branch_arm(instr_rri!(JGT, RA, RB, 18), 6, 5), 2);
}

#[test]
fn not_taken_for_signed_less() {
    assert_eq!(branch_arm(instr_rri!(JGT, RA, RB, 18), -6, 5), 1);
}
