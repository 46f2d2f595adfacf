use super::*;

#[test]
fn taken_when_less() {
    assert_eq!(branch_arm(instr_rri!(JLT, RA, RB, 18), 4, 5), 2);
}

#[test]
fn comparison_is_signed() {
    assert_eq!(branch_arm(instr_rri!(JLT, RA, RB, 18), -1, 1), 2);
}

#[test]
fn not_taken_when_equal() {
    assert_eq!(branch_arm(instr_rri!(JLT, RA, RB, 18), 5, 5), 1);
}
