use super::*;

#[test]
fn moves_the_stack_pointer_down_one_slot() {
    let program = image(&[instr_r!(PUSH, RA), instr_n!(HALT)]);
    let run = run(&program, [5, 0, 0]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.sp, constants::STACK_BASE - constants::STACK_SLOT_BYTES);
}
