use super::*;

#[test]
fn jumps_to_the_popped_slot() {
    let program = image(&[
        instr_i!(PUSHI, 12),
        instr_n!(RET),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.sp, constants::STACK_BASE);
    assert_eq!(run.pc, 18);
}
