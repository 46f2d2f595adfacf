use super::*;

#[test]
fn jumps_over_an_instruction() {
    let program = image(&[
        instr_i!(JMP, 12),
        instr_ri!(MOV, RA, 1),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers[Reg::RA as usize], 0);
    assert_eq!(run.pc, 18);
}

#[test]
fn negative_target_faults_on_the_next_fetch() {
    let program = image(&[instr_i!(JMP, -6)]);
    let run = run(&program, [0; 3]);
    assert!(matches!(run.fault(), Fault::FetchOutOfBounds));
}
