use super::*;

#[test]
fn returns_the_pushed_value() {
    let program = image(&[
        instr_ri!(MOV, RA, -5),
        instr_r!(PUSH, RA),
        instr_r!(POP, RB),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers[Reg::RB as usize], -5);
    assert_eq!(run.sp, constants::STACK_BASE);
}
