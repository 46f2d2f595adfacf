use super::*;

#[test]
fn pushes_a_sign_extended_immediate() {
    let program = image(&[
        instr_i!(PUSHI, -42),
        instr_r!(POP, RA),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers[Reg::RA as usize], -42);
}
