use super::*;

#[test]
fn restores_all_three_registers() {
    let program = image(&[
        instr_rrr!(PUSHA, RA, RB, RC),
        instr_r!(MZERO, RA),
        instr_r!(MZERO, RB),
        instr_r!(MZERO, RC),
        instr_rrr!(POPA, RA, RB, RC),
        instr_n!(HALT),
    ]);
    let run = run(&program, [7, 8, -9]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers, [7, 8, -9]);
    assert_eq!(run.sp, constants::STACK_BASE);
}

#[test]
fn register_order_follows_the_operands() {
    let program = image(&[
        instr_rrr!(PUSHA, RA, RB, RC),
        instr_rrr!(POPA, RC, RB, RA),
        instr_n!(HALT),
    ]);
    let run = run(&program, [7, 8, 9]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers, [9, 8, 7]);
}
