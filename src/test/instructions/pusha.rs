use super::*;

#[test]
fn first_register_lands_at_the_lowest_address() {
    let program = image(&[
        instr_rrr!(PUSHA, RA, RB, RC),
        instr_r!(POP, RC),
        instr_n!(HALT),
    ]);
    let run = run(&program, [1, 2, 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers[Reg::RC as usize], 1);
    assert_eq!(
        run.sp,
        constants::STACK_BASE - 2 * constants::STACK_SLOT_BYTES
    );
}

#[test]
fn missing_register_faults() {
    instruction_faults! {
        raw_instruction(encode(Opcode::PUSHA as u8, 1, 2, 0, 0)),
        [],
        Fault::NoRegister
    }
}
