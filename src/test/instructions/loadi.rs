use super::*;

#[test]
fn reads_at_an_immediate_address() {
    let program = image(&[
        instr_ri!(MOV, RA, 0x777),
        instr_ri!(STOREI, RA, 0x600),
        instr_ri!(LOADI, RB, 0x600),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers[Reg::RB as usize], 0x777);
}

#[test]
fn most_negative_immediate_faults() {
    instruction_faults! {
        instr_ri!(LOADI, RC, -0x80_0000),
        [],
        Fault::OutOfBounds(_)
    }
}
