use super::*;

#[test]
fn negative_register_addresses_reach_the_stack_segment() {
    let program = image(&[
        instr_ri!(MOV, RA, -16),
        instr_ri!(MOV, RB, 99),
        instr_rr!(STORE, RA, RB),
        instr_rr!(LOAD, RC, RA),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.registers[Reg::RC as usize], 99);
}

#[test]
fn address_in_the_segment_gap_faults() {
    instruction_faults! {
        instr_rr!(STORE, RA, RB),
        [RA = -0x20_0000, RB = 1],
        Fault::OutOfBounds(_)
    }
}
