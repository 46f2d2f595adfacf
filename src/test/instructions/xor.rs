use super::*;

#[test]
fn toggles_bits() {
    instruction_runs! {
        instr_rrr!(XOR, RC, RA, RB),
        [RA = 0x0FF0, RB = 0x00FF] => [RC = 0x0F0F]
    }
}

#[test]
fn self_xor_clears() {
    instruction_runs! {
        instr_rrr!(XOR, RA, RB, RB),
        [RA = 5, RB = -42] => [RA = 0]
    }
}
