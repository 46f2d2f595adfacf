use super::*;

#[test]
fn multiplies() {
    instruction_runs! {
        instr_rrr!(MUL, RC, RA, RB),
        [RA = 3, RB = -4] => [RC = -12]
    }
}

#[test]
fn wraps_at_24_bits() {
    instruction_runs! {
        instr_rrr!(MUL, RC, RA, RB),
        [RA = 0x1000, RB = 0x1000] => [RC = 0]
    }
}
