use super::*;

#[test]
fn merges_bits() {
    instruction_runs! {
        instr_rrr!(OR, RC, RA, RB),
        [RA = 0x0F00, RB = 0x00F0] => [RC = 0x0FF0]
    }
}
