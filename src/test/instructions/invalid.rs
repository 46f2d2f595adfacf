use super::*;

#[test]
fn unknown_opcode() {
    instruction_faults! {
        raw_instruction(encode(0x27, 0, 0, 0, 0)),
        [],
        Fault::UnknownOpcode(0x27)
    }
}

#[test]
fn reserved_bits_high() {
    instruction_faults! {
        raw_instruction(encode(Opcode::MOV as u8, 1, 0, 0, 5) | (1 << 32)),
        [],
        Fault::ReservedBits(_)
    }
}

#[test]
fn reserved_bits_low() {
    instruction_faults! {
        raw_instruction(encode(Opcode::MOV as u8, 1, 0, 0, 5) | (1 << 24)),
        [],
        Fault::ReservedBits(_)
    }
}
