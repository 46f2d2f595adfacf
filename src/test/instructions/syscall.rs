use super::*;

#[test]
fn unknown_number_faults() {
    let program = image(&[instr_ri!(MOV, RA, 99), instr_r!(SYSCALL, RA), instr_n!(HALT)]);
    let run = run(&program, [0; 3]);
    assert!(matches!(run.fault(), Fault::UnknownSyscall(99)));
}

#[test]
fn missing_number_register_faults() {
    instruction_faults! {
        raw_instruction(encode(Opcode::SYSCALL as u8, 0, 0, 0, 0)),
        [],
        Fault::NoRegister
    }
}

#[test]
fn missing_argument_register_faults() {
    // PRINT_INT consumes an argument slot that was never named.
    let program = image(&[instr_ri!(MOV, RA, 1), instr_r!(SYSCALL, RA), instr_n!(HALT)]);
    let run = run(&program, [0; 3]);
    assert!(matches!(run.fault(), Fault::NoRegister));
}

#[test]
fn any_register_may_carry_the_number() {
    let program = image(&[
        instr_ri!(MOV, RC, 1),
        instr_ri!(MOV, RA, 7),
        instr_rr!(SYSCALL, RC, RA),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.output, "7");
}

#[test]
fn print_hex_is_uppercase_and_masked() {
    let program = image(&[
        instr_ri!(MOV, RA, 7),
        instr_ri!(MOV, RB, -1),
        instr_rr!(SYSCALL, RA, RB),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.output, "0xFFFFFF");
    assert_eq!(run.registers[Reg::RA as usize], 8);
}

#[test]
fn read_int_parses_a_line() {
    let program = image(&[
        instr_ri!(MOV, RA, 3),
        instr_r!(SYSCALL, RA),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "-123\n");
    assert_eq!(run.registers[Reg::RA as usize], -123);
}

#[test]
fn malformed_read_int_yields_zero() {
    let program = image(&[
        instr_ri!(MOV, RA, 3),
        instr_r!(SYSCALL, RA),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "not a number\n");
    assert_eq!(run.registers[Reg::RA as usize], 0);
}

#[test]
fn read_str_respects_the_length_cap() {
    // Read into 0x400 with a 3-byte cap, then print what landed.
    let program = image(&[
        instr_ri!(MOV, RA, 4),
        instr_ri!(MOV, RB, 0x400),
        instr_ri!(MOV, RC, 3),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_ri!(MOV, RA, 2),
        instr_ri!(MOV, RC, 0),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "abcdef\n");
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.output, "abc");
}

#[test]
fn read_str_with_zero_cap_writes_nothing() {
    let program = image(&[
        instr_ri!(MOV, RA, 4),
        instr_ri!(MOV, RB, 0x400),
        instr_ri!(MOV, RC, 0),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "abcdef\n");
    assert_eq!(run.registers[Reg::RA as usize], 0);
}

#[test]
fn strlen_counts_to_the_nul() {
    let mut program = image(&[
        instr_ri!(MOV, RA, 5),
        instr_ri!(MOV, RB, 24),
        instr_rr!(SYSCALL, RA, RB),
        instr_n!(HALT),
    ]);
    program.extend_from_slice(b"runes\0");
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.registers[Reg::RA as usize], 5);
}

#[test]
fn print_str_with_explicit_length_ignores_nuls() {
    let mut program = image(&[
        instr_ri!(MOV, RA, 2),
        instr_ri!(MOV, RB, 30),
        instr_ri!(MOV, RC, 4),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    program.extend_from_slice(b"a\0bc");
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.output, "a\0bc");
    assert_eq!(run.registers[Reg::RA as usize], 4);
}

#[test]
fn random_stays_in_the_word_range() {
    let program = image(&[
        instr_ri!(MOV, RB, 8),
        instr_r!(SYSCALL, RB),
        instr_n!(HALT),
    ]);
    let run = run(&program, [0; 3]);
    assert_eq!(run.termination(), Termination::Halted);
    let value = run.registers[Reg::RB as usize];
    assert!(value >= constants::WORD_MIN && value <= constants::WORD_MAX);
}

#[test]
fn exit_reports_its_code() {
    let program = image(&[
        instr_ri!(MOV, RA, 0),
        instr_ri!(MOV, RB, 3),
        instr_rr!(SYSCALL, RA, RB),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.termination(), Termination::Exited(3));
    assert_eq!(run.output, "");
}

#[test]
fn negative_exit_writes_a_diagnostic() {
    let program = image(&[
        instr_ri!(MOV, RA, 0),
        instr_ri!(MOV, RB, -2),
        instr_rr!(SYSCALL, RA, RB),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.termination(), Termination::Exited(-2));
    assert_eq!(run.output, "Program exited with error code -2\n");
}

#[test]
fn sys_info_names_a_syscall() {
    let program = image(&[
        instr_ri!(MOV, RA, 9),
        instr_ri!(MOV, RB, 10),
        instr_ri!(MOV, RC, 0xFFF),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.termination(), Termination::Halted);
    assert_eq!(run.output, "OS CMD");
}

#[test]
fn sys_info_without_the_key_exits() {
    let program = image(&[
        instr_ri!(MOV, RA, 9),
        instr_ri!(MOV, RB, 1),
        instr_ri!(MOV, RC, 0),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.termination(), Termination::Exited(1));
    assert_eq!(run.output, "Unknown syscall\n");
}

#[test]
fn strcmp_orders_byte_wise() {
    let mut program = image(&[
        instr_ri!(MOV, RA, 6),
        instr_ri!(MOV, RB, 30),
        instr_ri!(MOV, RC, 33),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    program.extend_from_slice(b"ab\0ac\0");
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.registers[Reg::RA as usize], -1);
}

#[test]
fn strcmp_prefix_orders_before_longer_string() {
    let mut program = image(&[
        instr_ri!(MOV, RA, 6),
        instr_ri!(MOV, RB, 30),
        instr_ri!(MOV, RC, 33),
        instr_rrr!(SYSCALL, RA, RB, RC),
        instr_n!(HALT),
    ]);
    program.extend_from_slice(b"ab\0abc\0");
    let run = run_with_io(&program, [0; 3], "");
    assert_eq!(run.registers[Reg::RA as usize], -1);
}
