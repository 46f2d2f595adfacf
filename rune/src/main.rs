#[macro_use]
extern crate clap;

use std::io;
use std::process;

use clap::{Arg, ArgGroup};
use runevm::Termination;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("IMAGE")
                .help("Assembled .rune image to run")
                .index(1),
        )
        .arg(
            Arg::with_name("assembly")
                .short("a")
                .long("assembly")
                .takes_value(true)
                .value_name("ASSEMBLY")
                .help("Assemble and run a source file instead of an image"),
        )
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Print a per-instruction trace to stdout"),
        )
        .arg(
            Arg::with_name("memory")
                .short("m")
                .long("memory")
                .takes_value(true)
                .value_name("MEMORY")
                .default_value("4294967296")
                .help("Size of the code+data segment in bytes"),
        )
        .group(
            ArgGroup::with_name("input")
                .args(&["IMAGE", "assembly"])
                .required(true),
        )
        .get_matches();

    let mem_size = value_t!(matches.value_of("memory"), u64).unwrap_or_else(|err| err.exit());

    let image = match matches.value_of("IMAGE") {
        Some(path) => rune::load_image(path),
        None => rune::assemble_source(matches.value_of("assembly").unwrap()),
    };
    let image = match image {
        Ok(image) => image,
        Err(err) => {
            eprint!("{}", err);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    match rune::run_image(
        &image,
        mem_size,
        matches.is_present("debug"),
        &mut input,
        &mut output,
    ) {
        Ok(Ok(Termination::Halted)) => {}
        Ok(Ok(Termination::Exited(code))) => process::exit(code),
        Ok(Ok(Termination::InstructionLimit)) => {
            eprintln!("Max instruction limit reached");
        }
        Ok(Err(run_error)) => {
            eprintln!("{}", run_error);
            process::exit(1);
        }
        Err(err) => {
            eprint!("{}", err);
            process::exit(1);
        }
    }
}
