#[macro_use]
extern crate clap;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Arg;

#[derive(Debug)]
enum Error {
    Io(std::io::Error, PathBuf),
    Asm(runeasm::AsmErrors),
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("Assembly source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .help("Path of the assembled image"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("output");

    match rasm(input, output) {
        Ok(()) => {}
        Err(Error::Io(err, path)) => {
            eprintln!("rasm: {}: {}", path.display(), err);
            process::exit(1);
        }
        Err(Error::Asm(errors)) => {
            for error in &errors.0 {
                eprintln!("ASM ERROR: {}", error);
            }
            process::exit(1);
        }
    }
}

fn rasm(input: &str, output: Option<&str>) -> Result<(), Error> {
    let input_path = Path::new(input);
    let source =
        fs::read_to_string(input_path).map_err(|err| Error::Io(err, input_path.to_owned()))?;

    let image = runeasm::assemble(&source).map_err(Error::Asm)?;

    let output_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input_path.with_extension("rune"));
    fs::write(&output_path, &image).map_err(|err| Error::Io(err, output_path.clone()))?;

    println!("Assembled {} bytes", image.len());
    println!("Written to {}", output_path.display());
    Ok(())
}
