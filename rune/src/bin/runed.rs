//! TCP front-end: one fresh machine per accepted connection, with the socket
//! as the machine's input and output. Connections share nothing; a faulting
//! client only ever takes down its own run, and diagnostics stay server-side.

#[macro_use]
extern crate clap;

use std::io::BufReader;
use std::net::{TcpListener, TcpStream};
use std::process;
use std::sync::Arc;
use std::thread;

use clap::Arg;
use runevm::Termination;

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("IMAGE")
                .help("Assembled .rune image to serve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("host")
                .long("host")
                .takes_value(true)
                .value_name("HOST")
                .default_value("0.0.0.0")
                .help("Address to bind"),
        )
        .arg(
            Arg::with_name("port")
                .short("p")
                .long("port")
                .takes_value(true)
                .value_name("PORT")
                .default_value("6666")
                .help("Port to listen on"),
        )
        .arg(
            Arg::with_name("memory")
                .short("m")
                .long("memory")
                .takes_value(true)
                .value_name("MEMORY")
                .default_value("4294967296")
                .help("Size of each machine's code+data segment in bytes"),
        )
        .get_matches();

    let path = matches.value_of("IMAGE").unwrap();
    let host = matches.value_of("host").unwrap().to_string();
    let port = value_t!(matches.value_of("port"), u16).unwrap_or_else(|err| err.exit());
    let mem_size = value_t!(matches.value_of("memory"), u64).unwrap_or_else(|err| err.exit());

    let image = match rune::load_image(path) {
        Ok(image) => Arc::new(image),
        Err(err) => {
            eprint!("{}", err);
            process::exit(1);
        }
    };

    let listener = match TcpListener::bind((host.as_str(), port)) {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("[!] Binding {}:{} failed: {}", host, port, err);
            process::exit(1);
        }
    };

    println!("[*] Listening on {}:{}", host, port);
    println!("[*] Running program: {}", path);

    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let image = Arc::clone(&image);
                thread::spawn(move || handle_client(stream, &image, mem_size));
            }
            Err(err) => eprintln!("[!] Accept failed: {}", err),
        }
    }
}

fn handle_client(stream: TcpStream, image: &[u8], mem_size: u64) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    println!("[+] Connection from {}", peer);

    match serve(stream, image, mem_size) {
        Ok(_) => {}
        Err(message) => eprintln!("[!] Error for {}: {}", peer, message),
    }
    println!("[-] Closed {}", peer);
}

fn serve(stream: TcpStream, image: &[u8], mem_size: u64) -> Result<Termination, String> {
    let reader = stream.try_clone().map_err(|err| err.to_string())?;
    let mut input = BufReader::new(reader);
    let mut output = stream;

    match rune::run_image(image, mem_size, false, &mut input, &mut output) {
        Ok(Ok(termination)) => Ok(termination),
        Ok(Err(run_error)) => Err(run_error.to_string()),
        Err(err) => Err(err.to_string()),
    }
}
