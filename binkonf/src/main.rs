//! KONF command-line translator: configuration text in, XML out.
//!
//! Usage: konf [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>    Write output to specified file
//!   -h, --help             Print help
//!   -V, --version          Print version

use std::fs;
use std::io::{self, Read};
use std::process;

use libkonf::ErrorKind;

mod encoding;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut output_file: Option<&str> = None;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("konf {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "-" => {
                // Explicit stdin
                // input_path stays None, which means stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    let raw_bytes: Vec<u8> = match input_path {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let input = match encoding::decode(&raw_bytes) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot decode input: {}", e);
            process::exit(1);
        }
    };

    let xml = match libkonf::translate(&input) {
        Ok(xml) => xml,
        Err(e) => {
            match e.kind() {
                ErrorKind::Syntax => eprintln!("Syntax error: {}", e),
                ErrorKind::Name => eprintln!("Name error: {}", e),
            }
            process::exit(1);
        }
    };

    match output_file {
        Some(path) => {
            if let Err(e) = fs::write(path, &xml) {
                eprintln!("Error writing {}: {}", path, e);
                process::exit(1);
            }
        }
        None => {
            print!("{}", xml);
        }
    }
}

fn print_help() {
    println!(
        "konf - KONF configuration translator

USAGE:
    konf [OPTIONS] [FILE]

ARGS:
    [FILE]    Input file (reads from stdin if not provided, or when FILE is -)

OPTIONS:
    -o, --output <FILE>    Write the XML document to the specified file

    -h, --help             Print help

    -V, --version          Print version

Input files may be encoded as UTF-8, UTF-16, or windows-1251; the
encoding is detected automatically. Output is always UTF-8.

EXAMPLES:
    # Translate a configuration file to XML on stdout
    konf settings.konf

    # Translate from stdin into a file
    cat settings.konf | konf -o settings.xml
"
    );
}
