//! Decode JSON documents and print them re-encoded.
//!
//! With a file argument the whole file is one document; otherwise every
//! line of stdin is decoded on its own.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use json_parser::{decode, encode, from_reader, EncodeOptions, Error, Value};

#[derive(Parser)]
#[command(name = "json-parser")]
#[command(about = "Decode JSON and print it re-encoded", long_about = None)]
#[command(version)]
struct Cli {
    /// Read one document from this file instead of one per stdin line
    file: Option<PathBuf>,

    /// One element per line
    #[arg(long)]
    pretty: bool,

    /// Spaces per nesting level with --pretty
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Emit object keys in sorted order
    #[arg(long)]
    sort_keys: bool,

    /// Leave `/` unescaped
    #[arg(long)]
    no_escape_slash: bool,
}

impl Cli {
    fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::default()
            .pretty(self.pretty)
            .indent(self.indent)
            .sort_keys(self.sort_keys)
            .escape_slash(!self.no_escape_slash)
    }
}

fn print_value(value: &Value, options: &EncodeOptions) -> Result<(), Error> {
    println!("{}", encode(value, options)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let options = cli.encode_options();

    if let Some(path) = &cli.file {
        let result = File::open(path)
            .map_err(Error::from)
            .and_then(from_reader)
            .and_then(|value| print_value(&value, &options));
        return match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                ExitCode::FAILURE
            }
        };
    }

    let mut failed = false;
    for (index, line) in io::stdin().lock().lines().enumerate() {
        let result = match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => decode(&line)
                .map_err(Error::from)
                .and_then(|value| print_value(&value, &options)),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = result {
            eprintln!("line {}: {err}", index + 1);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
