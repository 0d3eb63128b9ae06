use std::env;
use std::io::Read;

use anyhow::Context;
use urlquote::codec::{self, OutputKind};
use urlquote::utils::log::{set_log_level, LogLevel};
use urlquote::{log_debug, log_error};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }
    let command = &args[1];
    let options = Options::parse(&args[2..])?;

    if options.verbose {
        set_log_level(LogLevel::Debug);
    }

    if command == "quote" {
        // quote [flags] <text|->
        let input = options.read_input()?;
        let quoted = codec::quote(&input, options.output_kind);
        log_debug!("quote", "{} bytes in, {} bytes out", input.len(), quoted.len());
        print_output(quoted.as_bytes(), options.hex);
    } else if command == "unquote" {
        // unquote [flags] <text|->
        let input = options.read_input()?;
        match codec::unquote(&input, options.output_kind) {
            Ok(unquoted) => {
                log_debug!(
                    "unquote",
                    "{} bytes in, {} bytes out",
                    input.len(),
                    unquoted.len()
                );
                print_output(unquoted.as_bytes(), options.hex);
            }
            Err(err) => {
                log_error!("unquote", "{}", err);
                std::process::exit(1);
            }
        }
    } else {
        println!("unknown command: {}", command);
        std::process::exit(2);
    }

    Ok(())
}

struct Options {
    output_kind: OutputKind,
    hex: bool,
    verbose: bool,
    input: Option<String>,
}

impl Options {
    fn parse(args: &[String]) -> anyhow::Result<Options> {
        let mut options = Options {
            output_kind: OutputKind::Buffer,
            hex: false,
            verbose: false,
            input: None,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--output" {
                let kind = iter
                    .next()
                    .context("--output requires a value (binary or list)")?;
                options.output_kind = kind.parse().context("invalid --output value")?;
            } else if arg == "--hex" {
                options.hex = true;
            } else if arg == "-v" {
                options.verbose = true;
            } else {
                options.input = Some(arg.clone());
            }
        }

        Ok(options)
    }

    /// Argument bytes, or all of stdin when the argument is `-` or absent.
    fn read_input(&self) -> anyhow::Result<Vec<u8>> {
        match self.input.as_deref() {
            Some("-") | None => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buf)
                    .context("failed to read stdin")?;
                Ok(buf)
            }
            Some(text) => Ok(text.as_bytes().to_vec()),
        }
    }
}

fn print_output(bytes: &[u8], as_hex: bool) {
    if as_hex {
        println!("{}", hex::encode(bytes));
    } else {
        println!("{}", String::from_utf8_lossy(bytes));
    }
}

fn print_usage() {
    println!("usage: urlquote <quote|unquote> [--output binary|list] [--hex] [-v] <text|->");
}
