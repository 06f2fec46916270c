#![forbid(unsafe_code)]
use std::path::PathBuf;
use std::{env, ffi, process};

use graylzw::gray::{self, Png};
use graylzw::Error;

fn main() -> CodingResult {
    CodingResult::catch_panic(|| {
        let flags = Flags::from_args(env::args_os()).unwrap_or_else(|ParamError| explain());
        run_coding(flags)
    })
}

fn run_coding(flags: Flags) -> Result<(), Error> {
    let operation = flags.operation.unwrap_or_else(explain);

    match operation {
        Operation::Compress => {
            let image = gray::read_image(&Png, &flags.input)?;
            gray::compress_to_file(&image, &flags.output)?;
        }
        Operation::Decompress => {
            let image = gray::decompress_from_file(&flags.input)?;
            if flags.dump {
                println!("{}", image);
            }
            gray::write_image(&Png, &image, &flags.output)?;
        }
    }
    Ok(())
}

struct Flags {
    input: PathBuf,
    output: PathBuf,
    operation: Option<Operation>,
    dump: bool,
}

struct ParamError;

#[derive(Debug)]
enum Operation {
    Compress,
    Decompress,
}

fn explain<T>() -> T {
    println!(
        "Usage: graylzw [-c|-d] <input> <output>\n\
        Arguments:\n\
        -c\tcompress the raster image <input> into the stream file <output>\n\
        -d\tdecompress the stream file <input> into the PNG <output>\n\
        --dump\twith -d, also print the decoded pixel grid to stdout"
    );
    process::exit(1);
}

fn command() -> clap::Command<'static> {
    clap::Command::new("graylzw")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between raster images and graylzw compressed streams")
        .arg(
            clap::Arg::new("compress")
                .short('c')
                .long("--compress")
                .takes_value(false),
        )
        .arg(
            clap::Arg::new("decompress")
                .short('d')
                .long("--decompress")
                .takes_value(false),
        )
        .group(
            clap::ArgGroup::new("operation")
                .args(&["compress", "decompress"])
                .multiple(false)
                .required(true),
        )
        .arg(clap::Arg::new("dump").long("--dump").takes_value(false))
        .arg(
            clap::Arg::new("input")
                .required(true)
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
        .arg(
            clap::Arg::new("output")
                .required(true)
                .value_parser(clap::builder::ValueParser::path_buf()),
        )
}

impl Flags {
    fn from_args(mut args: impl Iterator<Item = ffi::OsString>) -> Result<Self, ParamError> {
        let matches = command().get_matches_from(args.by_ref());

        let operation = if matches.contains_id("decompress") {
            Some(Operation::Decompress)
        } else if matches.contains_id("compress") {
            Some(Operation::Compress)
        } else {
            None
        };

        let input = match matches.get_one::<PathBuf>("input") {
            Some(path) => path.clone(),
            None => return Err(ParamError),
        };
        let output = match matches.get_one::<PathBuf>("output") {
            Some(path) => path.clone(),
            None => return Err(ParamError),
        };

        Ok(Flags {
            input,
            output,
            operation,
            dump: matches.contains_id("dump"),
        })
    }
}

enum CodingResult {
    Ok,
    Err(Error),
    Panic,
}

impl CodingResult {
    fn catch_panic(op: fn() -> Result<(), Error>) -> Self {
        std::panic::catch_unwind(|| match op() {
            Ok(()) => CodingResult::Ok,
            Err(err) => CodingResult::Err(err),
        })
        .unwrap_or(CodingResult::Panic)
    }
}

impl process::Termination for CodingResult {
    fn report(self) -> process::ExitCode {
        match self {
            CodingResult::Ok => process::ExitCode::SUCCESS,
            CodingResult::Err(err) => {
                eprintln!("{}", err);
                process::ExitCode::FAILURE
            }
            CodingResult::Panic => {
                eprintln!(
                    "The process failed irrecoverably! This should never happen and is a bug."
                );
                process::ExitCode::from(128)
            }
        }
    }
}
