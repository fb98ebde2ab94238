use std::env;
use std::process::ExitCode;

use cache_dp::builder::{DEFAULT_CACHE_CAPACITY, DEFAULT_LINE_SIZE};
use cache_dp::input::MappedFile;
use cache_dp::{Aligner, AlignError};

fn main() -> ExitCode {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("edit_distance: {err}");
            Options::print_help();
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("edit_distance: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(options: &Options) -> Result<(), AlignError> {
    let first = MappedFile::open(&options.first.path)?;
    let second = MappedFile::open(&options.second.path)?;
    let x = first.window(options.first.offset, options.first.len)?;
    let y = second.window(options.second.offset, options.second.len)?;

    let aligner = Aligner::builder()
        .with_cache_capacity(options.capacity)
        .with_line_size(options.line_size)
        .build()?;
    let report = aligner.compare(x, y)?;

    for result in report.results() {
        println!("{result}");
    }
    if !report.is_consistent() {
        eprintln!("warning: kernels returned inconsistent distances");
    }
    Ok(())
}

/// `(path, offset, len)` triple naming a byte range of a file.
struct Source {
    path: String,
    offset: usize,
    len: usize,
}

struct Options {
    first: Source,
    second: Source,
    capacity: usize,
    line_size: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut positional = Vec::with_capacity(6);
        let mut capacity = DEFAULT_CACHE_CAPACITY;
        let mut line_size = DEFAULT_LINE_SIZE;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--capacity=") {
                capacity = parse_count("capacity", value)?;
            } else if arg == "--capacity" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --capacity".to_string())?
                    .into();
                capacity = parse_count("capacity", &value)?;
            } else if let Some(value) = arg.strip_prefix("--line-size=") {
                line_size = parse_count("line size", value)?;
            } else if arg == "--line-size" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --line-size".to_string())?
                    .into();
                line_size = parse_count("line size", &value)?;
            } else if arg.starts_with("--") {
                return Err(format!("unrecognized argument '{arg}'"));
            } else {
                positional.push(arg);
            }
        }

        if positional.len() != 6 {
            return Err(format!(
                "expected 6 positional arguments, got {}",
                positional.len()
            ));
        }
        let mut it = positional.into_iter();
        let mut source = |label: &str| -> Result<Source, String> {
            let path = it.next().unwrap_or_default();
            let offset = parse_count(&format!("{label} offset"), &it.next().unwrap_or_default())?;
            let len = parse_count(&format!("{label} length"), &it.next().unwrap_or_default())?;
            Ok(Source { path, offset, len })
        };
        let first = source("first")?;
        let second = source("second")?;

        Ok(Self {
            first,
            second,
            capacity,
            line_size,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: edit_distance FILE1 B1 L1 FILE2 B2 L2 [options]

Aligns FILE1[B1..B1+L1) against FILE2[B2..B2+L2) with the iterative,
cache-aware and cache-oblivious kernels and prints one line per kernel.

Options:
  --capacity <bytes>     Cache capacity for the cache-aware kernel (default: {DEFAULT_CACHE_CAPACITY})
  --line-size <bytes>    Cache line size for the cache-aware kernel (default: {DEFAULT_LINE_SIZE})
  -h, --help             Print this help message
"
        );
    }
}

fn parse_count(what: &str, value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a non-negative integer, got '{value}'"))
}
