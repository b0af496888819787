//! crucible-merge: load structured data from a file, directory, or raw text
//! and write it back out under a chosen write mode.
//!
//! Usage:
//!   # Print a directory fold to stdout
//!   crucible-merge ./configs
//!
//!   # Merge new data into an existing file
//!   crucible-merge fragment.json --output state.json --mode append-merge
//!
//!   # Parse (and repair) raw text
//!   crucible-merge --text '{"a": 1}' --output out.json
//!
//!   # Escape non-ASCII characters in the output
//!   crucible-merge data.json --output ascii.json --escape-ascii

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use crucible::{load, DumpOptions, Dumper, Source, WriteMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crucible-merge")]
#[command(about = "Load, merge, and persist structured data", long_about = None)]
struct Args {
    /// Input file or directory (omit when using --text)
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    /// Raw JSON text to load instead of a path
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Output file; if omitted, the result is printed to stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// How to treat an existing output file
    #[arg(long, value_enum, default_value_t = ModeArg::Overwrite)]
    mode: ModeArg,

    /// Escape non-ASCII characters as \uXXXX in the output
    #[arg(long)]
    escape_ascii: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Overwrite,
    AppendMerge,
    AppendOverride,
}

impl From<ModeArg> for WriteMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Overwrite => WriteMode::Overwrite,
            ModeArg::AppendMerge => WriteMode::AppendMerge,
            ModeArg::AppendOverride => WriteMode::AppendOverride,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let source = match (&args.input, &args.text) {
        (Some(path), None) => Source::detect(path)?,
        (None, Some(text)) => Source::from(text.as_str()),
        _ => bail!("provide exactly one of PATH or --text"),
    };

    let value = load(source)?;

    let options = DumpOptions::default()
        .with_mode(args.mode.into())
        .with_escape_non_ascii(args.escape_ascii);
    let dumper = Dumper::new(options);

    match args.output {
        Some(path) => {
            dumper.dump_to_file(value.into(), &path)?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            println!("{}", dumper.dump_to_string(value.into())?);
        }
    }

    Ok(())
}
