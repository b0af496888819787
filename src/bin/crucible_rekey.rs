//! crucible-rekey: rename a key everywhere inside JSON files.
//!
//! Usage:
//!   # One file, in place
//!   crucible-rekey data.json --from name --to category_name
//!
//!   # Every .json file under a tree
//!   crucible-rekey ./categories --recursive --from name --to category_name

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Result};
use clap::Parser;
use crucible::{rekey_file, rekey_tree};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crucible-rekey")]
#[command(about = "Recursively rename a key inside JSON files", long_about = None)]
struct Args {
    /// File to rewrite, or a directory root with --recursive
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Key to replace
    #[arg(long = "from", value_name = "OLD_KEY")]
    old_key: String,

    /// Replacement key
    #[arg(long = "to", value_name = "NEW_KEY")]
    new_key: String,

    /// Walk PATH recursively and rewrite every .json file
    #[arg(long, short = 'r')]
    recursive: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.recursive {
        let processed = rekey_tree(&args.path, &args.old_key, &args.new_key)?;
        eprintln!("rekeyed {processed} file(s) under {}", args.path.display());
    } else {
        if args.path.is_dir() {
            bail!(
                "{} is a directory; pass --recursive to rewrite a tree",
                args.path.display()
            );
        }
        rekey_file(&args.path, &args.old_key, &args.new_key)?;
        eprintln!("rekeyed {}", args.path.display());
    }

    Ok(())
}
