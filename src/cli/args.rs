// src/args.rs
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Directory the org files are written to
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Path to Anki collection file (optional)
    #[arg(short, long, value_name = "COLLECTION")]
    pub collection: Option<PathBuf>,

    /// Profile name (optional)
    #[arg(short, long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Deck to export (overrides the config file, default "Default")
    #[arg(short, long, value_name = "DECK")]
    pub deck: Option<String>,

    /// Only export notes edited within the last DAYS days
    #[arg(long, value_name = "DAYS")]
    pub edited: Option<u32>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
