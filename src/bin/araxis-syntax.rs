//! araxis-syntax CLI
//!
//! Unpack/pack/merge Araxis Merge generic syntax definitions.

use anyhow::{Context, Result};
use araxis_syntax::commands;
use araxis_syntax::{BlobFormat, BlobStore, Location, UnpackOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "araxis-syntax")]
#[command(version)]
#[command(about = "Unpack/pack/merge Araxis Merge generic syntax definitions")]
struct Cli {
    /// Omit the 'json:' header and pretty-print the blob
    #[arg(long, global = true)]
    no_header: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Unpack an Araxis blob into per-language JSON files
    Unpack {
        /// Blob file, or reg:[version]
        source: String,

        /// Directory to write language files to
        output_dir: PathBuf,

        /// Overwrite existing language files instead of choosing new names
        #[arg(long)]
        overwrite: bool,
    },

    /// Pack per-language JSON files into an Araxis blob
    Pack {
        /// Directory of language files
        input_dir: PathBuf,

        /// Blob file, or reg:[version]
        target: String,
    },

    /// UPSERT per-language JSON files into an existing Araxis blob
    Merge {
        /// Directory of language files
        input_dir: PathBuf,

        /// Blob file, or reg:[version]
        target: String,
    },

    /// List the languages in an Araxis blob
    List {
        /// Blob file, or reg:[version]
        source: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = BlobFormat::from_no_header(cli.no_header);

    match cli.command {
        Commands::Unpack { source, output_dir, overwrite } => {
            let store = open(&source)?;
            let summary = commands::unpack(store.as_ref(), &output_dir, &UnpackOptions { overwrite })
                .with_context(|| format!("Failed to unpack {}", source))?;
            if !summary.orphaned.is_empty() {
                tracing::warn!(
                    "dropped entries for {} unknown pattern suffix(es): {}",
                    summary.orphaned.len(),
                    summary.orphaned.join(", ")
                );
            }
            println!(
                "Wrote {} language JSON file(s) to: {}",
                summary.files.len(),
                output_dir.display()
            );
        }
        Commands::Pack { input_dir, target } => {
            let store = open(&target)?;
            let summary = commands::pack(&input_dir, store.as_ref(), format)
                .with_context(|| format!("Failed to pack {}", input_dir.display()))?;
            println!("Wrote {} language(s) to: {}", summary.languages, store.describe());
        }
        Commands::Merge { input_dir, target } => {
            let store = open(&target)?;
            let summary = commands::merge(&input_dir, store.as_ref(), format)
                .with_context(|| format!("Failed to merge {} into {}", input_dir.display(), target))?;
            println!(
                "Merged {} language(s) into: {} ({} replaced, {} inserted, {} unchanged)",
                summary.incoming,
                store.describe(),
                summary.replaced.len(),
                summary.inserted.len(),
                summary.carried
            );
        }
        Commands::List { source } => {
            let store = open(&source)?;
            let languages = commands::list(store.as_ref())
                .with_context(|| format!("Failed to read {}", source))?;
            for lang in &languages {
                println!("{}  {}  {}", lang.id, lang.filename_pattern, lang.name);
            }
        }
    }

    Ok(())
}

fn open(location: &str) -> Result<Box<dyn BlobStore>> {
    let location: Location = location.parse()?;
    // No registry backend is compiled into this build; reg: locations report that.
    location
        .open(None)
        .with_context(|| format!("Failed to open {}", location))
}

/// `RUST_LOG` wins; otherwise `-v` raises the default level.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
