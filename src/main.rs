// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! datarun — NTFS data run decoder and file carver
//!
//! Usage:
//!   datarun -dr "21 18 34 56 00"                         # print resolved ranges
//!   datarun -dr 2118345600 -f image.dd -o out.bin -v     # carve the file
//!   datarun -dr 2118345600 --json                        # ranges as JSON

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use datarun::carver;
use datarun::config::{Config, SparsePolicy};
use datarun::report::{RangeTable, Report, RunTable};
use datarun::runs;

#[derive(Parser)]
#[command(
    name = "datarun",
    about = "Forensic tool for reconstructing files from NTFS data runs",
    version
)]
struct Cli {
    /// Hexadecimal data run, contiguous or as space-separated bytes.
    /// `-dr` is accepted as well.
    #[arg(short = 'd', long = "datarun")]
    datarun: String,

    /// Raw image (.dd) to carve from. Without it, ranges are only printed.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output path for the reconstructed file [default: reconstructed_file.bin].
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print per-run diagnostics and per-segment progress.
    #[arg(short, long)]
    verbose: bool,

    /// Cluster size in bytes [default: 4096].
    #[arg(short = 'c', long = "clustersize")]
    cluster_size: Option<u32>,

    /// Optional TOML configuration file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Write zeros for sparse runs instead of reading them from the image.
    #[arg(long)]
    zero_sparse: bool,
}

/// clap shorts are a single character; map the historical `-dr` spelling.
fn legacy_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| if arg == "-dr" { OsString::from("--datarun") } else { arg })
        .collect()
}

fn main() {
    let cli = Cli::parse_from(legacy_args(std::env::args_os()));

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!(error = %format!("{e:#}"), "Reconstruction failed");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(cluster_size) = cli.cluster_size {
        cfg.cluster_size = cluster_size;
    }
    if let Some(output) = cli.output {
        cfg.output = output;
    }
    if cli.zero_sparse {
        cfg.sparse = SparsePolicy::ZeroFill;
    }
    cfg.validate()?;

    if cli.verbose {
        info!(cluster_size = cfg.cluster_size, "Verbose mode enabled");
    }

    let decoded = runs::decode(&cli.datarun).context("Cannot decode data run")?;
    let ranges = runs::resolve(&decoded, cfg.cluster_size);

    for range in ranges.iter().filter(|r| !r.is_addressable()) {
        warn!(
            run = range.run_index,
            start = %range.start_byte,
            lcn = %range.absolute_lcn,
            "Range starts before the beginning of the medium"
        );
    }

    if cli.verbose && !cli.json {
        print!("{}", RunTable(&decoded));
    }

    match cli.file {
        None => {
            if cli.json {
                println!("{}", Report::new(cfg.cluster_size, &decoded, &ranges).to_json()?);
            } else {
                print!("{}", RangeTable(&ranges));
            }
        }
        Some(source) => {
            if cli.verbose {
                print!("{}", RangeTable(&ranges));
                info!(source = ?source, "Starting file reconstruction");
            }
            let written = carver::carve_to_file(&ranges, &source, &cfg.output, cfg.sparse)
                .with_context(|| format!("Cannot reconstruct file from {}", source.display()))?;
            println!(
                "Reconstructed file saved as: {} ({written} bytes)",
                cfg.output.display()
            );
        }
    }

    Ok(())
}
