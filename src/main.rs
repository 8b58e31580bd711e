use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use seqstitch::{merge_manifest, DataSink, MergeConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Merge overlapping FASTA chunks back into full-length sequences
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File listing chunk FASTA paths in merge order (whitespace separated)
    manifest: PathBuf,

    /// Merged FASTA output ('-' for stdout, '.gz' for gzip)
    output: PathBuf,

    /// Bases per output sequence line
    #[arg(long, default_value_t = seqstitch::merge::DEFAULT_LINE_WIDTH)]
    line_width: usize,

    /// Log every chunk and record
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else if self.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        }
    }
}

fn run(args: &Args) -> Result<()> {
    info!("Running seqstitch version {}", seqstitch::VERSION);
    let config = MergeConfig::default().with_line_width(args.line_width);
    merge_manifest(&args.manifest, DataSink::from_arg(&args.output), config).with_context(
        || {
            format!(
                "failed to merge chunks from {} into {}",
                args.manifest.display(),
                args.output.display()
            )
        },
    )?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp_secs()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
