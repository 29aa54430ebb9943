//! Command-line front end: extract one chunk from an `.mda` container.
//!
//! ```text
//! mda-extract <INPUT> <CHUNK_TYPE> <OUTPUT>
//! mda-extract --config extract.json
//! mda-extract --list <INPUT>
//! ```
//!
//! Exit status is 0 on success, 2 when the chunk is not present, and 1 for any
//! other failure, including invalid command-line arguments.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn, LevelFilter};

use mda::utils::open_file_as_reader;
use mda::{extract_chunk_to_file, list_chunks, ExtractConfig, MdaError, Result};

const EXIT_CHUNK_NOT_FOUND: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "mda-extract", about = "Extract and decode a chunk from an .mda container")]
struct Args {
    /// Container file to read
    #[arg(value_name = "INPUT", required_unless_present = "config")]
    input: Option<String>,

    /// 4-character tag of the chunk to extract
    #[arg(value_name = "CHUNK_TYPE", required_unless_present_any = ["config", "list"])]
    chunk_type: Option<String>,

    /// File the decoded chunk is written to
    #[arg(value_name = "OUTPUT", required_unless_present_any = ["config", "list"])]
    output: Option<String>,

    /// Load the extraction parameters from a JSON file
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["input", "list"])]
    config: Option<String>,

    /// List the chunk headers in INPUT instead of extracting
    #[arg(short, long)]
    list: bool,

    /// Fail when the chunk header declares a padded size below its logical size
    #[arg(long)]
    strict_sizes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_config(args: &Args) -> Result<ExtractConfig> {
    let mut config = match &args.config {
        Some(path) => ExtractConfig::from_json_file(path)?,
        None => ExtractConfig {
            input_path: args.input.clone().unwrap_or_default(),
            chunk_type: args.chunk_type.clone().unwrap_or_default(),
            output_file: args.output.clone().unwrap_or_default(),
            ..Default::default()
        },
    };
    config.strict_sizes |= args.strict_sizes;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    if args.list {
        let input = args.input.as_deref().ok_or_else(|| MdaError::invalid_parameter("--list needs an INPUT file"))?;
        for header in list_chunks(open_file_as_reader(input)?)? {
            println!(
                "{}\t{}\t{}",
                header.chunk_type_str(),
                header.logical_size,
                header.padded_size
            );
        }
        return Ok(());
    }

    let config = build_config(args)?;
    let written = extract_chunk_to_file(&config)?;
    info!("Wrote {} bytes to {}", written, config.output_file);
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // Usage errors must not share the not-found exit code
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_chunk_not_found() => {
            warn!("{}", e);
            ExitCode::from(EXIT_CHUNK_NOT_FOUND)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
