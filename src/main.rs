//! Command line front end: `p3d2gmsh <INPUT> <OUTPUT>`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use p3d2gmsh::{convert_file, ReaderOptions};

/// Convert P3Dfmt mesh files to Gmsh format.
#[derive(Parser)]
#[command(name = "p3d2gmsh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert P3Dfmt mesh files to Gmsh format", long_about = None)]
struct Cli {
    /// Input P3Dfmt file path
    input: PathBuf,

    /// Output Gmsh file path (`-` for stdout)
    output: PathBuf,

    /// Reject coordinate rows with surplus values instead of truncating them
    #[arg(long)]
    strict: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so the mesh can be piped from stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = if cli.strict {
        ReaderOptions::strict()
    } else {
        ReaderOptions::default()
    };
    let output = (cli.output.as_os_str() != "-").then_some(cli.output.as_path());

    let summary = convert_file(&cli.input, output, &options)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    info!(
        nodes = summary.n_nodes,
        elements = summary.n_elements,
        warnings = summary.warnings.len(),
        "Done"
    );
    Ok(())
}
