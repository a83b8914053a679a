use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use wine_stats::render::table::{render, OutputFormat};
use wine_stats::{load_file, StatsConfig, StatsReport};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dataset to summarise (.json, .csv, .xls or .xlsx)
    input: PathBuf,

    /// TOML file with group field, measures and precision
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field whose value names the class of each record
    #[arg(short, long)]
    group_by: Option<String>,

    /// Decimals printed for each statistic
    #[arg(short, long)]
    precision: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Repeat for more log output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> wine_stats::Result<String> {
    let mut config = match &args.config {
        Some(path) => StatsConfig::load(path)?,
        None => StatsConfig::default(),
    };
    if let Some(group_by) = args.group_by {
        config.group_by = group_by;
    }
    if let Some(precision) = args.precision {
        config.precision = precision;
    }

    let dataset = load_file(&args.input)?;
    if dataset.is_empty() {
        tracing::warn!("{:?} contains no records", args.input);
    }
    let report = StatsReport::build(&dataset.records, &config);
    render(&report, args.format, config.precision)
}
