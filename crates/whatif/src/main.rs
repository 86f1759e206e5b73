use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use whatif::{OutputFormat, ScenarioFile, init_logging, run_analysis};

#[derive(Parser, Debug)]
#[command(name = "whatif")]
#[command(about = "What-if decision analysis for single-period cash flow")]
struct Args {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Monte Carlo iterations (overrides the file)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Monte Carlo seed (overrides the file; random when neither is set)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Failure threshold for cash flow (overrides the file)
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<f64>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    init_logging(&args.log_level, args.log_file.as_deref())?;

    let mut scenario = ScenarioFile::load(&args.scenario)
        .wrap_err_with(|| format!("Failed to load {}", args.scenario.display()))?;
    if let Some(iterations) = args.iterations {
        scenario.iterations = iterations;
    }
    if let Some(threshold) = args.threshold {
        scenario.failure_threshold = threshold;
    }
    let seed = args.seed.or(scenario.seed).unwrap_or_else(rand::random);

    tracing::info!(
        scenario = %args.scenario.display(),
        iterations = scenario.iterations,
        seed,
        "Starting analysis"
    );

    let report = run_analysis(&scenario, seed).wrap_err("Analysis failed")?;
    println!("{}", args.format.render(&report)?);

    tracing::info!(
        impact_vs_baseline = report.impact_vs_baseline,
        prob_failure = report.prob_failure,
        "Analysis complete"
    );
    Ok(())
}
