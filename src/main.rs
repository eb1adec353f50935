use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use cardio_synth::algorithm::population::{PopulationStatistics, PrevalenceTargets};
use cardio_synth::utils::logging::{print_sample_rows, print_schema_info};
use cardio_synth::utils::resolve_output;
use cardio_synth::{GeneratorConfig, OutputFormat, PopulationGenerator};

#[derive(Parser)]
#[command(name = "cardio-synth")]
#[command(about = "Generate a synthetic cardiovascular population of Senegalese adults", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of individuals to generate [default: 1000000, or the config file value]
    #[arg(short = 'n', long)]
    patients: Option<usize>,

    /// Random seed [default: 42, or the config file value]
    #[arg(long)]
    seed: Option<u64>,

    /// JSON configuration file with sampling parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file [default: cardiovascular_dataset_senegal.<format extension>]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, inferred from the output extension when omitted
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Skip the statistics summary
    #[arg(long)]
    no_stats: bool,

    /// Check every row against the population invariants before writing
    #[arg(long)]
    validate: bool,

    /// Number of rows to preview (0 disables the preview)
    #[arg(long, default_value_t = 10)]
    preview: usize,

    /// Also write the statistics as JSON
    #[arg(long, value_name = "FILE")]
    stats_json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Parquet => Self::Parquet,
        }
    }
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_json_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(patients) = cli.patients {
        config.n_individuals = patients;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.show_progress = true;
    Ok(config)
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = Instant::now();

    let config = load_config(&cli)?;
    let generator = PopulationGenerator::new(config).context("invalid generator configuration")?;
    let population = generator.generate()?;

    if cli.validate {
        let report = population.validate()?;
        info!("Validation: {report}");
        report.into_result()?;
    }

    if !cli.no_stats || cli.stats_json.is_some() {
        let stats = population.statistics()?;
        if !cli.no_stats {
            println!(
                "\n{}",
                PopulationStatistics::generate_summary(&stats, &PrevalenceTargets::default())
            );
        }
        if let Some(path) = &cli.stats_json {
            std::fs::write(path, stats.to_json()?)
                .with_context(|| format!("failed to write statistics to {}", path.display()))?;
            info!("Statistics written to {}", path.display());
        }
    }

    if cli.preview > 0 {
        print_schema_info(&population.batch);
        print_sample_rows(&population.batch, cli.preview)?;
    }

    let (output, format) = resolve_output(cli.output.as_deref(), cli.format.map(OutputFormat::from));
    format
        .write(&population.batch, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "Dataset saved to {} ({} rows x {} columns, {format}) in {:?}",
        output.display(),
        population.batch.num_rows(),
        population.batch.num_columns(),
        start.elapsed()
    );
    Ok(())
}
