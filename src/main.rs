use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use job_terms::source::{label_records, load_records};
use job_terms::{Analysis, DefaultPipeline, PipelineConfig, StageTimingObserver};

/// Rank the nouns that characterize each category of job postings
#[derive(Parser, Debug)]
#[command(name = "job-terms")]
#[command(about = "Discriminative noun ranking for job postings", long_about = None)]
struct Args {
    /// Dataset as LABEL=PATH; the label becomes every record's category.
    /// Repeat for each category.
    #[arg(short, long = "dataset", value_parser = parse_dataset, required = true)]
    datasets: Vec<(String, PathBuf)>,

    /// Pipeline config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nouns per category, overrides the config
    #[arg(long)]
    top_n: Option<usize>,

    /// Write the analysis here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_dataset(s: &str) -> Result<(String, PathBuf), String> {
    let (label, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=PATH, got \"{s}\""))?;
    let label = label.trim();
    if label.is_empty() || path.is_empty() {
        return Err(format!("expected LABEL=PATH, got \"{s}\""));
    }
    Ok((label.to_string(), PathBuf::from(path)))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(&args.log_level, std::env::var("RUST_LOG").ok()))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting job-terms v{}", env!("CARGO_PKG_VERSION"));

    let analysis = match analyze(&args) {
        Ok(analysis) => analysis,
        Err(err) => {
            error!("{:#}", err);
            anyhow::bail!("no analysis available");
        }
    };

    write_analysis(&analysis, args.output.as_deref())?;
    Ok(())
}

/// `RUST_LOG` directives when set and valid, otherwise `--log-level`.
fn log_filter(log_level: &str, rust_log: Option<String>) -> EnvFilter {
    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return filter;
    }
    let level = match log_level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    EnvFilter::default().add_directive(level.into())
}

fn analyze(args: &Args) -> anyhow::Result<Analysis> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(top_n) = args.top_n {
        config = config.with_top_n(top_n);
    }

    let pipeline = DefaultPipeline::from_config(config)?;
    let category_field = pipeline.config().category_field.clone();

    let mut records = Vec::new();
    for (label, path) in &args.datasets {
        let mut batch = load_records(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        label_records(&mut batch, &category_field, label);
        info!("Loaded {} records for \"{}\"", batch.len(), label);
        records.append(&mut batch);
    }

    let mut timings = StageTimingObserver::new();
    let analysis = pipeline.run(&records, &mut timings)?;
    for (stage, report) in timings.reports() {
        info!("Stage {} took {:?}", stage, report.elapsed());
    }
    Ok(analysis)
}

fn write_analysis(analysis: &Analysis, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, analysis)?;
            writer.flush()?;
            info!("Analysis written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, analysis)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
