use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;
use papergist_core::config_file::{self, ConfigFile};
use papergist_core::{
    Config, DecodeParams, ModelSettings, ProgressEvent, ProviderKind, SummaryMode,
};
use papergist_text::{chunk_text, clean, extract_sections};

/// Paper summarizer - extract, clean and summarize academic papers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a PDF or plain-text file
    Summarize {
        /// Path to the PDF, .txt or .md file to summarize
        file_path: PathBuf,

        /// Summary mode: flat or sectioned
        #[arg(long)]
        mode: Option<String>,

        /// Model provider: hf or openai
        #[arg(long)]
        provider: Option<String>,

        /// Model identifier (e.g. google-t5/t5-small)
        #[arg(long)]
        model: Option<String>,

        /// Model endpoint base URL
        #[arg(long)]
        endpoint: Option<String>,

        /// API key for the model endpoint
        #[arg(long)]
        api_key: Option<String>,

        /// Chunk budget in characters
        #[arg(long)]
        max_chunk_size: Option<usize>,

        /// Upper bound on per-chunk summary length (model tokens)
        #[arg(long)]
        max_length: Option<u32>,

        /// Lower bound on per-chunk summary length (model tokens)
        #[arg(long)]
        min_length: Option<u32>,

        /// Per-call model timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Dry run: clean and chunk the document, print the chunk table,
        /// make no model calls
        #[arg(long)]
        dry_run: bool,
    },

    /// Extract and print the five recognized sections of a document
    Sections {
        /// Path to the PDF, .txt or .md file
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summarize {
            file_path,
            mode,
            provider,
            model,
            endpoint,
            api_key,
            max_chunk_size,
            max_length,
            min_length,
            timeout,
            output,
            no_color,
            dry_run,
        } => {
            let flags = SummarizeFlags {
                mode,
                provider,
                model,
                endpoint,
                api_key,
                max_chunk_size,
                max_length,
                min_length,
                timeout,
            };
            summarize(file_path, flags, output, no_color, dry_run).await
        }
        Command::Sections {
            file_path,
            no_color,
        } => sections(file_path, no_color),
    }
}

#[derive(Debug, Default)]
struct SummarizeFlags {
    mode: Option<String>,
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    api_key: Option<String>,
    max_chunk_size: Option<usize>,
    max_length: Option<u32>,
    min_length: Option<u32>,
    timeout: Option<u64>,
}

async fn summarize(
    file_path: PathBuf,
    flags: SummarizeFlags,
    output: Option<PathBuf>,
    no_color: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let file = config_file::load_config();
    let settings = resolve_model_settings(&flags, &file)?;
    let config = resolve_pipeline_config(&flags, &file)?;
    config.validate()?;

    // Color only when writing to a terminal-bound stdout
    let use_color = !no_color && output.is_none();
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    let text = papergist_ingest::extract_text(&file_path)?;

    if dry_run {
        let cleaned = clean(&text);
        if cleaned.is_empty() {
            anyhow::bail!("no usable text after cleanup");
        }
        let chunks = chunk_text(&cleaned, config.max_chunk_size);
        output::print_chunk_table(&mut writer, &chunks, config.max_chunk_size, color)?;
        return Ok(());
    }

    let backend = papergist_core::build_backend(&settings);
    let client = reqwest::Client::new();

    let bar = ProgressBar::new(0);
    let bar_for_events = bar.clone();
    let progress = move |event: ProgressEvent| match event {
        ProgressEvent::SectionStart { kind, chunks } => {
            bar_for_events.inc_length(chunks as u64);
            bar_for_events.set_message(kind.label());
        }
        ProgressEvent::ChunkStart { total, .. } => {
            if bar_for_events.length() == Some(0) {
                bar_for_events.set_length(total as u64);
            }
        }
        ProgressEvent::ChunkDone { .. } => bar_for_events.inc(1),
    };

    let summary =
        papergist_core::summarize_document(&text, backend.as_ref(), &client, &config, progress)
            .await?;
    bar.finish_and_clear();

    output::print_summary(&mut writer, &summary, color)?;
    Ok(())
}

fn sections(file_path: PathBuf, no_color: bool) -> anyhow::Result<()> {
    let text = papergist_ingest::extract_text(&file_path)?;
    let sections = extract_sections(&text);

    let mut stdout = std::io::stdout();
    output::print_sections(&mut stdout, &sections, ColorMode(!no_color))?;
    Ok(())
}

/// Resolve model settings: CLI flags > env vars > config file > defaults.
fn resolve_model_settings(
    flags: &SummarizeFlags,
    file: &ConfigFile,
) -> anyhow::Result<ModelSettings> {
    let model = file.model.clone().unwrap_or_default();

    let provider_name = flags
        .provider
        .clone()
        .or_else(|| std::env::var("PAPERGIST_PROVIDER").ok())
        .or(model.provider);
    let provider = match provider_name {
        Some(name) => ProviderKind::parse(&name)?,
        None => ProviderKind::HuggingFace,
    };

    let defaults = ModelSettings::default();
    Ok(ModelSettings {
        provider,
        model_id: flags
            .model
            .clone()
            .or_else(|| std::env::var("PAPERGIST_MODEL").ok())
            .or(model.model_id)
            .unwrap_or(defaults.model_id),
        endpoint: flags
            .endpoint
            .clone()
            .or_else(|| std::env::var("PAPERGIST_ENDPOINT").ok())
            .or(model.endpoint),
        api_key: flags
            .api_key
            .clone()
            .or_else(|| std::env::var("PAPERGIST_API_KEY").ok())
            .or(model.api_key),
    })
}

/// Resolve the pipeline configuration: CLI flags > config file > defaults.
fn resolve_pipeline_config(flags: &SummarizeFlags, file: &ConfigFile) -> anyhow::Result<Config> {
    let summary = file.summary.clone().unwrap_or_default();
    let defaults = Config::default();

    let mode = match flags.mode.clone().or(summary.mode) {
        Some(name) => SummaryMode::parse(&name)?,
        None => defaults.mode,
    };

    Ok(Config {
        mode,
        max_chunk_size: flags
            .max_chunk_size
            .or(summary.max_chunk_size)
            .unwrap_or(defaults.max_chunk_size),
        decode: DecodeParams {
            max_length: flags
                .max_length
                .or(summary.max_length)
                .unwrap_or(defaults.decode.max_length),
            min_length: flags
                .min_length
                .or(summary.min_length)
                .unwrap_or(defaults.decode.min_length),
        },
        model_timeout_secs: flags
            .timeout
            .or(summary.timeout_secs)
            .unwrap_or(defaults.model_timeout_secs),
        sections: defaults.sections,
    })
}
