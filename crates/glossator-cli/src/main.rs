use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use glossator_core::{DocumentStatus, ProgressEvent};
use glossator_parsing::AbbreviationExtractor;
use glossator_reporting::{ExportFormat, ReportMode};

mod output;
mod settings;

use output::ColorMode;
use settings::{ExtractOverrides, Settings};

/// Glossator - Extract abbreviation glossaries from PDF theses and papers
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract abbreviations from every document in a directory and write a report
    Extract {
        /// Directory containing .pdf / .txt documents [default: ./pdfs]
        #[arg(long)]
        input_dir: Option<PathBuf>,

        /// Report file to write [default: ./abbreviations.md, .json for --format json]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report layout: grouped (per document) or unified (merged, sorted)
        #[arg(long)]
        mode: Option<ReportMode>,

        /// Report format: markdown or json
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Number of documents processed concurrently [default: 4]
        #[arg(long)]
        workers: Option<usize>,

        /// Additional section header to look for (repeatable)
        #[arg(long = "header")]
        headers: Vec<String>,

        /// Additional heading that ends the section (repeatable)
        #[arg(long = "end-marker")]
        end_markers: Vec<String>,

        /// Use only the given --header / --end-marker values, not the built-in ones
        #[arg(long)]
        replace_defaults: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show where the abbreviation section is and how each line parses
    Inspect {
        /// Path to the PDF or .txt file to inspect
        file_path: PathBuf,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            input_dir,
            output,
            mode,
            format,
            workers,
            headers,
            end_markers,
            replace_defaults,
            no_color,
        } => {
            let overrides = ExtractOverrides {
                input_dir,
                output,
                mode,
                format,
                workers,
                headers,
                end_markers,
                replace_defaults,
            };
            let file_config = glossator_core::config_file::load_config();
            let settings =
                Settings::resolve(overrides, |key| std::env::var(key).ok(), &file_config)?;
            extract(settings, ColorMode(!no_color)).await
        }
        Command::Inspect {
            file_path,
            no_color,
        } => inspect(file_path, ColorMode(!no_color)),
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

async fn extract(settings: Settings, color: ColorMode) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let mut writer = std::io::stdout();

    let created = glossator_ingest::ensure_input_dir(&settings.input_dir).with_context(|| {
        format!(
            "failed to create input directory {}",
            settings.input_dir.display()
        )
    })?;
    if created {
        output::print_input_dir_created(&mut writer, &settings.input_dir, color)?;
        return Ok(());
    }

    let extractor = Arc::new(AbbreviationExtractor::with_config(settings.parsing_config()?));

    let paths = glossator_ingest::discover_documents(&settings.input_dir).with_context(|| {
        format!("failed to list {}", settings.input_dir.display())
    })?;
    if paths.is_empty() {
        tracing::warn!(dir = %settings.input_dir.display(), "no .pdf or .txt documents found");
    }

    output::print_batch_header(
        &mut writer,
        &settings.input_dir,
        paths.len(),
        settings.num_workers,
        color,
    )?;

    let template = if color.enabled() {
        "{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{bar:40}] {pos}/{len} {msg}"
    };
    let bar = ProgressBar::new(paths.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let progress_cb = {
        let bar = bar.clone();
        move |event: ProgressEvent| match event {
            ProgressEvent::Started { source_name, .. } => bar.set_message(source_name),
            ProgressEvent::Finished { status, .. } => {
                if matches!(status, DocumentStatus::Failed(_)) {
                    bar.set_message("(last document failed)");
                }
                bar.inc(1);
            }
        }
    };

    let report = glossator_ingest::process_documents(
        paths,
        glossator_ingest::default_backend(),
        extractor,
        settings.num_workers,
        progress_cb,
    )
    .await;
    bar.finish_and_clear();

    output::print_batch_summary(&mut writer, &report, color)?;

    // A write failure is fatal, but only once every document has been processed.
    glossator_reporting::write_report(
        &report.documents(),
        settings.mode,
        settings.format,
        &settings.output,
    )?;
    output::print_report_written(
        &mut writer,
        &settings.output,
        settings.mode,
        settings.format,
        color,
    )?;
    writer.flush()?;

    Ok(())
}

fn inspect(file_path: PathBuf, color: ColorMode) -> anyhow::Result<()> {
    let mut writer = std::io::stdout();

    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let backend = glossator_ingest::default_backend();
    let text = glossator_ingest::load_text(&file_path, backend.as_ref())?;

    let file_config = glossator_core::config_file::load_config();
    let settings = Settings::resolve(
        ExtractOverrides::default(),
        |key| std::env::var(key).ok(),
        &file_config,
    )?;
    let extractor = AbbreviationExtractor::with_config(settings.parsing_config()?);

    let file_name = glossator_parsing::source_name(&file_path);
    match extractor.locate(&text) {
        Some(span) => {
            let entries = extractor.parse_detailed(span.section_text(&text));
            output::print_inspect(&mut writer, &file_name, &text, Some((&span, &entries)), color)?;
        }
        None => output::print_inspect(&mut writer, &file_name, &text, None, color)?,
    }

    Ok(())
}
