use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

use glossator_core::config_file::ConfigFile;
use glossator_parsing::{ParsingConfig, ParsingConfigBuilder};
use glossator_reporting::{ExportFormat, ReportMode};

pub const DEFAULT_INPUT_DIR: &str = "./pdfs";
pub const DEFAULT_OUTPUT_STEM: &str = "./abbreviations";
pub const DEFAULT_WORKERS: usize = 4;

/// Values given on the `extract` command line. `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct ExtractOverrides {
    pub input_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub mode: Option<ReportMode>,
    pub format: Option<ExportFormat>,
    pub workers: Option<usize>,
    pub headers: Vec<String>,
    pub end_markers: Vec<String>,
    pub replace_defaults: bool,
}

/// Fully resolved settings for one `extract` run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub mode: ReportMode,
    pub format: ExportFormat,
    pub num_workers: usize,
    pub section_headers: Vec<String>,
    pub next_section_markers: Vec<String>,
    pub replace_defaults: bool,
}

impl Settings {
    /// Resolve settings: CLI flags > env vars > config file > defaults.
    ///
    /// `env` looks up an environment variable; list settings (headers and
    /// markers) accumulate from the config file and then the CLI.
    pub fn resolve(
        cli: ExtractOverrides,
        env: impl Fn(&str) -> Option<String>,
        file: &ConfigFile,
    ) -> anyhow::Result<Self> {
        let input = file.input.clone().unwrap_or_default();
        let output = file.output.clone().unwrap_or_default();
        let parsing = file.parsing.clone().unwrap_or_default();
        let concurrency = file.concurrency.clone().unwrap_or_default();

        let input_dir = cli
            .input_dir
            .or_else(|| env("GLOSSATOR_INPUT_DIR").map(PathBuf::from))
            .or_else(|| input.dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

        let mode = match (cli.mode, env("GLOSSATOR_MODE"), output.mode) {
            (Some(mode), _, _) => mode,
            (None, Some(value), _) => parse_setting(&value, "GLOSSATOR_MODE")?,
            (None, None, Some(value)) => parse_setting(&value, "[output] mode in config file")?,
            (None, None, None) => ReportMode::default(),
        };

        let format = match (cli.format, output.format) {
            (Some(format), _) => format,
            (None, Some(value)) => parse_setting(&value, "[output] format in config file")?,
            (None, None) => ExportFormat::default(),
        };

        let output_path = cli
            .output
            .or_else(|| env("GLOSSATOR_OUTPUT").map(PathBuf::from))
            .or_else(|| output.path.map(PathBuf::from))
            .unwrap_or_else(|| {
                PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()))
            });

        let num_workers = cli
            .workers
            .or(concurrency.num_workers)
            .unwrap_or(DEFAULT_WORKERS)
            .max(1);

        let mut section_headers = parsing.section_headers.unwrap_or_default();
        section_headers.extend(cli.headers);
        let mut next_section_markers = parsing.next_section_markers.unwrap_or_default();
        next_section_markers.extend(cli.end_markers);

        Ok(Settings {
            input_dir,
            output: output_path,
            mode,
            format,
            num_workers,
            section_headers,
            next_section_markers,
            replace_defaults: cli.replace_defaults || parsing.replace_defaults.unwrap_or(false),
        })
    }

    /// Build the parsing configuration for these settings.
    pub fn parsing_config(&self) -> anyhow::Result<ParsingConfig> {
        let mut builder = ParsingConfigBuilder::new();

        if self.replace_defaults {
            if self.section_headers.iter().all(|h| h.trim().is_empty()) {
                anyhow::bail!(
                    "replacing the default section headers requires at least one --header"
                );
            }
            builder = builder
                .set_section_headers(self.section_headers.clone())
                .set_next_section_markers(self.next_section_markers.clone());
        } else {
            for header in &self.section_headers {
                builder = builder.add_section_header(header.clone());
            }
            for marker in &self.next_section_markers {
                builder = builder.add_next_section_marker(marker.clone());
            }
        }

        builder.build().context("invalid parsing configuration")
    }
}

fn parse_setting<T: FromStr<Err = String>>(value: &str, origin: &str) -> anyhow::Result<T> {
    value
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("invalid value for {origin}: {e}"))
}
