use std::io::Write;
use std::path::Path;

use glossator_core::{BatchReport, DocumentOutcome, ExtractionStatus};
use glossator_parsing::{ParsedEntry, SectionSpan};
use glossator_reporting::{ExportFormat, ReportMode};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Notice printed when the input directory had to be created.
pub fn print_input_dir_created(
    w: &mut dyn Write,
    dir: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!(
        "Created input directory {}. Put PDF (or .txt) documents in it and run again.",
        dir.display()
    );
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}

pub fn print_batch_header(
    w: &mut dyn Write,
    dir: &Path,
    count: usize,
    num_workers: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!(
        "Processing {} document{} from {} ({} worker{})",
        count,
        plural(count),
        dir.display(),
        num_workers,
        plural(num_workers)
    );
    if color.enabled() {
        writeln!(w, "{}", msg.bold())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}

/// Per-document lines followed by the totals block.
pub fn print_batch_summary(
    w: &mut dyn Write,
    report: &BatchReport,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    for outcome in &report.outcomes {
        print_outcome_line(w, outcome, color)?;
    }

    let stats = report.stats();

    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", "SUMMARY".bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "SUMMARY")?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Documents processed: {}", stats.total)?;
    if color.enabled() {
        writeln!(w, "  {} {}", "With abbreviations:".green(), stats.found)?;
    } else {
        writeln!(w, "  With abbreviations: {}", stats.found)?;
    }
    if stats.no_section > 0 {
        let msg = format!("No abbreviation section: {}", stats.no_section);
        if color.enabled() {
            writeln!(w, "  {}", msg.dimmed())?;
        } else {
            writeln!(w, "  {}", msg)?;
        }
    }
    if stats.no_entries > 0 {
        if color.enabled() {
            writeln!(w, "  {} {}", "Section found, no entries:".yellow(), stats.no_entries)?;
        } else {
            writeln!(w, "  Section found, no entries: {}", stats.no_entries)?;
        }
    }
    if stats.failed > 0 {
        if color.enabled() {
            writeln!(w, "  {} {}", "Failed:".red(), stats.failed)?;
        } else {
            writeln!(w, "  Failed: {}", stats.failed)?;
        }
    }
    writeln!(w)?;
    writeln!(w, "  Abbreviations extracted: {}", stats.abbreviations)?;
    writeln!(w)?;
    Ok(())
}

fn print_outcome_line(
    w: &mut dyn Write,
    outcome: &DocumentOutcome,
    color: ColorMode,
) -> std::io::Result<()> {
    match outcome {
        DocumentOutcome::Extracted(result) => {
            let name = &result.document.source_name;
            match result.status() {
                ExtractionStatus::Found => {
                    let n = result.document.abbreviations.len();
                    let detail = format!("{} abbreviation{}", n, plural(n));
                    if color.enabled() {
                        writeln!(w, "  {} {} ({})", "✓".green(), name, detail)?;
                    } else {
                        writeln!(w, "  [ok]   {} ({})", name, detail)?;
                    }
                }
                ExtractionStatus::NoSectionFound => {
                    if color.enabled() {
                        writeln!(
                            w,
                            "  {} {}",
                            "-".dimmed(),
                            format!("{} (no abbreviation section)", name).dimmed()
                        )?;
                    } else {
                        writeln!(w, "  [none] {} (no abbreviation section)", name)?;
                    }
                }
                ExtractionStatus::NoEntriesParsed => {
                    if color.enabled() {
                        writeln!(
                            w,
                            "  {} {} (section found, no entries parsed)",
                            "?".yellow(),
                            name
                        )?;
                    } else {
                        writeln!(w, "  [?]    {} (section found, no entries parsed)", name)?;
                    }
                }
            }
        }
        DocumentOutcome::Failed { source_name, error } => {
            if color.enabled() {
                writeln!(w, "  {} {}: {}", "✗".red(), source_name.bold(), error.red())?;
            } else {
                writeln!(w, "  [fail] {}: {}", source_name, error)?;
            }
        }
    }
    Ok(())
}

pub fn print_report_written(
    w: &mut dyn Write,
    path: &Path,
    mode: ReportMode,
    format: ExportFormat,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!("Wrote {} {} report to {}", mode, format, path.display());
    if color.enabled() {
        writeln!(w, "{}", msg.green())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}

/// Dry-run view of one document: where the section is and what each line
/// parsed into.
pub fn print_inspect(
    w: &mut dyn Write,
    file_name: &str,
    text: &str,
    section: Option<(&SectionSpan, &[ParsedEntry])>,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "INSPECT:".bold().cyan(), file_name.bold())?;
    } else {
        writeln!(w, "INSPECT: {}", file_name)?;
    }
    writeln!(w, "  Text length: {} bytes", text.len())?;

    let Some((span, entries)) = section else {
        if color.enabled() {
            writeln!(w, "  {}", "No abbreviation section found".yellow())?;
        } else {
            writeln!(w, "  No abbreviation section found")?;
        }
        return Ok(());
    };

    writeln!(w, "  Header:      \"{}\"", span.matched_header)?;
    writeln!(w, "  Span:        bytes {}..{}", span.start, span.end)?;
    writeln!(w)?;

    for entry in entries {
        let tag = format!("[{:>3}] {:<8}", entry.line_number, entry.strategy.name());
        if color.enabled() {
            writeln!(
                w,
                "  {} {} {}",
                tag.dimmed(),
                entry.abbreviation.term.bold(),
                entry.abbreviation.definition
            )?;
        } else {
            writeln!(
                w,
                "  {} {} {}",
                tag, entry.abbreviation.term, entry.abbreviation.definition
            )?;
        }
    }

    writeln!(w)?;
    writeln!(w, "Total: {} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" })?;
    Ok(())
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
