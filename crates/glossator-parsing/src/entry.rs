use once_cell::sync::Lazy;
use regex::Regex;

use glossator_core::Abbreviation;

use crate::config::ParsingConfig;

/// Line-level matcher identifier, in the order matchers are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStrategy {
    /// `GDP - Gross Domestic Product`, `GDP: ...`, `GDP – ...`
    DashSeparated,
    /// `NASA    National Aeronautics and Space Administration`
    WideGap,
    /// `NASA National Aeronautics and Space Administration`, with a
    /// restricted definition alphabet.
    LooseTrailing,
}

impl EntryStrategy {
    pub const ALL: [EntryStrategy; 3] = [
        EntryStrategy::DashSeparated,
        EntryStrategy::WideGap,
        EntryStrategy::LooseTrailing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::DashSeparated => "dash",
            Self::WideGap => "wide-gap",
            Self::LooseTrailing => "loose",
        }
    }

    pub(crate) fn default_regex(&self) -> &'static Regex {
        static DASH_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^([A-Z0-9.\-]+)\s*[-–:]\s*(.+)$").unwrap());
        static WIDE_GAP_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^([A-Z0-9.\-]+)\s{2,}(.+)$").unwrap());
        // Rejects definitions carrying colons, slashes and similar, which
        // are typical of prose lines that merely open with capitals.
        static LOOSE_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^([A-Z0-9.\-]{2,})\s+([\w\s\-.,;()]+)$").unwrap());

        match self {
            Self::DashSeparated => &DASH_RE,
            Self::WideGap => &WIDE_GAP_RE,
            Self::LooseTrailing => &LOOSE_RE,
        }
    }

    /// Match a single trimmed line with this strategy's built-in pattern.
    pub fn try_match(&self, line: &str) -> Option<Abbreviation> {
        match_line(line, self.default_regex())
    }
}

/// An entry together with how it was recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub abbreviation: Abbreviation,
    pub strategy: EntryStrategy,
    /// 1-based line number within the section text (the header is line 1).
    pub line_number: usize,
}

fn match_line(line: &str, re: &Regex) -> Option<Abbreviation> {
    let caps = re.captures(line)?;
    let term = caps.get(1)?.as_str().trim();
    let definition = caps.get(2)?.as_str().trim();
    Some(Abbreviation::new(term, definition))
}

/// Parse a located section into abbreviations, using the built-in patterns.
///
/// The first line is always discarded as the header line. Remaining lines are
/// trimmed and tried against each [`EntryStrategy`] in order; lines no
/// strategy accepts are dropped. Never fails.
pub fn parse_entries(section_text: &str) -> Vec<Abbreviation> {
    parse_entries_with_config(section_text, &ParsingConfig::default())
}

/// Config-aware version of [`parse_entries`].
pub fn parse_entries_with_config(section_text: &str, config: &ParsingConfig) -> Vec<Abbreviation> {
    parse_entries_detailed(section_text, config)
        .into_iter()
        .map(|e| e.abbreviation)
        .collect()
}

/// Like [`parse_entries_with_config`], but reports the strategy and line of
/// each entry.
pub fn parse_entries_detailed(section_text: &str, config: &ParsingConfig) -> Vec<ParsedEntry> {
    let mut entries = Vec::new();

    for (idx, raw_line) in section_text.split('\n').enumerate().skip(1) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let matched = EntryStrategy::ALL.iter().find_map(|&strategy| {
            match_line(line, config.entry_regex(strategy)).map(|a| (strategy, a))
        });

        match matched {
            Some((strategy, abbreviation)) => entries.push(ParsedEntry {
                abbreviation,
                strategy,
                line_number: idx + 1,
            }),
            None => tracing::trace!(line, "no entry strategy matched"),
        }
    }

    entries
}
