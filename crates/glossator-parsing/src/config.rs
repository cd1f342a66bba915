use once_cell::sync::Lazy;
use regex::Regex;

use crate::entry::EntryStrategy;
use crate::section::{DEFAULT_NEXT_SECTION_MARKERS, DEFAULT_SECTION_HEADERS, SectionLiteral};

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

static DEFAULT_HEADERS: Lazy<Vec<SectionLiteral>> = Lazy::new(|| {
    DEFAULT_SECTION_HEADERS
        .iter()
        .map(|h| SectionLiteral::new(h).unwrap())
        .collect()
});

static DEFAULT_MARKERS: Lazy<Vec<SectionLiteral>> = Lazy::new(|| {
    DEFAULT_NEXT_SECTION_MARKERS
        .iter()
        .map(|m| SectionLiteral::new(m).unwrap())
        .collect()
});

/// Configuration for glossary section location and entry parsing.
///
/// Literal sets are compiled once; custom entry regexes are `Option<Regex>`
/// where `None` means "use the built-in pattern".
/// Use [`ParsingConfigBuilder`] to construct with string literals/patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── section.rs ──
    /// Section titles that open the glossary, in configured order.
    pub(crate) section_headers: Vec<SectionLiteral>,
    /// Section titles that close the glossary.
    pub(crate) next_section_markers: Vec<SectionLiteral>,

    // ── entry.rs ──
    pub(crate) dash_entry_re: Option<Regex>,
    pub(crate) wide_gap_entry_re: Option<Regex>,
    pub(crate) loose_entry_re: Option<Regex>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            section_headers: DEFAULT_HEADERS.clone(),
            next_section_markers: DEFAULT_MARKERS.clone(),
            dash_entry_re: None,
            wide_gap_entry_re: None,
            loose_entry_re: None,
        }
    }
}

impl ParsingConfig {
    pub fn section_headers(&self) -> &[SectionLiteral] {
        &self.section_headers
    }

    pub fn next_section_markers(&self) -> &[SectionLiteral] {
        &self.next_section_markers
    }

    /// The regex used for `strategy`: the configured override or the built-in.
    pub(crate) fn entry_regex(&self, strategy: EntryStrategy) -> &Regex {
        let custom = match strategy {
            EntryStrategy::DashSeparated => self.dash_entry_re.as_ref(),
            EntryStrategy::WideGap => self.wide_gap_entry_re.as_ref(),
            EntryStrategy::LooseTrailing => self.loose_entry_re.as_ref(),
        };
        custom.unwrap_or_else(|| strategy.default_regex())
    }
}

/// Resolve a literal list against its defaults and compile each entry.
/// Blank literals are dropped: they would match at offset 0 of every document.
fn compile_literals(
    list: ListOverride<String>,
    defaults: &[&str],
) -> Result<Vec<SectionLiteral>, regex::Error> {
    let defaults: Vec<String> = defaults.iter().map(|s| s.to_string()).collect();
    list.resolve(&defaults)
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| SectionLiteral::new(s))
        .collect()
}

/// Builder for [`ParsingConfig`].
///
/// Literals are escaped and compiled case-insensitively in [`build()`](Self::build);
/// entry patterns are compiled as given. Fails fast with `regex::Error` if any
/// pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    section_headers: ListOverride<String>,
    next_section_markers: ListOverride<String>,
    dash_entry_re: Option<String>,
    wide_gap_entry_re: Option<String>,
    loose_entry_re: Option<String>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Section headers ──

    pub fn set_section_headers(mut self, headers: Vec<String>) -> Self {
        self.section_headers = ListOverride::Replace(headers);
        self
    }

    pub fn add_section_header(mut self, header: String) -> Self {
        match &mut self.section_headers {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(header),
            ListOverride::Default => self.section_headers = ListOverride::Extend(vec![header]),
        }
        self
    }

    // ── Next-section markers ──

    pub fn set_next_section_markers(mut self, markers: Vec<String>) -> Self {
        self.next_section_markers = ListOverride::Replace(markers);
        self
    }

    pub fn add_next_section_marker(mut self, marker: String) -> Self {
        match &mut self.next_section_markers {
            ListOverride::Extend(v) | ListOverride::Replace(v) => v.push(marker),
            ListOverride::Default => {
                self.next_section_markers = ListOverride::Extend(vec![marker])
            }
        }
        self
    }

    // ── Entry patterns ──
    // Capture group 1 is the term, group 2 the definition.

    pub fn dash_entry_regex(mut self, pattern: &str) -> Self {
        self.dash_entry_re = Some(pattern.to_string());
        self
    }

    pub fn wide_gap_entry_regex(mut self, pattern: &str) -> Self {
        self.wide_gap_entry_re = Some(pattern.to_string());
        self
    }

    pub fn loose_entry_regex(mut self, pattern: &str) -> Self {
        self.loose_entry_re = Some(pattern.to_string());
        self
    }

    /// Compile all literals and patterns and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        Ok(ParsingConfig {
            section_headers: compile_literals(self.section_headers, DEFAULT_SECTION_HEADERS)?,
            next_section_markers: compile_literals(
                self.next_section_markers,
                DEFAULT_NEXT_SECTION_MARKERS,
            )?,
            dash_entry_re: compile(self.dash_entry_re)?,
            wide_gap_entry_re: compile(self.wide_gap_entry_re)?,
            loose_entry_re: compile(self.loose_entry_re)?,
        })
    }
}
