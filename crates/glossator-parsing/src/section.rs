use regex::{Regex, RegexBuilder};

use crate::config::ParsingConfig;

/// Section titles recognised as the start of an abbreviation glossary.
pub const DEFAULT_SECTION_HEADERS: &[&str] = &[
    "list of abbreviations",
    "abbreviations",
    "acronyms",
    "glossary of terms",
    "list of acronyms",
    "symbols and abbreviations",
];

/// Section titles recognised as the start of whatever follows the glossary.
pub const DEFAULT_NEXT_SECTION_MARKERS: &[&str] = &[
    "table of contents",
    "introduction",
    "chapter 1",
    "abstract",
    "acknowledgments",
    "references",
];

/// A configured section title, matched case-insensitively as a literal.
///
/// Matching goes through an escaped regex rather than lowercasing the
/// haystack so that offsets always index the original text.
#[derive(Debug, Clone)]
pub struct SectionLiteral {
    text: String,
    re: Regex,
}

impl SectionLiteral {
    pub fn new(text: &str) -> Result<Self, regex::Error> {
        let re = RegexBuilder::new(&regex::escape(text))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            text: text.to_string(),
            re,
        })
    }

    /// The literal as configured.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte range of the first occurrence in `haystack`.
    pub fn find(&self, haystack: &str) -> Option<(usize, usize)> {
        self.re.find(haystack).map(|m| (m.start(), m.end()))
    }
}

/// Location of a glossary section within a document's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    /// Byte offset of the matched header.
    pub start: usize,
    /// Byte offset of the earliest next-section marker, or the text length.
    pub end: usize,
    /// The configured header literal that won.
    pub matched_header: String,
}

impl SectionSpan {
    /// The section slice with surrounding whitespace removed.
    ///
    /// Still includes the header line itself; entry parsing discards it.
    pub fn section_text<'a>(&self, text: &'a str) -> &'a str {
        text[self.start..self.end].trim()
    }
}

/// Locate the abbreviation section in `text`.
///
/// Every header is probed on its own and the leftmost occurrence wins (on an
/// exact tie, the header listed first). The section then runs up to the
/// earliest next-section marker found after the header, or to the end of the
/// text. Returns `None` when no header occurs.
pub fn locate_section(
    text: &str,
    headers: &[SectionLiteral],
    next_markers: &[SectionLiteral],
) -> Option<SectionSpan> {
    let mut best: Option<(usize, usize, &SectionLiteral)> = None;
    for header in headers {
        if let Some((start, end)) = header.find(text) {
            match best {
                Some((best_start, _, _)) if best_start <= start => {}
                _ => best = Some((start, end, header)),
            }
        }
    }

    let (start, header_end, header) = best?;

    let rest = &text[header_end..];
    let end = next_markers
        .iter()
        .filter_map(|marker| marker.find(rest))
        .map(|(local, _)| header_end + local)
        .min()
        .unwrap_or(text.len());

    Some(SectionSpan {
        start,
        end,
        matched_header: header.as_str().to_string(),
    })
}

/// Config-aware version of [`locate_section`].
pub fn locate_section_with_config(text: &str, config: &ParsingConfig) -> Option<SectionSpan> {
    locate_section(text, config.section_headers(), config.next_section_markers())
}

/// Locate the abbreviation section and return its trimmed text, using the
/// default header and marker sets.
pub fn find_abbreviation_section(text: &str) -> Option<String> {
    find_abbreviation_section_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`find_abbreviation_section`].
pub fn find_abbreviation_section_with_config(
    text: &str,
    config: &ParsingConfig,
) -> Option<String> {
    locate_section_with_config(text, config).map(|span| span.section_text(text).to_string())
}
