//! Response protocol parser.
//!
//! The model is asked to reply in this shape:
//!
//! ```text
//! TITLE: <topic>
//!
//! SUMMARY:
//! - <point>
//!
//! ADDITIONAL ADVICE:
//! - <point>
//! ```
//!
//! The shape is requested by instruction only, so the parser is lenient: it
//! walks the lines once, picks out what it recognizes and ignores the rest.
//! When nothing recognizable turns up the caller shows the raw text instead.

use serde::{Deserialize, Serialize};

const TITLE_MARKER: &str = "TITLE:";
const SUMMARY_MARKER: &str = "SUMMARY:";
const ADDITIONAL_MARKERS: [&str; 2] = ["ADDITIONAL ADVICE:", "OPTIONAL:"];
const BULLET: char = '-';

/// Typed view of a protocol-shaped reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResponse {
    pub title: String,
    pub summary: Vec<String>,
    pub additional: Vec<String>,
}

impl ParsedResponse {
    /// True when neither a title nor a summary was found.
    pub fn is_unstructured(&self) -> bool {
        self.title.is_empty() && self.summary.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Title,
    Summary,
    Additional,
}

/// Parse model output into title, summary bullets and additional bullets.
///
/// Lines are trimmed and blank lines skipped. Markers must start the trimmed
/// line and are case-sensitive. A bullet's text lands in the current bullet
/// section; any other line continues the previous bullet, joined with a space.
/// Bullets and continuations outside a bullet section are dropped.
pub fn parse_response(text: &str) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();
    let mut section = Section::None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = line.strip_prefix(TITLE_MARKER) {
            parsed.title = rest.trim().to_string();
            section = Section::Title;
        } else if line.starts_with(SUMMARY_MARKER) {
            section = Section::Summary;
        } else if ADDITIONAL_MARKERS.iter().any(|m| line.starts_with(m)) {
            section = Section::Additional;
        } else if let Some(rest) = line.strip_prefix(BULLET) {
            if let Some(list) = section_list(&mut parsed, section) {
                list.push(rest.trim().to_string());
            }
        } else if let Some(last) =
            section_list(&mut parsed, section).and_then(|list| list.last_mut())
        {
            last.push(' ');
            last.push_str(line);
        }
    }

    parsed
}

fn section_list(parsed: &mut ParsedResponse, section: Section) -> Option<&mut Vec<String>> {
    match section {
        Section::Summary => Some(&mut parsed.summary),
        Section::Additional => Some(&mut parsed.additional),
        Section::None | Section::Title => None,
    }
}

/// What a caller should render for a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedOutput {
    Structured(ParsedResponse),
    /// The reply did not follow the protocol; render it verbatim.
    Unstructured(String),
}

/// Parse `text`, falling back to the unmodified text when it has neither a
/// title nor summary bullets.
pub fn parse_or_raw(text: &str) -> ParsedOutput {
    let parsed = parse_response(text);
    if parsed.is_unstructured() {
        ParsedOutput::Unstructured(text.to_string())
    } else {
        ParsedOutput::Structured(parsed)
    }
}
