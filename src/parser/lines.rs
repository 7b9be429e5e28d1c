//! Line classifier for lab note markdown.
//!
//! Note documents are plain text, not a validated tree. Instead of scattering
//! ad hoc regex scans across the codebase, every line is classified once into
//! a typed variant and the context resolver works over the classified
//! sequence.

use regex::Regex;
use std::sync::LazyLock;

/// A placeholder hint line: a parenthesized hint filling a whole line,
/// optionally led by a dash bullet, e.g. `- (e.g. enzyme, buffer, etc.)`.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:-\s*)?\((.+)\)\s*$").expect("Invalid regex pattern"));

/// A horizontal divider line (the separators around unit-operation blocks).
static DIVIDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{5,}\s*$").expect("Invalid regex pattern"));

/// Classification of a single document line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A markdown heading with its level and trimmed text.
    Heading { level: u8, text: &'a str },
    /// A placeholder hint with the inner text (parentheses stripped).
    Placeholder { text: &'a str },
    /// A horizontal rule separating unit-operation blocks.
    Divider,
    /// A line of only whitespace.
    Blank,
    /// Anything else.
    Text(&'a str),
}

/// Classify one line of a lab note document.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if let Some(rest) = line.strip_prefix('#') {
        let level = 1 + rest.chars().take_while(|&c| c == '#').count() as u8;
        let text = line.trim_start_matches('#').trim();
        return LineKind::Heading { level, text };
    }
    if DIVIDER.is_match(line) {
        return LineKind::Divider;
    }
    if let Some(caps) = PLACEHOLDER.captures(line) {
        let inner = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return LineKind::Placeholder {
            text: inner.trim(),
        };
    }
    LineKind::Text(line)
}
