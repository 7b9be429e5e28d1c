//! Section-context resolver.
//!
//! Given a cursor position inside a workflow document, locate the enclosing
//! unit-operation heading, the enclosing section heading, and the placeholder
//! line the cursor sits on. Headings form a loose two-level hierarchy
//! (unit operation > section > placeholder lines) over plain text, so the
//! resolver fails closed on malformed structure instead of guessing.

use crate::parser::frontmatter::query_title;
use crate::parser::lines::{classify, LineKind};
use regex::Regex;
use std::sync::LazyLock;

/// Section headings are level-4 and contain only letters, spaces and `&`
/// (e.g. `Reagent`, `Results & Discussions`).
static SECTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z &]*$").expect("Invalid regex pattern"));

/// Unit-operation headings are level-3 and carry a bracketed ID of the shape
/// `U` + 2-3 uppercase letters + 3 digits, e.g. `[USW070 Sequence Analysis]`.
static UO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(U[A-Z]{2,3}\d{3})\b").expect("Invalid regex pattern"));

/// Context resolved for one placeholder position in a workflow document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContext {
    /// ID of the enclosing unit operation, e.g. `USW070`.
    pub unit_operation_id: String,
    /// Name of the enclosing section, e.g. `Reagent`.
    pub section_name: String,
    /// Experiment title from frontmatter, used as the AI query context.
    pub query_title: String,
    /// Zero-based index of the placeholder line to replace.
    pub placeholder_line: usize,
}

/// Resolve the section context at `cursor_line` (zero-based).
///
/// Returns `None` when the cursor is not on a placeholder line, or when no
/// enclosing section or unit-operation heading exists above it. The nearest
/// heading above the cursor wins, matching nearest-enclosing-scope semantics
/// for a flat heading hierarchy.
pub fn resolve_context(content: &str, cursor_line: usize) -> Option<SectionContext> {
    let lines: Vec<&str> = content.lines().collect();
    let current = lines.get(cursor_line)?;

    if !matches!(classify(current), LineKind::Placeholder { .. }) {
        return None;
    }

    let mut section_name = None;
    for line in lines[..cursor_line].iter().rev() {
        if let LineKind::Heading { level: 4, text } = classify(line) {
            if SECTION_NAME.is_match(text) {
                section_name = Some(text.to_string());
                break;
            }
        }
    }
    let section_name = section_name?;

    let mut unit_operation_id = None;
    for line in lines[..cursor_line].iter().rev() {
        if let LineKind::Heading { level: 3, text } = classify(line) {
            if let Some(caps) = UO_ID.captures(text) {
                unit_operation_id = Some(caps[1].to_string());
                break;
            }
        }
    }
    let unit_operation_id = unit_operation_id?;

    Some(SectionContext {
        unit_operation_id,
        section_name,
        query_title: query_title(content),
        placeholder_line: cursor_line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> String {
        [
            "---",
            "title: '[AI Generated] Golden Gate Assembly'",
            "experimenter: Jane",
            "---",
            "",
            "## [WD070 Vector Design]",
            "",
            "### [USW070 Sequence Analysis] confirm insert",
            "",
            "#### Meta",
            "- Experimenter: Jane",
            "",
            "#### Reagent",
            "- (e.g. enzyme, buffer, etc.)",
            "",
            "#### Method",
            "- (method used in this step)",
        ]
        .join("\n")
    }

    #[test]
    fn test_resolve_on_placeholder() {
        let doc = sample_doc();
        let ctx = resolve_context(&doc, 13).unwrap();
        assert_eq!(ctx.unit_operation_id, "USW070");
        assert_eq!(ctx.section_name, "Reagent");
        assert_eq!(ctx.query_title, "Golden Gate Assembly");
        assert_eq!(ctx.placeholder_line, 13);
    }

    #[test]
    fn test_resolve_nearest_section_wins() {
        let doc = sample_doc();
        let ctx = resolve_context(&doc, 16).unwrap();
        assert_eq!(ctx.section_name, "Method");
        assert_eq!(ctx.unit_operation_id, "USW070");
    }

    #[test]
    fn test_resolve_fails_off_placeholder() {
        let doc = sample_doc();
        // Cursor on the Meta bullet, not a placeholder
        assert!(resolve_context(&doc, 10).is_none());
        // Cursor on a heading
        assert!(resolve_context(&doc, 12).is_none());
        // Cursor past end of document
        assert!(resolve_context(&doc, 999).is_none());
    }

    #[test]
    fn test_resolve_fails_without_section_heading() {
        let doc = "### [USW070 Name]\n- (e.g. enzyme, buffer, etc.)";
        assert!(resolve_context(doc, 1).is_none());
    }

    #[test]
    fn test_resolve_fails_without_unit_operation() {
        let doc = "#### Reagent\n- (e.g. enzyme, buffer, etc.)";
        assert!(resolve_context(doc, 1).is_none());
    }

    #[test]
    fn test_resolve_defaults_title() {
        let doc = "### [UHW001 Prep]\n\n#### Input\n- (samples from the previous step)";
        let ctx = resolve_context(doc, 3).unwrap();
        assert_eq!(ctx.query_title, "Untitled Experiment");
        assert_eq!(ctx.unit_operation_id, "UHW001");
        assert_eq!(ctx.section_name, "Input");
    }
}
