//! YAML frontmatter extraction for README and workflow documents.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Frontmatter of an experiment folder's README.md.
///
/// Considered valid only when both `title` and `experiment_type` are present
/// and non-empty; anything else is treated as absent frontmatter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadmeFrontMatter {
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub experiment_type: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub last_updated_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Frontmatter of a numbered workflow file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowFrontMatter {
    pub title: String,
    pub experimenter: String,
    pub created_date: String,
    pub last_updated_date: String,
}

/// Parse a type from markdown content with YAML frontmatter.
///
/// # Errors
///
/// Returns an error if frontmatter extraction fails or YAML deserialization
/// fails.
pub fn parse_from_markdown<T: DeserializeOwned>(content: &str, type_name: &str) -> Result<T> {
    let frontmatter = extract_yaml_frontmatter(content)?;
    serde_yaml::from_value(frontmatter)
        .with_context(|| format!("Failed to parse {type_name} from frontmatter"))
}

/// Parse README frontmatter, applying the validity rule.
///
/// Returns `None` when the document has no frontmatter, the YAML is
/// malformed, or `title`/`experiment_type` are missing or empty.
pub fn parse_readme_front_matter(content: &str) -> Option<ReadmeFrontMatter> {
    let parsed: ReadmeFrontMatter = parse_from_markdown(content, "README").ok()?;
    if parsed.title.is_empty() || parsed.experiment_type.is_empty() {
        return None;
    }
    Some(parsed)
}

/// Extract the experiment title used as the AI query context.
///
/// Reads the frontmatter `title`, strips a leading `[AI Generated]` marker,
/// and trims surrounding quotes and whitespace. Documents without a usable
/// title fall back to `"Untitled Experiment"`.
pub fn query_title(content: &str) -> String {
    extract_frontmatter_field(content, "title")
        .ok()
        .flatten()
        .map(|raw| {
            let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'');
            trimmed
                .strip_prefix("[AI Generated]")
                .unwrap_or(trimmed)
                .trim()
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled Experiment".to_string())
}

/// Extract a single scalar field from YAML frontmatter.
///
/// Returns `None` if the field is missing, `null`, or empty.
///
/// # Errors
///
/// Returns an error if frontmatter extraction fails.
pub fn extract_frontmatter_field(content: &str, field: &str) -> Result<Option<String>> {
    let yaml = extract_yaml_frontmatter(content)?;

    let value = match &yaml[field] {
        serde_yaml::Value::Null => return Ok(None),
        serde_yaml::Value::String(s) if s.is_empty() => return Ok(None),
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        _ => return Ok(None),
    };

    Ok(Some(value))
}

/// Extract YAML frontmatter delimited by `---` fences at the top of content.
///
/// The closing fence must sit at the same indentation as the opening one, so
/// `---` lines inside indented YAML block scalars are not mistaken for it.
///
/// # Errors
///
/// Returns an error if the opening or closing fence is missing or the YAML
/// cannot be parsed.
pub fn extract_yaml_frontmatter(content: &str) -> Result<serde_yaml::Value> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || !lines[0].trim().starts_with("---") {
        bail!("No frontmatter delimiter found at start of content");
    }

    let opening_indent = lines[0].len() - lines[0].trim_start().len();

    let mut end_idx = None;
    for (idx, line) in lines.iter().enumerate().skip(1) {
        let trimmed = line.trim_start();
        if trimmed.starts_with("---") && line.len() - trimmed.len() == opening_indent {
            end_idx = Some(idx);
            break;
        }
    }

    let end_idx =
        end_idx.ok_or_else(|| anyhow::anyhow!("Frontmatter not properly closed with ---"))?;

    let yaml_content = lines[1..end_idx].join("\n");

    serde_yaml::from_str(&yaml_content).context("Failed to parse YAML frontmatter")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_readme_front_matter_valid() {
        let content = r#"---
title: Plasmid Assembly
author: Jane Doe
experiment_type: HW
created_date: '2026-08-01'
last_updated_date: '2026-08-01'
---
# Plasmid Assembly
"#;
        let fm = parse_readme_front_matter(content).unwrap();
        assert_eq!(fm.title, "Plasmid Assembly");
        assert_eq!(fm.author, "Jane Doe");
        assert_eq!(fm.experiment_type, "HW");
        assert_eq!(fm.description, None);
    }

    #[test]
    fn test_parse_readme_front_matter_empty_type_is_invalid() {
        let content = "---\ntitle: X\nauthor: A\nexperiment_type: ''\ncreated_date: '2026-08-01'\nlast_updated_date: '2026-08-01'\n---\n";
        assert!(parse_readme_front_matter(content).is_none());
    }

    #[test]
    fn test_parse_readme_front_matter_missing_frontmatter() {
        assert!(parse_readme_front_matter("# Just markdown").is_none());
    }

    #[test]
    fn test_query_title_strips_marker_and_quotes() {
        let content = "---\ntitle: '[AI Generated] Golden Gate Assembly'\n---\nbody";
        assert_eq!(query_title(content), "Golden Gate Assembly");
    }

    #[test]
    fn test_query_title_plain() {
        let content = "---\ntitle: WD070 Vector Design\n---\nbody";
        assert_eq!(query_title(content), "WD070 Vector Design");
    }

    #[test]
    fn test_query_title_defaults_when_absent() {
        assert_eq!(query_title("no frontmatter here"), "Untitled Experiment");
        assert_eq!(query_title("---\nauthor: x\n---\n"), "Untitled Experiment");
    }

    #[test]
    fn test_extract_missing_closing_delimiter() {
        let result = extract_yaml_frontmatter("---\ntitle: x\n# no close");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_embedded_fence_in_block_scalar() {
        let content = "---\ntitle: t\ndescription: |\n  one\n  ---\n  two\nexperiment_type: SW\n---\nbody";
        let yaml = extract_yaml_frontmatter(content).unwrap();
        assert_eq!(yaml["title"].as_str(), Some("t"));
        assert!(yaml["description"].as_str().unwrap().contains("---"));
    }

    #[test]
    fn test_workflow_front_matter_roundtrip() {
        let fm = WorkflowFrontMatter {
            title: "WD070 Vector Design - pUC19".to_string(),
            experimenter: "Jane".to_string(),
            created_date: "2026-08-30".to_string(),
            last_updated_date: "2026-08-30".to_string(),
        };
        let yaml = serde_yaml::to_string(&fm).unwrap();
        let content = format!("---\n{yaml}---\nbody");
        let parsed: WorkflowFrontMatter = parse_from_markdown(&content, "Workflow").unwrap();
        assert_eq!(parsed, fm);
    }
}
