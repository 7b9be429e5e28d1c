//! Lab notebook tree layout.
//!
//! The notebook lives in a `labnote/` directory of numbered experiment
//! folders `NNN_<title>/`, each holding a `README.md`, `images/` and
//! `resources/` subfolders, and numbered workflow files
//! `NNN_<id>_<name>[--description].md`.

use crate::catalog::WorkflowRecord;
use crate::fs::locking::{locked_read, locked_write};
use crate::parser::frontmatter::parse_readme_front_matter;
use crate::templates;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the notebook root directory.
pub const NOTEBOOK_DIR: &str = "labnote";

static WORKFLOW_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}_.+\.(?i:md)$").expect("Invalid regex pattern"));

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}_").expect("Invalid regex pattern"));

/// The two kinds of numbered entries the notebook keeps ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Numbered workflow files inside one experiment folder.
    WorkflowFiles,
    /// Numbered experiment folders under the notebook root.
    ExperimentFolders,
}

impl EntryKind {
    /// Whether a directory entry with this name and file type belongs to the
    /// numbered sequence.
    pub fn matches(&self, name: &str, is_dir: bool) -> bool {
        match self {
            // README.md never matches the numbered pattern, so no extra guard
            EntryKind::WorkflowFiles => !is_dir && WORKFLOW_FILE.is_match(name),
            EntryKind::ExperimentFolders => is_dir && NUMBERED_PREFIX.is_match(name),
        }
    }
}

/// Walk upward from `start` looking for the notebook root directory.
///
/// Returns the `labnote/` directory itself, whether `start` is inside it or
/// sits next to it.
pub fn find_notebook_root(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        if dir.file_name().is_some_and(|n| n == NOTEBOOK_DIR) && dir.is_dir() {
            return Some(dir.to_path_buf());
        }
        let candidate = dir.join(NOTEBOOK_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }
    None
}

/// Whether a path is an experiment README: `labnote/NNN_*/README.md`.
pub fn is_experiment_readme(path: &Path) -> bool {
    let mut parts = path.components().rev().filter_map(|c| match c {
        std::path::Component::Normal(s) => s.to_str(),
        _ => None,
    });

    let (Some(file), Some(experiment), Some(notebook)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    file.eq_ignore_ascii_case("readme.md")
        && NUMBERED_PREFIX.is_match(experiment)
        && notebook.eq_ignore_ascii_case(NOTEBOOK_DIR)
}

/// Whether a path is a workflow file: a non-README `.md` inside
/// `labnote/NNN_*/`.
pub fn is_workflow_file(path: &Path) -> bool {
    let Some(file) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !file.to_lowercase().ends_with(".md") || file.eq_ignore_ascii_case("readme.md") {
        return false;
    }

    let mut parts = path.components().rev().filter_map(|c| match c {
        std::path::Component::Normal(s) => s.to_str(),
        _ => None,
    });
    parts.next(); // file name, already checked

    let (Some(experiment), Some(notebook)) = (parts.next(), parts.next()) else {
        return false;
    };
    NUMBERED_PREFIX.is_match(experiment) && notebook.eq_ignore_ascii_case(NOTEBOOK_DIR)
}

/// List numbered entry names of one kind in a directory, sorted by name.
///
/// Zero-padded prefixes make lexicographic order equal to numeric order.
pub fn numbered_entries(dir: &Path, kind: EntryKind) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_dir = entry
            .file_type()
            .with_context(|| format!("Failed to stat {}", entry.path().display()))?
            .is_dir();
        if kind.matches(&name, is_dir) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Next free 3-digit sequence number for a kind of entry in a directory.
pub fn next_sequence(dir: &Path, kind: EntryKind) -> Result<u32> {
    let max = numbered_entries(dir, kind)?
        .iter()
        .filter_map(|name| name[..3].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    Ok(max + 1)
}

/// Replace whitespace runs with underscores for use in file names.
pub fn sanitize_component(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Create a new numbered experiment folder with README, `images/` and
/// `resources/`. Returns the folder path.
pub fn create_experiment(
    notebook_root: &Path,
    title: &str,
    experiment_type: &str,
    author: &str,
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    let seq = next_sequence(notebook_root, EntryKind::ExperimentFolders)?;
    let folder = notebook_root.join(format!("{seq:03}_{}", sanitize_component(title)));

    fs::create_dir_all(folder.join("images"))
        .with_context(|| format!("Failed to create {}", folder.join("images").display()))?;
    fs::create_dir_all(folder.join("resources"))
        .with_context(|| format!("Failed to create {}", folder.join("resources").display()))?;

    let readme = templates::readme_content(title, experiment_type, author, at)?;
    locked_write(&folder.join("README.md"), &readme)?;

    Ok(folder)
}

/// Create a numbered workflow file next to an experiment README and append a
/// checkbox link line to the README. Returns the file path and the link line.
///
/// The experimenter is taken from the README frontmatter author, falling back
/// to `default_experimenter` when the README has no valid frontmatter.
pub fn create_workflow_file(
    readme_path: &Path,
    workflow: &WorkflowRecord,
    user_description: &str,
    at: DateTime<Utc>,
    default_experimenter: &str,
) -> Result<(PathBuf, String)> {
    let dir = readme_path
        .parent()
        .context("README path has no parent directory")?;

    let readme_content = locked_read(readme_path)?;
    let experimenter = parse_readme_front_matter(&readme_content)
        .map(|fm| fm.author)
        .unwrap_or_else(|| default_experimenter.to_string());

    let seq = next_sequence(dir, EntryKind::WorkflowFiles)?;
    let safe_name = sanitize_component(&workflow.name);
    let suffix = if user_description.is_empty() {
        String::new()
    } else {
        format!("--{}", sanitize_component(user_description))
    };
    let file_name = format!("{seq:03}_{}_{safe_name}{suffix}.md", workflow.id);
    let file_path = dir.join(&file_name);

    let content = templates::workflow_file_content(workflow, user_description, at, &experimenter)?;
    locked_write(&file_path, &content)?;

    let link_text = if user_description.is_empty() {
        format!("{seq:03} {} {}", workflow.id, workflow.name)
    } else {
        format!("{seq:03} {} {} - {user_description}", workflow.id, workflow.name)
    };
    let link_line = format!("[ ] [{link_text}](./{file_name})");

    let mut updated = readme_content;
    if !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&link_line);
    updated.push('\n');
    locked_write(readme_path, &updated)?;

    Ok((file_path, link_line))
}

/// Insert a unit-operation block into a workflow file.
///
/// The block goes just before the related-operations end marker when present,
/// otherwise it is appended at the end of the file.
pub fn insert_unit_operation(workflow_path: &Path, block: &str) -> Result<()> {
    let content = locked_read(workflow_path)?;

    let updated = match content.find(templates::UO_LIST_END) {
        Some(pos) => {
            let (head, tail) = content.split_at(pos);
            format!("{head}{block}\n{tail}")
        }
        None => {
            let mut s = content;
            if !s.ends_with('\n') {
                s.push('\n');
            }
            s.push_str(block);
            s
        }
    };

    locked_write(workflow_path, &updated)
}
