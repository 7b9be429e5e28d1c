//! Scaffold command - ask the backend for a recommended structure, then
//! write the scaffold files it returns into a new experiment folder.

use crate::api::types::StructuredNoteRequest;
use crate::api::BackendClient;
use crate::config::Config;
use crate::fs::layout;
use crate::utils::confirm;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::{Component, Path, PathBuf};

pub fn execute(query: String, yes: bool, root: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let client = BackendClient::new(&config)?;
    let notebook_root = super::notebook_root(root.as_deref())?;

    eprintln!("{} Asking the backend for a structure...", "─".dimmed());
    let recommendation = client.recommend_structure(&query)?;

    println!(
        "Recommended workflow: {}",
        recommendation.recommended_workflow_id.cyan()
    );
    println!(
        "Recommended unit operations: {}",
        recommendation.recommended_unit_operation_ids.join(", ").cyan()
    );
    if let Some(sources) = &recommendation.sources {
        if !sources.is_empty() {
            println!("{} Sources: {}", "─".dimmed(), sources.join(", ").dimmed());
        }
    }

    if !yes && !confirm("Create scaffold with this structure?")? {
        println!("{} Aborted", "─".dimmed());
        return Ok(());
    }

    eprintln!("{} Generating scaffold files...", "─".dimmed());
    let scaffold = client.create_scaffold(&StructuredNoteRequest {
        query: &query,
        workflow_id: &recommendation.recommended_workflow_id,
        unit_operation_ids: &recommendation.recommended_unit_operation_ids,
        experimenter: config.experimenter(),
    })?;

    if scaffold.files.is_empty() {
        println!("{} Backend returned no scaffold files", "─".dimmed());
        return Ok(());
    }

    let folder = layout::create_experiment(
        &notebook_root,
        &query,
        "AI",
        config.experimenter(),
        Utc::now(),
    )?;

    for (name, content) in &scaffold.files {
        let relative = safe_relative_path(name)?;
        let path = folder.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  {} {}", "+".green(), path.display());
    }

    println!(
        "{} Scaffolded {} file(s) in {}",
        "✓".green().bold(),
        scaffold.files.len(),
        folder.display()
    );
    Ok(())
}

/// Reject scaffold file names that would escape the experiment folder.
fn safe_relative_path(name: &str) -> Result<PathBuf> {
    let path = Path::new(name);
    if path.components().any(|c| {
        !matches!(c, Component::Normal(_))
    }) {
        bail!("Backend returned unsafe scaffold path: {name}");
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_relative_path() {
        assert!(safe_relative_path("README.md").is_ok());
        assert!(safe_relative_path("resources/protocol.md").is_ok());
        assert!(safe_relative_path("../escape.md").is_err());
        assert!(safe_relative_path("/etc/passwd").is_err());
    }
}
