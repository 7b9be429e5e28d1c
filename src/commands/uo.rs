//! Unit-operation command - insert a unit-operation block into a workflow
//! file.

use crate::catalog::{self, CatalogFile};
use crate::config::Config;
use crate::fs::layout;
use crate::fs::locking::locked_read;
use crate::parser::frontmatter::parse_readme_front_matter;
use anyhow::{bail, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

pub fn add(
    file: PathBuf,
    id: String,
    description: Option<String>,
    catalog: Option<CatalogFile>,
) -> Result<()> {
    if !layout::is_workflow_file(&file) {
        bail!(
            "{} is not a workflow file (expected a non-README .md under labnote/NNN_*/)",
            file.display()
        );
    }

    let config = Config::load()?;
    let notebook_root = super::notebook_root(Some(file.as_path()))?;

    let catalog_file = match catalog {
        Some(file) => file,
        None => catalog_for_id(&id)?,
    };
    let unit_operations = catalog::load_unit_operations(&notebook_root, catalog_file)?;
    let Some(uo) = unit_operations.iter().find(|u| u.id == id) else {
        let known: Vec<String> = unit_operations.iter().map(|u| u.label()).collect();
        bail!(
            "Unknown unit operation '{}' in {}. Known entries:\n  {}",
            id,
            catalog_file.filename(),
            known.join("\n  ")
        );
    };

    // Experimenter from the sibling README's author, config as fallback
    let experimenter = file
        .parent()
        .map(|dir| dir.join("README.md"))
        .filter(|p| p.exists())
        .and_then(|p| locked_read(&p).ok())
        .and_then(|content| parse_readme_front_matter(&content))
        .map(|fm| fm.author)
        .unwrap_or_else(|| config.experimenter().to_string());

    let block = crate::templates::unit_operation_block(
        uo,
        description.as_deref().unwrap_or(""),
        Utc::now(),
        &experimenter,
    );
    layout::insert_unit_operation(&file, &block)?;

    println!(
        "{} Inserted {} into {}",
        "✓".green().bold(),
        uo.label().cyan(),
        file.display()
    );
    Ok(())
}

pub fn list(root: Option<PathBuf>, file: CatalogFile) -> Result<()> {
    let notebook_root = super::notebook_root(root.as_deref())?;
    let unit_operations = catalog::load_unit_operations(&notebook_root, file)?;

    if unit_operations.is_empty() {
        println!("{} No unit operations in {}.", "─".dimmed(), file.filename());
        return Ok(());
    }

    println!("{}", file.description().bold());
    for uo in unit_operations {
        println!("  {} {}", uo.id.cyan(), uo.name);
        println!("    {}", uo.description.dimmed());
    }
    Ok(())
}

/// Infer the catalog a unit-operation ID belongs to from its prefix.
fn catalog_for_id(id: &str) -> Result<CatalogFile> {
    if id.starts_with("USW") {
        Ok(CatalogFile::SwUnitOperations)
    } else if id.starts_with("UHW") {
        Ok(CatalogFile::HwUnitOperations)
    } else if id.starts_with("US") {
        Ok(CatalogFile::SwUnitOperations)
    } else if id.starts_with("UH") {
        Ok(CatalogFile::HwUnitOperations)
    } else {
        bail!("'{id}' does not look like a unit-operation ID (expected USW/UHW/US/UH prefix)")
    }
}
