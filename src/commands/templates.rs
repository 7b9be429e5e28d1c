//! Templates command - inspect the template catalog files.

use crate::catalog::{parse_unit_operations, parse_workflows, CatalogFile};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn list(root: Option<PathBuf>) -> Result<()> {
    let notebook_root = super::notebook_root(root.as_deref())?;

    println!("{}", "Template catalogs".bold());
    println!();

    for file in CatalogFile::all() {
        let path = file.path(&notebook_root);
        if !path.exists() {
            println!(
                "  {} {} (missing - run 'labnote init')",
                "─".dimmed(),
                file.filename().cyan()
            );
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        let count = match file {
            CatalogFile::Workflows => parse_workflows(&content).len(),
            _ => parse_unit_operations(&content).len(),
        };
        println!(
            "  {} {} ({count} records)",
            "─".dimmed(),
            file.filename().cyan()
        );
        println!("    {}", file.description().dimmed());
    }

    Ok(())
}
