//! Init command - create the notebook tree and seed the template catalogs.

use crate::catalog::CatalogFile;
use crate::fs::layout::NOTEBOOK_DIR;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

pub fn execute(base: Option<PathBuf>) -> Result<()> {
    let base = base.unwrap_or_else(|| PathBuf::from("."));
    let root = base.join(NOTEBOOK_DIR);
    let templates_dir = root.join("templates");

    if root.exists() && templates_dir.exists() {
        println!(
            "{} Notebook already initialized at {}",
            "─".dimmed(),
            root.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&templates_dir)
        .with_context(|| format!("Failed to create {}", templates_dir.display()))?;

    let mut seeded = Vec::new();
    for file in CatalogFile::all() {
        let path = file.path(&root);
        if !path.exists() {
            fs::write(&path, file.seed())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            seeded.push(file);
        }
    }

    println!(
        "{} Initialized notebook at {}",
        "✓".green().bold(),
        root.display()
    );
    if !seeded.is_empty() {
        println!();
        println!("Seeded template catalogs:");
        for file in seeded {
            println!("  {} - {}", file.filename(), file.description());
        }
    }

    Ok(())
}
