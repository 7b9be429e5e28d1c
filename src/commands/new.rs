//! New command - scaffold a numbered experiment folder.

use crate::config::Config;
use crate::fs::layout;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

pub fn execute(
    title: String,
    experiment_type: String,
    author: Option<String>,
    root: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let notebook_root = super::notebook_root(root.as_deref())?;

    let author = author.unwrap_or_else(|| config.experimenter().to_string());
    let folder =
        layout::create_experiment(&notebook_root, &title, &experiment_type, &author, Utc::now())?;

    println!(
        "{} Created experiment {}",
        "✓".green().bold(),
        folder.display()
    );
    println!("  README.md, images/, resources/");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::layout::NOTEBOOK_DIR;

    #[test]
    fn test_new_creates_numbered_folder() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join(NOTEBOOK_DIR);
        std::fs::create_dir(&root).unwrap();

        execute(
            "Golden Gate Assembly".to_string(),
            "HW".to_string(),
            Some("Jane".to_string()),
            Some(temp.path().to_path_buf()),
        )
        .unwrap();

        assert!(root.join("001_Golden_Gate_Assembly/README.md").exists());
    }
}
