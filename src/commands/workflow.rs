//! Workflow command - create a numbered workflow file in an experiment folder.

use crate::catalog;
use crate::config::Config;
use crate::fs::layout;
use anyhow::{bail, Result};
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

pub fn add(readme: PathBuf, id: String, description: Option<String>) -> Result<()> {
    if !layout::is_experiment_readme(&readme) {
        bail!(
            "{} is not an experiment README (expected labnote/NNN_*/README.md)",
            readme.display()
        );
    }

    let config = Config::load()?;
    let notebook_root = super::notebook_root(Some(readme.as_path()))?;

    let workflows = catalog::load_workflows(&notebook_root)?;
    let Some(workflow) = workflows.iter().find(|w| w.id == id) else {
        let known: Vec<String> = workflows.iter().map(|w| w.label()).collect();
        bail!(
            "Unknown workflow ID '{}'. Known workflows:\n  {}",
            id,
            known.join("\n  ")
        );
    };

    let description = description.unwrap_or_default();
    let (path, link) = layout::create_workflow_file(
        &readme,
        workflow,
        &description,
        Utc::now(),
        config.experimenter(),
    )?;

    println!("{} Created {}", "✓".green().bold(), path.display());
    println!("  README link: {link}");
    Ok(())
}

pub fn list(root: Option<PathBuf>) -> Result<()> {
    let notebook_root = super::notebook_root(root.as_deref())?;
    let workflows = catalog::load_workflows(&notebook_root)?;

    if workflows.is_empty() {
        println!("{} No workflows in the catalog.", "─".dimmed());
        return Ok(());
    }

    println!("{}", "Workflow catalog".bold());
    for workflow in workflows {
        println!("  {} {}", workflow.id.cyan(), workflow.name);
        println!("    {}", workflow.description.dimmed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::layout::NOTEBOOK_DIR;

    fn setup_notebook() -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        crate::commands::init::execute(Some(temp.path().to_path_buf())).unwrap();
        let root = temp.path().join(NOTEBOOK_DIR);
        let folder = layout::create_experiment(&root, "Test Exp", "HW", "Jane", Utc::now()).unwrap();
        (temp, folder.join("README.md"))
    }

    #[test]
    fn test_add_rejects_non_readme_path() {
        let result = add(PathBuf::from("/tmp/notes.md"), "WD070".to_string(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_creates_file_and_link() {
        let (_temp, readme) = setup_notebook();
        add(readme.clone(), "WD070".to_string(), Some("pUC19".to_string())).unwrap();

        let dir = readme.parent().unwrap();
        assert!(dir.join("001_WD070_Vector_Design--pUC19.md").exists());
        let content = std::fs::read_to_string(&readme).unwrap();
        assert!(content.contains("(./001_WD070_Vector_Design--pUC19.md)"));
    }

    #[test]
    fn test_add_unknown_id() {
        let (_temp, readme) = setup_notebook();
        let err = add(readme, "WD999".to_string(), None).unwrap_err();
        assert!(err.to_string().contains("Unknown workflow ID"));
    }
}
