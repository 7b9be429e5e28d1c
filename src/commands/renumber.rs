//! Renumber command - restore contiguous numbering of workflow files or
//! experiment folders.

use crate::fs::layout::EntryKind;
use crate::fs::renumber::{renumber, RenumberOutcome};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

pub fn files(dir: PathBuf) -> Result<()> {
    report(renumber(&dir, EntryKind::WorkflowFiles)?)
}

pub fn folders(root: Option<PathBuf>) -> Result<()> {
    let notebook_root = super::notebook_root(root.as_deref())?;
    report(renumber(&notebook_root, EntryKind::ExperimentFolders)?)
}

fn report(outcome: RenumberOutcome) -> Result<()> {
    match outcome {
        RenumberOutcome::Renamed(plan) => {
            println!("{} Renumbered {} entr(ies):", "✓".green().bold(), plan.len());
            for rename in plan {
                println!("  {} {} {}", rename.from.dimmed(), "→".dimmed(), rename.to);
            }
        }
        RenumberOutcome::AlreadyOrdered => {
            println!("{} Entries are already in order.", "─".dimmed());
        }
        RenumberOutcome::NothingToRenumber => {
            println!("{} Nothing to reorder here.", "─".dimmed());
        }
    }
    Ok(())
}
