pub mod chat;
pub mod constants;
pub mod generate;
pub mod init;
pub mod new;
pub mod populate;
pub mod renumber;
pub mod scaffold;
pub mod templates;
pub mod uo;
pub mod workflow;

use crate::fs::layout;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the notebook root from an explicit path or by walking up from the
/// current directory.
pub fn notebook_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return layout::find_notebook_root(path).with_context(|| {
            format!("No '{}' directory found at {}", layout::NOTEBOOK_DIR, path.display())
        });
    }
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    layout::find_notebook_root(&cwd).with_context(|| {
        format!(
            "No '{}' directory found here or above. Run 'labnote init' first.",
            layout::NOTEBOOK_DIR
        )
    })
}
