//! Chat command - one conversational turn with the backend.
//!
//! The conversation ID returned by the backend is persisted under the
//! notebook root so `--continue-chat` can resume the thread.

use crate::api::BackendClient;
use crate::config::Config;
use crate::fs::layout;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;

const SESSION_FILE: &str = ".chat-session";

pub fn execute(query: String, continue_chat: bool, root: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let client = BackendClient::new(&config)?;

    // Chat works without a notebook; session persistence is best effort.
    let notebook_root = match root.as_deref() {
        Some(path) => layout::find_notebook_root(path),
        None => std::env::current_dir()
            .ok()
            .and_then(|cwd| layout::find_notebook_root(&cwd)),
    };

    let conversation_id = if continue_chat {
        notebook_root.as_deref().and_then(load_session)
    } else {
        None
    };

    eprintln!("{} Waiting for the backend...", "─".dimmed());
    let response = client.chat(&query, conversation_id.as_deref())?;

    println!("{}", response.response);

    if let (Some(root), Some(id)) = (&notebook_root, &response.conversation_id) {
        if let Err(e) = std::fs::write(root.join(SESSION_FILE), id) {
            debug!(error = %e, "failed to persist chat session");
        }
    }

    Ok(())
}

fn load_session(notebook_root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(notebook_root.join(SESSION_FILE)).ok()?;
    let id = content.trim().to_string();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Clear any persisted conversation, starting the next chat fresh.
pub fn reset(root: Option<PathBuf>) -> Result<()> {
    let notebook_root = super::notebook_root(root.as_deref())?;
    let session = notebook_root.join(SESSION_FILE);
    if session.exists() {
        std::fs::remove_file(&session)
            .with_context(|| format!("Failed to remove {}", session.display()))?;
        println!("{} Chat session cleared", "✓".green().bold());
    } else {
        println!("{} No chat session to clear", "─".dimmed());
    }
    Ok(())
}
