//! Generate command - draft a full lab note via the backend.
//!
//! Plain queries go to `/generate_labnote`; when the user pins a workflow and
//! unit operations the request goes to `/create_filled_note` instead.

use crate::api::types::StructuredNoteRequest;
use crate::api::BackendClient;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

pub fn execute(
    query: String,
    workflow_id: Option<String>,
    unit_operations: Vec<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let client = BackendClient::new(&config)?;

    eprintln!("{} Asking the backend for a draft...", "─".dimmed());

    let result = match workflow_id {
        Some(workflow_id) => client.create_filled_note(&StructuredNoteRequest {
            query: &query,
            workflow_id: &workflow_id,
            unit_operation_ids: &unit_operations,
            experimenter: config.experimenter(),
        })?,
        None => client.generate_labnote(&query)?,
    };

    if let Some(sources) = &result.sources {
        if !sources.is_empty() {
            info!(sources = %sources.join(", "), "draft grounded on sources");
            eprintln!("{} Sources: {}", "─".dimmed(), sources.join(", ").dimmed());
        }
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &result.response)
                .with_context(|| format!("Failed to write draft to {}", path.display()))?;
            println!("{} Draft written to {}", "✓".green().bold(), path.display());
        }
        None => println!("{}", result.response),
    }

    Ok(())
}
