//! Populate command - replace one placeholder line with an AI draft.
//!
//! Resolves the section context at the given line, asks `/populate_note` for
//! candidate texts, applies the chosen one, then records the preference as
//! fire-and-forget telemetry.

use crate::api::types::{PopulateRequest, PreferenceRequest};
use crate::api::BackendClient;
use crate::config::Config;
use crate::fs::locking::{locked_read, locked_write};
use crate::parser::resolve_context;
use crate::utils::{prompt_line, truncate};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;

pub fn execute(
    file: PathBuf,
    line: usize,
    choose: Option<usize>,
    query: Option<String>,
) -> Result<()> {
    if line == 0 {
        bail!("Line numbers are 1-based");
    }

    let config = Config::load()?;
    let client = BackendClient::new(&config)?;

    let content = locked_read(&file)?;
    let Some(ctx) = resolve_context(&content, line - 1) else {
        bail!(
            "No placeholder context at {}:{line}. Put the cursor line on a placeholder hint \
             inside a unit-operation section.",
            file.display()
        );
    };

    let query = query.unwrap_or_else(|| ctx.query_title.clone());
    eprintln!(
        "{} Drafting {} / {} for \"{}\"...",
        "─".dimmed(),
        ctx.unit_operation_id.cyan(),
        ctx.section_name.cyan(),
        query
    );

    let response = client.populate_note(&PopulateRequest {
        file_content: &content,
        uo_id: &ctx.unit_operation_id,
        section: &ctx.section_name,
        query: &query,
    })?;

    if response.options.is_empty() {
        println!(
            "{} No draft generated for this section. Try rephrasing the query.",
            "─".dimmed()
        );
        return Ok(());
    }

    let chosen_idx = match choose {
        Some(k) => {
            if k == 0 || k > response.options.len() {
                bail!(
                    "--choose must be between 1 and {}",
                    response.options.len()
                );
            }
            k - 1
        }
        None => pick_option(&response.options)?,
    };
    let chosen = response.options[chosen_idx].clone();

    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    lines[ctx.placeholder_line] = chosen.clone();
    let mut updated = lines.join("\n");
    if content.ends_with('\n') {
        updated.push('\n');
    }
    locked_write(&file, &updated)?;

    println!(
        "{} Replaced placeholder at {}:{line}",
        "✓".green().bold(),
        file.display()
    );

    // Non-critical telemetry; failures are logged, never surfaced.
    let rejected: Vec<String> = response
        .options
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != chosen_idx)
        .map(|(_, o)| o.clone())
        .collect();
    if let Err(e) = client.record_preference(&PreferenceRequest {
        uo_id: &ctx.unit_operation_id,
        section: &ctx.section_name,
        chosen: &chosen,
        rejected: &rejected,
        query: &query,
        file_content: &content,
    }) {
        warn!(error = %e, "failed to record preference");
    }

    Ok(())
}

/// Show the candidate drafts and read a 1-based choice from stdin.
fn pick_option(options: &[String]) -> Result<usize> {
    println!("{}", "Draft options".bold());
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, truncate(option, 100));
    }

    let answer = prompt_line(&format!("Choose an option [1-{}]: ", options.len()))?;
    let choice: usize = answer
        .parse()
        .with_context(|| format!("Not a number: '{answer}'"))?;
    if choice == 0 || choice > options.len() {
        bail!("Choice out of range: {choice}");
    }
    Ok(choice - 1)
}
