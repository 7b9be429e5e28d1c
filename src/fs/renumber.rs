//! Renumbering transaction for numbered notebook entries.
//!
//! Restores the contiguous `001..N` prefix sequence over a directory's
//! numbered entries. Renames apply in two phases (temp suffix, then final
//! name) so a permutation of prefixes can never collide with another entry's
//! current or final name. For workflow files the associated README's checkbox
//! links are rewritten to match.
//!
//! Concurrent invocations against the same directory serialize on an
//! exclusive advisory lock held for the whole transaction.

use crate::fs::layout::EntryKind;
use crate::fs::locking::{locked_read, locked_write, DirLock};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Suffix for phase-one renames. Never matches a numbered entry pattern, so
/// temp names stay disjoint from all real names throughout.
const TMP_SUFFIX: &str = ".renumber-tmp";

/// Lock file name used to serialize renumbering per directory.
const LOCK_FILE: &str = ".renumber.lock";

/// One planned rename: old entry name to new entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Result of a renumbering transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenumberOutcome {
    /// Entries were renamed; the plan lists every applied rename.
    Renamed(Vec<Rename>),
    /// Every entry already carries its target prefix.
    AlreadyOrdered,
    /// The directory holds no matching numbered entries.
    NothingToRenumber,
}

/// Compute the rename plan for a sorted list of entry names.
///
/// Entry `i` (0-based) gets prefix `i+1`, zero-padded to 3 digits; entries
/// whose prefix is already correct are omitted from the plan. Names without
/// a clean 3-byte prefix (too short, or a char boundary in the way) are not
/// numbered entries and are skipped.
pub fn plan_renames(sorted_names: &[String]) -> Vec<Rename> {
    sorted_names
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let (prefix, rest) = match (name.get(..3), name.get(3..)) {
                (Some(prefix), Some(rest)) => (prefix, rest),
                _ => return None,
            };
            let target = format!("{:03}", i + 1);
            if prefix == target {
                return None;
            }
            Some(Rename {
                from: name.clone(),
                to: format!("{target}{rest}"),
            })
        })
        .collect()
}

/// Renumber the entries of one kind in `dir` back to a contiguous sequence.
pub fn renumber(dir: &Path, kind: EntryKind) -> Result<RenumberOutcome> {
    let _lock = DirLock::acquire(dir, LOCK_FILE)?;

    let names = crate::fs::layout::numbered_entries(dir, kind)?;
    if names.is_empty() {
        return Ok(RenumberOutcome::NothingToRenumber);
    }

    let plan = plan_renames(&names);
    if plan.is_empty() {
        return Ok(RenumberOutcome::AlreadyOrdered);
    }

    // Phase one: move every affected entry out of the numbered namespace.
    for rename in &plan {
        let from = dir.join(&rename.from);
        let tmp = dir.join(format!("{}{TMP_SUFFIX}", rename.to));
        fs::rename(&from, &tmp)
            .with_context(|| format!("Failed to rename {} to temp name", from.display()))?;
    }

    // Phase two: settle temp names onto their final names.
    for rename in &plan {
        let tmp = dir.join(format!("{}{TMP_SUFFIX}", rename.to));
        let to = dir.join(&rename.to);
        fs::rename(&tmp, &to)
            .with_context(|| format!("Failed to rename temp entry to {}", to.display()))?;
    }

    if kind == EntryKind::WorkflowFiles {
        rewrite_readme_links(dir, &plan)?;
    }

    Ok(RenumberOutcome::Renamed(plan))
}

/// Rewrite README checkbox links after workflow files were renumbered.
///
/// For each renamed file, lines referencing `(./old_name)` get the link
/// target replaced and the `NNN ` prefix of the link text updated.
fn rewrite_readme_links(dir: &Path, plan: &[Rename]) -> Result<()> {
    let readme = dir.join("README.md");
    if !readme.exists() {
        return Ok(());
    }

    let content = locked_read(&readme)?;
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    for rename in plan {
        let old_target = format!("(./{})", rename.from);
        let new_target = format!("(./{})", rename.to);
        let old_text_prefix = format!("[{} ", &rename.from[..3]);
        let new_text_prefix = format!("[{} ", &rename.to[..3]);

        for line in &mut lines {
            if line.contains(&old_target) {
                *line = line.replace(&old_target, &new_target);
                *line = line.replacen(&old_text_prefix, &new_text_prefix, 1);
            }
        }
    }

    let mut updated = lines.join("\n");
    if content.ends_with('\n') {
        updated.push('\n');
    }
    locked_write(&readme, &updated)
}
