//! Template catalogs: the flat bullet-list documents describing standard
//! workflows and unit operations.
//!
//! A record starts at any `- **ID**: Name` line. Its description is the next
//! following bullet line anywhere below (plain dash bullet for workflows,
//! `- **Description**:` for unit operations). Document order is preserved and
//! duplicate IDs simply produce duplicate records.

use anyhow::{bail, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WORKFLOW_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*\*\*(.+?)\*\*:\s*(.*)$").expect("Invalid regex pattern"));

static UO_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*\*\*((?:USW|UHW|US|UH)\d+)\*\*:\s*(.*)$").expect("Invalid regex pattern")
});

/// A standard workflow from the workflow catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRecord {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A unit operation from the HW or SW catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOperationRecord {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl WorkflowRecord {
    pub fn label(&self) -> String {
        format!("{}: {}", self.id, self.name)
    }
}

impl UnitOperationRecord {
    pub fn label(&self) -> String {
        format!("{}: {}", self.id, self.name)
    }
}

/// Parse the workflow catalog document.
pub fn parse_workflows(content: &str) -> Vec<WorkflowRecord> {
    let lines: Vec<&str> = content.lines().collect();
    let mut records = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = WORKFLOW_ENTRY.captures(line) {
            let description = lines[i + 1..]
                .iter()
                .find(|l| l.trim().starts_with('-'))
                .map(|l| l.trim().trim_start_matches("- ").to_string())
                .unwrap_or_else(|| "No description available.".to_string());
            records.push(WorkflowRecord {
                id: caps[1].to_string(),
                name: caps[2].trim().to_string(),
                description,
            });
        }
    }

    records
}

/// Parse a unit-operation catalog document.
pub fn parse_unit_operations(content: &str) -> Vec<UnitOperationRecord> {
    let lines: Vec<&str> = content.lines().collect();
    let mut records = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = UO_ENTRY.captures(line) {
            let description = lines[i + 1..]
                .iter()
                .find(|l| l.trim().starts_with("- **Description**:"))
                .map(|l| {
                    l.trim()
                        .trim_start_matches("- **Description**:")
                        .trim()
                        .to_string()
                })
                .unwrap_or_else(|| "No description.".to_string());
            records.push(UnitOperationRecord {
                id: caps[1].to_string(),
                name: caps[2].trim().to_string(),
                description,
            });
        }
    }

    records
}

/// The three catalog files kept under `<notebook root>/templates/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFile {
    Workflows,
    HwUnitOperations,
    SwUnitOperations,
}

impl CatalogFile {
    pub fn all() -> [CatalogFile; 3] {
        [
            CatalogFile::Workflows,
            CatalogFile::HwUnitOperations,
            CatalogFile::SwUnitOperations,
        ]
    }

    pub fn filename(&self) -> &'static str {
        match self {
            CatalogFile::Workflows => "workflows.md",
            CatalogFile::HwUnitOperations => "hw_unit_operations.md",
            CatalogFile::SwUnitOperations => "sw_unit_operations.md",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CatalogFile::Workflows => "Standard workflows",
            CatalogFile::HwUnitOperations => "Hardware (wet-lab) unit operations",
            CatalogFile::SwUnitOperations => "Software (dry-lab) unit operations",
        }
    }

    /// Seed content written by `labnote init`.
    pub fn seed(&self) -> &'static str {
        match self {
            CatalogFile::Workflows => {
                "# Standard Workflows\n\n\
                 - **WD070**: Vector Design\n  - Design a plasmid vector.\n\n\
                 - **WD100**: Library Construction\n  - Construct a variant library.\n"
            }
            CatalogFile::HwUnitOperations => {
                "# Hardware Unit Operations\n\n\
                 - **UHW001**: Sample Preparation\n\
                 - **Description**: Prepare samples for the downstream step.\n\n\
                 - **UHW010**: PCR Amplification\n\
                 - **Description**: Amplify target DNA by PCR.\n"
            }
            CatalogFile::SwUnitOperations => {
                "# Software Unit Operations\n\n\
                 - **USW070**: Sequence Analysis\n\
                 - **Description**: Analyze sequencing results.\n\n\
                 - **USW080**: Primer Design\n\
                 - **Description**: Design primers in silico.\n"
            }
        }
    }

    /// Path of this catalog under the notebook root.
    pub fn path(&self, notebook_root: &Path) -> PathBuf {
        notebook_root.join("templates").join(self.filename())
    }
}

/// Load and parse the workflow catalog from the notebook root.
pub fn load_workflows(notebook_root: &Path) -> Result<Vec<WorkflowRecord>> {
    let path = CatalogFile::Workflows.path(notebook_root);
    if !path.exists() {
        bail!(
            "Workflow catalog not found at {}. Run 'labnote init' first.",
            path.display()
        );
    }
    let content = crate::fs::locking::locked_read(&path)?;
    Ok(parse_workflows(&content))
}

/// Load and parse one of the unit-operation catalogs from the notebook root.
pub fn load_unit_operations(
    notebook_root: &Path,
    file: CatalogFile,
) -> Result<Vec<UnitOperationRecord>> {
    let path = file.path(notebook_root);
    if !path.exists() {
        bail!(
            "Unit-operation catalog not found at {}. Run 'labnote init' first.",
            path.display()
        );
    }
    let content = crate::fs::locking::locked_read(&path)?;
    Ok(parse_unit_operations(&content))
}
