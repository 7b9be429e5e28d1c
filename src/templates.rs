//! Markdown generators for README files, workflow files and unit-operation
//! blocks.
//!
//! All generators are pure functions of their inputs; the caller supplies the
//! timestamp. Civil dates use a fixed UTC+09:00 zone (the lab's local time,
//! which has no daylight saving).

use crate::catalog::{UnitOperationRecord, WorkflowRecord};
use crate::parser::frontmatter::{ReadmeFrontMatter, WorkflowFrontMatter};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};

/// Marker lines delimiting the related-unit-operations list in a workflow
/// file. `labnote uo add` inserts blocks between them.
pub const UO_LIST_START: &str = "<!-- UNITOPERATION_LIST_START -->";
pub const UO_LIST_END: &str = "<!-- UNITOPERATION_LIST_END -->";

const DIVIDER: &str =
    "------------------------------------------------------------------------";

/// The lab's civil time zone (UTC+09:00, no DST).
fn civil_zone() -> FixedOffset {
    // 9 * 3600 is in range, so this cannot fail
    FixedOffset::east_opt(9 * 3600).expect("Invalid fixed offset")
}

/// Format a timestamp as a `YYYY-MM-DD` civil date.
pub fn civil_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&civil_zone()).format("%Y-%m-%d").to_string()
}

/// Format a timestamp as `YYYY-MM-DD HH:MM` civil time.
pub fn civil_datetime(at: DateTime<Utc>) -> String {
    at.with_timezone(&civil_zone())
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Generate the content of a new numbered workflow file.
pub fn workflow_file_content(
    workflow: &WorkflowRecord,
    user_description: &str,
    at: DateTime<Utc>,
    experimenter: &str,
) -> Result<String> {
    let date = civil_date(at);
    let title_suffix = if user_description.is_empty() {
        String::new()
    } else {
        format!(" - {user_description}")
    };

    let front_matter = WorkflowFrontMatter {
        title: format!("{} {}{title_suffix}", workflow.id, workflow.name),
        experimenter: experimenter.to_string(),
        created_date: date.clone(),
        last_updated_date: date,
    };
    let yaml = serde_yaml::to_string(&front_matter)
        .context("Failed to serialize workflow frontmatter")?;

    let heading_suffix = if user_description.is_empty() {
        String::new()
    } else {
        format!(" {user_description}")
    };

    Ok(format!(
        "---\n{yaml}---\n\n\
         ## [{id} {name}]{heading_suffix}\n\
         | Briefly describe this workflow (edit the template description below to fit your purpose)\n\
         | {description}\n\n\
         ## 🗂️ Related Unit Operations\n\
         | List related unit operations between the markers below.\n\
         | `labnote uo add` inserts new blocks between the markers.\n\
         {UO_LIST_START}\n\n\
         {UO_LIST_END}\n",
        id = workflow.id,
        name = workflow.name,
        description = workflow.description,
    ))
}

/// Generate a unit-operation block ready to insert into a workflow file.
///
/// The block contains a `Meta` section followed by the seven fixed sections,
/// each holding exactly one placeholder hint line that the context resolver
/// recognizes.
pub fn unit_operation_block(
    uo: &UnitOperationRecord,
    user_description: &str,
    at: DateTime<Utc>,
    experimenter: &str,
) -> String {
    let datetime = civil_datetime(at);
    let description_part = if user_description.is_empty() {
        String::new()
    } else {
        format!(" {user_description}")
    };
    let uo_description_line = if uo.description.is_empty() {
        String::new()
    } else {
        format!("\n\n- **Description**: {}", uo.description)
    };

    format!(
        "\n{DIVIDER}\n\n\
         ### [{id} {name}]{description_part}{uo_description_line}\n\n\
         #### Meta\n\
         - Experimenter: {experimenter}\n\
         - Start_date: '{datetime}'\n\
         - End_date: ''\n\n\
         #### Input\n- (samples from the previous step)\n\n\
         #### Reagent\n- (e.g. enzyme, buffer, etc.)\n\n\
         #### Consumables\n- (e.g. filter, well-plate, etc.)\n\n\
         #### Equipment\n- (e.g. centrifuge, spectrophotometer, etc.)\n\n\
         #### Method\n- (method used in this step)\n\n\
         #### Output\n- (samples to the next step)\n\n\
         #### Results & Discussions\n- (Any results and discussions. Link file path if needed)\n\n\
         {DIVIDER}\n",
        id = uo.id,
        name = uo.name,
    )
}

/// Generate the README.md for a new experiment folder.
pub fn readme_content(
    title: &str,
    experiment_type: &str,
    author: &str,
    at: DateTime<Utc>,
) -> Result<String> {
    let date = civil_date(at);
    let front_matter = ReadmeFrontMatter {
        title: title.to_string(),
        author: author.to_string(),
        experiment_type: experiment_type.to_string(),
        created_date: date.clone(),
        last_updated_date: date,
        description: None,
    };
    let yaml =
        serde_yaml::to_string(&front_matter).context("Failed to serialize README frontmatter")?;

    Ok(format!(
        "---\n{yaml}---\n\n# {title}\n\n## 🧪 Workflows\n\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::context::resolve_context;
    use crate::parser::frontmatter::{parse_from_markdown, parse_readme_front_matter};
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        // 2026-08-30 23:30 UTC is 2026-08-31 08:30 in UTC+09:00
        Utc.with_ymd_and_hms(2026, 8, 30, 23, 30, 0).unwrap()
    }

    fn sample_uo() -> UnitOperationRecord {
        UnitOperationRecord {
            id: "USW070".to_string(),
            name: "Sequence Analysis".to_string(),
            description: "Analyze sequencing results.".to_string(),
        }
    }

    #[test]
    fn test_civil_date_crosses_midnight() {
        assert_eq!(civil_date(sample_time()), "2026-08-31");
        assert_eq!(civil_datetime(sample_time()), "2026-08-31 08:30");
    }

    #[test]
    fn test_workflow_file_content_frontmatter() {
        let wf = WorkflowRecord {
            id: "WD070".to_string(),
            name: "Vector Design".to_string(),
            description: "Design a plasmid vector.".to_string(),
        };
        let content = workflow_file_content(&wf, "pUC19", sample_time(), "Jane").unwrap();

        let fm: WorkflowFrontMatter = parse_from_markdown(&content, "Workflow").unwrap();
        assert_eq!(fm.title, "WD070 Vector Design - pUC19");
        assert_eq!(fm.experimenter, "Jane");
        assert_eq!(fm.created_date, "2026-08-31");

        assert!(content.contains("## [WD070 Vector Design] pUC19"));
        assert!(content.contains(UO_LIST_START));
        assert!(content.contains(UO_LIST_END));
    }

    #[test]
    fn test_workflow_file_content_without_description() {
        let wf = WorkflowRecord {
            id: "WD100".to_string(),
            name: "Library Construction".to_string(),
            description: "Construct a variant library.".to_string(),
        };
        let content = workflow_file_content(&wf, "", sample_time(), "").unwrap();
        assert!(content.contains("title: WD100 Library Construction\n"));
        assert!(content.contains("## [WD100 Library Construction]\n"));
    }

    #[test]
    fn test_unit_operation_block_shape() {
        let block = unit_operation_block(&sample_uo(), "confirm insert", sample_time(), "Jane");
        assert!(block.contains("### [USW070 Sequence Analysis] confirm insert"));
        assert!(block.contains("- **Description**: Analyze sequencing results."));
        assert!(block.contains("- Experimenter: Jane"));
        assert!(block.contains("- Start_date: '2026-08-31 08:30'"));
        assert!(block.contains("- End_date: ''"));
    }

    #[test]
    fn test_unit_operation_block_round_trips_through_resolver() {
        let block = unit_operation_block(&sample_uo(), "", sample_time(), "Jane");
        let expected_sections = [
            "Input",
            "Reagent",
            "Consumables",
            "Equipment",
            "Method",
            "Output",
            "Results & Discussions",
        ];

        let mut seen = Vec::new();
        for (i, line) in block.lines().enumerate() {
            if let Some(ctx) = resolve_context(&block, i) {
                assert_eq!(ctx.unit_operation_id, "USW070", "line {i}: {line}");
                seen.push(ctx.section_name);
            }
        }
        assert_eq!(seen, expected_sections);
    }

    #[test]
    fn test_readme_content_valid() {
        let content = readme_content("Plasmid Assembly", "HW", "Jane", sample_time()).unwrap();
        let fm = parse_readme_front_matter(&content).unwrap();
        assert_eq!(fm.title, "Plasmid Assembly");
        assert_eq!(fm.experiment_type, "HW");
        assert_eq!(fm.author, "Jane");
    }
}
