//! Cross-module flows over a real temporary notebook tree.

use chrono::{TimeZone, Utc};
use labnote::catalog;
use labnote::commands::{init, uo, workflow};
use labnote::fs::layout::{self, EntryKind, NOTEBOOK_DIR};
use labnote::fs::renumber::{renumber, RenumberOutcome};
use labnote::parser::resolve_context;
use std::fs;
use std::path::PathBuf;

fn fixed_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 30, 3, 0, 0).unwrap()
}

fn init_notebook() -> (tempfile::TempDir, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    init::execute(Some(temp.path().to_path_buf())).unwrap();
    let root = temp.path().join(NOTEBOOK_DIR);
    (temp, root)
}

#[test]
fn full_experiment_lifecycle() {
    let (_temp, root) = init_notebook();

    // Scaffold an experiment and a workflow file from the seeded catalog
    let folder =
        layout::create_experiment(&root, "Golden Gate Assembly", "HW", "Jane", fixed_time())
            .unwrap();
    let readme = folder.join("README.md");
    workflow::add(readme.clone(), "WD070".to_string(), Some("pUC19".to_string())).unwrap();

    let wf_path = folder.join("001_WD070_Vector_Design--pUC19.md");
    assert!(wf_path.exists());
    assert!(fs::read_to_string(&readme)
        .unwrap()
        .contains("[ ] [001 WD070 Vector Design - pUC19](./001_WD070_Vector_Design--pUC19.md)"));

    // Insert a unit-operation block and resolve one of its placeholders
    uo::add(wf_path.clone(), "USW070".to_string(), None, None).unwrap();
    let content = fs::read_to_string(&wf_path).unwrap();

    let method_line = content
        .lines()
        .position(|l| l.contains("(method used in this step)"))
        .unwrap();
    let ctx = resolve_context(&content, method_line).unwrap();
    assert_eq!(ctx.unit_operation_id, "USW070");
    assert_eq!(ctx.section_name, "Method");
    assert_eq!(ctx.query_title, "WD070 Vector Design - pUC19");

    // The block landed between the related-operations markers
    let start = content.find(labnote::templates::UO_LIST_START).unwrap();
    let end = content.find(labnote::templates::UO_LIST_END).unwrap();
    let block = content.find("### [USW070").unwrap();
    assert!(start < block && block < end);
}

#[test]
fn renumber_files_updates_readme_links() {
    let (_temp, root) = init_notebook();
    let folder = layout::create_experiment(&root, "Renumber Test", "SW", "Jane", fixed_time())
        .unwrap();
    let readme = folder.join("README.md");

    // Two workflow files, then delete the first to open a gap
    workflow::add(readme.clone(), "WD070".to_string(), None).unwrap();
    workflow::add(readme.clone(), "WD100".to_string(), None).unwrap();
    fs::remove_file(folder.join("001_WD070_Vector_Design.md")).unwrap();

    let outcome = renumber(&folder, EntryKind::WorkflowFiles).unwrap();
    assert!(matches!(outcome, RenumberOutcome::Renamed(ref plan) if plan.len() == 1));
    assert!(folder.join("001_WD100_Library_Construction.md").exists());

    let readme_content = fs::read_to_string(&readme).unwrap();
    assert!(readme_content
        .contains("[001 WD100 Library Construction](./001_WD100_Library_Construction.md)"));

    // Second run is a no-op
    assert_eq!(
        renumber(&folder, EntryKind::WorkflowFiles).unwrap(),
        RenumberOutcome::AlreadyOrdered
    );
}

#[test]
fn renumber_folders_restores_sequence() {
    let (_temp, root) = init_notebook();
    for title in ["First", "Second", "Third"] {
        layout::create_experiment(&root, title, "HW", "Jane", fixed_time()).unwrap();
    }
    fs::remove_dir_all(root.join("002_Second")).unwrap();

    renumber(&root, EntryKind::ExperimentFolders).unwrap();
    assert!(root.join("001_First").is_dir());
    assert!(root.join("002_Third").is_dir());
    assert!(!root.join("003_Third").exists());

    // The templates dir is not a numbered entry and stays put
    assert!(root.join("templates").is_dir());
}

#[test]
fn seeded_catalogs_are_loadable() {
    let (_temp, root) = init_notebook();

    let workflows = catalog::load_workflows(&root).unwrap();
    assert!(workflows.iter().any(|w| w.id == "WD070"));

    let sw = catalog::load_unit_operations(&root, catalog::CatalogFile::SwUnitOperations).unwrap();
    assert!(sw.iter().any(|u| u.id == "USW070"));
}
