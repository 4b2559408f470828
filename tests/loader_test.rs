//! Tests for reading and writing hierarchy files

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use orgtree::domain::{EmployeeId, Hierarchy};
use orgtree::infrastructure::{
    load_hierarchy, parse_hierarchy, sample_organization, to_toml, InfraError,
};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write hierarchy file");
    path
}

const SMALL_ORG: &str = r#"
[root]
id = 1
name = "R"

[[root.subordinates]]
id = 2
name = "A"

[[root.subordinates.subordinates]]
id = 5
name = "C"

[[root.subordinates]]
id = 8
name = "B"
"#;

#[test]
fn given_toml_file_when_loading_then_builds_nested_tree() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "org.toml", SMALL_ORG);

    // Act
    let root = load_hierarchy(&path).unwrap();

    // Assert
    assert_eq!(root.id, EmployeeId(1));
    assert_eq!(root.count(), 4);
    assert_eq!(root.subordinates[0].name, "A");
    assert_eq!(root.subordinates[0].subordinates[0].id, EmployeeId(5));
    assert_eq!(root.subordinates[1].id, EmployeeId(8));
}

#[test]
fn given_children_alias_when_parsing_then_accepted() {
    let content = r#"
[root]
id = 1
name = "R"

[[root.children]]
id = 2
name = "A"
"#;

    let root = parse_hierarchy(content, Path::new("inline")).unwrap();

    assert_eq!(root.subordinates.len(), 1);
}

#[test]
fn given_missing_file_when_loading_then_io_error() {
    let result = load_hierarchy(Path::new("/nonexistent/org.toml"));

    assert!(matches!(result, Err(InfraError::Io { .. })));
}

#[test]
fn given_malformed_content_when_parsing_then_parse_error_names_file() {
    let result = parse_hierarchy("[root]\nname = \"no id\"\n", Path::new("broken.toml"));

    match result {
        Err(InfraError::Parse { path, message }) => {
            assert_eq!(path, PathBuf::from("broken.toml"));
            assert!(message.contains("id"), "message: {}", message);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn given_duplicate_ids_in_file_when_building_hierarchy_then_rejected() {
    let content = r#"
[root]
id = 1
name = "R"

[[root.subordinates]]
id = 1
name = "Clone"
"#;
    let root = parse_hierarchy(content, Path::new("dup.toml")).unwrap();

    assert!(Hierarchy::new(root).is_err());
}

#[test]
fn given_moved_hierarchy_when_writing_toml_then_reloads_identically() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let mut hierarchy = Hierarchy::new(sample_organization()).unwrap();
    hierarchy
        .move_employee(EmployeeId(15), EmployeeId(9))
        .unwrap();
    let exported = hierarchy.to_employee();

    // Act
    let path = write_file(&temp, "moved.toml", &to_toml(&exported).unwrap());
    let reloaded = load_hierarchy(&path).unwrap();

    // Assert
    assert_eq!(reloaded, exported);
    let omar = &reloaded.subordinates[2];
    assert_eq!(omar.id, EmployeeId(9));
    assert_eq!(omar.subordinates[0].id, EmployeeId(15));
}

#[test]
fn given_sample_organization_when_building_then_contains_reference_scenario() {
    let hierarchy = Hierarchy::new(sample_organization()).unwrap();

    for raw in [1, 2, 5, 8, 14] {
        assert!(hierarchy.contains(EmployeeId(raw)));
    }
    assert_eq!(
        hierarchy.supervisor_of(EmployeeId(5)).unwrap(),
        Some(EmployeeId(2))
    );
    assert_eq!(
        hierarchy.supervisor_of(EmployeeId(14)).unwrap(),
        Some(EmployeeId(8))
    );
    assert_eq!(hierarchy.len(), sample_organization().count());
    assert_eq!(hierarchy.len(), 11);
}
