//! Hierarchy files: TOML in, TOML out.
//!
//! ```toml
//! [root]
//! id = 1
//! name = "Sophia"
//!
//! [[root.subordinates]]
//! id = 2
//! name = "Nick"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::Employee;
use crate::infrastructure::{InfraError, InfraResult};

#[derive(Debug, Serialize, Deserialize)]
struct HierarchyFile {
    root: Employee,
}

/// Reads an employee tree from a TOML file.
#[instrument(level = "debug")]
pub fn load_hierarchy(path: &Path) -> InfraResult<Employee> {
    let content = fs::read_to_string(path)
        .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
    let root = parse_hierarchy(&content, path)?;
    debug!("Loaded {} employees from {}", root.count(), path.display());
    Ok(root)
}

/// Parses TOML content; `origin` is only used for error messages.
pub fn parse_hierarchy(content: &str, origin: &Path) -> InfraResult<Employee> {
    toml::from_str::<HierarchyFile>(content)
        .map(|file| file.root)
        .map_err(|e| InfraError::Parse {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })
}

/// Serializes an employee tree in the format `load_hierarchy` reads.
pub fn to_toml(root: &Employee) -> InfraResult<String> {
    let file = HierarchyFile { root: root.clone() };
    Ok(toml::to_string_pretty(&file)?)
}

/// Built-in demo organization used when no hierarchy file is configured.
pub fn sample_organization() -> Employee {
    Employee::new(1, "Sophia").with_subordinates(vec![
        Employee::new(2, "Nick").with_subordinates(vec![
            Employee::new(5, "Tom").with_subordinates(vec![
                Employee::new(11, "Ivan"),
                Employee::new(12, "Maya"),
            ]),
            Employee::new(6, "Jenny"),
        ]),
        Employee::new(8, "Sarah").with_subordinates(vec![
            Employee::new(14, "Joe"),
            Employee::new(15, "Lisa").with_subordinates(vec![Employee::new(20, "Mike")]),
        ]),
        Employee::new(9, "Omar"),
    ])
}
