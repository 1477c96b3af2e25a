//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        0 => migrate_v0_to_v1(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 listed excluded devices by name; version 1 flags each record.
fn migrate_v0_to_v1(mut project: Project) -> Result<Project, ProjectError> {
    let excluded = std::mem::take(&mut project.excluded_names);
    for name in &excluded {
        let Some(eq) = project.equipment.iter_mut().find(|e| &e.name == name) else {
            return Err(ProjectError::Migration {
                what: format!("excluded name '{}' matches no equipment", name),
            });
        };
        eq.include_in_group = false;
    }
    project.version = 1;
    Ok(project)
}
