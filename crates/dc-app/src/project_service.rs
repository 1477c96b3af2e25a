//! Project loading, saving, validation, and introspection.

use std::path::Path;

use dc_project::schema::Project;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// On-disk project encoding, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// `.json` selects JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ProjectFormat::Json,
            _ => ProjectFormat::Yaml,
        }
    }
}

/// Summary of one equipment record for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentSummary {
    pub name: String,
    pub quantity: f64,
    pub rated_power_kw: f64,
    pub total_power_kw: f64,
    pub utilization: f64,
    pub include_in_group: bool,
}

/// Load a project file, migrating and validating it on the way in.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = ProjectFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading project");

    let project = match format {
        ProjectFormat::Yaml => dc_project::from_yaml_str(&content)?,
        ProjectFormat::Json => dc_project::from_json_str(&content)?,
    };

    Ok(project)
}

/// Save a project file in the format implied by its extension.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    dc_project::validate_project(project)?;

    let content = match ProjectFormat::from_path(path) {
        ProjectFormat::Yaml => serde_yaml::to_string(project)
            .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?,
        ProjectFormat::Json => serde_json::to_string_pretty(project)
            .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?,
    };

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Write the built-in registry to a new project file.
///
/// Refuses to overwrite an existing file.
pub fn init_project(path: &Path) -> AppResult<Project> {
    if path.exists() {
        return Err(AppError::InvalidInput(format!(
            "Refusing to overwrite existing file: {}",
            path.display()
        )));
    }
    let project = Project::default_registry();
    save_project(path, &project)?;
    Ok(project)
}

/// Validate project structure and make sure a group calculation can run.
pub fn validate_project(project: &Project) -> AppResult<()> {
    dc_project::validate_project(project)?;

    if !project.equipment.iter().any(|e| e.include_in_group) {
        return Err(AppError::Validation(
            "Project must include at least one equipment item in the group".to_string(),
        ));
    }

    Ok(())
}

/// List all equipment in the project with summaries.
pub fn list_equipment(project: &Project) -> Vec<EquipmentSummary> {
    project
        .equipment
        .iter()
        .map(|eq| EquipmentSummary {
            name: eq.name.clone(),
            quantity: eq.quantity,
            rated_power_kw: eq.rated_power_kw,
            total_power_kw: eq.quantity * eq.rated_power_kw,
            utilization: eq.utilization,
            include_in_group: eq.include_in_group,
        })
        .collect()
}
