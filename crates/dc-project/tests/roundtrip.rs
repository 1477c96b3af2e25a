use dc_project::schema::*;
use dc_project::{load_json, load_yaml, save_json, save_yaml, validate_project};

#[test]
fn roundtrip_yaml_default_registry() {
    let project = Project::default_registry();
    validate_project(&project).unwrap();

    let temp_dir = std::env::temp_dir();
    let path = temp_dir.join("dc_project_roundtrip_default.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_with_workshop_totals() {
    let mut project = Project::default_registry();
    project.name = "Assembly hall".to_string();
    project.workshop = Some(WorkshopTotalsDef {
        total_power_kw: 1200.0,
        weighted_power_kw: 400.0,
        weighted_reactive_kvar: 350.0,
        squared_power_kw2: 50_000.0,
    });

    let path = std::env::temp_dir().join("dc_project_roundtrip_workshop.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
    assert_eq!(loaded.workshop_totals().total_power_kw, 1200.0);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = Project::default_registry();
    project.equipment[0].cos_phi = 0.0;
    let path = std::env::temp_dir().join("dc_project_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}
