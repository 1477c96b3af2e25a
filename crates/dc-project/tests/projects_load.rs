use std::path::Path;

#[test]
fn bundled_projects_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../projects");
    let projects = ["mechanical_workshop.yaml", "tool_room.json"];

    for name in projects {
        let path = root.join(name);
        let project = if name.ends_with(".json") {
            dc_project::load_json(&path)
        } else {
            dc_project::load_yaml(&path)
        }
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        dc_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
        assert!(!project.equipment.is_empty());
    }
}

#[test]
fn bundled_workshop_matches_builtin_registry() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../projects");
    let project = dc_project::load_yaml(&root.join("mechanical_workshop.yaml")).unwrap();
    assert_eq!(project, dc_project::Project::default_registry());
}
