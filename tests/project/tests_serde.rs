#![allow(clippy::unwrap_used, clippy::expect_used)]

use tcdoc::{LoaderConfig, load_registry};

use crate::helpers::project_fixtures::sample_project;

#[test]
fn test_objects_serialize_for_templates() {
    let project = sample_project();
    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();
    let object = registry.object("FB_Base").unwrap();

    let value = serde_json::to_value(object).unwrap();
    assert_eq!(value["object_kind"], "Pou");
    assert_eq!(value["name"], "FB_Base");
    assert_eq!(value["access_modifier"], "Protected");
    assert_eq!(value["methods"][0]["name"], "_ConfigureAlarm");
    assert_eq!(value["properties"][0]["get"]["kind"], "Get");
    assert_eq!(value["documentation"]["details"], "Base of every module");
}
