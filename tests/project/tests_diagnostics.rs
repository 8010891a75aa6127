#![allow(clippy::unwrap_used, clippy::expect_used)]

use tcdoc::project::Diagnostic;
use tcdoc::{LoaderConfig, load_registry};

use crate::helpers::project_fixtures::{dut_xml, pou_xml, sample_project, tc_plc_object};

#[test]
fn test_duplicate_object_keeps_first_in_discovery_order() {
    let project = sample_project();
    project.write(
        "Z_Copies/FB_Base.TcPOU",
        &pou_xml("FB_Base", "FUNCTION_BLOCK FB_Base EXTENDS FB_Other", &[]),
    );

    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();

    let pou = registry.get("FB_Base").and_then(|i| i.as_pou()).unwrap();
    assert_eq!(pou.extends, vec!["FB_SubBase", "FB_SubSubBase"]);
    let duplicates: Vec<_> = registry.duplicates().map(|(name, _)| name).collect();
    assert_eq!(duplicates, vec!["FB_Base"]);
    assert_eq!(registry.len(), 5);
}

#[test]
fn test_unreadable_files_are_skipped() {
    let project = sample_project();
    let broken = project.write(
        "POUs/FB_Broken.TcPOU",
        "<TcPlcObject><POU Name=\"FB_Broken\"></DUT></TcPlcObject>",
    );
    let wrong = project.write("DUTs/ST_Wrong.TcDUT", &tc_plc_object("<POU Name=\"ST_Wrong\" />"));

    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();

    assert_eq!(registry.len(), 5);
    let skipped: Vec<_> = registry.skipped().map(|(path, _)| path.to_path_buf()).collect();
    assert_eq!(skipped.len(), 2);
    assert!(skipped.contains(&broken));
    assert!(skipped.contains(&wrong));

    let reason = registry
        .skipped()
        .find(|(path, _)| *path == wrong.as_path())
        .map(|(_, reason)| reason.to_string())
        .unwrap();
    assert_eq!(reason, "Missing required element: DUT");
}

#[test]
fn test_diagnostic_display() {
    let project = sample_project();
    project.write("DUTs/Nameless.TcDUT", &dut_xml("", "").replace(" Name=\"\"", ""));

    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();
    let diagnostic = registry.diagnostics().first().unwrap();
    assert!(matches!(diagnostic, Diagnostic::Skipped { .. }));
    assert!(diagnostic.to_string().contains("Missing required attribute: Name"));
}
