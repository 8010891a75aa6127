#![allow(clippy::unwrap_used, clippy::expect_used)]

use tcdoc::parser::TypeBodyKind;
use tcdoc::project::LoadError;
use tcdoc::syntax::{AccessModifier, PouKind};
use tcdoc::{Item, LoaderConfig, NamedContainer, TwinCatLoader, load_registry};

use crate::helpers::project_fixtures::{ProjectDir, sample_project};
use crate::helpers::registry_assertions::{assert_item, names};

#[test]
fn test_lookup_container_method_and_property() {
    let project = sample_project();
    let mut loader = TwinCatLoader::new(project.path());
    loader.load().unwrap();

    let pou = loader.get_item_by_name("FB_Base").and_then(Item::as_pou).unwrap();
    assert_eq!(pou.name, "FB_Base");

    let method = loader
        .get_item_by_name("FB_Base._ConfigureAlarm")
        .and_then(Item::as_method)
        .unwrap();
    assert_eq!(method.return_type.as_deref(), Some("BOOL"));
    assert_eq!(method.access_modifier, Some(AccessModifier::Private));
    let doc = method.documentation.as_ref().unwrap();
    assert_eq!(doc.brief.as_deref(), Some("Configures the alarm of this module."));
    assert_eq!(doc.returns.as_deref(), Some("TRUE when the alarm was configured."));

    let property = loader
        .get_item_by_name("FB_Base.DesignationName")
        .and_then(Item::as_property)
        .unwrap();
    assert_eq!(property.return_type.as_deref(), Some("STRING(80)"));
    assert!(property.has_get());
    assert!(!property.has_set());

    assert!(loader.get_item_by_name("FB_Base.NoSuchMember").is_none());
    assert!(loader.get_item_by_name("NonExistent.Item").is_none());
}

#[test]
fn test_pou_header_fields() {
    let project = sample_project();
    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();

    let pou = assert_item(&registry, "FB_Base").as_pou().unwrap();
    assert_eq!(pou.kind, PouKind::FunctionBlock);
    assert_eq!(pou.access_modifier, Some(AccessModifier::Protected));
    assert!(pou.is_abstract);
    assert_eq!(pou.extends, vec!["FB_SubBase", "FB_SubSubBase"]);
    assert_eq!(pou.implements, vec!["I_Elementinformation", "I_TestInterface"]);
    assert_eq!(
        pou.documentation.as_ref().and_then(|d| d.details.as_deref()),
        Some("Base of every module")
    );

    assert_eq!(pou.var_blocks.len(), 2);
    assert_eq!(pou.var_blocks[0].kind, "VAR");
    assert_eq!(pou.var_blocks[0].body, "\t_bEnable : BOOL;");
    assert_eq!(pou.var_blocks[1].kind, "VAR_INPUT");
    assert_eq!(pou.var_blocks[1].qualifier, "PERSISTENT");

    let names: Vec<_> = pou.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["_ConfigureAlarm", "Execute"]);
    assert!(pou.method("Execute").unwrap().is_abstract);
}

#[test]
fn test_kind_partitions() {
    let project = sample_project();
    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();

    assert_eq!(registry.len(), 5);
    let pous: Vec<_> = registry.pous().map(|p| p.name.as_str()).collect();
    assert_eq!(pous, vec!["FB_Base", "F_Add"]);
    let duts: Vec<_> = registry.duts().map(|d| (d.name.as_str(), d.kind)).collect();
    assert_eq!(
        duts,
        vec![("E_Mode", TypeBodyKind::Enum), ("ST_Data", TypeBodyKind::Struct)]
    );
    let itf = registry.interfaces().next().unwrap();
    assert_eq!(itf.extends, vec!["__System.IQueryInterface"]);
    assert!(registry.get("I_TestInterface.Check").is_some());

    let function = assert_item(&registry, "F_Add").as_pou().unwrap();
    assert_eq!(function.kind, PouKind::Function);
    assert_eq!(function.return_type.as_deref(), Some("INT"));
}

#[test]
fn test_non_source_files_are_ignored() {
    let project = sample_project();
    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();
    assert!(registry.diagnostics().is_empty(), "{:?}", registry.diagnostics());
    assert!(!names(&registry).iter().any(|n| n.contains("plcproj")));
}

#[test]
fn test_max_depth_limits_discovery() {
    let project = sample_project();
    let config = LoaderConfig::new(project.path()).with_max_depth(2);
    let registry = load_registry(&config).unwrap();
    assert!(registry.get("FB_Base").is_some());
    assert!(registry.get("F_Add").is_none());
}

#[test]
fn test_empty_directory() {
    let project = ProjectDir::new();
    let registry = load_registry(&LoaderConfig::new(project.path())).unwrap();
    assert!(registry.is_empty());
    assert!(registry.diagnostics().is_empty());
}

#[test]
fn test_root_errors() {
    let project = ProjectDir::new();
    let file = project.write("FB_A.TcPOU", "");

    assert!(matches!(
        load_registry(&LoaderConfig::new(project.path().join("missing"))),
        Err(LoadError::RootNotFound(_))
    ));
    assert!(matches!(
        load_registry(&LoaderConfig::new(file)),
        Err(LoadError::NotADirectory(_))
    ));
}

#[test]
fn test_reload_picks_up_changes() {
    let project = sample_project();
    let mut loader = TwinCatLoader::new(project.path());
    loader.load().unwrap();
    assert!(loader.get_item_by_name("ST_Extra").is_none());

    project.write(
        "DUTs/ST_Extra.TcDUT",
        &crate::helpers::project_fixtures::dut_xml(
            "ST_Extra",
            "TYPE ST_Extra :\nSTRUCT\nEND_STRUCT\nEND_TYPE",
        ),
    );
    loader.load().unwrap();
    assert!(loader.get_item_by_name("ST_Extra").is_some());
    assert_eq!(loader.registry().map(|r| r.len()), Some(6));
}
