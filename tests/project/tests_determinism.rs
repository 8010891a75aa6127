#![allow(clippy::unwrap_used, clippy::expect_used)]

use tcdoc::{LoaderConfig, TwinCatLoader, load_registry};

use crate::helpers::project_fixtures::{pou_xml, sample_project};

#[test]
fn test_reload_of_unchanged_directory_is_equal() {
    let project = sample_project();
    let mut loader = TwinCatLoader::new(project.path());
    let first = loader.load().unwrap().clone();
    let second = loader.load().unwrap();
    assert_eq!(&first, second);
}

#[test]
fn test_parallel_and_sequential_loads_are_equal() {
    let project = sample_project();
    for idx in 0..20 {
        project.write(
            &format!("Generated/FB_Gen{idx:02}.TcPOU"),
            &pou_xml(
                &format!("FB_Gen{idx:02}"),
                &format!("FUNCTION_BLOCK FB_Gen{idx:02} EXTENDS FB_Base"),
                &[],
            ),
        );
    }
    // a name collision makes order observable
    project.write(
        "Generated/FB_Gen00_copy.TcPOU",
        &pou_xml("FB_Gen00", "FUNCTION_BLOCK FB_Gen00", &[]),
    );

    let parallel = load_registry(&LoaderConfig::new(project.path())).unwrap();
    let sequential =
        load_registry(&LoaderConfig::new(project.path()).with_parallel(false)).unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 25);
    assert_eq!(parallel.duplicates().count(), 1);
}
