use std::io::Write;

use content::{Catalog, ContentError};

#[test]
fn loads_operator_supplied_content_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[site]
name = "File Person"
title = "Engineer"
description = "From disk"
url = "https://file.test"
email = "file@example.test"

[[experiences]]
id = "only"
kind = "achievement"
title = "Prize"
organization = "Contest"
start_date = "2022-05"
order = 1
"#
    )
    .expect("write content");

    let catalog = Catalog::load(file.path()).expect("load");
    assert_eq!(catalog.site().name, "File Person");
    assert_eq!(catalog.experiences().len(), 1);
    assert!(catalog.projects().is_empty());
}

#[test]
fn missing_content_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = Catalog::load(&path).expect_err("missing file");
    assert!(matches!(err, ContentError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
