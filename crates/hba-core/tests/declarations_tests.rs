//! Tests for loading declaration files

use hba_core::{Assembler, Error, FieldValue, load_declarations};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const APP_RULES: &str = r#"
[target]
path = "/etc/pgbouncer/pgbouncer_hba.conf"
header = ""
descriptions = false

[[rules]]
name = "remote-all"
type = "host"
database = "all"
user = "all"
address = "127.0.0.1/32"
auth_method = "trust"

[[rules]]
name = "local-app"
type = "local"
database = ["app", "web"]
user = "appuser"
auth_method = "peer"
order = 50
"#;

#[test]
fn test_load_single_file_and_assemble() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hba.toml");
    fs::write(&path, APP_RULES).unwrap();

    let declarations = load_declarations(&path).unwrap();
    let target = declarations.target();
    assert_eq!(
        target.path,
        Some(PathBuf::from("/etc/pgbouncer/pgbouncer_hba.conf"))
    );
    assert_eq!(
        declarations.rules[1].database,
        FieldValue::list(["app", "web"])
    );

    let registry = declarations.to_registry().unwrap();
    let doc = Assembler::new(target.assembly_options())
        .assemble(&registry.fragments())
        .unwrap();

    assert_eq!(
        doc,
        "local app,web appuser peer\nhost all all 127.0.0.1/32 trust\n"
    );
}

#[test]
fn test_directory_loads_in_file_name_order() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("20-second.toml"),
        r#"
[target]
header = "ignored"

[[rules]]
name = "second"
type = "local"
auth_method = "reject"
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join("10-first.toml"),
        r#"
[target]
header = "first wins"

[[rules]]
name = "first"
type = "local"
auth_method = "peer"
"#,
    )
    .unwrap();
    fs::write(temp.path().join("notes.txt"), "not a declaration").unwrap();

    let declarations = load_declarations(temp.path()).unwrap();

    let names: Vec<_> = declarations.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
    assert_eq!(declarations.target().header.as_deref(), Some("first wins"));
}

#[test]
fn test_malformed_file_aborts_directory_load() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("10-good.toml"),
        "[[rules]]\nname = \"ok\"\ntype = \"local\"\nauth_method = \"peer\"\n",
    )
    .unwrap();
    fs::write(temp.path().join("20-bad.toml"), "[[rules]\n").unwrap();

    let err = load_declarations(temp.path()).unwrap_err();

    assert!(matches!(err, Error::DeclarationParse { .. }));
}

#[test]
fn test_missing_path() {
    let temp = TempDir::new().unwrap();
    let err = load_declarations(&temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::DeclarationsNotFound { .. }));
}

#[test]
fn test_invalid_rule_fails_registry_build() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hba.toml");
    fs::write(
        &path,
        r#"
[[rules]]
name = "ok"
type = "local"
auth_method = "peer"

[[rules]]
name = "no-address"
type = "hostssl"
auth_method = "cert"
"#,
    )
    .unwrap();

    let err = load_declarations(&path).unwrap().to_registry().unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid rule 'no-address': connection type 'hostssl' requires an address"
    );
}
