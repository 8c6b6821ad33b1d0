//! Tests for ordered fragment assembly

use hba_core::{
    Assembler, AssemblyOptions, DriftStatus, Error, Fragment, RuleInput, RuleRegistry,
    WriteOutcome,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn bare() -> Assembler {
    Assembler::new(AssemblyOptions::bare())
}

#[test]
fn test_lower_order_key_comes_first_regardless_of_declaration() {
    let fragments = vec![
        Fragment::new("late", "", "host all all 0.0.0.0/0 reject", "150"),
        Fragment::new("early", "", "local all all peer", "050"),
    ];

    let doc = bare().assemble(&fragments).unwrap();

    assert_eq!(doc, "local all all peer\nhost all all 0.0.0.0/0 reject\n");
}

#[test]
fn test_equal_order_keys_keep_declaration_order() {
    let fragments = vec![
        Fragment::new("a", "", "hostssl app app 10.0.0.0/8 cert", "100"),
        Fragment::new("b", "", "host app app 10.0.0.0/8 reject", "100"),
        Fragment::new("c", "", "local all all peer", "001"),
        Fragment::new("d", "", "host all all 0.0.0.0/0 md5", "100"),
    ];

    let doc = bare().assemble(&fragments).unwrap();

    assert_eq!(
        doc,
        "local all all peer\n\
         hostssl app app 10.0.0.0/8 cert\n\
         host app app 10.0.0.0/8 reject\n\
         host all all 0.0.0.0/0 md5\n"
    );
}

#[test]
fn test_order_keys_compare_as_strings() {
    let fragments = vec![
        Fragment::new("nine", "", "line-9", "9"),
        Fragment::new("hundred", "", "line-100", "100"),
    ];

    let doc = bare().assemble(&fragments).unwrap();

    assert_eq!(doc, "line-100\nline-9\n");
}

#[test]
fn test_duplicate_names_are_rejected() {
    let fragments = vec![
        Fragment::new("same", "", "local all all peer", "100"),
        Fragment::new("same", "", "local all all trust", "200"),
    ];

    let err = bare().assemble(&fragments).unwrap_err();

    assert!(matches!(err, Error::DuplicateFragment { ref name } if name == "same"));
}

#[test]
fn test_full_document_from_registry() {
    let mut registry = RuleRegistry::new();
    registry
        .declare(
            "remote",
            &RuleInput::new("host", "md5")
                .address("10.0.0.0/8")
                .description("office network"),
        )
        .unwrap();
    registry
        .declare("socket", &RuleInput::new("local", "peer").order("010"))
        .unwrap();

    let assembler = Assembler::new(AssemblyOptions {
        header: Some("Managed file".to_string()),
        include_descriptions: true,
    });
    let doc = assembler.assemble(&registry.fragments()).unwrap();

    assert_eq!(
        doc,
        "# Managed file\n\
         # socket\n\
         local all all peer\n\
         # office network\n\
         host all all 10.0.0.0/8 md5\n"
    );
}

#[test]
fn test_write_then_unchanged() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pgbouncer_hba.conf");
    let fragments = vec![Fragment::new("socket", "", "local all all peer", "150")];
    let assembler = bare();

    assert_eq!(assembler.write(&fragments, &path).unwrap(), WriteOutcome::Written);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "local all all peer\n");
    assert_eq!(assembler.write(&fragments, &path).unwrap(), WriteOutcome::Unchanged);
}

#[test]
fn test_write_with_duplicates_leaves_file_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pgbouncer_hba.conf");
    std::fs::write(&path, "local all all reject\n").unwrap();
    let fragments = vec![
        Fragment::new("x", "", "local all all trust", "150"),
        Fragment::new("x", "", "local all all trust", "150"),
    ];

    assert!(bare().write(&fragments, &path).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "local all all reject\n");
}

#[test]
fn test_check_reports_drift() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pgbouncer_hba.conf");
    let fragments = vec![Fragment::new("socket", "", "local all all peer", "150")];
    let assembler = bare();

    assert_eq!(assembler.check(&fragments, &path).unwrap(), DriftStatus::Missing);

    assembler.write(&fragments, &path).unwrap();
    assert_eq!(assembler.check(&fragments, &path).unwrap(), DriftStatus::InSync);

    std::fs::write(&path, "local all all trust\n").unwrap();
    assert!(matches!(
        assembler.check(&fragments, &path).unwrap(),
        DriftStatus::Drifted { .. }
    ));
}
