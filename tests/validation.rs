use flatini::{SettingsError, SettingsStore};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn put_rejects_separator_in_key_and_line_breaks_anywhere() {
    let mut store = SettingsStore::new();

    assert!(matches!(
        store.put("a=b", "x"),
        Err(SettingsError::InvalidFormat)
    ));
    assert!(matches!(
        store.put("a", "x\r\ny"),
        Err(SettingsError::InvalidFormat)
    ));
    assert!(matches!(
        store.put("a\rb", "x"),
        Err(SettingsError::InvalidFormat)
    ));

    // A failed put leaves the store untouched.
    assert!(store.is_empty());
}

#[test]
fn load_on_missing_path_succeeds_and_leaves_store_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("does-not-exist.ini");

    let mut store = SettingsStore::new();
    store.put("a", "1").expect("put");

    store.load_path(&path).expect("missing file is not an error");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("a"), Some("1"));
}

#[test]
fn load_fails_with_parse_error_on_line_without_separator() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(b"no-equals-sign-here\n").expect("write");

    let mut store = SettingsStore::new();
    let err = store.load_path(tmp.path()).expect_err("bad format");
    assert!(matches!(err, SettingsError::Parse { line: 1 }));
}

#[test]
fn parse_failure_preserves_prior_contents() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(b"good=1\nbad line\n").expect("write");

    let mut store = SettingsStore::new();
    store.put("existing", "kept").expect("put");

    let err = store.load_path(tmp.path()).expect_err("bad format");
    assert!(matches!(err, SettingsError::Parse { line: 2 }));

    // Neither the partial data before the failing line nor anything else
    // leaked into the store.
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("existing"), Some("kept"));
    assert_eq!(store.get("good"), None);
}

#[test]
fn load_surfaces_underlying_io_failures() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Reading a directory as a file fails with something other than NotFound.
    let mut store = SettingsStore::new();
    let err = store.load_path(dir.path()).expect_err("read failure");
    assert!(matches!(err, SettingsError::Io(_)));
}
