use flatini::{SettingsStore, statics};
use std::io::Write;
use tempfile::NamedTempFile;

fn assert_no_cr(bytes: &[u8]) {
    for (i, b) in bytes.iter().enumerate() {
        assert!(*b != b'\r', "found CR at {i}");
    }
}

fn lines_with(newline: &str) -> String {
    ["name=walk", "version=1.0", ""].join(newline)
}

#[test]
fn crlf_and_lf_files_load_identically() {
    let mut lf = NamedTempFile::new().expect("tempfile");
    lf.write_all(lines_with(statics::NL_LF).as_bytes())
        .expect("write");

    let mut crlf = NamedTempFile::new().expect("tempfile");
    crlf.write_all(lines_with(statics::NL_CRLF).as_bytes())
        .expect("write");

    let mut from_lf = SettingsStore::new();
    from_lf.load_path(lf.path()).expect("load lf");

    let mut from_crlf = SettingsStore::new();
    from_crlf.load_path(crlf.path()).expect("load crlf");

    assert_eq!(from_lf, from_crlf);
    assert_eq!(from_crlf.get("version"), Some("1.0"));
}

#[test]
fn saved_output_uses_lf_only() {
    let mut input = NamedTempFile::new().expect("tempfile");
    input
        .write_all(b"a=1\r\nb=two words\r\n")
        .expect("write");

    let mut store = SettingsStore::new();
    store.load_path(input.path()).expect("load");

    let out = NamedTempFile::new().expect("tempfile");
    store.save_path(out.path()).expect("save");

    let bytes = std::fs::read(out.path()).expect("read back");
    assert_no_cr(&bytes);
    assert_eq!(bytes, b"a=1\nb=two words\n");
}

#[test]
fn missing_final_newline_is_accepted() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(b"a=1\nb=2").expect("write");

    let mut store = SettingsStore::new();
    store.load_path(tmp.path()).expect("load");
    assert_eq!(store.get("b"), Some("2"));
}

#[test]
fn blank_lines_are_skipped() {
    let mut tmp = NamedTempFile::new().expect("tempfile");
    tmp.write_all(b"a=1\n\r\n\nb=2\n").expect("write");

    let mut store = SettingsStore::new();
    store.load_path(tmp.path()).expect("load");
    assert_eq!(store.len(), 2);
}
