//! Integration tests for loading, querying and saving documents on disk.
//!
//! These tests exercise the public API end to end with real files, so the
//! include resolver runs against `FsSource` rather than the in-memory tree.

use iniconf::{ConfigError, DEFAULT_SECTION, Document, merge, merge_optional};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Values come back without surrounding whitespace and one layer of quotes.
#[test]
fn test_values_round_trip_through_parse() {
    let doc = Document::parse(b"  plain =   value with spaces  \nquoted = \"  kept inside  \"\n").unwrap();
    assert_eq!(doc.get_string("plain").unwrap(), "value with spaces");
    assert_eq!(doc.get_string("quoted").unwrap(), "  kept inside  ");
}

#[test]
fn test_section_lookup_and_typed_default() {
    let doc = Document::parse(b"[web]\nport=8080\n").unwrap();
    assert_eq!(doc.get_string("web::port").unwrap(), "8080");
    assert_eq!(doc.default_int("web::port", 0), 8080);
}

#[test]
fn test_load_from_file_with_includes() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "app.ini",
        "# application\nname = demo\ninclude \"db.conf\"\ninclude missing.ini\n[web]\nport = 80\n",
    );
    write(temp_dir.path(), "db.conf", "[db]\nhost = localhost\nport = 5432\n");

    let doc = Document::load_from_file(temp_dir.path().join("app.ini")).unwrap();
    assert_eq!(doc.get_string("name").unwrap(), "demo");
    assert_eq!(doc.get_int("db::port").unwrap(), 5432);
    assert_eq!(doc.get_int("web::port").unwrap(), 80);
    assert_eq!(doc.get_entry("name").unwrap().comment(), "# application");
}

#[test]
fn test_directory_include_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "main.ini", "[svc]\ninclude conf.d\n");
    write(temp_dir.path(), "extra.conf", "timeout = 30\n");
    write(temp_dir.path(), "conf.d/deep.ini", "deep = true\n");

    let doc = Document::load_from_file(temp_dir.path().join("main.ini")).unwrap();
    assert_eq!(doc.get_int("svc::timeout").unwrap(), 30);
    assert!(!doc.has_key("svc::deep"));
}

#[test]
fn test_self_including_file_on_disk_terminates() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "loop.ini", "include ./loop.ini\nk = v\n");

    let doc = Document::load_from_file(temp_dir.path().join("loop.ini")).unwrap();
    assert_eq!(doc.get_string("k").unwrap(), "v");
}

#[test]
fn test_missing_top_level_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.ini");

    match Document::load_from_file(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn test_empty_top_level_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "empty.ini", "");

    let result = Document::load_from_file(temp_dir.path().join("empty.ini"));
    assert!(matches!(result, Err(ConfigError::EmptyInput)));
}

#[test]
fn test_syntax_error_in_top_level_file_aborts() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "bad.ini", "a = 1\noops\n");

    let result = Document::load_from_file(temp_dir.path().join("bad.ini"));
    assert!(matches!(
        result,
        Err(ConfigError::Syntax { line_number: 2, .. })
    ));
}

#[test]
fn test_save_then_reload_preserves_values_and_comments() {
    let temp_dir = TempDir::new().unwrap();
    let original = Document::parse(
        b"# top\nname = demo\n\n# web block\n[web]\n; port comment\nport = 8080\nhome = ${INICONF_IT_HOME||/srv}\n# the end\n",
    )
    .unwrap();

    let path = temp_dir.path().join("saved.ini");
    original.save_file(&path).unwrap();
    let reloaded = Document::load_from_file(&path).unwrap();

    assert_eq!(reloaded.to_string(), original.to_string());
    assert_eq!(reloaded.get_string("web::port").unwrap(), "8080");
    assert_eq!(reloaded.section_comment("web").as_deref(), Some("# web block"));
    assert_eq!(reloaded.trailing_comment(), "# the end");
    assert_eq!(
        reloaded.get_entry("web::home").unwrap().env_key(),
        "INICONF_IT_HOME"
    );
}

#[test]
fn test_section_lifecycle() {
    let doc = Document::new();
    assert!(!doc.delete_section("x"));
    doc.add_section("x");
    assert!(doc.delete_section("x"));

    doc.add_entry("y", "k", "v");
    assert!(doc.delete_key("y", "k"));
    assert!(doc.has_section("y"));
}

#[test]
fn test_default_bool_never_fails() {
    let doc = Document::parse(b"flag = sometimes\n").unwrap();
    assert!(doc.default_bool("flag", true));
    assert!(!doc.default_bool("flag", false));
    assert!(doc.default_bool("absent", true));
}

#[test]
fn test_merge_overlays_later_document() {
    let a = Document::parse(b"[s]\nk1 = 1\n").unwrap();
    let b = Document::parse(b"[s]\nk2 = 2\n").unwrap();

    let merged = merge(&a, &b);
    assert_eq!(merged.get_string("s::k1").unwrap(), "1");
    assert_eq!(merged.get_string("s::k2").unwrap(), "2");

    b.set("s::k1", "3").unwrap();
    let merged = merge(&a, &b);
    assert_eq!(merged.get_string("s::k1").unwrap(), "3");

    assert!(merge_optional(None, None).is_none());
    let kept = merge_optional(Some(a), None).unwrap();
    assert_eq!(kept.get_string("s::k1").unwrap(), "1");
}

#[test]
fn test_last_equals_sign_stays_in_value() {
    let doc = Document::parse(b"url = postgres://u:p@h/db?sslmode=require\n").unwrap();
    assert_eq!(
        doc.get_string("url").unwrap(),
        "postgres://u:p@h/db?sslmode=require"
    );
    assert!(doc.has_section(DEFAULT_SECTION));
}
