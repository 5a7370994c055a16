//! Mutating commands: `set`, `delete`, `merge`.

use std::path::Path;

use anyhow::{Context, Result};
use iniconf::constants::COMPOUND_KEY_SEPARATOR;
use iniconf::{ConfigError, DEFAULT_SECTION, Document};

use super::{DocumentContext, load_document};

pub fn run_set(
    ctx: &DocumentContext,
    doc: &Document,
    key: &str,
    value: &str,
    output: Option<&Path>,
) -> Result<String> {
    doc.set(key, value)
        .with_context(|| format!("Failed to set key '{key}'"))?;
    let saved = ctx.save(doc, output)?;
    Ok(format!("Set '{key}' in {}", saved.display()))
}

pub fn run_delete(
    ctx: &DocumentContext,
    doc: &Document,
    key: &str,
    output: Option<&Path>,
) -> Result<String> {
    let (section, name) = key
        .split_once(COMPOUND_KEY_SEPARATOR)
        .unwrap_or((DEFAULT_SECTION, key));

    if !doc.delete_key(section, name) {
        return Err(ConfigError::KeyNotFound {
            key: key.to_string(),
        })
        .with_context(|| format!("Failed to delete key '{key}'"));
    }
    let saved = ctx.save(doc, output)?;
    Ok(format!("Deleted '{key}' from {}", saved.display()))
}

/// Overlay `other` on `doc`. The result is printed unless `output` is given.
pub fn run_merge(
    ctx: &DocumentContext,
    doc: &Document,
    other: &Path,
    output: Option<&Path>,
) -> Result<String> {
    let overlay = load_document(other, &ctx.section)?;
    let merged = iniconf::merge(doc, &overlay);

    match output {
        Some(path) => {
            let saved = ctx.save(&merged, Some(path))?;
            Ok(format!(
                "Merged {} into {}",
                other.display(),
                saved.display()
            ))
        }
        None => Ok(merged.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(dir: &TempDir, contents: &str) -> (DocumentContext, Document) {
        let path = dir.path().join("app.ini");
        fs::write(&path, contents).unwrap();
        let ctx = DocumentContext::new(path, None);
        let doc = ctx.load().unwrap();
        (ctx, doc)
    }

    #[test]
    fn test_set_saves_back_to_loaded_file() {
        let dir = TempDir::new().unwrap();
        let (ctx, doc) = context(&dir, "[web]\nport = 80\n");

        run_set(&ctx, &doc, "web::port", "9090", None).unwrap();

        let reloaded = ctx.load().unwrap();
        assert_eq!(reloaded.get_int("web::port").unwrap(), 9090);
    }

    #[test]
    fn test_set_to_output_leaves_source_untouched() {
        let dir = TempDir::new().unwrap();
        let (ctx, doc) = context(&dir, "[web]\nport = 80\n");
        let output = dir.path().join("out.ini");

        run_set(&ctx, &doc, "web::host", "example.org", Some(&output)).unwrap();

        assert!(!ctx.load().unwrap().has_key("web::host"));
        let written = load_document(&output, DEFAULT_SECTION).unwrap();
        assert_eq!(written.get_string("web::host").unwrap(), "example.org");
    }

    #[test]
    fn test_delete_bare_and_compound_keys() {
        let dir = TempDir::new().unwrap();
        let (ctx, doc) = context(&dir, "name = demo\n[web]\nport = 80\n");

        run_delete(&ctx, &doc, "name", None).unwrap();
        run_delete(&ctx, &doc, "web::port", None).unwrap();

        let reloaded = ctx.load().unwrap();
        assert!(!reloaded.has_key("name"));
        assert!(!reloaded.has_key("web::port"));
    }

    #[test]
    fn test_delete_absent_key_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (ctx, doc) = context(&dir, "name = demo\n");

        let err = run_delete(&ctx, &doc, "web::port", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_merge_prints_overlay_result() {
        let dir = TempDir::new().unwrap();
        let (ctx, doc) = context(&dir, "[s]\nk1 = 1\nk2 = 2\n");
        let other = dir.path().join("local.ini");
        fs::write(&other, "[s]\nk2 = 3\n").unwrap();

        let text = run_merge(&ctx, &doc, &other, None).unwrap();
        assert_eq!(text, "\n[s]\nk1=\"1\"\nk2=\"3\"\n");
    }
}
