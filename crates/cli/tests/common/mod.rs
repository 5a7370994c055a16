//! Shared test utilities for iniconf CLI integration tests.
//!
//! Invariants / Assumptions:
//! - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
//! - `INICONF_FILE` is cleared so only `--file` selects the document.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns a hermetic `iniconf` command for integration testing.
pub fn iniconf_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("iniconf");
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env_remove("INICONF_FILE").env_remove("RUST_LOG");
    cmd
}

/// Write `contents` to `dir/name`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}
