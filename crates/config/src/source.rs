//! Byte source and sink abstractions at the file-system boundary.
//!
//! Responsibilities:
//! - Define the `ByteSource` / `ByteSink` traits the parser and serializer
//!   talk to instead of `std::fs`.
//! - Provide `FsSource` / `FsSink` (real file system) and `MemorySource`
//!   (in-memory tree, for embedding and tests).
//!
//! Does NOT handle:
//! - Deciding whether a failure is fatal; callers map `io::Error` into
//!   `ConfigError` or absorb it.
//!
//! Invariants:
//! - `FsSink::write` never leaves a partially written target: it writes a
//!   sibling temporary file and renames it into place.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use crate::constants::TEMP_FILE_EXTENSION;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    /// Anything that is neither (sockets, devices, ...).
    Other,
}

/// Read side of the file-system boundary.
pub trait ByteSource {
    /// Read a whole file into memory.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Classify a path. Missing paths return `ErrorKind::NotFound`.
    fn kind(&self, path: &Path) -> io::Result<PathKind>;

    /// List the entries directly inside a directory (not recursive).
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// A stable identity for `path`, used to detect include cycles.
    fn identity(&self, path: &Path) -> PathBuf {
        normalize(path)
    }
}

/// Write side of the file-system boundary.
pub trait ByteSink {
    /// Create or overwrite the file at `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component where there is one.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// `ByteSource` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ByteSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn kind(&self, path: &Path) -> io::Result<PathKind> {
        let metadata = std::fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            PathKind::Directory
        } else if metadata.is_file() {
            PathKind::File
        } else {
            PathKind::Other
        })
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn identity(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| normalize(path))
    }
}

/// `ByteSink` backed by `std::fs`, writing atomically.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl ByteSink for FsSink {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension(TEMP_FILE_EXTENSION);
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, path)
    }
}

/// In-memory file tree implementing both `ByteSource` and `ByteSink`.
///
/// Directories are implied by the files below them; `add_dir` creates an
/// empty one explicitly.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<Vec<PathBuf>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file. Returns `self` for chaining.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, contents);
        self
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.insert(normalize(path.as_ref()), contents.into());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.write().unwrap_or_else(|e| e.into_inner());
        dirs.push(normalize(path.as_ref()));
    }

    /// Contents of a file as UTF-8 text, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .get(&normalize(path.as_ref()))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    fn is_dir(&self, path: &Path) -> bool {
        let dirs = self.dirs.read().unwrap_or_else(|e| e.into_inner());
        if dirs.iter().any(|d| d == path) {
            return true;
        }
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.keys().any(|f| f != path && f.starts_with(path))
    }
}

impl ByteSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn kind(&self, path: &Path) -> io::Result<PathKind> {
        let path = normalize(path);
        let is_file = {
            let files = self.files.read().unwrap_or_else(|e| e.into_inner());
            files.contains_key(&path)
        };
        if is_file {
            Ok(PathKind::File)
        } else if self.is_dir(&path) {
            Ok(PathKind::Directory)
        } else {
            Err(not_found(&path))
        }
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let path = normalize(path);
        if !self.is_dir(&path) {
            return Err(not_found(&path));
        }

        let mut children: Vec<PathBuf> = Vec::new();
        let mut push_child = |candidate: &Path| {
            let first = candidate
                .strip_prefix(&path)
                .ok()
                .and_then(|rest| rest.components().next());
            if let Some(first) = first {
                let child = path.join(first);
                if !children.contains(&child) {
                    children.push(child);
                }
            }
        };

        {
            let files = self.files.read().unwrap_or_else(|e| e.into_inner());
            files.keys().for_each(|f| push_child(f));
        }
        {
            let dirs = self.dirs.read().unwrap_or_else(|e| e.into_inner());
            dirs.iter().filter(|d| **d != path).for_each(|d| push_child(d));
        }

        children.sort();
        Ok(children)
    }
}

impl ByteSink for MemorySource {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.add_file(path, contents.as_bytes().to_vec());
        Ok(())
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} does not exist", path.display()),
    )
}
