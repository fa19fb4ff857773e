use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::{Project, Tag};

/// File name of the persisted project library inside the data directory
pub const LIBRARY_FILE: &str = "library.json";

/// Everything the local host persists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn library_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LIBRARY_FILE)
}

/// Read the library. A missing file is an empty library.
pub fn read_library(path: &Path) -> Result<Library, LibraryError> {
    if !path.exists() {
        return Ok(Library::default());
    }
    let text = fs::read_to_string(path).map_err(|e| LibraryError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| LibraryError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the library atomically, creating the data directory if needed.
pub fn write_library(path: &Path, library: &Library) -> Result<(), LibraryError> {
    let write_err = |e: io::Error| LibraryError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let content = serde_json::to_string_pretty(library).map_err(|e| LibraryError::WriteError {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;
    atomic_write(path, content.as_bytes()).map_err(write_err)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
