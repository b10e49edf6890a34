//! File operations module for Quillpad
//!
//! This module provides document I/O (plain-text read and write) and
//! native file dialogs for choosing the paths.

pub mod dialogs;

use crate::error::{Error, Result};
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Read a document from disk as plain text.
pub fn read_document(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Opened document: {}", path.display());
    Ok(text)
}

/// Write a document to disk as plain text.
///
/// The write is atomic: content goes to a temporary file in the destination
/// directory first, then replaces the target in one rename. A failure at any
/// step leaves the existing file untouched.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    let wrap = |source: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(wrap)?;
    temp.write_all(content.as_bytes()).map_err(wrap)?;
    temp.flush().map_err(wrap)?;
    temp.persist(path).map_err(|err| wrap(err.error))?;

    info!("Saved document: {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
