// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reading and writing editor documents on disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::document::{flat_items, inject_items};
use crate::model::{EditorSession, GlobalIds};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Neither valid JSON nor valid JSON Lines. `line` is 1-based.
    #[error("failed to parse {} (line {line}): {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize document for {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Informational outcome of a load that is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadNotice {
    NoValidItems,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub item_count: usize,
    pub global_ids: GlobalIds,
}

impl LoadSummary {
    pub fn notice(&self) -> Option<LoadNotice> {
        (self.item_count == 0).then_some(LoadNotice::NoValidItems)
    }
}

/// Parses `text` as one JSON value, falling back to JSON Lines collected into an array.
pub fn parse_document(path: &Path, text: &str) -> Result<Value, StoreError> {
    let whole = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    let mut lines = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => lines.push(value),
            Err(source) => {
                // A bad first line means the text was never line-oriented.
                let (line, source) = if lines.is_empty() {
                    (whole.line(), whole)
                } else {
                    (index + 1, source)
                };
                return Err(StoreError::Parse {
                    path: path.to_path_buf(),
                    line,
                    source,
                });
            }
        }
    }

    warn!(path = %path.display(), lines = lines.len(), "document is not JSON; read as JSON Lines");
    Ok(Value::Array(lines))
}

pub fn read_document(path: &Path) -> Result<Value, StoreError> {
    let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(path, &text)
}

/// Writes `value` as two-space indented JSON with a trailing newline. Non-ASCII text is kept as is.
pub fn write_document(path: &Path, value: &Value) -> Result<(), StoreError> {
    let mut text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    fs::write(path, text).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl EditorSession {
    /// Loads a document, replacing the whole session state.
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary, StoreError> {
        let document = read_document(path)?;
        let summary = self.load_document(document);
        match summary.notice() {
            Some(LoadNotice::NoValidItems) => {
                warn!(path = %path.display(), "no valid items found in document");
            }
            None => info!(path = %path.display(), items = summary.item_count, "loaded document"),
        }
        Ok(summary)
    }

    /// The document as it would be saved: the loaded one with current positions and ids
    /// injected, or the flat item list when nothing was loaded.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        match &self.document {
            Some(document) => Ok(inject_items(document, &self.items, &self.entry_paths, &self.global_ids)),
            None => serde_json::to_value(flat_items(&self.items)),
        }
    }

    /// Saves the session and marks the current state clean.
    pub fn save(&mut self, path: &Path) -> Result<(), StoreError> {
        let document = self.to_document().map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        write_document(path, &document)?;
        self.history.mark_clean();
        info!(path = %path.display(), items = self.items.len(), "saved document");
        Ok(())
    }
}
