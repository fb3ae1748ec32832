// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for editor documents.
//!
//! `document` maps loosely shaped JSON to items and back; `file` reads and writes it on disk.

pub mod document;
pub mod file;

pub use document::{
    build_store, extract_entries, extract_items, flat_items, inject_items, EntryPaths,
    ExtractionStrategy,
};
pub use file::{
    parse_document, read_document, write_document, LoadNotice, LoadSummary, StoreError,
};
