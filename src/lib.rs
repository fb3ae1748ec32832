// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cierres: editor core for period-bucketed form-item grids.
//!
//! Items are loaded from loosely shaped JSON documents, placed on day/week/month/year tables,
//! grouped by label, edited through undoable [`ops::GridOp`]s and saved back into the document
//! they came from.

pub mod config;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;

pub use config::EditorConfig;
pub use model::EditorSession;
pub use ops::{ApplyError, ApplyResult, Delta, GridOp};
pub use store::{LoadNotice, LoadSummary, StoreError};
