// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Items live in an [`ItemStore`] and are placed on one of four period tables. Groups and periods
//! are derived views; the [`EditorSession`] owns everything that edits can change.

pub mod global_ids;
pub mod groups;
pub mod ids;
pub mod item;
pub mod item_store;
pub mod period;
pub mod position;
pub mod session;

pub use global_ids::GlobalIds;
pub use groups::{Group, GroupIndex};
pub use ids::ItemId;
pub use item::{CellRef, DetailFields, FlatItem, Item};
pub use item_store::ItemStore;
pub use period::{classify, normalize_label, period_or_default, ParsePeriodError, Period};
pub use position::{column_name, ParsePositionError, Position};
pub use session::EditorSession;
