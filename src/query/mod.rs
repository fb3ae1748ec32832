// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only views over the item store.
//!
//! Queries derive what a grid front end needs to show: which tables exist, how large they are,
//! which codes collide, and which items match a search.

pub mod duplicates;
pub mod grid;
pub mod search;

pub use duplicates::{find_duplicates, DuplicateFlags};
pub use grid::{extent, group_form_ids, present_periods, GridExtent};
pub use search::{list_entry, search, SearchMode};
