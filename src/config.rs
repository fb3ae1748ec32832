// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Position;
use crate::ops::history::DEFAULT_HISTORY_CAPACITY;

/// Position given to loaded entries that carry no `posicion`.
pub const DEFAULT_ITEM_POSITION: Position = Position::new(1, 1);

/// Tunables for an [`EditorSession`](crate::model::EditorSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept; the oldest is evicted first.
    pub history_capacity: usize,
    pub default_position: Position,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_position: DEFAULT_ITEM_POSITION,
        }
    }
}

impl EditorConfig {
    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }
}
