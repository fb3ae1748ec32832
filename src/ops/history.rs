// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bounded, linear undo/redo over full-state snapshots.

use std::collections::VecDeque;

use crate::model::{GlobalIds, ItemStore};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Deep copy of the mutable editor state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub items: ItemStore,
    pub global_ids: GlobalIds,
}

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    capacity: usize,
    /// Saved position in the linear history, as an `undo_stack` depth. `None` once the saved
    /// state has been evicted or discarded along with the redo stack.
    clean_index: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
            clean_index: Some(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Records the state as it was before a mutation. Clears the redo stack.
    pub fn push(&mut self, snapshot: Snapshot) {
        if !self.redo_stack.is_empty() {
            if self
                .clean_index
                .is_some_and(|clean| clean > self.undo_stack.len())
            {
                self.clean_index = None;
            }
            self.redo_stack.clear();
        }

        if self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean) => Some(clean - 1),
            };
        }

        self.undo_stack.push_back(snapshot);
    }

    /// Steps back: `current` moves onto the redo stack and the previous state is returned.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Steps forward again after an undo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current);
        if self.undo_stack.len() > self.capacity {
            self.undo_stack.pop_front();
            self.clean_index = self.clean_index.and_then(|clean| clean.checked_sub(1));
        }
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.clean_index = Some(0);
    }

    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }
}
