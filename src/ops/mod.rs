// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid mutation operations.
//!
//! Every edit is a [`GridOp`] applied to an [`EditorSession`]. Ops that change observable state
//! push one undo snapshot first and return a [`Delta`] the UI can use to repaint only what moved.

pub mod history;

use std::collections::{BTreeSet, HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::model::{
    CellRef, DetailFields, EditorSession, GlobalIds, Item, ItemId, Period, Position,
};
use crate::query::duplicates::DuplicateFlags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridOp {
    /// Types `text` into a cell: blank clears it, otherwise creates or relabels the occupant.
    ///
    /// A created item takes the registry id of `cell.period` (0 without one) and is then
    /// classified like any other item. Without a registry id and without a period keyword in the
    /// text it lands on the day table at the same position, possibly shadowing the day occupant
    /// there; `delta.added` reports the cell it actually landed on.
    WriteCell { cell: CellRef, text: String },
    /// Applies the detail panel to a cell, propagating synced fields across the item's lane.
    EditDetail { cell: CellRef, fields: DetailFields },
    InsertRow { at: u32 },
    InsertColumn { at: u32 },
    /// Moves the pivot's whole group so the pivot lands on `to`, keeping per-lane column offsets.
    MoveGroup { pivot: ItemId, to: Position },
    /// Writes the clipboard into a cell.
    Paste { cell: CellRef },
    /// Sets per-period form ids on the item's group and merges them into the global registry.
    UpdateGroupIds { item: ItemId, ids: GlobalIds },
    ClearAll,
}

impl GridOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::WriteCell { .. } => "write_cell",
            Self::EditDetail { .. } => "edit_detail",
            Self::InsertRow { .. } => "insert_row",
            Self::InsertColumn { .. } => "insert_column",
            Self::MoveGroup { .. } => "move_group",
            Self::Paste { .. } => "paste",
            Self::UpdateGroupIds { .. } => "update_group_ids",
            Self::ClearAll => "clear_all",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    /// Whether the op changed anything (and pushed an undo step).
    pub changed: bool,
    pub delta: Delta,
    pub duplicates: DuplicateFlags,
    pub global_ids: GlobalIds,
}

/// Changes that force a full repaint rather than per-cell updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structural {
    RowInserted(u32),
    ColumnInserted(u32),
    Cleared,
    Restored,
}

/// Cells touched by an op.
///
/// `removed` cells are empty afterwards, `added` cells gained an occupant, `updated` cells kept
/// their occupant with new content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<CellRef>,
    pub removed: Vec<CellRef>,
    pub updated: Vec<CellRef>,
    pub structural: Option<Structural>,
}

impl Delta {
    fn structural(kind: Structural) -> Self {
        Self {
            structural: Some(kind),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && self.structural.is_none()
    }

    /// Period tables with at least one touched cell.
    pub fn periods(&self) -> BTreeSet<Period> {
        self.added
            .iter()
            .chain(&self.removed)
            .chain(&self.updated)
            .map(|cell| cell.period)
            .collect()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<CellRef>,
    removed: HashSet<CellRef>,
    updated: HashSet<CellRef>,
    structural: Option<Structural>,
}

impl DeltaBuilder {
    fn record_added(&mut self, cell: CellRef) {
        self.removed.remove(&cell);
        self.updated.remove(&cell);
        self.added.insert(cell);
    }

    fn record_removed(&mut self, cell: CellRef) {
        self.added.remove(&cell);
        self.updated.remove(&cell);
        self.removed.insert(cell);
    }

    fn record_updated(&mut self, cell: CellRef) {
        if self.added.contains(&cell) || self.removed.contains(&cell) {
            return;
        }
        self.updated.insert(cell);
    }

    fn record_structural(&mut self, kind: Structural) {
        self.structural = Some(kind);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort_unstable();
        removed.sort_unstable();
        updated.sort_unstable();

        Delta {
            added,
            removed,
            updated,
            structural: self.structural,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("item not found ({item})")]
    NoSuchItem { item: ItemId },
    #[error("move mode is disabled")]
    MoveModeDisabled,
    #[error("target column {column} is out of range")]
    ColumnOutOfRange { column: i64 },
}

/// Applies one op to the session. Groups are rebuilt before returning whenever the op changed
/// anything.
pub fn apply_op(session: &mut EditorSession, op: &GridOp) -> Result<ApplyResult, ApplyError> {
    let mut delta = DeltaBuilder::default();

    let changed = match op {
        GridOp::WriteCell { cell, text } => write_cell(session, *cell, text, &mut delta),
        GridOp::EditDetail { cell, fields } => edit_detail(session, *cell, fields, &mut delta),
        GridOp::InsertRow { at } => insert_row(session, *at, &mut delta),
        GridOp::InsertColumn { at } => insert_column(session, *at, &mut delta),
        GridOp::MoveGroup { pivot, to } => move_group(session, *pivot, *to, &mut delta)?,
        GridOp::Paste { cell } => paste(session, *cell, &mut delta),
        GridOp::UpdateGroupIds { item, ids } => update_group_ids(session, *item, ids, &mut delta)?,
        GridOp::ClearAll => clear_all(session, &mut delta),
    };

    if changed {
        session.rebuild_groups();
        debug!(op = op.name(), items = session.items.len(), "applied grid op");
    } else {
        debug!(op = op.name(), "grid op left state unchanged");
    }

    Ok(session.result(changed, delta.finish()))
}

impl EditorSession {
    pub fn apply(&mut self, op: &GridOp) -> Result<ApplyResult, ApplyError> {
        apply_op(self, op)
    }

    /// Restores the state before the latest change. `changed` is false when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> ApplyResult {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                debug!(undo = self.history.undo_depth(), "undo");
                self.result(true, Delta::structural(Structural::Restored))
            }
            None => self.result(false, Delta::default()),
        }
    }

    pub fn redo(&mut self) -> ApplyResult {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                debug!(redo = self.history.redo_depth(), "redo");
                self.result(true, Delta::structural(Structural::Restored))
            }
            None => self.result(false, Delta::default()),
        }
    }

    /// Copies the occupant of `cell` to the clipboard; an empty cell clears the clipboard.
    ///
    /// Returns whether something was copied. Copying never touches history.
    pub fn copy(&mut self, cell: CellRef) -> bool {
        self.clipboard = self
            .items
            .at(cell)
            .and_then(|id| self.items.get(id))
            .map(Item::fields);
        self.clipboard.is_some()
    }

    pub fn copy_selection(&mut self) -> bool {
        match self.selection {
            Some(cell) => self.copy(cell),
            None => false,
        }
    }

    /// Pastes into the selected cell; without a selection nothing happens.
    pub fn paste_selection(&mut self) -> Result<ApplyResult, ApplyError> {
        match self.selection {
            Some(cell) => self.apply(&GridOp::Paste { cell }),
            None => Ok(self.result(false, Delta::default())),
        }
    }

    fn result(&self, changed: bool, delta: Delta) -> ApplyResult {
        ApplyResult {
            changed,
            delta,
            duplicates: self.duplicates(),
            global_ids: self.global_ids,
        }
    }
}

// Per-op mutation bodies used by `apply_op`.
include!("ops_impl.rs");
