// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::Value;

use super::global_ids::GlobalIds;
use super::groups::GroupIndex;
use super::ids::ItemId;
use super::item::{CellRef, DetailFields, Item};
use super::item_store::ItemStore;
use crate::config::EditorConfig;
use crate::ops::history::{History, Snapshot};
use crate::query::duplicates::{find_duplicates, DuplicateFlags};
use crate::store::document::{build_store, EntryPaths};
use crate::store::LoadSummary;

/// Everything the editor mutates, owned in one place and passed explicitly to operations.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub(crate) config: EditorConfig,
    pub(crate) items: ItemStore,
    pub(crate) global_ids: GlobalIds,
    pub(crate) groups: GroupIndex,
    pub(crate) document: Option<Value>,
    pub(crate) entry_paths: EntryPaths,
    pub(crate) history: History,
    pub(crate) clipboard: Option<DetailFields>,
    pub(crate) selection: Option<CellRef>,
    pub(crate) move_mode: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            items: ItemStore::new(),
            global_ids: GlobalIds::default(),
            groups: GroupIndex::default(),
            document: None,
            entry_paths: EntryPaths::default(),
            history: History::new(config.history_capacity),
            clipboard: None,
            selection: None,
            move_mode: false,
        }
    }

    /// A session over loose items with no backing document; saving emits the flat item list.
    pub fn from_items(items: impl IntoIterator<Item = Item>, global_ids: GlobalIds) -> Self {
        let mut session = Self::new();
        session.global_ids = global_ids;
        session.items = ItemStore::from_items(items, &global_ids);
        session.rebuild_groups();
        session
    }

    /// Replaces the whole session state with the contents of `document`.
    ///
    /// History, clipboard and selection are reset; the document is retained for saving.
    pub fn load_document(&mut self, document: Value) -> LoadSummary {
        let global_ids = GlobalIds::extract(&document);
        let (items, entry_paths) =
            build_store(&document, self.config.default_position, &global_ids);

        self.global_ids = global_ids;
        self.items = items;
        self.entry_paths = entry_paths;
        self.document = Some(document);
        self.history.clear();
        self.clipboard = None;
        self.selection = None;
        self.rebuild_groups();

        LoadSummary {
            item_count: self.items.len(),
            global_ids,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn groups(&self) -> &GroupIndex {
        &self.groups
    }

    pub fn global_ids(&self) -> &GlobalIds {
        &self.global_ids
    }

    /// The raw document as loaded, if the session came from one.
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Where each loaded item sits in [`Self::document`].
    pub fn entry_paths(&self) -> &EntryPaths {
        &self.entry_paths
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn duplicates(&self) -> DuplicateFlags {
        find_duplicates(&self.items)
    }

    /// Whether the state differs from the last load or save.
    pub fn is_dirty(&self) -> bool {
        !self.history.is_clean()
    }

    pub fn clipboard(&self) -> Option<&DetailFields> {
        self.clipboard.as_ref()
    }

    pub fn move_mode(&self) -> bool {
        self.move_mode
    }

    pub fn set_move_mode(&mut self, enabled: bool) {
        self.move_mode = enabled;
    }

    pub fn selection(&self) -> Option<CellRef> {
        self.selection
    }

    pub fn select(&mut self, cell: Option<CellRef>) {
        self.selection = cell;
    }

    /// The item occupying the selected cell, if any.
    pub fn selected_item(&self) -> Option<ItemId> {
        self.items.at(self.selection?)
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.items.clone(),
            global_ids: self.global_ids,
        }
    }

    /// Records the current state as an undo step. Call right before mutating.
    pub(crate) fn checkpoint(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Snapshots carry their own indexes, built against their own global ids.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.items = snapshot.items;
        self.global_ids = snapshot.global_ids;
        self.rebuild_groups();
    }

    pub(crate) fn rebuild_groups(&mut self) {
        self.groups = GroupIndex::build(&self.items);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::EditorSession;
    use crate::model::{CellRef, GlobalIds, Item, Period, Position};

    #[test]
    fn load_document_replaces_state_and_resets_history() {
        let mut session = EditorSession::from_items(
            [Item::with_label("old", Position::new(0, 0))],
            GlobalIds::default(),
        );
        session.checkpoint();
        session.select(Some(CellRef::at(Period::Day, 0, 0)));
        assert!(session.is_dirty());

        let summary = session.load_document(json!({
            "formularioC": [{"cod_fechas": [{"tipo_val": "m", "id_form": 30}]}],
            "items": [
                {"codigo": "A1", "posicion": "2:3", "label": "Stock", "id_form": 30}
            ]
        }));

        assert_eq!(summary.item_count, 1);
        assert_eq!(summary.global_ids.get(Period::Month), Some(30));
        assert!(!session.is_dirty());
        assert!(!session.history().can_undo());
        assert_eq!(session.selection(), None);
        let id = session
            .items()
            .at(CellRef::at(Period::Month, 2, 3))
            .expect("month item");
        assert_eq!(session.items().get(id).expect("item").code, "A1");
        assert!(session.groups().group("STOCK").is_some());
        assert!(session.document().is_some());
    }

    #[test]
    fn selected_item_follows_selection() {
        let mut session = EditorSession::from_items(
            [Item::with_label("x", Position::new(1, 1))],
            GlobalIds::default(),
        );
        assert_eq!(session.selected_item(), None);
        session.select(Some(CellRef::at(Period::Day, 1, 1)));
        assert!(session.selected_item().is_some());
        session.select(Some(CellRef::at(Period::Week, 1, 1)));
        assert_eq!(session.selected_item(), None);
    }
}
