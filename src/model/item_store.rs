// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashMap};

use super::global_ids::GlobalIds;
use super::ids::ItemId;
use super::item::{CellRef, Item};
use super::period::{period_or_default, Period};

/// The authoritative item collection plus its code and cell indexes.
///
/// Every mutation goes through this type so the indexes cannot drift from the items. Cells are
/// period-scoped: each period is its own table, so a day item and a month item may share a
/// position. On collisions inside one table (and on duplicate codes) the most recently indexed
/// item wins the index entry; the shadowed item stays in the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: BTreeMap<ItemId, Item>,
    next_id: u64,
    by_code: HashMap<String, ItemId>,
    by_cell: HashMap<CellRef, ItemId>,
    cell_of: HashMap<ItemId, CellRef>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = Item>, global_ids: &GlobalIds) -> Self {
        let mut store = Self::new();
        for item in items {
            store.add(item, global_ids);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> + '_ {
        self.items.iter().map(|(&id, item)| (id, item))
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// The item currently indexed at `cell`.
    pub fn at(&self, cell: CellRef) -> Option<ItemId> {
        self.by_cell.get(&cell).copied()
    }

    pub fn by_code(&self, code: &str) -> Option<ItemId> {
        self.by_code.get(code).copied()
    }

    /// The cell (period table + position) the item was last indexed under.
    pub fn cell(&self, id: ItemId) -> Option<CellRef> {
        self.cell_of.get(&id).copied()
    }

    pub fn period(&self, id: ItemId) -> Option<Period> {
        self.cell(id).map(|cell| cell.period)
    }

    pub fn add(&mut self, item: Item, global_ids: &GlobalIds) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        self.index_item(id, global_ids);
        self.debug_check();
        id
    }

    /// Removes the item and its index entries. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.unindex_item(id);
        let removed = self.items.remove(&id)?;
        if !removed.code.is_empty() && !self.by_code.contains_key(&removed.code) {
            self.reclaim_code(&removed.code);
        }
        self.debug_check();
        Some(removed)
    }

    /// Mutates one item in place and re-indexes it. Returns `None` if the id is absent.
    pub fn update<R>(
        &mut self,
        id: ItemId,
        global_ids: &GlobalIds,
        f: impl FnOnce(&mut Item) -> R,
    ) -> Option<R> {
        let old_code = self.items.get(&id)?.code.clone();
        self.unindex_item(id);

        let result = f(self.items.get_mut(&id)?);

        self.index_item(id, global_ids);
        if !old_code.is_empty() && !self.by_code.contains_key(&old_code) {
            self.reclaim_code(&old_code);
        }
        self.debug_check();
        Some(result)
    }

    /// Mutates every item, then rebuilds both indexes.
    pub fn update_all(&mut self, global_ids: &GlobalIds, mut f: impl FnMut(ItemId, &mut Item)) {
        for (&id, item) in &mut self.items {
            f(id, item);
        }
        self.reindex(global_ids);
    }

    /// Rebuilds both indexes from the collection (after global-id changes or restores).
    pub fn reindex(&mut self, global_ids: &GlobalIds) {
        self.by_code.clear();
        self.by_cell.clear();
        self.cell_of.clear();
        let ids = self.items.keys().copied().collect::<Vec<_>>();
        for id in ids {
            self.index_item(id, global_ids);
        }
        self.debug_check();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.by_code.clear();
        self.by_cell.clear();
        self.cell_of.clear();
    }

    fn index_item(&mut self, id: ItemId, global_ids: &GlobalIds) {
        let Some(item) = self.items.get(&id) else {
            return;
        };
        let cell = CellRef::new(period_or_default(item, global_ids), item.position);
        if !item.code.is_empty() {
            self.by_code.insert(item.code.clone(), id);
        }
        self.by_cell.insert(cell, id);
        self.cell_of.insert(id, cell);
    }

    fn unindex_item(&mut self, id: ItemId) {
        if let Some(cell) = self.cell_of.remove(&id) {
            if self.by_cell.get(&cell) == Some(&id) {
                self.by_cell.remove(&cell);
                self.reclaim_cell(cell, id);
            }
        }
        if let Some(item) = self.items.get(&id) {
            if self.by_code.get(&item.code) == Some(&id) {
                self.by_code.remove(&item.code);
            }
        }
    }

    /// Hands a vacated cell to the latest other item still placed there.
    fn reclaim_cell(&mut self, cell: CellRef, vacating: ItemId) {
        let heir = self
            .cell_of
            .iter()
            .filter(|&(&other, &other_cell)| other != vacating && other_cell == cell)
            .map(|(&other, _)| other)
            .max();
        if let Some(heir) = heir {
            self.by_cell.insert(cell, heir);
        }
    }

    /// Hands a vacated code to the latest item still carrying it.
    fn reclaim_code(&mut self, code: &str) {
        let heir = self
            .items
            .iter()
            .rev()
            .find(|(_, item)| item.code == code)
            .map(|(&id, _)| id);
        if let Some(heir) = heir {
            self.by_code.insert(code.to_owned(), heir);
        }
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.cell_of.len(), self.items.len(), "every item has a cell");
        debug_assert!(
            self.by_cell
                .iter()
                .all(|(cell, id)| self.cell_of.get(id) == Some(cell)),
            "cell index points at items placed there"
        );
        debug_assert!(
            self.by_code
                .iter()
                .all(|(code, id)| self.items.get(id).is_some_and(|item| &item.code == code)),
            "code index points at items carrying that code"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::ItemStore;
    use crate::model::{CellRef, GlobalIds, Item, Period, Position};

    fn item(code: &str, label: &str, row: u32, col: u32) -> Item {
        let mut item = Item::with_label(label, Position::new(row, col));
        item.code = code.to_owned();
        item
    }

    #[test]
    fn add_indexes_by_cell_and_code() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("CD1", "A", 1, 2), &ids);
        let b = store.add(item("CM1", "B", 1, 2), &ids);

        assert_eq!(store.at(CellRef::at(Period::Day, 1, 2)), Some(a));
        assert_eq!(store.at(CellRef::at(Period::Month, 1, 2)), Some(b));
        assert_eq!(store.at(CellRef::at(Period::Week, 1, 2)), None);
        assert_eq!(store.by_code("CD1"), Some(a));
        assert_eq!(store.period(b), Some(Period::Month));
    }

    #[test]
    fn empty_code_is_not_indexed() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        store.add(item("", "A", 0, 0), &ids);
        assert_eq!(store.by_code(""), None);
    }

    #[test]
    fn duplicate_code_is_last_writer_wins_and_falls_back_on_remove() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let first = store.add(item("X1", "A", 0, 0), &ids);
        let second = store.add(item("X1", "B", 0, 1), &ids);
        assert_eq!(store.len(), 2);
        assert_eq!(store.by_code("X1"), Some(second));

        store.remove(second);
        assert_eq!(store.by_code("X1"), Some(first));
    }

    #[test]
    fn remove_is_idempotent() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("CD1", "A", 0, 0), &ids);
        assert!(store.remove(a).is_some());
        assert!(store.remove(a).is_none());
        assert!(store.is_empty());
        assert_eq!(store.at(CellRef::at(Period::Day, 0, 0)), None);
        assert_eq!(store.by_code("CD1"), None);
    }

    #[test]
    fn colliding_cell_is_reclaimed_by_shadowed_item() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("", "A", 3, 3), &ids);
        let b = store.add(item("", "B", 3, 3), &ids);
        let cell = CellRef::at(Period::Day, 3, 3);
        assert_eq!(store.at(cell), Some(b));

        store.remove(b);
        assert_eq!(store.at(cell), Some(a));
    }

    #[test]
    fn update_reindexes_moved_and_recoded_items() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("CD1", "A", 0, 0), &ids);

        store.update(a, &ids, |it| {
            it.position = Position::new(4, 5);
            it.code = "CM7".to_owned();
        });

        assert_eq!(store.at(CellRef::at(Period::Day, 0, 0)), None);
        assert_eq!(store.at(CellRef::at(Period::Month, 4, 5)), Some(a));
        assert_eq!(store.by_code("CD1"), None);
        assert_eq!(store.by_code("CM7"), Some(a));
    }

    #[test]
    fn reindex_follows_global_id_changes() {
        let mut ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let mut it = item("", "Plain", 2, 2);
        it.id_form = 77;
        let a = store.add(it, &ids);
        assert_eq!(store.period(a), Some(Period::Day));

        ids.set(Period::Year, Some(77));
        store.reindex(&ids);
        assert_eq!(store.period(a), Some(Period::Year));
        assert_eq!(store.at(CellRef::at(Period::Year, 2, 2)), Some(a));
        assert_eq!(store.at(CellRef::at(Period::Day, 2, 2)), None);
    }

    #[test]
    fn update_all_shifts_and_reindexes() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("", "A", 1, 0), &ids);
        let b = store.add(item("", "B", 3, 0), &ids);

        store.update_all(&ids, |_, it| {
            if it.position.row >= 2 {
                it.position.row += 1;
            }
        });

        assert_eq!(store.at(CellRef::at(Period::Day, 1, 0)), Some(a));
        assert_eq!(store.at(CellRef::at(Period::Day, 4, 0)), Some(b));
        assert_eq!(store.at(CellRef::at(Period::Day, 3, 0)), None);
    }

    #[test]
    fn iteration_is_insertion_order() {
        let ids = GlobalIds::default();
        let store = ItemStore::from_items(
            [item("", "C", 0, 0), item("", "A", 0, 1), item("", "B", 0, 2)],
            &ids,
        );
        let labels = store.iter().map(|(_, it)| it.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["C", "A", "B"]);
    }
}
