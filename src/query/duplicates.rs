// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{ItemId, ItemStore};

/// Items whose code is shared with at least one other item, with the offending code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateFlags {
    flagged: BTreeMap<ItemId, String>,
}

impl DuplicateFlags {
    pub fn is_flagged(&self, id: ItemId) -> bool {
        self.flagged.contains_key(&id)
    }

    pub fn code(&self, id: ItemId) -> Option<&str> {
        self.flagged.get(&id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &str)> + '_ {
        self.flagged.iter().map(|(&id, code)| (id, code.as_str()))
    }

    /// Distinct duplicated codes.
    pub fn codes(&self) -> BTreeSet<&str> {
        self.flagged.values().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }
}

/// Counts non-empty codes across every period table and flags each item whose code repeats.
pub fn find_duplicates(store: &ItemStore) -> DuplicateFlags {
    let mut counts = HashMap::<&str, usize>::new();
    for (_, item) in store.iter() {
        if !item.code.is_empty() {
            *counts.entry(item.code.as_str()).or_default() += 1;
        }
    }

    let flagged = store
        .iter()
        .filter(|(_, item)| counts.get(item.code.as_str()).is_some_and(|&n| n > 1))
        .map(|(id, item)| (id, item.code.clone()))
        .collect();
    DuplicateFlags { flagged }
}

#[cfg(test)]
mod tests {
    use super::find_duplicates;
    use crate::model::{GlobalIds, Item, ItemStore, Position};

    fn item(code: &str, col: u32) -> Item {
        let mut item = Item::with_label("L", Position::new(0, col));
        item.code = code.to_owned();
        item
    }

    #[test]
    fn shared_codes_flag_every_holder() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("X1", 0), &ids);
        let b = store.add(item("X1", 1), &ids);
        let lone = store.add(item("Y1", 2), &ids);

        let dups = find_duplicates(&store);
        assert!(dups.is_flagged(a));
        assert!(dups.is_flagged(b));
        assert_eq!(dups.code(a), Some("X1"));
        assert!(!dups.is_flagged(lone));
        assert_eq!(dups.len(), 2);
        assert_eq!(dups.codes().into_iter().collect::<Vec<_>>(), ["X1"]);
    }

    #[test]
    fn lone_and_empty_codes_are_not_flagged() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        store.add(item("X1", 0), &ids);
        store.add(item("", 1), &ids);
        store.add(item("", 2), &ids);
        assert!(find_duplicates(&store).is_empty());
    }

    #[test]
    fn duplicates_are_detected_across_periods() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let mut day = item("K9", 0);
        day.label = "Ventas dia".to_owned();
        let mut month = item("K9", 0);
        month.label = "Ventas mes".to_owned();
        let d = store.add(day, &ids);
        let m = store.add(month, &ids);
        assert_ne!(store.period(d), store.period(m));

        let dups = find_duplicates(&store);
        assert!(dups.is_flagged(d) && dups.is_flagged(m));
    }
}
