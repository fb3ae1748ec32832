// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;

use crate::model::{Item, ItemId, ItemStore, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Substring,
    Regex,
}

/// The list entry an item is matched against and displayed as: `"{code} | {label}"`.
pub fn list_entry(item: &Item) -> String {
    format!("{} | {}", item.code, item.label)
}

/// Items of one period table whose list entry matches `needle`, in store order.
///
/// Matching is case-insensitive; a blank needle matches everything in the period.
pub fn search(
    store: &ItemStore,
    period: Period,
    needle: &str,
    mode: SearchMode,
) -> Result<Vec<ItemId>, regex::Error> {
    let needle = needle.trim();
    let in_period = store.iter().filter(|&(id, _)| store.period(id) == Some(period));

    if needle.is_empty() {
        return Ok(in_period.map(|(id, _)| id).collect());
    }

    match mode {
        SearchMode::Substring => {
            let needle_lower = needle.to_lowercase();
            Ok(in_period
                .filter(|(_, item)| list_entry(item).to_lowercase().contains(&needle_lower))
                .map(|(id, _)| id)
                .collect())
        }
        SearchMode::Regex => {
            let regex = RegexBuilder::new(needle).case_insensitive(true).build()?;
            Ok(in_period
                .filter(|(_, item)| regex.is_match(&list_entry(item)))
                .map(|(id, _)| id)
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{list_entry, search, SearchMode};
    use crate::model::{GlobalIds, Item, ItemStore, Period, Position};

    fn store() -> (ItemStore, Vec<crate::model::ItemId>) {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let mut handles = Vec::new();
        for (code, label, col) in [
            ("CD1", "Inventario", 0),
            ("CD2", "Fruto", 1),
            ("CM1", "Inventario", 2),
            ("", "ingreso", 3),
        ] {
            let mut item = Item::with_label(label, Position::new(0, col));
            item.code = code.to_owned();
            handles.push(store.add(item, &ids));
        }
        (store, handles)
    }

    #[test]
    fn blank_needle_lists_whole_period() {
        let (store, h) = store();
        let hits = search(&store, Period::Day, "  ", SearchMode::Substring).expect("search");
        assert_eq!(hits, vec![h[0], h[1], h[3]]);
    }

    #[test]
    fn substring_matches_code_or_label_case_insensitively() {
        let (store, h) = store();
        assert_eq!(
            search(&store, Period::Day, "INVENT", SearchMode::Substring).expect("search"),
            vec![h[0]]
        );
        assert_eq!(
            search(&store, Period::Day, "cd2", SearchMode::Substring).expect("search"),
            vec![h[1]]
        );
        assert_eq!(
            search(&store, Period::Month, "invent", SearchMode::Substring).expect("search"),
            vec![h[2]]
        );
    }

    #[test]
    fn regex_mode_matches_list_entry() {
        let (store, h) = store();
        let hits = search(&store, Period::Day, r"^cd\d \| f", SearchMode::Regex).expect("search");
        assert_eq!(hits, vec![h[1]]);
        assert!(search(&store, Period::Day, "(", SearchMode::Regex).is_err());
    }

    #[test]
    fn list_entry_joins_code_and_label() {
        let mut item = Item::with_label("Fruto", Position::new(0, 0));
        item.code = "CD2".to_owned();
        assert_eq!(list_entry(&item), "CD2 | Fruto");
    }
}
