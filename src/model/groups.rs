// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::ids::ItemId;
use super::item_store::ItemStore;
use super::period::{normalize_label, Period};

/// The period lanes of one label group, each in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    lanes: BTreeMap<Period, Vec<ItemId>>,
}

impl Group {
    pub fn lane(&self, period: Period) -> &[ItemId] {
        self.lanes.get(&period).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty lanes, by period.
    pub fn lanes(&self) -> impl Iterator<Item = (Period, &[ItemId])> + '_ {
        self.lanes
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(&period, ids)| (period, ids.as_slice()))
    }

    pub fn members(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.lanes.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Items partitioned by normalized label, then by period.
///
/// Derived from an [`ItemStore`]; rebuild it after every structural change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: BTreeMap<String, Group>,
}

impl GroupIndex {
    pub fn build(store: &ItemStore) -> Self {
        let mut groups = BTreeMap::<String, Group>::new();
        for (id, item) in store.iter() {
            let period = store.period(id).unwrap_or(Period::Day);
            groups
                .entry(normalize_label(&item.label))
                .or_default()
                .lanes
                .entry(period)
                .or_default()
                .push(id);
        }
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups keyed by normalized label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Group)> + '_ {
        self.groups.iter().map(|(label, group)| (label.as_str(), group))
    }

    /// Looks up a group by any label; the label is normalized first.
    pub fn group(&self, label: &str) -> Option<&Group> {
        self.groups.get(&normalize_label(label))
    }

    pub fn group_of(&self, store: &ItemStore, id: ItemId) -> Option<&Group> {
        self.group(&store.get(id)?.label)
    }

    /// Other items in the same lane as `id`, as currently indexed.
    pub fn lane_siblings(&self, store: &ItemStore, id: ItemId) -> Vec<ItemId> {
        let Some(period) = store.period(id) else {
            return Vec::new();
        };
        self.group_of(store, id)
            .map(|group| {
                group
                    .lane(period)
                    .iter()
                    .copied()
                    .filter(|&other| other != id)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::GroupIndex;
    use crate::model::{GlobalIds, Item, ItemStore, Period, Position};

    fn item(code: &str, label: &str, col: u32) -> Item {
        let mut item = Item::with_label(label, Position::new(0, col));
        item.code = code.to_owned();
        item
    }

    #[test]
    fn build_partitions_by_normalized_label_and_period() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let d1 = store.add(item("CD1", "Inventario Dia", 0), &ids);
        let d2 = store.add(item("CD2", "INVENTARIO", 1), &ids);
        let m1 = store.add(item("CM1", "inventario mes", 2), &ids);
        let other = store.add(item("CD3", "Fruto", 3), &ids);

        let groups = GroupIndex::build(&store);
        assert_eq!(groups.len(), 2);

        let inventory = groups.group("INVENTARIO").expect("group");
        assert_eq!(inventory.lane(Period::Day), &[d1, d2]);
        assert_eq!(inventory.lane(Period::Month), &[m1]);
        assert!(inventory.lane(Period::Week).is_empty());
        assert_eq!(inventory.len(), 3);
        assert_eq!(
            inventory.lanes().map(|(p, _)| p).collect::<Vec<_>>(),
            [Period::Day, Period::Month]
        );

        assert_eq!(groups.group("fruto dia").expect("fruto").lane(Period::Day), &[other]);
    }

    #[test]
    fn unclassified_items_land_in_day_lane() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let a = store.add(item("", "Ingreso", 0), &ids);
        let groups = GroupIndex::build(&store);
        assert_eq!(groups.group("INGRESO").expect("group").lane(Period::Day), &[a]);
    }

    #[test]
    fn lane_siblings_exclude_self_and_other_lanes() {
        let ids = GlobalIds::default();
        let mut store = ItemStore::new();
        let d1 = store.add(item("CD1", "Stock", 0), &ids);
        let d2 = store.add(item("CD2", "Stock", 1), &ids);
        let d3 = store.add(item("CD3", "Stock dia", 2), &ids);
        store.add(item("CS1", "Stock", 3), &ids);

        let groups = GroupIndex::build(&store);
        assert_eq!(groups.lane_siblings(&store, d2), vec![d1, d3]);
    }
}
