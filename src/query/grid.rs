// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::model::{GlobalIds, GroupIndex, ItemId, ItemStore, Period};

/// Number of rows and columns needed to show every item. All period tables share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridExtent {
    pub rows: u32,
    pub cols: u32,
}

pub fn extent(store: &ItemStore) -> GridExtent {
    store
        .iter()
        .fold(GridExtent::default(), |acc, (_, item)| GridExtent {
            rows: acc.rows.max(item.position.row.saturating_add(1)),
            cols: acc.cols.max(item.position.col.saturating_add(1)),
        })
}

/// Period tables to show, in tab order. An empty store still shows the day table.
pub fn present_periods(store: &ItemStore) -> Vec<Period> {
    let present = store
        .ids()
        .filter_map(|id| store.period(id))
        .collect::<BTreeSet<_>>();
    if present.is_empty() {
        return vec![Period::Day];
    }
    Period::TAB_ORDER
        .into_iter()
        .filter(|period| present.contains(period))
        .collect()
}

/// The form-ids to offer for editing an item's group: per period, the first lane member's
/// `id_form`, falling back to the global registry (a registry value of 0 counts as unset).
pub fn group_form_ids(
    store: &ItemStore,
    groups: &GroupIndex,
    global_ids: &GlobalIds,
    id: ItemId,
) -> GlobalIds {
    let group = groups.group_of(store, id);
    let mut out = GlobalIds::default();
    for period in Period::ALL {
        let from_lane = group
            .and_then(|group| group.lane(period).first())
            .and_then(|&first| store.get(first))
            .map(|item| item.id_form);
        let fallback = global_ids.get(period).filter(|&v| v != 0);
        out.set(period, from_lane.or(fallback));
    }
    out
}
