// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Grid mutation bodies used by `apply_op`.
/// Each returns whether state changed; a snapshot is pushed right before the first mutation.
fn write_cell(
    session: &mut EditorSession,
    cell: CellRef,
    text: &str,
    delta: &mut DeltaBuilder,
) -> bool {
    let text = text.trim();
    let occupant = session.items.at(cell);

    match occupant {
        None if text.is_empty() => false,
        Some(id) if text.is_empty() => {
            session.checkpoint();
            session.items.remove(id);
            record_vacated(session, delta, cell);
            true
        }
        None => {
            session.checkpoint();
            let mut item = Item::with_label(text, cell.position);
            item.id_form = session.global_ids.get(cell.period).unwrap_or(0);
            let id = session.items.add(item, &session.global_ids);
            if let Some(placed) = session.items.cell(id) {
                delta.record_added(placed);
            }
            true
        }
        Some(id) => {
            if session.items.get(id).is_some_and(|item| item.label == text) {
                return false;
            }
            session.checkpoint();
            session
                .items
                .update(id, &session.global_ids, |item| item.label = text.to_owned());
            record_relocation(session, delta, cell, id);
            true
        }
    }
}

fn edit_detail(
    session: &mut EditorSession,
    cell: CellRef,
    fields: &DetailFields,
    delta: &mut DeltaBuilder,
) -> bool {
    let Some(id) = session.items.at(cell) else {
        if fields.is_blank() {
            return false;
        }
        session.checkpoint();
        let item = Item::from_fields(fields.clone(), cell.position);
        let id = session.items.add(item, &session.global_ids);
        if let Some(placed) = session.items.cell(id) {
            delta.record_added(placed);
        }
        return true;
    };

    if session
        .items
        .get(id)
        .is_some_and(|item| item.fields() == *fields)
    {
        return false;
    }

    session.checkpoint();
    // Siblings come from the lane the item sat in before its label/period could change.
    let siblings = session.groups.lane_siblings(&session.items, id);

    session
        .items
        .update(id, &session.global_ids, |item| item.set_fields(fields.clone()));
    record_relocation(session, delta, cell, id);

    for sibling in siblings {
        let Some(before) = session.items.cell(sibling) else {
            continue;
        };
        session
            .items
            .update(sibling, &session.global_ids, |item| item.sync_from(fields));
        record_relocation(session, delta, before, sibling);
    }
    true
}

fn insert_row(session: &mut EditorSession, at: u32, delta: &mut DeltaBuilder) -> bool {
    session.checkpoint();
    session.items.update_all(&session.global_ids, |_, item| {
        if item.position.row >= at {
            item.position.row = item.position.row.saturating_add(1);
        }
    });
    delta.record_structural(Structural::RowInserted(at));
    true
}

fn insert_column(session: &mut EditorSession, at: u32, delta: &mut DeltaBuilder) -> bool {
    session.checkpoint();
    session.items.update_all(&session.global_ids, |_, item| {
        if item.position.col >= at {
            item.position.col = item.position.col.saturating_add(1);
        }
    });
    delta.record_structural(Structural::ColumnInserted(at));
    true
}

fn move_group(
    session: &mut EditorSession,
    pivot: ItemId,
    to: Position,
    delta: &mut DeltaBuilder,
) -> Result<bool, ApplyError> {
    if !session.move_mode {
        return Err(ApplyError::MoveModeDisabled);
    }
    let pivot_item = session
        .items
        .get(pivot)
        .ok_or(ApplyError::NoSuchItem { item: pivot })?;
    let pivot_col = i64::from(pivot_item.position.col);
    let Some(group) = session.groups.group(&pivot_item.label) else {
        return Ok(false);
    };

    // Each lane keeps its column offset from the pivot, measured at the lane's first item.
    let mut plan = HashMap::<ItemId, Position>::new();
    for (_, lane) in group.lanes() {
        let Some(first) = lane.first().and_then(|&id| session.items.get(id)) else {
            continue;
        };
        let column = i64::from(to.col) + i64::from(first.position.col) - pivot_col;
        let col = u32::try_from(column).map_err(|_| ApplyError::ColumnOutOfRange { column })?;
        for &id in lane {
            plan.insert(id, Position::new(to.row, col));
        }
    }

    let unchanged = plan.iter().all(|(&id, &target)| {
        session
            .items
            .get(id)
            .is_some_and(|item| item.position == target)
    });
    if unchanged {
        return Ok(false);
    }

    session.checkpoint();
    let vacated = plan
        .keys()
        .filter_map(|&id| session.items.cell(id))
        .collect::<Vec<_>>();
    session.items.update_all(&session.global_ids, |id, item| {
        if let Some(&target) = plan.get(&id) {
            item.position = target;
        }
    });

    for cell in vacated {
        record_vacated(session, delta, cell);
    }
    for &id in plan.keys() {
        if let Some(cell) = session.items.cell(id) {
            delta.record_added(cell);
        }
    }
    debug!(pivot = %pivot, moved = plan.len(), to = %to, "moved group");
    Ok(true)
}

fn paste(session: &mut EditorSession, cell: CellRef, delta: &mut DeltaBuilder) -> bool {
    let Some(fields) = session.clipboard.clone() else {
        return false;
    };

    match session.items.at(cell) {
        None => {
            session.checkpoint();
            let id = session
                .items
                .add(Item::from_fields(fields, cell.position), &session.global_ids);
            if let Some(placed) = session.items.cell(id) {
                delta.record_added(placed);
            }
            true
        }
        Some(id) => {
            if session
                .items
                .get(id)
                .is_some_and(|item| item.fields() == fields)
            {
                return false;
            }
            session.checkpoint();
            session
                .items
                .update(id, &session.global_ids, |item| item.set_fields(fields));
            record_relocation(session, delta, cell, id);
            true
        }
    }
}

fn update_group_ids(
    session: &mut EditorSession,
    item: ItemId,
    ids: &GlobalIds,
    delta: &mut DeltaBuilder,
) -> Result<bool, ApplyError> {
    if !session.items.contains(item) {
        return Err(ApplyError::NoSuchItem { item });
    }

    let mut plan = HashMap::<ItemId, i64>::new();
    if let Some(group) = session.groups.group_of(&session.items, item) {
        for (period, lane) in group.lanes() {
            if let Some(id_form) = ids.get(period) {
                plan.extend(lane.iter().map(|&id| (id, id_form)));
            }
        }
    }
    let merged = session.global_ids.merge(ids);

    let unchanged = merged == session.global_ids
        && plan.iter().all(|(&id, &id_form)| {
            session
                .items
                .get(id)
                .is_some_and(|item| item.id_form == id_form)
        });
    if unchanged {
        return Ok(false);
    }

    session.checkpoint();
    // A registry change can reclassify items outside the group, so every cell is compared.
    let before = session
        .items
        .ids()
        .filter_map(|id| Some((id, session.items.cell(id)?)))
        .collect::<Vec<_>>();

    session.global_ids = merged;
    session.items.update_all(&session.global_ids, |id, item| {
        if let Some(&id_form) = plan.get(&id) {
            item.id_form = id_form;
        }
    });

    for (id, old_cell) in before {
        match session.items.cell(id) {
            Some(new_cell) if new_cell != old_cell => {
                record_vacated(session, delta, old_cell);
                delta.record_added(new_cell);
            }
            Some(cell) if plan.contains_key(&id) => delta.record_updated(cell),
            _ => {}
        }
    }
    Ok(true)
}

fn clear_all(session: &mut EditorSession, delta: &mut DeltaBuilder) -> bool {
    if session.items.is_empty() {
        return false;
    }
    session.checkpoint();
    session.items.clear();
    delta.record_structural(Structural::Cleared);
    true
}

/// Records a cell an item just left: still shown if a shadowed item now holds it.
fn record_vacated(session: &EditorSession, delta: &mut DeltaBuilder, cell: CellRef) {
    if session.items.at(cell).is_some() {
        delta.record_updated(cell);
    } else {
        delta.record_removed(cell);
    }
}

/// Records an in-place edit of `id`, which may have moved it to another period table.
fn record_relocation(
    session: &EditorSession,
    delta: &mut DeltaBuilder,
    before: CellRef,
    id: ItemId,
) {
    match session.items.cell(id) {
        Some(after) if after == before => delta.record_updated(after),
        Some(after) => {
            record_vacated(session, delta, before);
            delta.record_added(after);
        }
        None => record_vacated(session, delta, before),
    }
}
