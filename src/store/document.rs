// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mapping between loosely shaped JSON documents and items.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::model::global_ids::integer_value;
use crate::model::{FlatItem, GlobalIds, Item, ItemId, ItemStore, Position};

const DATOS_AG_KEY: &str = "datosAG";
const CODE_KEY: &str = "codigo";
const POSITION_KEY: &str = "posicion";
const LABEL_KEY: &str = "label";
const ID_FORM_KEY: &str = "id_form";
const KIND_KEY: &str = "tipo";
const DECIMALS_KEY: &str = "deci";
const VALUE_KEY: &str = "valor";

/// Ways of locating item entries inside a document, tried in [`ExtractionStrategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// `{"datosAG": [[{...}, ...], ...]}`: objects inside the nested arrays.
    DatosAg,
    /// Every object anywhere carrying `codigo`, `posicion` and `label`. Matches are not searched
    /// further.
    KeyedSearch,
}

/// One located entry: its JSON pointer inside the document and its fields.
pub type Entry<'a> = (String, &'a Map<String, Value>);

impl ExtractionStrategy {
    pub const ORDER: [ExtractionStrategy; 2] = [Self::DatosAg, Self::KeyedSearch];

    /// Entries found by this strategy, in document order; `None` when it finds nothing.
    pub fn entries(self, document: &Value) -> Option<Vec<Entry<'_>>> {
        let entries = match self {
            Self::DatosAg => datos_ag_entries(document)?,
            Self::KeyedSearch => {
                let mut out = Vec::new();
                collect_keyed(document, &mut String::new(), &mut out);
                out
            }
        };
        (!entries.is_empty()).then_some(entries)
    }
}

fn datos_ag_entries(document: &Value) -> Option<Vec<Entry<'_>>> {
    let groups = document.as_object()?.get(DATOS_AG_KEY)?.as_array()?;
    let mut out = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        let Some(members) = group.as_array() else {
            continue;
        };
        for (j, member) in members.iter().enumerate() {
            if let Some(object) = member.as_object() {
                out.push((format!("/{DATOS_AG_KEY}/{i}/{j}"), object));
            }
        }
    }
    Some(out)
}

fn is_item_entry(object: &Map<String, Value>) -> bool {
    [CODE_KEY, POSITION_KEY, LABEL_KEY]
        .iter()
        .all(|key| object.contains_key(*key))
}

fn collect_keyed<'a>(value: &'a Value, pointer: &mut String, out: &mut Vec<Entry<'a>>) {
    let mark = pointer.len();
    match value {
        Value::Object(object) if is_item_entry(object) => out.push((pointer.clone(), object)),
        Value::Object(object) => {
            for (key, child) in object {
                pointer.push('/');
                pointer.push_str(&escape_pointer_token(key));
                collect_keyed(child, pointer, out);
                pointer.truncate(mark);
            }
        }
        Value::Array(values) => {
            for (index, child) in values.iter().enumerate() {
                pointer.push('/');
                pointer.push_str(&index.to_string());
                collect_keyed(child, pointer, out);
                pointer.truncate(mark);
            }
        }
        _ => {}
    }
}

/// RFC 6901 escaping, as expected by [`Value::pointer_mut`].
fn escape_pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Items found in `document` by the first strategy that finds any entries, each with the JSON
/// pointer of the entry it came from.
///
/// Entries whose position cannot be parsed are skipped; missing positions use
/// `default_position`.
pub fn extract_entries(document: &Value, default_position: Position) -> Vec<(String, Item)> {
    let Some((strategy, entries)) = ExtractionStrategy::ORDER
        .into_iter()
        .find_map(|strategy| Some((strategy, strategy.entries(document)?)))
    else {
        return Vec::new();
    };

    let items = entries
        .into_iter()
        .filter_map(|(pointer, entry)| Some((pointer, item_from_entry(entry, default_position)?)))
        .collect::<Vec<_>>();
    debug!(?strategy, items = items.len(), "extracted items");
    items
}

/// Items found in `document`, without their source pointers.
pub fn extract_items(document: &Value, default_position: Position) -> Vec<Item> {
    extract_entries(document, default_position)
        .into_iter()
        .map(|(_, item)| item)
        .collect()
}

/// Builds an item from one document entry, coercing loosely typed fields.
pub fn item_from_entry(entry: &Map<String, Value>, default_position: Position) -> Option<Item> {
    let position = match entry.get(POSITION_KEY) {
        None => default_position,
        Some(raw) => match Position::parse(&text_value(raw)) {
            Ok(position) => position,
            Err(err) => {
                let code = entry.get(CODE_KEY).map(text_value).unwrap_or_default();
                debug!(%err, code = %code, "skipping entry");
                return None;
            }
        },
    };

    Some(Item {
        id_form: int_field(entry, ID_FORM_KEY),
        label: text_field(entry, LABEL_KEY),
        code: text_field(entry, CODE_KEY),
        kind: int_field(entry, KIND_KEY),
        decimals: int_field(entry, DECIMALS_KEY),
        position,
        value: text_field(entry, VALUE_KEY),
    })
}

fn int_field(entry: &Map<String, Value>, key: &str) -> i64 {
    entry.get(key).and_then(integer_value).unwrap_or(0)
}

fn text_field(entry: &Map<String, Value>, key: &str) -> String {
    entry.get(key).map(text_value).unwrap_or_default()
}

fn text_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Which document entry each loaded item came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPaths {
    paths: BTreeMap<ItemId, String>,
}

impl EntryPaths {
    pub fn insert(&mut self, id: ItemId, pointer: String) {
        self.paths.insert(id, pointer);
    }

    pub fn get(&self, id: ItemId) -> Option<&str> {
        self.paths.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &str)> + '_ {
        self.paths.iter().map(|(&id, pointer)| (id, pointer.as_str()))
    }
}

/// Loads the items of `document` into a fresh store, remembering where each one came from.
pub fn build_store(
    document: &Value,
    default_position: Position,
    global_ids: &GlobalIds,
) -> (ItemStore, EntryPaths) {
    let mut store = ItemStore::new();
    let mut paths = EntryPaths::default();
    for (pointer, item) in extract_entries(document, default_position) {
        let id = store.add(item, global_ids);
        paths.insert(id, pointer);
    }
    (store, paths)
}

/// A copy of `document` carrying the current global ids and item positions/form ids.
///
/// Each item is written back to the entry it was loaded from: `posicion` always, `id_form` only
/// when the entry already has one. Items created since loading have no entry and are not written;
/// entries of deleted items and everything else pass through untouched.
pub fn inject_items(
    document: &Value,
    items: &ItemStore,
    paths: &EntryPaths,
    global_ids: &GlobalIds,
) -> Value {
    let mut out = document.clone();
    global_ids.apply(&mut out);

    for (id, pointer) in paths.iter() {
        let Some(item) = items.get(id) else {
            continue;
        };
        let Some(entry) = out.pointer_mut(pointer).and_then(Value::as_object_mut) else {
            debug!(%id, pointer, "entry vanished from document");
            continue;
        };
        entry.insert(POSITION_KEY.to_owned(), Value::from(item.position.to_string()));
        if let Some(id_form) = entry.get_mut(ID_FORM_KEY) {
            *id_form = Value::from(item.id_form);
        }
    }
    out
}

/// The flat item list written when there is no original document.
pub fn flat_items(items: &ItemStore) -> Vec<FlatItem> {
    items.iter().map(|(_, item)| FlatItem::from(item)).collect()
}
