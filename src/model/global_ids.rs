// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde_json::{Map, Value};

use super::period::Period;

const FORMS_KEY: &str = "formularioC";
const CODE_DATES_KEY: &str = "cod_fechas";
const TAG_KEY: &str = "tipo_val";
const ID_FORM_KEY: &str = "id_form";

/// Per-period default form-ids.
///
/// Used as the classification fallback and surfaced to the user as the editable group ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlobalIds {
    ids: [Option<i64>; 4],
}

impl GlobalIds {
    pub fn get(&self, period: Period) -> Option<i64> {
        self.ids[period.index()]
    }

    pub fn set(&mut self, period: Period, id: Option<i64>) {
        self.ids[period.index()] = id;
    }

    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, Option<i64>)> + '_ {
        Period::ALL.into_iter().map(|period| (period, self.get(period)))
    }

    /// Merges the provided values; `None` keeps the current value rather than clearing it.
    pub fn merge(&self, provided: &GlobalIds) -> GlobalIds {
        let mut merged = *self;
        for (period, id) in provided.iter() {
            if id.is_some() {
                merged.set(period, id);
            }
        }
        merged
    }

    /// Reads the registry out of a raw document.
    ///
    /// Expects `{"formularioC": [{"cod_fechas": [{"tipo_val": "d", "id_form": 1}, ...]}, ...]}`;
    /// any other shape yields all-absent ids.
    pub fn extract(document: &Value) -> GlobalIds {
        let mut ids = GlobalIds::default();
        let Some(entries) = code_dates(document) else {
            return ids;
        };

        for entry in entries.iter().filter_map(Value::as_object) {
            let Some(period) = entry_period(entry) else {
                continue;
            };
            ids.set(period, entry.get(ID_FORM_KEY).and_then(integer_value));
        }
        ids
    }

    /// Writes present values back into the located registry entries.
    ///
    /// Entries with unknown tags and periods without a value are left as they are.
    pub fn apply(&self, document: &mut Value) {
        let Some(entries) = code_dates_mut(document) else {
            return;
        };

        for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
            let Some(period) = entry_period(entry) else {
                continue;
            };
            if let Some(id) = self.get(period) {
                entry.insert(ID_FORM_KEY.to_owned(), Value::from(id));
            }
        }
    }
}

fn entry_period(entry: &Map<String, Value>) -> Option<Period> {
    entry.get(TAG_KEY).and_then(Value::as_str).and_then(Period::from_tag)
}

fn code_dates(document: &Value) -> Option<&Vec<Value>> {
    document
        .as_object()?
        .get(FORMS_KEY)?
        .as_array()?
        .first()?
        .as_object()?
        .get(CODE_DATES_KEY)?
        .as_array()
}

fn code_dates_mut(document: &mut Value) -> Option<&mut Vec<Value>> {
    document
        .as_object_mut()?
        .get_mut(FORMS_KEY)?
        .as_array_mut()?
        .first_mut()?
        .as_object_mut()?
        .get_mut(CODE_DATES_KEY)?
        .as_array_mut()
}

/// Integer view of a JSON scalar: integers, truncated floats, and numeric strings.
pub(crate) fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::GlobalIds;
    use crate::model::Period;

    fn document() -> serde_json::Value {
        json!({
            "formularioC": [{
                "nombre": "cierre",
                "cod_fechas": [
                    {"tipo_val": "d", "id_form": 101},
                    {"tipo_val": "s", "id_form": "102"},
                    {"tipo_val": "m", "id_form": 103},
                    {"tipo_val": "x", "id_form": 999}
                ]
            }]
        })
    }

    #[test]
    fn extract_reads_tagged_entries() {
        let ids = GlobalIds::extract(&document());
        assert_eq!(ids.get(Period::Day), Some(101));
        assert_eq!(ids.get(Period::Week), Some(102));
        assert_eq!(ids.get(Period::Month), Some(103));
        assert_eq!(ids.get(Period::Year), None);
    }

    #[test]
    fn extract_without_registry_shape_is_all_absent() {
        for doc in [json!([]), json!({"datosAG": []}), json!({"formularioC": []}), json!(3)] {
            assert!(GlobalIds::extract(&doc).is_empty());
        }
    }

    #[test]
    fn apply_writes_only_present_values_into_matching_entries() {
        let mut doc = document();
        let mut ids = GlobalIds::default();
        ids.set(Period::Week, Some(202));
        ids.set(Period::Year, Some(404));
        ids.apply(&mut doc);

        let entries = doc["formularioC"][0]["cod_fechas"].as_array().expect("entries");
        assert_eq!(entries[0]["id_form"], json!(101));
        assert_eq!(entries[1]["id_form"], json!(202));
        assert_eq!(entries[2]["id_form"], json!(103));
        assert_eq!(entries[3]["id_form"], json!(999));
        assert_eq!(doc["formularioC"][0]["nombre"], json!("cierre"));
    }

    #[test]
    fn merge_keeps_previous_values_for_blanks() {
        let mut current = GlobalIds::default();
        current.set(Period::Day, Some(1));
        current.set(Period::Month, Some(3));
        let mut provided = GlobalIds::default();
        provided.set(Period::Month, Some(33));
        provided.set(Period::Year, Some(44));

        let merged = current.merge(&provided);
        assert_eq!(merged.get(Period::Day), Some(1));
        assert_eq!(merged.get(Period::Week), None);
        assert_eq!(merged.get(Period::Month), Some(33));
        assert_eq!(merged.get(Period::Year), Some(44));
    }
}
