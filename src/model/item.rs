// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::period::Period;
use super::position::Position;

/// A labeled form item placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id_form: i64,
    pub label: String,
    pub code: String,
    /// Value type (`tipo` in documents).
    pub kind: i64,
    /// Decimal precision (`deci` in documents).
    pub decimals: i64,
    pub position: Position,
    pub value: String,
}

impl Item {
    /// A freshly typed cell: only label and position are known.
    pub fn with_label(label: impl Into<String>, position: Position) -> Self {
        Self {
            id_form: 0,
            label: label.into(),
            code: String::new(),
            kind: 0,
            decimals: 0,
            position,
            value: String::new(),
        }
    }

    pub fn from_fields(fields: DetailFields, position: Position) -> Self {
        Self {
            id_form: fields.id_form,
            label: fields.label,
            code: fields.code,
            kind: fields.kind,
            decimals: fields.decimals,
            position,
            value: fields.value,
        }
    }

    pub fn fields(&self) -> DetailFields {
        DetailFields {
            label: self.label.clone(),
            code: self.code.clone(),
            id_form: self.id_form,
            kind: self.kind,
            decimals: self.decimals,
            value: self.value.clone(),
        }
    }

    pub fn set_fields(&mut self, fields: DetailFields) {
        self.label = fields.label;
        self.code = fields.code;
        self.id_form = fields.id_form;
        self.kind = fields.kind;
        self.decimals = fields.decimals;
        self.value = fields.value;
    }

    /// Copies the lane-synchronized fields (label, kind, decimals, value) from `fields`.
    pub fn sync_from(&mut self, fields: &DetailFields) {
        self.label.clone_from(&fields.label);
        self.kind = fields.kind;
        self.decimals = fields.decimals;
        self.value.clone_from(&fields.value);
    }
}

/// Everything about an item except its position: the detail-panel and clipboard payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub label: String,
    pub code: String,
    pub id_form: i64,
    pub kind: i64,
    pub decimals: i64,
    pub value: String,
}

impl DetailFields {
    /// Builds fields from raw text inputs; blank or unparseable numbers become 0.
    pub fn from_text(
        label: &str,
        code: &str,
        id_form: &str,
        kind: &str,
        decimals: &str,
        value: &str,
    ) -> Self {
        fn int_or_zero(raw: &str) -> i64 {
            raw.trim().parse().unwrap_or(0)
        }

        Self {
            label: label.to_owned(),
            code: code.to_owned(),
            id_form: int_or_zero(id_form),
            kind: int_or_zero(kind),
            decimals: int_or_zero(decimals),
            value: value.to_owned(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.label.is_empty()
            && self.code.is_empty()
            && self.value.is_empty()
            && self.id_form == 0
            && self.kind == 0
            && self.decimals == 0
    }
}

/// Addresses one cell of one period table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub period: Period,
    pub position: Position,
}

impl CellRef {
    pub const fn new(period: Period, position: Position) -> Self {
        Self { period, position }
    }

    pub const fn at(period: Period, row: u32, col: u32) -> Self {
        Self {
            period,
            position: Position::new(row, col),
        }
    }
}

/// The flat on-disk item shape used when no original document is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatItem {
    pub id_form: i64,
    pub label: String,
    pub codigo: String,
    pub tipo: i64,
    pub deci: i64,
    pub posicion: Position,
    pub valor: String,
}

impl From<&Item> for FlatItem {
    fn from(item: &Item) -> Self {
        Self {
            id_form: item.id_form,
            label: item.label.clone(),
            codigo: item.code.clone(),
            tipo: item.kind,
            deci: item.decimals,
            posicion: item.position,
            valor: item.value.clone(),
        }
    }
}

impl From<FlatItem> for Item {
    fn from(flat: FlatItem) -> Self {
        Self {
            id_form: flat.id_form,
            label: flat.label,
            code: flat.codigo,
            kind: flat.tipo,
            decimals: flat.deci,
            position: flat.posicion,
            value: flat.valor,
        }
    }
}
