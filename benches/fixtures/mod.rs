// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use serde_json::{json, Value};

use cierres::model::EditorSession;
use cierres::ops::ApplyResult;

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// 40 groups, every period present.
    Small,
    /// 400 groups with a shared-code tail.
    Medium,
    /// 2000 groups.
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn groups(self) -> usize {
        match self {
            Self::Small => 40,
            Self::Medium => 400,
            Self::Large => 2000,
        }
    }
}

const PERIODS: [(&str, &str, &str); 4] = [
    ("CD", "Dia", "d"),
    ("CS", "Semana", "s"),
    ("CM", "Mes", "m"),
    ("CA", "Año", "a"),
];

/// A `datosAG` document: one row per group, one column per period, plus a registry.
pub fn document(case: Case) -> Value {
    let groups = case.groups();
    let mut rows = Vec::with_capacity(groups);
    for group in 0..groups {
        let mut row = Vec::with_capacity(PERIODS.len());
        for (col, (prefix, suffix, _)) in PERIODS.iter().enumerate() {
            // Every 50th group reuses its predecessor's code to exercise duplicate flagging.
            let code_index = if group % 50 == 49 { group - 1 } else { group };
            row.push(json!({
                "id_form": 1000 + col,
                "label": format!("Cuenta {group:05} {suffix}"),
                "codigo": format!("{prefix}-{code_index:05}"),
                "tipo": 1,
                "deci": 2,
                "posicion": format!("{group}:{}", col * 2),
                "valor": ""
            }));
        }
        rows.push(Value::Array(row));
    }

    let cod_fechas = PERIODS
        .iter()
        .enumerate()
        .map(|(col, (_, _, tag))| json!({"tipo_val": tag, "id_form": 1000 + col}))
        .collect::<Vec<_>>();

    json!({
        "formularioC": [{"cod_fechas": cod_fechas}],
        "datosAG": rows
    })
}

pub fn session(case: Case) -> EditorSession {
    let mut session = EditorSession::new();
    session.load_document(document(case));
    session
}

pub fn checksum_apply_result(result: &ApplyResult) -> u64 {
    let mut acc = u64::from(result.changed);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.added.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.updated.len() as u64);
    acc = acc
        .wrapping_mul(131)
        .wrapping_add(result.delta.removed.len() as u64);
    acc.wrapping_mul(131)
        .wrapping_add(result.duplicates.len() as u64)
}
