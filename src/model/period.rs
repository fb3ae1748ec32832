// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::global_ids::GlobalIds;
use super::item::Item;

/// The reporting period an item belongs to. Derived, never stored on the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Classification order (global-id fallback and label keywords are checked in this order).
    pub const ALL: [Period; 4] = [Period::Day, Period::Week, Period::Month, Period::Year];

    /// Order in which period tables are presented.
    pub const TAB_ORDER: [Period; 4] = [Period::Day, Period::Month, Period::Year, Period::Week];

    pub fn index(self) -> usize {
        match self {
            Self::Day => 0,
            Self::Week => 1,
            Self::Month => 2,
            Self::Year => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// The `tipo_val` tag used by the form-id registry in documents.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Day => "d",
            Self::Week => "s",
            Self::Month => "m",
            Self::Year => "a",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "d" => Some(Self::Day),
            "s" => Some(Self::Week),
            "m" => Some(Self::Month),
            "a" => Some(Self::Year),
            _ => None,
        }
    }

    fn from_code_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "CD" => Some(Self::Day),
            "CS" => Some(Self::Week),
            "CM" => Some(Self::Month),
            "CA" => Some(Self::Year),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period {0:?}")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(Self::Day),
            "week" | "s" => Ok(Self::Week),
            "month" | "m" => Ok(Self::Month),
            "year" | "a" => Ok(Self::Year),
            _ => Err(ParsePeriodError(s.to_owned())),
        }
    }
}

const LABEL_KEYWORDS: [(&str, Period); 5] = [
    ("DIA", Period::Day),
    ("SEMANA", Period::Week),
    ("MES", Period::Month),
    ("AÑO", Period::Year),
    ("ANIO", Period::Year),
];

const LABEL_SUFFIXES: [&str; 5] = [" DIA", " SEMANA", " MES", " AÑO", " ANIO"];

/// Determines the period of `item`: code prefix, then matching global form-id, then label keyword.
pub fn classify(item: &Item, global_ids: &GlobalIds) -> Option<Period> {
    let code = item.code.trim().to_uppercase();
    if let Some(prefix) = code.get(..2) {
        if let Some(period) = Period::from_code_prefix(prefix) {
            return Some(period);
        }
    }

    if let Some(period) = Period::ALL
        .into_iter()
        .find(|&period| global_ids.get(period) == Some(item.id_form))
    {
        return Some(period);
    }

    let label = item.label.to_uppercase();
    LABEL_KEYWORDS
        .iter()
        .find(|(keyword, _)| label.contains(keyword))
        .map(|&(_, period)| period)
}

/// Like [`classify`], defaulting to [`Period::Day`] where a period is structurally required.
pub fn period_or_default(item: &Item, global_ids: &GlobalIds) -> Period {
    classify(item, global_ids).unwrap_or(Period::Day)
}

/// Case-folded, trimmed label with one trailing period-name suffix stripped.
pub fn normalize_label(label: &str) -> String {
    let mut upper = label.trim().to_uppercase();
    if let Some(suffix) = LABEL_SUFFIXES.iter().find(|suffix| upper.ends_with(*suffix)) {
        upper.truncate(upper.len() - suffix.len());
    }
    upper
}
