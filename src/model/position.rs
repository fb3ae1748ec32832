// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cierres-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cierres and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A zero-based grid coordinate, serialized as `"row:col"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parses the `"row:col"` form. Both fields must be non-negative integers.
    pub fn parse(value: &str) -> Result<Self, ParsePositionError> {
        let malformed = || ParsePositionError::MalformedPosition {
            value: value.to_owned(),
        };

        let mut fields = value.split(':');
        let (Some(row), Some(col), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(malformed());
        };

        let row = row.trim().parse::<u32>().map_err(|_| malformed())?;
        let col = col.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok(Self { row, col })
    }

    /// Column letters for display (`A`, `B`, ..., `Z`, `AA`, ...).
    pub fn column_name(&self) -> String {
        column_name(self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("malformed position {value:?} (expected \"row:col\")")]
    MalformedPosition { value: String },
}

/// Bijective base-26 column label: `0 → A`, `25 → Z`, `26 → AA`, `702 → AAA`.
///
/// There is no zero digit, so this is not plain base-26.
pub fn column_name(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(index) + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{column_name, ParsePositionError, Position};

    #[test]
    fn parse_and_display_roundtrip() {
        for (row, col) in [(0, 0), (1, 1), (12, 3), (999, 40_000), (u32::MAX, 7)] {
            let pos = Position::new(row, col);
            assert_eq!(Position::parse(&pos.to_string()), Ok(pos));
        }
    }

    #[test]
    fn parse_tolerates_whitespace_around_fields() {
        assert_eq!(Position::parse(" 4 : 2 "), Ok(Position::new(4, 2)));
    }

    #[rstest]
    #[case("")]
    #[case("3")]
    #[case("1:2:3")]
    #[case("a:1")]
    #[case("1:")]
    #[case("-1:4")]
    #[case("1.5:2")]
    fn parse_rejects_malformed(#[case] raw: &str) {
        assert_eq!(
            Position::parse(raw),
            Err(ParsePositionError::MalformedPosition {
                value: raw.to_owned()
            })
        );
    }

    #[rstest]
    #[case(0, "A")]
    #[case(1, "B")]
    #[case(25, "Z")]
    #[case(26, "AA")]
    #[case(27, "AB")]
    #[case(51, "AZ")]
    #[case(52, "BA")]
    #[case(701, "ZZ")]
    #[case(702, "AAA")]
    fn column_name_is_bijective_base26(#[case] index: u32, #[case] expected: &str) {
        assert_eq!(column_name(index), expected);
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Position::new(3, 9)).expect("serialize");
        assert_eq!(json, "\"3:9\"");
        let back: Position = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Position::new(3, 9));
        assert!(serde_json::from_str::<Position>("\"x\"").is_err());
    }
}
