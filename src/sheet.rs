//! Typed, in-memory model of a single worksheet.
//!
//! Rows and columns are 1-based everywhere in this module, matching the
//! `A1` addressing used when the sheet is written back.

use std::collections::{BTreeMap, BTreeSet};

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};

/// Value held by a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Duration(String),
    Error(String),
    /// Formula source without the leading `=`; its cached result is not kept.
    Formula(String),
}

impl CellValue {
    /// Returns the string if this is a plain text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(n) => CellValue::Number(*n),
            Data::Int(n) => CellValue::Number(*n as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::Error(e) => CellValue::Error(format!("{e:?}")),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(value) if dt.is_datetime() => CellValue::DateTime(value),
                _ => CellValue::Duration(dt.to_string()),
            },
            Data::DateTimeIso(s) => parse_iso_datetime(s)
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::Error(format!("unreadable date {s}"))),
            Data::DurationIso(s) => CellValue::Duration(s.clone()),
        }
    }
}

fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// A worksheet grid plus the set of cells rewritten since it was loaded.
///
/// Bounds never drop below 1×1: an empty sheet still has a first row and a
/// first column.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    cells: BTreeMap<(u32, u32), CellValue>,
    max_row: u32,
    max_column: u32,
    edited: BTreeSet<(u32, u32)>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            cells: BTreeMap::new(),
            max_row: 1,
            max_column: 1,
            edited: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    pub fn max_column(&self) -> u32 {
        self.max_column
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.cells.get(&(row, column))
    }

    /// Stores a value as loaded from disk; the cell is not marked as edited.
    pub fn set(&mut self, row: u32, column: u32, value: CellValue) {
        self.extend_to(row, column);
        if value == CellValue::Empty {
            self.cells.remove(&(row, column));
        } else {
            self.cells.insert((row, column), value);
        }
    }

    /// Replaces a cell and records it for write-back.
    pub fn replace(&mut self, row: u32, column: u32, value: CellValue) {
        self.extend_to(row, column);
        self.cells.insert((row, column), value);
        self.edited.insert((row, column));
    }

    /// Grows the bounds so that `(row, column)` lies inside the sheet.
    pub fn extend_to(&mut self, row: u32, column: u32) {
        self.max_row = self.max_row.max(row);
        self.max_column = self.max_column.max(column);
    }

    /// Cells rewritten through [`Sheet::replace`], in row-major order.
    pub fn edits(&self) -> impl Iterator<Item = (u32, u32, &CellValue)> + '_ {
        self.edited
            .iter()
            .filter_map(|&(row, column)| self.get(row, column).map(|value| (row, column, value)))
    }

    pub fn is_edited(&self) -> bool {
        !self.edited.is_empty()
    }
}

pub fn column_name(mut column: u32) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

pub fn cell_ref(row: u32, column: u32) -> String {
    format!("{}{}", column_name(column), row)
}
