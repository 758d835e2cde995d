//! League-wide statistics workbook.
//!
//! The season export is a multi-sheet workbook with a fixed layout: three
//! banner rows, a header row, one row per team, and, on sheets with an
//! attacking/defensive pairing, a second banner plus a second block of
//! rows holding the opposition-facing values. The raw cell grids are
//! deserialized as-is and the fixed offsets are applied here, so the
//! analyzer only ever sees typed stat blocks.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Header row index within a sheet grid (rows 0..3 are banner rows).
pub const HEADER_ROW: usize = 3;

/// First data row of the team-perspective block.
pub const FIRST_BLOCK_START: usize = 4;

/// Rows in the team-perspective block (one per team).
pub const FIRST_BLOCK_LEN: usize = 11;

/// Banner row carrying the opposition-facing title.
pub const SECOND_TITLE_ROW: usize = 15;

/// First data row of the opposition-facing block.
pub const SECOND_BLOCK_START: usize = 19;

/// Rows in the opposition-facing block.
pub const SECOND_BLOCK_LEN: usize = 12;

/// One workbook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if !s.trim().is_empty() => Some(s.trim()),
            _ => None,
        }
    }
}

/// A named sheet of raw cells, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetGrid {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

/// The whole season workbook, sheets in workbook order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<SheetGrid>,
}

/// One row of a stat block: the team and its value per column. A `None`
/// value is an empty or non-numeric cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub team: String,
    pub values: Vec<Option<f64>>,
}

/// A titled block of per-team statistics ready for rank analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct StatBlock {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TeamRow>,
}

impl StatBlock {
    /// (team, value) pairs for one column, rows with a numeric value only.
    pub fn column(&self, index: usize) -> Vec<(String, f64)> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.values
                    .get(index)
                    .copied()
                    .flatten()
                    .map(|v| (row.team.clone(), v))
            })
            .collect()
    }
}

impl SheetGrid {
    fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    fn cell_text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).and_then(|c| c.as_text()).map(str::to_string)
    }

    /// Stat column headers; column 0 is the team-name column.
    pub fn columns(&self) -> Vec<String> {
        let Some(header) = self.rows.get(HEADER_ROW) else {
            return Vec::new();
        };
        header
            .iter()
            .skip(1)
            .map(|c| c.as_text().unwrap_or_default().to_string())
            .collect()
    }

    fn block(&self, title: String, start: usize, len: usize) -> StatBlock {
        let columns = self.columns();
        let rows = self
            .rows
            .iter()
            .skip(start)
            .take(len)
            .filter_map(|row| {
                let team = row.first().and_then(|c| c.as_text())?.to_string();
                let values = (1..=columns.len())
                    .map(|i| row.get(i).and_then(|c| c.as_number()))
                    .collect();
                Some(TeamRow { team, values })
            })
            .collect();
        StatBlock { title, columns, rows }
    }

    /// Team-perspective block (paired sheets only): banner title from the
    /// top of the sheet.
    pub fn team_block(&self) -> StatBlock {
        let title = self.cell_text(0, 0).unwrap_or_else(|| self.name.clone());
        self.block(title, FIRST_BLOCK_START, FIRST_BLOCK_LEN)
    }

    /// Opposition-facing block: banner title from the second banner row.
    pub fn opposition_block(&self) -> StatBlock {
        let title = self
            .cell_text(SECOND_TITLE_ROW, 0)
            .unwrap_or_else(|| self.name.clone());
        self.block(title, SECOND_BLOCK_START, SECOND_BLOCK_LEN)
    }
}

impl Workbook {
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
