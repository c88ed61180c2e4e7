//! Grid snapshot: the rectangular array of colored cells the engine draws.
//!
//! A [`GridModel`] is supplied by the data layer and is immutable while the
//! engine holds it. Edits never mutate a snapshot in place; they produce a new
//! one (see [`GridModel::with_color`]) that replaces the old reference whole.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid is {actual_x}x{actual_y} but config declares {expected_x}x{expected_y}")]
    DimensionMismatch { expected_x: usize, expected_y: usize, actual_x: usize, actual_y: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("cell ({col}, {row}) is outside the grid")]
    OutOfBounds { col: usize, row: usize },
    #[error("invalid grid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// One grid unit. Identity is `(col_ind, row_ind)`; only the color varies between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub col_ind: usize,
    pub row_ind: usize,
    /// CSS color string, passed to the drawing surface verbatim.
    pub color: String,
}

/// A rectangular, row-major snapshot of cells.
///
/// Every row has the same length, and `rows[i][j]` is the cell with
/// `row_ind == i` and `col_ind == j`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridModel {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl GridModel {
    /// Build a snapshot from row-major colors, assigning each cell its coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RaggedRow`] if any row's length differs from the first row's.
    pub fn from_colors(colors: Vec<Vec<String>>) -> Result<Self, GridError> {
        let width = colors.first().map_or(0, Vec::len);
        let mut rows = Vec::with_capacity(colors.len());
        for (row_ind, row) in colors.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow { row: row_ind, len: row.len(), expected: width });
            }
            rows.push(
                row.into_iter()
                    .enumerate()
                    .map(|(col_ind, color)| Cell { col_ind, row_ind, color })
                    .collect(),
            );
        }
        Ok(Self { rows, width })
    }

    /// Parse the data layer's `string[][]` body.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Json`] on malformed input or [`GridError::RaggedRow`].
    pub fn from_json(raw: &str) -> Result<Self, GridError> {
        let colors: Vec<Vec<String>> = serde_json::from_str(raw)?;
        Self::from_colors(colors)
    }

    /// Width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// All rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Look up a cell by column and row.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Confirm this snapshot has the dimensions the config declares.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::DimensionMismatch`] when either axis differs.
    pub fn check_dimensions(&self, config: &Config) -> Result<(), GridError> {
        if self.width() == config.pixels_amount_x && self.height() == config.pixels_amount_y {
            return Ok(());
        }
        Err(GridError::DimensionMismatch {
            expected_x: config.pixels_amount_x,
            expected_y: config.pixels_amount_y,
            actual_x: self.width(),
            actual_y: self.height(),
        })
    }

    /// A copy of this snapshot with one cell recolored.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if `(col, row)` is not in the grid.
    pub fn with_color(&self, col: usize, row: usize, color: &str) -> Result<Self, GridError> {
        let mut next = self.clone();
        let cell = next
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(GridError::OutOfBounds { col, row })?;
        color.clone_into(&mut cell.color);
        Ok(next)
    }
}
