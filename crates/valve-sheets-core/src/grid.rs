//! Dense 2-D cell grid

use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A rectangular-ish sheet of cells addressed by 0-based (row, column).
///
/// Rows may have different lengths; any read outside the populated area
/// yields [`CellValue::Empty`]. The row count is one past the last row that
/// was ever populated, so trailing blank rows inside a sheet still count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from rows of values
    pub fn from_rows<R, V>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Number of rows, counting blank rows before the last populated one
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Width of the widest row
    pub fn column_count(&self) -> u16 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u16
    }

    /// Check if the grid holds no rows at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the value at (row, col), `Empty` when out of range
    pub fn get(&self, row: u32, col: u16) -> &CellValue {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(&EMPTY)
    }

    /// Set the value at (row, col), growing the grid as needed
    pub fn set<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) {
        let (row, col) = (row as usize, col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value.into();
    }

    /// Mark `count` rows as present even if they hold nothing.
    ///
    /// Readers use this so a sheet's trailing blank rows stay part of the
    /// grid, matching the sheet's used range.
    pub fn ensure_rows(&mut self, count: u32) {
        if self.rows.len() < count as usize {
            self.rows.resize_with(count as usize, Vec::new);
        }
    }

    /// Iterate over non-empty cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, value)| !value.is_empty())
                .map(move |(c, value)| (r as u32, c as u16, value))
        })
    }
}
