//! Appending report summaries as columns of a compiled output sheet

use crate::aggregate::ReportSummary;
use crate::cell::CellValue;
use crate::face::FaceGroup;
use crate::grid::Grid;
use crate::layout::SummaryLayout;
use crate::MAX_COLS;

impl SummaryLayout {
    /// First column at or after `first_column` with all six layout rows empty.
    ///
    /// A blank label alone does not free a column: an empty header text
    /// reads back as an empty cell while its metrics are still there.
    pub fn next_free_column(&self, grid: &Grid) -> u16 {
        (self.first_column..MAX_COLS)
            .find(|col| self.rows().iter().all(|row| grid.get(*row, *col).is_empty()))
            .unwrap_or(MAX_COLS)
    }

    /// Write `summary` into the next free column and return that column.
    ///
    /// Missing metrics are written as empty cells, so a report without a
    /// face never shows a zero for it.
    pub fn append(&self, grid: &mut Grid, summary: &ReportSummary) -> crate::Result<u16> {
        let col = self.next_free_column(grid);
        if col >= MAX_COLS {
            return Err(crate::Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }

        grid.set(self.header_row, col, summary.label.as_str());
        for group in FaceGroup::ALL {
            grid.set(self.metric_row(group), col, summary.face_max(group));
        }
        grid.set(self.combined_row, col, summary.combined_max);
        grid.set(
            self.reference_row,
            col,
            summary.reference.clone().unwrap_or(CellValue::Empty),
        );

        Ok(col)
    }
}
