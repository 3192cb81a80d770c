//! Fixed positions used when reading report sheets and writing summary sheets
//!
//! All indices are 0-based. The defaults encode the report convention: face
//! labels in column C, a reference tag in column D, readings in E..L (E..J on
//! narrower reports), and a summary column layout of header row 4 followed by
//! five metric rows starting at column B.

use std::ops::Range;

use crate::error::{Error, Result};
use crate::face::FaceGroup;

/// A contiguous run of columns scanned for readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWindow {
    /// First column of the window
    pub start: u16,
    /// Number of columns
    pub width: u16,
}

impl ColumnWindow {
    pub const fn new(start: u16, width: u16) -> Self {
        Self { start, width }
    }

    /// Column indices covered by the window
    pub fn columns(&self) -> Range<u16> {
        self.start..self.start.saturating_add(self.width)
    }
}

/// Where a report sheet keeps its labels, reference tags and readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLayout {
    /// Column holding face labels
    pub label_column: u16,
    /// Column whose value on the peak row is reported alongside the peak
    pub reference_column: u16,
    /// Columns scanned first
    pub primary: ColumnWindow,
    /// Columns scanned when the primary window holds no numbers at all
    pub fallback: ColumnWindow,
}

impl ExtractionLayout {
    /// Derive the standard offsets from a label column: reference one to the
    /// right, readings starting two to the right.
    pub const fn from_label_column(label_column: u16) -> Self {
        Self {
            label_column,
            reference_column: label_column + 1,
            primary: ColumnWindow::new(label_column + 2, 8),
            fallback: ColumnWindow::new(label_column + 2, 6),
        }
    }
}

impl Default for ExtractionLayout {
    fn default() -> Self {
        Self::from_label_column(2)
    }
}

/// Row and column positions of a compiled summary sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLayout {
    /// Row holding the report label
    pub header_row: u32,
    pub combustion_row: u32,
    pub seat_row: u32,
    pub fillet_row: u32,
    /// Row holding the max of the per-face metrics
    pub combined_row: u32,
    /// Row holding the reference value of the overall peak
    pub reference_row: u32,
    /// First column that may receive a report
    pub first_column: u16,
}

impl SummaryLayout {
    /// Place the header at `header_row` with the five metric rows directly below
    pub const fn starting_at(header_row: u32, first_column: u16) -> Self {
        Self {
            header_row,
            combustion_row: header_row + 1,
            seat_row: header_row + 2,
            fillet_row: header_row + 3,
            combined_row: header_row + 4,
            reference_row: header_row + 5,
            first_column,
        }
    }

    /// The row a per-face metric is written to
    pub const fn metric_row(&self, group: FaceGroup) -> u32 {
        match group {
            FaceGroup::Combustion => self.combustion_row,
            FaceGroup::Seat => self.seat_row,
            FaceGroup::Fillet => self.fillet_row,
        }
    }

    /// All six rows, top to bottom as written
    pub const fn rows(&self) -> [u32; 6] {
        [
            self.header_row,
            self.combustion_row,
            self.seat_row,
            self.fillet_row,
            self.combined_row,
            self.reference_row,
        ]
    }

    /// Reject layouts where two outputs would land in the same row
    pub fn validate(&self) -> Result<()> {
        let rows = self.rows();
        for (i, row) in rows.iter().enumerate() {
            if rows[i + 1..].contains(row) {
                return Err(Error::InvalidLayout(format!(
                    "row {} is used for more than one summary value",
                    row + 1
                )));
            }
        }
        Ok(())
    }
}

impl Default for SummaryLayout {
    fn default() -> Self {
        Self::starting_at(3, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extraction_layout() {
        let layout = ExtractionLayout::default();
        assert_eq!(layout.label_column, 2);
        assert_eq!(layout.reference_column, 3);
        assert_eq!(layout.primary.columns(), 4..12);
        assert_eq!(layout.fallback.columns(), 4..10);
    }

    #[test]
    fn test_default_summary_layout() {
        let layout = SummaryLayout::default();
        assert_eq!(layout.rows(), [3, 4, 5, 6, 7, 8]);
        assert_eq!(layout.first_column, 1);
        assert_eq!(layout.metric_row(FaceGroup::Seat), 5);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_colliding_rows() {
        let layout = SummaryLayout {
            reference_row: 3,
            ..SummaryLayout::default()
        };
        assert!(matches!(layout.validate(), Err(Error::InvalidLayout(_))));
    }
}
