//! Peak reading extraction over a set of blocks

use crate::blocks::Block;
use crate::cell::CellValue;
use crate::grid::Grid;
use crate::layout::{ColumnWindow, ExtractionLayout};

/// The peak reading of a set of blocks and its reference tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    /// Largest number found, `None` when neither window held a number
    pub value: Option<f64>,
    /// Reference column cell on the peak's row. `Some(Empty)` when that cell
    /// is blank; `None` only together with `value == None`.
    pub reference: Option<CellValue>,
}

impl ExtractionResult {
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }
}

/// Find the largest number in `blocks` across the layout's primary window,
/// falling back to the narrower window when the primary one has no numbers.
///
/// Scan order is block, then row, then column; ties keep the first peak seen.
pub fn extract_max(grid: &Grid, blocks: &[Block], layout: &ExtractionLayout) -> ExtractionResult {
    let peak = scan(grid, blocks, layout.primary).or_else(|| scan(grid, blocks, layout.fallback));

    match peak {
        Some((value, row)) => ExtractionResult {
            value: Some(value),
            reference: Some(grid.get(row, layout.reference_column).clone()),
        },
        None => ExtractionResult::default(),
    }
}

fn scan(grid: &Grid, blocks: &[Block], window: ColumnWindow) -> Option<(f64, u32)> {
    let mut peak: Option<(f64, u32)> = None;
    for block in blocks {
        for row in block.rows() {
            for col in window.columns() {
                let Some(value) = grid.get(row, col).as_number() else {
                    continue;
                };
                if peak.map_or(true, |(best, _)| value > best) {
                    peak = Some((value, row));
                }
            }
        }
    }
    peak
}
