//! Rolling face blocks up into the per-report summary

use tracing::debug;

use crate::blocks::{find_blocks, BlockMap};
use crate::cell::CellValue;
use crate::extract::extract_max;
use crate::face::{Face, FaceGroup};
use crate::grid::Grid;
use crate::layout::ExtractionLayout;

/// The values written as one output column
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReportSummary {
    /// Column header, derived from the report file name
    pub label: String,
    pub combustion_max: Option<f64>,
    pub seat_max: Option<f64>,
    pub fillet_max: Option<f64>,
    /// Max of whichever per-face values are present
    pub combined_max: Option<f64>,
    /// Peak of an independent scan over every face block at once
    pub overall_max: Option<f64>,
    /// Reference column value on the overall peak's row
    pub reference: Option<CellValue>,
}

impl ReportSummary {
    pub fn face_max(&self, group: FaceGroup) -> Option<f64> {
        match group {
            FaceGroup::Combustion => self.combustion_max,
            FaceGroup::Seat => self.seat_max,
            FaceGroup::Fillet => self.fillet_max,
        }
    }

    /// True when no face produced any reading
    pub fn is_empty(&self) -> bool {
        self.overall_max.is_none() && FaceGroup::ALL.iter().all(|g| self.face_max(*g).is_none())
    }
}

/// Find the face blocks of `grid` and summarize them
pub fn summarize(grid: &Grid, layout: &ExtractionLayout, label: &str) -> ReportSummary {
    let blocks = find_blocks(grid, layout.label_column, &Face::ALL);
    summarize_blocks(grid, &blocks, layout, label)
}

/// Summarize already detected blocks.
///
/// A face group without blocks gets no value. The overall peak is a separate
/// scan over the union of all blocks, so its window fallback is decided for
/// the union as a whole rather than per group.
pub fn summarize_blocks(
    grid: &Grid,
    blocks: &BlockMap,
    layout: &ExtractionLayout,
    label: &str,
) -> ReportSummary {
    let group_max = |group: FaceGroup| {
        let ranges = blocks.collect(group.faces());
        if ranges.is_empty() {
            None
        } else {
            extract_max(grid, &ranges, layout).value
        }
    };

    let combustion_max = group_max(FaceGroup::Combustion);
    let seat_max = group_max(FaceGroup::Seat);
    let fillet_max = group_max(FaceGroup::Fillet);
    let combined_max = [combustion_max, seat_max, fillet_max]
        .into_iter()
        .flatten()
        .reduce(f64::max);

    let overall = extract_max(grid, &blocks.collect(&Face::ALL), layout);

    let summary = ReportSummary {
        label: label.to_string(),
        combustion_max,
        seat_max,
        fillet_max,
        combined_max,
        overall_max: overall.value,
        reference: overall.reference,
    };
    debug!(?summary, blocks = blocks.len(), "summarized report sheet");
    summary
}
