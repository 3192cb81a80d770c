//! Detection of labeled face blocks in a report sheet
//!
//! A block starts at a row whose label cell names a face and runs through
//! every directly following row whose label cell is empty. The scan is a
//! two-state walk (outside a block / inside a block) so that the contiguous
//! run rule lives in exactly one place.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use tracing::trace;

use crate::face::Face;
use crate::grid::Grid;

/// One occurrence of a face's rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    pub face: Face,
    /// First row (the labeled one), 0-based
    pub start_row: u32,
    /// Last row, inclusive
    pub end_row: u32,
}

impl Block {
    pub fn new(face: Face, start_row: u32, end_row: u32) -> Self {
        debug_assert!(start_row <= end_row);
        Self {
            face,
            start_row,
            end_row,
        }
    }

    pub fn rows(&self) -> RangeInclusive<u32> {
        self.start_row..=self.end_row
    }
}

/// Blocks found in one sheet, grouped by face in row order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMap {
    blocks: BTreeMap<Face, Vec<Block>>,
}

impl BlockMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, block: Block) {
        self.blocks.entry(block.face).or_default().push(block);
    }

    /// Blocks for one face; empty when the label never appeared
    pub fn get(&self, face: Face) -> &[Block] {
        self.blocks.get(&face).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, face: Face) -> bool {
        self.blocks.contains_key(&face)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of blocks across all faces
    pub fn len(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }

    /// Concatenate the blocks of several faces, face by face in the given order
    pub fn collect(&self, faces: &[Face]) -> Vec<Block> {
        faces
            .iter()
            .flat_map(|face| self.get(*face).iter().copied())
            .collect()
    }

    /// Iterate over (face, blocks) pairs in face order
    pub fn iter(&self) -> impl Iterator<Item = (Face, &[Block])> {
        self.blocks
            .iter()
            .map(|(face, blocks)| (*face, blocks.as_slice()))
    }
}

#[derive(Debug, Clone, Copy)]
enum Walk {
    Outside,
    Inside { face: Face, start: u32 },
}

/// Scan `label_column` top to bottom and partition it into face blocks.
///
/// Only text cells naming one of `targets` open a block. Numbers and other
/// text never open one, but any non-empty cell ends an open block at the
/// row above it and is then considered as a possible new start.
pub fn find_blocks(grid: &Grid, label_column: u16, targets: &[Face]) -> BlockMap {
    let mut map = BlockMap::new();
    let mut state = Walk::Outside;

    for row in 0..grid.row_count() {
        let cell = grid.get(row, label_column);

        if let Walk::Inside { face, start } = state {
            if cell.is_empty() {
                continue;
            }
            trace!(%face, start, end = row - 1, "closed block");
            map.push(Block::new(face, start, row - 1));
            state = Walk::Outside;
        }

        if let Some(face) = Face::from_cell(cell).filter(|face| targets.contains(face)) {
            state = Walk::Inside { face, start: row };
        }
    }

    if let Walk::Inside { face, start } = state {
        let end = grid.row_count() - 1;
        trace!(%face, start, end, "closed block at end of sheet");
        map.push(Block::new(face, start, end));
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const LABEL: u16 = 2;

    fn labels(cells: &[CellValue]) -> Grid {
        let mut grid = Grid::new();
        for (row, cell) in cells.iter().enumerate() {
            grid.set(row as u32, LABEL, cell.clone());
        }
        grid
    }

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_block_extends_through_empty_rows() {
        let grid = labels(&[
            text("Header"),
            text("Combustion Face"),
            CellValue::Empty,
            CellValue::Empty,
            text("Notes"),
        ]);
        let map = find_blocks(&grid, LABEL, &Face::ALL);
        assert_eq!(
            map.get(Face::CombustionFace),
            &[Block::new(Face::CombustionFace, 1, 3)]
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_adjacent_labels_split_blocks() {
        let grid = labels(&[
            text("Seat Face-1"),
            text("Seat Face-2"),
            CellValue::Empty,
            text(" Fillet-1 "),
        ]);
        let map = find_blocks(&grid, LABEL, &Face::ALL);
        assert_eq!(map.get(Face::SeatFace1), &[Block::new(Face::SeatFace1, 0, 0)]);
        assert_eq!(map.get(Face::SeatFace2), &[Block::new(Face::SeatFace2, 1, 2)]);
        assert_eq!(map.get(Face::Fillet1), &[Block::new(Face::Fillet1, 3, 3)]);
    }

    #[test]
    fn test_numeric_label_terminates_but_never_starts() {
        let grid = labels(&[
            text("Fillet-2"),
            CellValue::Empty,
            CellValue::Number(7.0),
            CellValue::Empty,
        ]);
        let map = find_blocks(&grid, LABEL, &Face::ALL);
        assert_eq!(map.get(Face::Fillet2), &[Block::new(Face::Fillet2, 0, 1)]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_recurring_label_keeps_every_block() {
        let grid = labels(&[
            text("Combustion Face"),
            CellValue::Empty,
            text("other"),
            text("Combustion Face"),
        ]);
        let map = find_blocks(&grid, LABEL, &Face::ALL);
        assert_eq!(
            map.get(Face::CombustionFace),
            &[
                Block::new(Face::CombustionFace, 0, 1),
                Block::new(Face::CombustionFace, 3, 3),
            ]
        );
    }

    #[test]
    fn test_trailing_blank_rows_belong_to_last_block() {
        let mut grid = labels(&[text("Seat Face-1")]);
        grid.set(4, 6, 99.0);
        let map = find_blocks(&grid, LABEL, &Face::ALL);
        assert_eq!(map.get(Face::SeatFace1), &[Block::new(Face::SeatFace1, 0, 4)]);
    }

    #[test]
    fn test_untargeted_faces_are_plain_text() {
        let grid = labels(&[text("Combustion Face"), text("Fillet-1"), CellValue::Empty]);
        let map = find_blocks(&grid, LABEL, &[Face::CombustionFace]);
        assert_eq!(
            map.get(Face::CombustionFace),
            &[Block::new(Face::CombustionFace, 0, 0)]
        );
        assert!(!map.contains(Face::Fillet1));
    }

    #[test]
    fn test_no_labels_no_blocks() {
        let grid = labels(&[text("a"), CellValue::Empty, CellValue::Number(1.0)]);
        assert!(find_blocks(&grid, LABEL, &Face::ALL).is_empty());
        assert!(find_blocks(&Grid::new(), LABEL, &Face::ALL).is_empty());
    }

    #[test]
    fn test_collect_orders_by_face_argument() {
        let grid = labels(&[text("Seat Face-2"), text("Seat Face-1")]);
        let map = find_blocks(&grid, LABEL, &Face::ALL);
        let rows: Vec<u32> = map
            .collect(&[Face::SeatFace1, Face::SeatFace2])
            .iter()
            .map(|b| b.start_row)
            .collect();
        assert_eq!(rows, vec![1, 0]);
    }

    fn label_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            4 => Just(CellValue::Empty),
            2 => prop::sample::select(Face::ALL.to_vec())
                .prop_map(|face| CellValue::text(face.label())),
            1 => Just(CellValue::text("Remarks")),
            1 => (0.0f64..500.0).prop_map(CellValue::Number),
        ]
    }

    proptest! {
        #[test]
        fn prop_blocks_are_disjoint_maximal_runs(cells in prop::collection::vec(label_cell(), 0..40)) {
            let grid = labels(&cells);
            let map = find_blocks(&grid, LABEL, &Face::ALL);

            let mut all = map.collect(&Face::ALL);
            all.sort_by_key(|b| b.start_row);
            for pair in all.windows(2) {
                prop_assert!(pair[0].end_row < pair[1].start_row);
            }

            for block in &all {
                prop_assert_eq!(Face::from_cell(&cells[block.start_row as usize]), Some(block.face));
                for row in block.start_row + 1..=block.end_row {
                    prop_assert!(cells[row as usize].is_empty());
                }
                let next = block.end_row as usize + 1;
                prop_assert!(next == cells.len() || !cells[next].is_empty());
            }

            for (row, cell) in cells.iter().enumerate() {
                let starts = all.iter().any(|b| b.start_row as usize == row);
                prop_assert_eq!(Face::from_cell(cell).is_some(), starts);
            }
        }
    }
}
