//! # valve-sheets-core
//!
//! Core data structures and extraction logic for compiling valve temperature
//! reports into a summary workbook.
//!
//! This crate provides:
//! - [`CellValue`], [`CellAddress`] and [`Grid`] - the cell model a report sheet is loaded into
//! - [`Workbook`], [`Worksheet`] - named grids, for both input reports and the compiled output
//! - [`select_sheets`] - picks the inbound/outbound temperature sheets of a report
//! - [`find_blocks`] - detects labeled face blocks in a sheet's label column
//! - [`extract_max`] - finds the peak reading inside a set of blocks
//! - [`summarize`] - rolls blocks up into a [`ReportSummary`]
//! - [`report_label`] - derives the column header from a report file name
//! - [`SummaryLayout`] - appends a summary as a new column of an output sheet
//!
//! None of this touches the file system; see `valve-sheets-io` for that.
//!
//! ## Example
//!
//! ```rust
//! use valve_sheets_core::{summarize, CellValue, ExtractionLayout, Grid};
//!
//! let mut grid = Grid::new();
//! grid.set(0, 2, "Combustion Face");
//! grid.set(0, 3, "T-1");
//! grid.set(0, 4, 512.0);
//! grid.set(1, 4, 530.5);
//!
//! let summary = summarize(&grid, &ExtractionLayout::default(), "Unit 7");
//! assert_eq!(summary.combustion_max, Some(530.5));
//! assert_eq!(summary.reference, Some(CellValue::Empty));
//! ```

pub mod aggregate;
pub mod blocks;
pub mod cell;
pub mod error;
pub mod extract;
pub mod face;
pub mod grid;
pub mod label;
pub mod layout;
pub mod selector;
pub mod summary_sheet;
pub mod workbook;

pub use aggregate::{summarize, summarize_blocks, ReportSummary};
pub use blocks::{find_blocks, Block, BlockMap};
pub use cell::{CellAddress, CellValue};
pub use error::{Error, Result};
pub use extract::{extract_max, ExtractionResult};
pub use face::{Face, FaceGroup};
pub use grid::Grid;
pub use label::report_label;
pub use layout::{ColumnWindow, ExtractionLayout, SummaryLayout};
pub use selector::{select_sheets, Direction, SheetSelection};
pub use workbook::{Workbook, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
