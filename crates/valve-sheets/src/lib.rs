//! # valve-sheets
//!
//! Compiles valve temperature test reports into one summary workbook.
//!
//! Each report workbook holds an inbound ("Valve Temperature IN") and/or an
//! outbound ("Valve Temperature EX") sheet. The face blocks on those sheets
//! are reduced to peak temperatures, and every report becomes one column of
//! the `IN Sheet` / `EX Sheet` in the compiled output.
//!
//! ## Example
//!
//! ```rust,no_run
//! use valve_sheets::prelude::*;
//!
//! let options = CompileOptions::new("source_excels", "main_excel_compiled.xlsx")
//!     .with_extensions(["xls", "xlsx"]);
//! let stats = compile(options).unwrap();
//! println!("{} report(s) compiled", stats.reports);
//! ```

pub mod compile;
pub mod options;
pub mod prelude;

pub use compile::{
    analyze_report, compile, CompileError, CompileResult, CompileStats, Compiler,
    DirectionAnalysis, ReportAnalysis,
};
pub use options::CompileOptions;

// Re-export core types
pub use valve_sheets_core::{
    find_blocks, report_label, select_sheets, summarize, Block, BlockMap, CellAddress, CellValue,
    ColumnWindow, Direction, ExtractionLayout, Face, FaceGroup, Grid, ReportSummary,
    SheetSelection, SummaryLayout, Workbook, Worksheet,
};

// Re-export codecs
pub use valve_sheets_io::{CodecError, ReportReader, XlsxWriter};
