//! Prelude module - common imports for valve-sheets users
//!
//! ```rust
//! use valve_sheets::prelude::*;
//! ```

pub use crate::{
    analyze_report,
    compile,
    CellValue,
    CompileError,
    // Orchestration
    CompileOptions,
    CompileResult,
    CompileStats,
    Compiler,
    Direction,
    // Layout configuration
    ExtractionLayout,
    Face,
    FaceGroup,
    Grid,
    ReportSummary,
    SummaryLayout,
    Workbook,
};
