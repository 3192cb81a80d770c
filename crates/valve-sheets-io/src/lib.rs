//! # valve-sheets-io
//!
//! File formats for valve-sheets.
//!
//! Reports and previously compiled workbooks are read through calamine, so any
//! format it understands (xls, xlsx, xlsm, xlsb, ods) can be loaded into a
//! [`Grid`](valve_sheets_core::Grid). Compiled workbooks are written as XLSX.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::ReportReader;
pub use writer::XlsxWriter;
