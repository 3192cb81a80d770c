//! Cell-related types
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "D12")

mod address;
mod value;

pub use address::CellAddress;
pub use value::CellValue;
