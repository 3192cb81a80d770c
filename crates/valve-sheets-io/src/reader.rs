//! Workbook reader backed by calamine

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use valve_sheets_core::{CellValue, Grid, Workbook, Worksheet};

use crate::error::{CodecError, CodecResult};

/// An open workbook whose sheets are loaded on demand
pub struct ReportReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl ReportReader {
    /// Open a workbook, detecting the format from its extension
    pub fn open<P: AsRef<Path>>(path: P) -> CodecResult<Self> {
        let path = path.as_ref();
        let workbook = open_workbook_auto(path)
            .map_err(|e| CodecError::Workbook(format!("{}: {}", path.display(), e)))?;
        let sheet_names = workbook.sheet_names();
        log::debug!("opened {} with sheets {:?}", path.display(), sheet_names);

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
            sheet_names,
        })
    }

    /// Path the workbook was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Load one sheet's cells
    pub fn read_grid(&mut self, sheet_name: &str) -> CodecResult<Grid> {
        if !self.sheet_names.iter().any(|name| name == sheet_name) {
            return Err(CodecError::SheetNotFound(sheet_name.to_string()));
        }
        let range = self.workbook.worksheet_range(sheet_name).map_err(|e| {
            CodecError::Workbook(format!("{} [{}]: {}", self.path.display(), sheet_name, e))
        })?;
        let grid = grid_from_range(&range);
        log::debug!(
            "loaded sheet '{}' ({} rows x {} columns)",
            sheet_name,
            grid.row_count(),
            grid.column_count()
        );
        Ok(grid)
    }

    /// Load every sheet into a [`Workbook`], formulas included.
    ///
    /// Cells keep their cached values; styles and merged regions are not read.
    pub fn read_workbook(&mut self) -> CodecResult<Workbook> {
        let mut workbook = Workbook::empty();
        for name in self.sheet_names.clone() {
            let grid = self.read_grid(&name)?;
            let mut sheet = Worksheet::with_grid(name.as_str(), grid);

            match self.workbook.worksheet_formula(&name) {
                Ok(formulas) => {
                    for (row, col, text) in absolute_cells(&formulas) {
                        sheet.set_formula(row, col, text);
                    }
                }
                Err(e) => log::warn!(
                    "formulas of '{}' in {} could not be read and will not be kept: {}",
                    name,
                    self.path.display(),
                    e
                ),
            }
            if sheet.formula_count() > 0 {
                log::debug!("sheet '{}' keeps {} formula(s)", name, sheet.formula_count());
            }

            workbook.add_existing_worksheet(sheet)?;
        }
        Ok(workbook)
    }
}

/// Non-empty cells of a calamine range at their absolute sheet position
fn absolute_cells<T>(range: &Range<T>) -> impl Iterator<Item = (u32, u16, &T)>
where
    T: calamine::CellType,
{
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    range.used_cells().map(move |(row, col, value)| {
        let row = start_row + row as u32;
        let col = (start_col as usize + col) as u16;
        (row, col, value)
    })
}

/// Place a calamine range at its absolute sheet position.
///
/// calamine trims leading blank rows and columns; the grid keeps them so
/// fixed column conventions still line up.
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let mut grid = Grid::new();
    let Some((end_row, _)) = range.end() else {
        return grid;
    };

    for (row, col, data) in absolute_cells(range) {
        let value = cell_from_data(data);
        if !value.is_empty() {
            grid.set(row, col, value);
        }
    }
    grid.ensure_rows(end_row + 1);
    grid
}

/// Convert a calamine cell into the core cell model.
///
/// Only `Int` and `Float` become numbers. Empty strings count as empty
/// cells; dates, durations and error values are kept as their text.
pub fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Float(n) => CellValue::Number(*n),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_from_data() {
        assert_eq!(cell_from_data(&Data::Int(42)), CellValue::Number(42.0));
        assert_eq!(cell_from_data(&Data::Float(4.5)), CellValue::Number(4.5));
        assert_eq!(
            cell_from_data(&Data::String("Fillet-1".into())),
            CellValue::text("Fillet-1")
        );
        assert_eq!(cell_from_data(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(cell_from_data(&Data::Bool(true)), CellValue::Boolean(true));
        assert_eq!(
            cell_from_data(&Data::Error(CellErrorType::Div0)),
            CellValue::text("#DIV/0!")
        );
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_grid_from_range_keeps_absolute_positions() {
        let mut range: Range<Data> = Range::new((2, 3), (5, 6));
        range.set_value((2, 3), Data::String("Combustion Face".into()));
        range.set_value((3, 5), Data::Float(312.0));

        let grid = grid_from_range(&range);
        assert_eq!(grid.get(2, 3).as_text(), Some("Combustion Face"));
        assert_eq!(grid.get(3, 5), &CellValue::Number(312.0));
        assert_eq!(grid.row_count(), 6);
        assert!(grid.get(0, 0).is_empty());
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(grid_from_range(&range).is_empty());
    }
}
