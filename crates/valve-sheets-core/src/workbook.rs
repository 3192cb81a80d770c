//! Workbook and worksheet types

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::MAX_SHEET_NAME_LEN;

/// A named grid (single sheet in a workbook)
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    name: String,
    grid: Grid,
    /// Formula text (no leading `=`) by (row, col); the grid holds the cached value
    formulas: BTreeMap<(u32, u16), String>,
}

impl Worksheet {
    /// Create a new, empty worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_grid(name, Grid::new())
    }

    /// Wrap an existing grid
    pub fn with_grid<S: Into<String>>(name: S, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
            formulas: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the sheet's cells
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the sheet's cells mutably
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Attach a formula to a cell. A leading `=` is dropped.
    pub fn set_formula<S: AsRef<str>>(&mut self, row: u32, col: u16, formula: S) {
        let text = formula.as_ref();
        let text = text.strip_prefix('=').unwrap_or(text);
        self.formulas.insert((row, col), text.to_string());
    }

    /// Formula of a cell, without the leading `=`
    pub fn formula(&self, row: u32, col: u16) -> Option<&str> {
        self.formulas.get(&(row, col)).map(String::as_str)
    }

    /// Iterate over formula cells in row-major order
    pub fn formulas(&self) -> impl Iterator<Item = (u32, u16, &str)> {
        self.formulas
            .iter()
            .map(|((row, col), text)| (*row, *col, text.as_str()))
    }

    pub fn formula_count(&self) -> usize {
        self.formulas.len()
    }
}

/// An ordered collection of uniquely named worksheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Names of all worksheets, in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.worksheets.iter().map(Worksheet::name).collect()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by exact name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Stored name of the sheet matching `name` case-insensitively, the same
    /// comparison used to reject duplicate names
    pub fn resolve_sheet_name(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.worksheets
            .iter()
            .map(Worksheet::name)
            .find(|existing| existing.to_lowercase() == lower)
    }

    /// Get a mutable worksheet by exact name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new empty worksheet with the given name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    /// Add an existing worksheet to the end of the workbook
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        let lower = name.to_lowercase();
        if self.worksheets.iter().any(|ws| ws.name().to_lowercase() == lower) {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}
