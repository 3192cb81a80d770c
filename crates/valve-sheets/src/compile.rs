//! Compiling a directory of reports into the summary workbook
//!
//! # Example
//!
//! ```rust,no_run
//! use valve_sheets::{CompileOptions, Compiler};
//!
//! let mut compiler = Compiler::open(CompileOptions::default()).unwrap();
//! let stats = compiler.run().unwrap();
//! compiler.save().unwrap();
//! println!("IN columns written: {}", stats.inbound_columns);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use valve_sheets_core::{
    find_blocks, report_label, select_sheets, summarize_blocks, BlockMap, CellAddress, Direction,
    ExtractionLayout, Face, ReportSummary, SheetSelection, Workbook,
};
use valve_sheets_io::{CodecError, ReportReader, XlsxWriter};

use crate::options::CompileOptions;

/// Result type for compile runs
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Errors that abort a compile run
#[derive(Debug, Error)]
pub enum CompileError {
    /// The report directory could not be listed
    #[error("Cannot list report directory {}: {source}", .path.display())]
    SourceDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A report could not be opened or one of its sheets could not be read
    #[error("Cannot read report {}: {source}", .path.display())]
    Report { path: PathBuf, source: CodecError },

    /// The existing output workbook could not be loaded
    #[error("Cannot load output workbook {}: {source}", .path.display())]
    LoadOutput { path: PathBuf, source: CodecError },

    /// The output workbook could not be written
    #[error("Cannot save output workbook {}: {source}", .path.display())]
    SaveOutput { path: PathBuf, source: CodecError },

    /// Core error (invalid layout, full output sheet, ...)
    #[error(transparent)]
    Core(#[from] valve_sheets_core::Error),
}

/// Counters for a compile run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Reports opened and processed
    pub reports: usize,
    /// Columns appended to the `IN Sheet`
    pub inbound_columns: usize,
    /// Columns appended to the `EX Sheet`
    pub outbound_columns: usize,
}

impl CompileStats {
    pub fn columns(&self, direction: Direction) -> usize {
        match direction {
            Direction::Inbound => self.inbound_columns,
            Direction::Outbound => self.outbound_columns,
        }
    }
}

/// One direction sheet of a report, reduced to its summary
#[derive(Debug, Clone)]
pub struct DirectionAnalysis {
    pub direction: Direction,
    /// Name of the report sheet that was read
    pub sheet: String,
    pub blocks: BlockMap,
    pub summary: ReportSummary,
}

/// Everything extracted from one report
#[derive(Debug, Clone)]
pub struct ReportAnalysis {
    pub path: PathBuf,
    /// Column header derived from the file name
    pub label: String,
    pub selection: SheetSelection,
    /// Directions with a matching sheet, inbound first
    pub directions: Vec<DirectionAnalysis>,
}

/// Open a report and summarize each direction sheet it contains.
///
/// A direction without a matching sheet is skipped, not an error.
pub fn analyze_report(path: &Path, layout: &ExtractionLayout) -> CompileResult<ReportAnalysis> {
    let report_error = |source| CompileError::Report {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let label = report_label(&file_name);

    let mut reader = ReportReader::open(path).map_err(report_error)?;
    let selection = select_sheets(reader.sheet_names());

    let mut directions = Vec::new();
    for direction in Direction::ALL {
        let Some(sheet) = selection.get(direction) else {
            debug!(report = %file_name, %direction, "no matching sheet, direction skipped");
            continue;
        };

        let grid = reader.read_grid(sheet).map_err(report_error)?;
        let blocks = find_blocks(&grid, layout.label_column, &Face::ALL);
        debug!(report = %file_name, sheet, ?blocks, "face blocks");

        let summary = summarize_blocks(&grid, &blocks, layout, &label);
        directions.push(DirectionAnalysis {
            direction,
            sheet: sheet.to_string(),
            blocks,
            summary,
        });
    }

    Ok(ReportAnalysis {
        path: path.to_path_buf(),
        label,
        selection,
        directions,
    })
}

/// Owns the output workbook for the length of a run.
///
/// Columns are appended in memory; nothing reaches disk until
/// [`Compiler::save`].
pub struct Compiler {
    options: CompileOptions,
    workbook: Workbook,
    inbound_sheet: String,
    outbound_sheet: String,
    stats: CompileStats,
}

impl Compiler {
    /// Load the output workbook if it exists, otherwise start a new one.
    ///
    /// Either way the result holds both output sheets.
    pub fn open(options: CompileOptions) -> CompileResult<Self> {
        options.summary.validate()?;

        let existing = options.output.exists();
        let mut workbook = if existing {
            let workbook = ReportReader::open(&options.output)
                .and_then(|mut reader| reader.read_workbook())
                .map_err(|source| CompileError::LoadOutput {
                    path: options.output.clone(),
                    source,
                })?;
            info!(path = %options.output.display(), "existing workbook loaded");
            workbook
        } else {
            info!(path = %options.output.display(), "new workbook created");
            Workbook::empty()
        };

        let mut resolve = |direction: Direction| -> CompileResult<String> {
            let name = direction.output_sheet_name();
            if let Some(stored) = workbook.resolve_sheet_name(name) {
                if stored != name {
                    debug!(sheet = stored, "using existing sheet for {}", name);
                }
                return Ok(stored.to_string());
            }
            if existing {
                warn!(sheet = name, "output workbook has no such sheet, adding it");
            }
            workbook.add_worksheet_with_name(name)?;
            Ok(name.to_string())
        };
        let inbound_sheet = resolve(Direction::Inbound)?;
        let outbound_sheet = resolve(Direction::Outbound)?;

        Ok(Self {
            options,
            workbook,
            inbound_sheet,
            outbound_sheet,
            stats: CompileStats::default(),
        })
    }

    /// Name of the output sheet receiving `direction`, as stored in the workbook
    pub fn output_sheet(&self, direction: Direction) -> &str {
        match direction {
            Direction::Inbound => &self.inbound_sheet,
            Direction::Outbound => &self.outbound_sheet,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// The output workbook as built so far
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn stats(&self) -> CompileStats {
        self.stats
    }

    /// Report files in the source directory, sorted by file name.
    ///
    /// The output workbook is never treated as a report, even when it lives
    /// in the source directory with a matching extension.
    pub fn report_paths(&self) -> CompileResult<Vec<PathBuf>> {
        let dir = &self.options.source_dir;
        let list_error = |source| CompileError::SourceDir {
            path: dir.clone(),
            source,
        };

        let output = fs::canonicalize(&self.options.output).ok();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(list_error)? {
            let path = entry.map_err(list_error)?.path();
            if !path.is_file() || !self.options.accepts(&path) {
                continue;
            }
            if output.is_some() && fs::canonicalize(&path).ok() == output {
                debug!(path = %path.display(), "skipping output workbook");
                continue;
            }
            paths.push(path);
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }

    /// Summarize one report and append a column per direction found
    pub fn process_report(&mut self, path: &Path) -> CompileResult<ReportAnalysis> {
        info!(report = %path.display(), "processing report");
        let analysis = analyze_report(path, &self.options.extraction)?;

        for entry in &analysis.directions {
            let name = match entry.direction {
                Direction::Inbound => &self.inbound_sheet,
                Direction::Outbound => &self.outbound_sheet,
            };
            info!("writing to {}", name);

            let sheet = self
                .workbook
                .worksheet_by_name_mut(name)
                .ok_or_else(|| valve_sheets_core::Error::SheetNotFound(name.clone()))?;
            let col = self.options.summary.append(sheet.grid_mut(), &entry.summary)?;
            debug!(
                sheet = %name,
                column = %CellAddress::column_to_letters(col),
                label = %entry.summary.label,
                "column appended"
            );

            match entry.direction {
                Direction::Inbound => self.stats.inbound_columns += 1,
                Direction::Outbound => self.stats.outbound_columns += 1,
            }
        }

        self.stats.reports += 1;
        Ok(analysis)
    }

    /// Process every report in the source directory, in name order
    pub fn run(&mut self) -> CompileResult<CompileStats> {
        for path in self.report_paths()? {
            self.process_report(&path)?;
        }
        Ok(self.stats)
    }

    /// Write the output workbook
    pub fn save(&self) -> CompileResult<()> {
        XlsxWriter::write_file(&self.workbook, &self.options.output).map_err(|source| {
            CompileError::SaveOutput {
                path: self.options.output.clone(),
                source,
            }
        })?;
        info!(path = %self.options.output.display(), "saved");
        Ok(())
    }
}

/// Open the output, process every report, and save
pub fn compile(options: CompileOptions) -> CompileResult<CompileStats> {
    let mut compiler = Compiler::open(options)?;
    let stats = compiler.run()?;
    compiler.save()?;
    Ok(stats)
}
