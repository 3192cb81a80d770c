//! Options for a compile run

use std::path::{Path, PathBuf};

use valve_sheets_core::{ExtractionLayout, SummaryLayout};

/// Default directory scanned for reports
pub const DEFAULT_SOURCE_DIR: &str = "source_excels";
/// Default compiled workbook path
pub const DEFAULT_OUTPUT: &str = "main_excel_compiled.xlsx";
/// Default report extension
pub const DEFAULT_EXTENSION: &str = "xls";

/// Options for compiling a directory of reports
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Directory holding the report workbooks (default: `source_excels`)
    pub source_dir: PathBuf,
    /// Compiled workbook, extended if it already exists (default: `main_excel_compiled.xlsx`)
    pub output: PathBuf,
    /// Report file extensions without the dot, matched case-insensitively (default: `xls`)
    pub extensions: Vec<String>,
    /// Where labels, references and readings sit on report sheets
    pub extraction: ExtractionLayout,
    /// Where summary columns go on the output sheets
    pub summary: SummaryLayout,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            extraction: ExtractionLayout::default(),
            summary: SummaryLayout::default(),
        }
    }
}

impl CompileOptions {
    pub fn new(source_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Replace the accepted report extensions. A leading dot is ignored.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn with_extraction(mut self, extraction: ExtractionLayout) -> Self {
        self.extraction = extraction;
        self
    }

    pub fn with_summary(mut self, summary: SummaryLayout) -> Self {
        self.summary = summary;
        self
    }

    /// Check whether `path` has one of the accepted extensions
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CompileOptions::default();
        assert_eq!(options.source_dir, PathBuf::from("source_excels"));
        assert_eq!(options.output, PathBuf::from("main_excel_compiled.xlsx"));
        assert_eq!(options.extensions, vec!["xls".to_string()]);
    }

    #[test]
    fn test_extension_matching() {
        let options = CompileOptions::default();
        assert!(options.accepts(Path::new("dir/Unit MSIL A-1.xls")));
        assert!(options.accepts(Path::new("REPORT.XLS")));
        assert!(!options.accepts(Path::new("report.xlsx")));
        assert!(!options.accepts(Path::new("xls")));

        let options = options.with_extensions([".xlsx", "ODS"]);
        assert!(options.accepts(Path::new("a.xlsx")));
        assert!(options.accepts(Path::new("a.ods")));
        assert!(!options.accepts(Path::new("a.xls")));
    }
}
