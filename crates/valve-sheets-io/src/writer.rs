//! XLSX writer for compiled output workbooks

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use quick_xml::escape::escape;
use valve_sheets_core::{CellAddress, CellValue, Workbook, Worksheet};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::CodecResult;

static EMPTY: CellValue = CellValue::Empty;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> CodecResult<()> {
        let file = File::create(path.as_ref())?;
        Self::write(workbook, file)?;
        log::debug!(
            "wrote {} sheet(s) to {}",
            workbook.sheet_count(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> CodecResult<()> {
        let mut zip = ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml", STYLES_XML)?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let xml = Self::worksheet_xml(sheet);
            Self::write_part(&mut zip, &format!("xl/worksheets/sheet{}.xml", i + 1), &xml)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        name: &str,
        content: &str,
    ) -> CodecResult<()> {
        zip.start_file(name, SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> CodecResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");
        Self::write_part(zip, "[Content_Types].xml", &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut ZipWriter<W>) -> CodecResult<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
        Self::write_part(zip, "_rels/.rels", content)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> CodecResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );
        Self::write_part(zip, "xl/workbook.xml", &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut ZipWriter<W>,
        workbook: &Workbook,
    ) -> CodecResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            workbook.sheet_count() + 1
        ));
        Self::write_part(zip, "xl/_rels/workbook.xml.rels", &content)
    }

    /// Render a sheet's non-empty cells and formulas (sparse, row-major)
    fn worksheet_xml(sheet: &Worksheet) -> String {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        let mut cells: BTreeMap<(u32, u16), (&CellValue, Option<&str>)> = sheet
            .grid()
            .iter_cells()
            .map(|(row, col, value)| ((row, col), (value, None)))
            .collect();
        for (row, col, formula) in sheet.formulas() {
            cells.entry((row, col)).or_insert((&EMPTY, None)).1 = Some(formula);
        }

        let mut current_row: Option<u32> = None;
        for ((row, col), (value, formula)) in cells {
            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let Some(cell) = Self::cell_xml(&cell_ref, value, formula) else {
                continue;
            };

            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }
            content.push_str("\n            ");
            content.push_str(&cell);
        }

        if current_row.is_some() {
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>\n</worksheet>");
        content
    }

    /// One `<c>` element. Formulas are written with their cached value.
    ///
    /// Non-finite numbers have no XML representation; such a cell keeps only
    /// its formula, or is left out.
    fn cell_xml(cell_ref: &str, value: &CellValue, formula: Option<&str>) -> Option<String> {
        let f = formula
            .map(|text| format!("<f>{}</f>", escape(text)))
            .unwrap_or_default();

        let xml = match value {
            CellValue::Number(n) if n.is_finite() => {
                format!("<c r=\"{}\">{}<v>{}</v></c>", cell_ref, f, n)
            }
            CellValue::Number(n) => {
                log::warn!("{} holds {}, written without a value", cell_ref, n);
                formula?;
                format!("<c r=\"{}\">{}</c>", cell_ref, f)
            }
            CellValue::Text(s) if formula.is_some() => format!(
                "<c r=\"{}\" t=\"str\">{}<v>{}</v></c>",
                cell_ref,
                f,
                escape(s.as_str())
            ),
            CellValue::Text(s) => format!(
                "<c r=\"{}\" t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
                cell_ref,
                escape(s.as_str())
            ),
            CellValue::Boolean(b) => {
                format!("<c r=\"{}\" t=\"b\">{}<v>{}</v></c>", cell_ref, f, u8::from(*b))
            }
            CellValue::Empty => {
                formula?;
                format!("<c r=\"{}\">{}</c>", cell_ref, f)
            }
        };
        Some(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_sheet_names_are_escaped() {
        let mut workbook = Workbook::empty();
        workbook.add_worksheet_with_name("A&B <IN>").unwrap();

        let mut buf = Cursor::new(Vec::new());
        XlsxWriter::write(&workbook, &mut buf).unwrap();

        let xml = part(buf.get_ref(), "xl/workbook.xml");
        assert!(xml.contains(r#"name="A&amp;B &lt;IN&gt;""#));
    }

    #[test]
    fn test_cell_encoding() {
        let mut sheet = Worksheet::new("IN Sheet");
        sheet.grid_mut().set(3, 1, "MSIL <1>");
        sheet.grid_mut().set(4, 1, 450.5);
        sheet.grid_mut().set(5, 2, true);

        let xml = XlsxWriter::worksheet_xml(&sheet);
        assert!(xml.contains(r#"<row r="4">"#));
        assert!(xml.contains("<c r=\"B4\" t=\"inlineStr\"><is><t xml:space=\"preserve\">MSIL &lt;1&gt;</t></is></c>"));
        assert!(xml.contains(r#"<c r="B5"><v>450.5</v></c>"#));
        assert!(xml.contains(r#"<c r="C6" t="b"><v>1</v></c>"#));
        assert!(!xml.contains(r#"<row r="1">"#));
    }

    #[test]
    fn test_formulas_keep_cached_values() {
        let mut sheet = Worksheet::new("IN Sheet");
        sheet.grid_mut().set(4, 0, 450.0);
        sheet.set_formula(4, 0, "MAX(B5:Z5)");
        sheet.grid_mut().set(5, 0, "high");
        sheet.set_formula(5, 0, "IF(A5>400,\"high\",\"ok\")");
        sheet.set_formula(6, 0, "A5<A6");

        let xml = XlsxWriter::worksheet_xml(&sheet);
        assert!(xml.contains(r#"<c r="A5"><f>MAX(B5:Z5)</f><v>450</v></c>"#));
        assert!(xml.contains(
            r#"<c r="A6" t="str"><f>IF(A5&gt;400,&quot;high&quot;,&quot;ok&quot;)</f><v>high</v></c>"#
        ));
        assert!(xml.contains(r#"<c r="A7"><f>A5&lt;A6</f></c>"#));
    }

    #[test]
    fn test_non_finite_numbers_are_not_written() {
        let mut sheet = Worksheet::new("IN Sheet");
        sheet.grid_mut().set(0, 0, f64::NAN);
        sheet.grid_mut().set(0, 1, f64::INFINITY);
        sheet.grid_mut().set(1, 0, f64::NEG_INFINITY);
        sheet.set_formula(1, 0, "-1/0");
        sheet.grid_mut().set(2, 0, 1.5);

        let xml = XlsxWriter::worksheet_xml(&sheet);
        assert!(!xml.contains("NaN"));
        assert!(!xml.contains("inf"));
        assert!(!xml.contains(r#"<row r="1">"#));
        assert!(xml.contains(r#"<c r="A2"><f>-1/0</f></c>"#));
        assert!(xml.contains(r#"<c r="A3"><v>1.5</v></c>"#));
    }

    #[test]
    fn test_empty_sheet_has_empty_sheet_data() {
        let xml = XlsxWriter::worksheet_xml(&Worksheet::new("EX Sheet"));
        assert!(xml.contains("<sheetData>\n    </sheetData>"));
    }
}
