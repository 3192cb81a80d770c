//! Column headers derived from report file names

/// Marker preceding the unit identifier in report file names
const UNIT_MARKER: &str = "MSIL ";

/// Derive a short column label from a report file name.
///
/// The final extension is dropped. When the name carries the `"MSIL "`
/// marker, the label is the text after it up to the first `_` or `-`;
/// otherwise it is the whole stem. Either way the result is trimmed.
///
/// ```
/// use valve_sheets_core::report_label;
///
/// assert_eq!(report_label("Unit MSIL ABC-1_rest.xls"), "ABC");
/// assert_eq!(report_label("Plain.xls"), "Plain");
/// ```
pub fn report_label(file_name: &str) -> String {
    let stem = strip_extension(file_name);

    match stem.find(UNIT_MARKER) {
        Some(pos) => {
            let rest = &stem[pos + UNIT_MARKER.len()..];
            let end = rest.find(['_', '-']).unwrap_or(rest.len());
            rest[..end].trim().to_string()
        }
        None => stem.trim().to_string(),
    }
}

/// Drop the last `.ext`, leaving dot-files and extension-less names alone
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if file_name[..dot].trim_start_matches('.').is_empty() => file_name,
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_with_either_delimiter() {
        assert_eq!(report_label("Unit MSIL ABC-1_rest.xls"), "ABC");
        assert_eq!(report_label("Unit MSIL XYZ_2.xls"), "XYZ");
        assert_eq!(report_label("Test MSIL  K15B _run3-final.xls"), "K15B");
    }

    #[test]
    fn test_marker_without_delimiter_runs_to_end() {
        assert_eq!(report_label("Report MSIL F8D .xls"), "F8D");
        assert_eq!(report_label("MSIL Z12E.xlsx"), "Z12E");
    }

    #[test]
    fn test_marker_requires_trailing_space() {
        assert_eq!(report_label("MSIL_ABC.xls"), "MSIL_ABC");
        assert_eq!(report_label("msil ABC.xls"), "msil ABC");
    }

    #[test]
    fn test_plain_names() {
        assert_eq!(report_label("Plain.xls"), "Plain");
        assert_eq!(report_label("  spaced name .xls"), "spaced name");
        assert_eq!(report_label("archive.tar.xls"), "archive.tar");
        assert_eq!(report_label("noext"), "noext");
        assert_eq!(report_label(".hidden"), ".hidden");
    }

    #[test]
    fn test_idempotent_without_marker() {
        for name in ["Plain", "unit 7", "A-B_C"] {
            assert_eq!(report_label(&report_label(name)), report_label(name));
        }
    }
}
