//! Picking the temperature sheets out of a report workbook

use std::fmt;

/// Which side of the valve a temperature sheet covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Direction {
    Inbound,
    Outbound,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Inbound, Direction::Outbound];

    /// Name of the compiled output sheet collecting this direction
    pub const fn output_sheet_name(self) -> &'static str {
        match self {
            Direction::Inbound => "IN Sheet",
            Direction::Outbound => "EX Sheet",
        }
    }

    /// Classify a report sheet name, case-insensitively.
    ///
    /// The inbound test runs first, so a name that satisfies both tests
    /// counts as inbound.
    pub fn classify(sheet_name: &str) -> Option<Direction> {
        let lower = sheet_name.to_lowercase();
        if !lower.contains("valve temperature") {
            return None;
        }
        if lower.contains("in") {
            Some(Direction::Inbound)
        } else if lower.contains("ex") {
            Some(Direction::Outbound)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Inbound => "IN",
            Direction::Outbound => "EX",
        })
    }
}

/// The sheet chosen for each direction, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSelection {
    pub inbound: Option<String>,
    pub outbound: Option<String>,
}

impl SheetSelection {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Inbound => self.inbound.as_deref(),
            Direction::Outbound => self.outbound.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inbound.is_none() && self.outbound.is_none()
    }
}

/// Choose at most one sheet per direction. Later matches replace earlier ones.
pub fn select_sheets<I, S>(sheet_names: I) -> SheetSelection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = SheetSelection::default();
    for name in sheet_names {
        let name = name.as_ref();
        match Direction::classify(name) {
            Some(Direction::Inbound) => selection.inbound = Some(name.to_string()),
            Some(Direction::Outbound) => selection.outbound = Some(name.to_string()),
            None => {}
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify() {
        assert_eq!(
            Direction::classify("Valve Temperature IN"),
            Some(Direction::Inbound)
        );
        assert_eq!(
            Direction::classify("VALVE TEMPERATURE - EX"),
            Some(Direction::Outbound)
        );
        assert_eq!(Direction::classify("Valve Temp IN"), None);
        assert_eq!(Direction::classify("Valve Temperature"), None);
        assert_eq!(Direction::classify("Summary"), None);
    }

    #[test]
    fn test_inbound_wins_when_both_markers_present() {
        // "engine" contains "in"
        assert_eq!(
            Direction::classify("Valve Temperature EX engine"),
            Some(Direction::Inbound)
        );
    }

    #[test]
    fn test_select_sheets() {
        let selection = select_sheets(["Cover", "Valve temperature in", "Valve Temperature Ex"]);
        assert_eq!(selection.get(Direction::Inbound), Some("Valve temperature in"));
        assert_eq!(selection.get(Direction::Outbound), Some("Valve Temperature Ex"));
    }

    #[test]
    fn test_last_match_wins() {
        let selection = select_sheets(vec![
            "Valve Temperature IN (old)".to_string(),
            "Valve Temperature IN".to_string(),
        ]);
        assert_eq!(selection.inbound.as_deref(), Some("Valve Temperature IN"));
        assert_eq!(selection.outbound, None);
    }

    #[test]
    fn test_last_match_wins_per_direction() {
        let selection = select_sheets([
            "Valve Temperature EX a",
            "Valve Temperature IN a",
            "Notes",
            "Valve Temperature EX b",
            "Valve Temperature IN b",
            "Valve Temperature EX c",
        ]);
        assert_eq!(selection.get(Direction::Inbound), Some("Valve Temperature IN b"));
        assert_eq!(selection.get(Direction::Outbound), Some("Valve Temperature EX c"));

        let selection = select_sheets(["Valve Temperature EX a", "Valve Temperature EX b"]);
        assert_eq!(selection.inbound, None);
        assert_eq!(selection.outbound.as_deref(), Some("Valve Temperature EX b"));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let selection = select_sheets(["Sheet1", "Sheet2"]);
        assert!(selection.is_empty());
    }
}
