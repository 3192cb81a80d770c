//! Valve face names and the groups they roll up into

use std::fmt;

use crate::cell::CellValue;

/// A named region of the valve whose readings appear as a labeled block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Face {
    CombustionFace,
    SeatFace1,
    SeatFace2,
    Fillet1,
    Fillet2,
}

impl Face {
    /// Every face, in the order blocks are combined for the overall scan
    pub const ALL: [Face; 5] = [
        Face::CombustionFace,
        Face::SeatFace1,
        Face::SeatFace2,
        Face::Fillet1,
        Face::Fillet2,
    ];

    /// The label text that marks this face in a report's label column
    pub const fn label(self) -> &'static str {
        match self {
            Face::CombustionFace => "Combustion Face",
            Face::SeatFace1 => "Seat Face-1",
            Face::SeatFace2 => "Seat Face-2",
            Face::Fillet1 => "Fillet-1",
            Face::Fillet2 => "Fillet-2",
        }
    }

    /// Match a label exactly, after trimming surrounding whitespace
    pub fn from_label(text: &str) -> Option<Face> {
        let text = text.trim();
        Face::ALL.into_iter().find(|face| face.label() == text)
    }

    /// Match a label cell. Only text cells can name a face.
    pub fn from_cell(cell: &CellValue) -> Option<Face> {
        match cell {
            CellValue::Text(text) => Face::from_label(text),
            _ => None,
        }
    }

    /// The summary metric this face contributes to
    pub const fn group(self) -> FaceGroup {
        match self {
            Face::CombustionFace => FaceGroup::Combustion,
            Face::SeatFace1 | Face::SeatFace2 => FaceGroup::Seat,
            Face::Fillet1 | Face::Fillet2 => FaceGroup::Fillet,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One per-face metric row of the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceGroup {
    Combustion,
    Seat,
    Fillet,
}

impl FaceGroup {
    pub const ALL: [FaceGroup; 3] = [FaceGroup::Combustion, FaceGroup::Seat, FaceGroup::Fillet];

    /// Member faces, in the order their blocks are concatenated
    pub const fn faces(self) -> &'static [Face] {
        match self {
            FaceGroup::Combustion => &[Face::CombustionFace],
            FaceGroup::Seat => &[Face::SeatFace1, Face::SeatFace2],
            FaceGroup::Fillet => &[Face::Fillet1, Face::Fillet2],
        }
    }

    pub const fn caption(self) -> &'static str {
        match self {
            FaceGroup::Combustion => "Combustion Face",
            FaceGroup::Seat => "Seat Face",
            FaceGroup::Fillet => "Fillet",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_trims_but_matches_exactly() {
        assert_eq!(Face::from_label("  Seat Face-2 "), Some(Face::SeatFace2));
        assert_eq!(Face::from_label("Fillet-1"), Some(Face::Fillet1));
        assert_eq!(Face::from_label("fillet-1"), None);
        assert_eq!(Face::from_label("Seat Face"), None);
        assert_eq!(Face::from_label("Combustion Face 2"), None);
    }

    #[test]
    fn test_from_cell_requires_text() {
        assert_eq!(
            Face::from_cell(&CellValue::text("Combustion Face")),
            Some(Face::CombustionFace)
        );
        assert_eq!(Face::from_cell(&CellValue::Number(1.0)), None);
        assert_eq!(Face::from_cell(&CellValue::Empty), None);
    }

    #[test]
    fn test_groups_cover_every_face_once() {
        let mut covered: Vec<Face> = FaceGroup::ALL
            .iter()
            .flat_map(|g| g.faces().iter().copied())
            .collect();
        covered.sort();
        assert_eq!(covered, Face::ALL.to_vec());
        for face in Face::ALL {
            assert!(face.group().faces().contains(&face));
        }
    }
}
