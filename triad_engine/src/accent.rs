// Accent placement over an expanded phrase.
//
// Indices are absolute positions in the full note stream (phrase notes
// repeated `repeats` times), zero-based.

use serde::{Deserialize, Serialize};

/// Number of strikes in every triad cell.
pub const NOTES_PER_CELL: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentRule {
    Off,
    /// Accent the first note of every cell.
    CellStart,
    /// Accent every n-th note, counting from 1. `n <= 1` accents nothing.
    EveryNth(u32),
}

impl AccentRule {
    pub fn compute_indices(
        self,
        cell_count: usize,
        notes_per_cell: usize,
        repeats: usize,
    ) -> Vec<usize> {
        let phrase_notes = cell_count * notes_per_cell;
        let total_notes = phrase_notes * repeats;
        match self {
            AccentRule::Off => Vec::new(),
            AccentRule::CellStart => (0..repeats)
                .flat_map(|r| (0..cell_count).map(move |c| r * phrase_notes + c * notes_per_cell))
                .collect(),
            AccentRule::EveryNth(n) if n <= 1 => Vec::new(),
            AccentRule::EveryNth(n) => {
                let n = n as usize;
                (0..total_notes).filter(|i| (i + 1) % n == 0).collect()
            }
        }
    }

    /// Tag used inside pattern identifiers.
    pub fn tag(self) -> String {
        match self {
            AccentRule::Off => "acc=off".to_string(),
            AccentRule::CellStart => "acc=cell".to_string(),
            AccentRule::EveryNth(n) => format!("acc=n{n}"),
        }
    }

    /// Parse the short form used on the command line: `off`, `cell`, or a
    /// bare integer for every-nth.
    pub fn from_flag(s: &str) -> Option<Self> {
        match s {
            "off" => Some(AccentRule::Off),
            "cell" => Some(AccentRule::CellStart),
            other => other.parse().ok().map(AccentRule::EveryNth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_is_empty() {
        assert!(AccentRule::Off.compute_indices(4, NOTES_PER_CELL, 8).is_empty());
    }

    #[test]
    fn every_third_over_two_cells() {
        assert_eq!(AccentRule::EveryNth(3).compute_indices(2, NOTES_PER_CELL, 1), vec![2, 5]);
    }

    #[test]
    fn cell_start_over_three_repeats() {
        assert_eq!(
            AccentRule::CellStart.compute_indices(2, NOTES_PER_CELL, 3),
            vec![0, 3, 6, 9, 12, 15]
        );
    }

    #[test]
    fn every_nth_degenerate_widths_are_empty() {
        for n in [0, 1] {
            for cells in [1, 2, 4, 27] {
                for repeats in [1, 3, 64] {
                    let rule = AccentRule::EveryNth(n);
                    assert!(
                        rule.compute_indices(cells, NOTES_PER_CELL, repeats).is_empty(),
                        "n={n} cells={cells} repeats={repeats}"
                    );
                }
            }
        }
    }

    #[test]
    fn every_nth_indices_are_absolute() {
        // 4 cells x 3 notes x 2 repeats = 24 notes; every 4th lands across
        // the repeat boundary at 11 -> 15.
        let idx = AccentRule::EveryNth(4).compute_indices(4, NOTES_PER_CELL, 2);
        assert_eq!(idx, vec![3, 7, 11, 15, 19, 23]);
    }

    #[test]
    fn tags() {
        assert_eq!(AccentRule::Off.tag(), "acc=off");
        assert_eq!(AccentRule::CellStart.tag(), "acc=cell");
        assert_eq!(AccentRule::EveryNth(5).tag(), "acc=n5");
    }

    #[test]
    fn flag_parsing() {
        assert_eq!(AccentRule::from_flag("cell"), Some(AccentRule::CellStart));
        assert_eq!(AccentRule::from_flag("6"), Some(AccentRule::EveryNth(6)));
        assert_eq!(AccentRule::from_flag("loud"), None);
    }
}
