// Limbs and triad cells: the atomic data of every exercise.
//
// A `TriadCell` is an ordered group of three strikes. Its canonical identity
// is a 3-character string (one glyph per limb, e.g. "RLK"); that string is
// what coverage tracking stores, what pattern identifiers embed, and what
// `FromStr` parses back. Order matters: RLK and LRK are different cells.

use crate::error::ParseTriadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three strike sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Limb {
    RightHand,
    LeftHand,
    Kick,
}

impl Limb {
    pub const ALL: [Limb; 3] = [Limb::RightHand, Limb::LeftHand, Limb::Kick];

    /// Single-character glyph used in identity strings.
    pub fn glyph(self) -> char {
        match self {
            Limb::RightHand => 'R',
            Limb::LeftHand => 'L',
            Limb::Kick => 'K',
        }
    }

    pub fn from_glyph(c: char) -> Result<Self, ParseTriadError> {
        match c {
            'R' => Ok(Limb::RightHand),
            'L' => Ok(Limb::LeftHand),
            'K' => Ok(Limb::Kick),
            other => Err(ParseTriadError::UnknownLimb(other)),
        }
    }
}

/// Which limbs a generated triad may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbScope {
    /// Right and left hand only (2³ = 8 possible cells).
    HandsOnly,
    /// Both hands plus the kick drum (3³ = 27 possible cells).
    HandsAndKick,
}

impl LimbScope {
    /// The limbs eligible for each of a cell's three slots.
    pub fn limbs(self) -> &'static [Limb] {
        match self {
            LimbScope::HandsOnly => &[Limb::RightHand, Limb::LeftHand],
            LimbScope::HandsAndKick => &Limb::ALL,
        }
    }

    /// Short tag used in constraint signatures.
    pub fn tag(self) -> &'static str {
        match self {
            LimbScope::HandsOnly => "hands",
            LimbScope::HandsAndKick => "kick",
        }
    }
}

/// An ordered group of three limb strikes. Serializes as its identity
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TriadCell(pub [Limb; 3]);

impl TriadCell {
    pub fn new(a: Limb, b: Limb, c: Limb) -> Self {
        TriadCell([a, b, c])
    }

    pub fn limbs(&self) -> [Limb; 3] {
        self.0
    }

    /// Canonical 3-character identity, e.g. `"RLK"`.
    pub fn identity(&self) -> String {
        self.0.iter().map(|l| l.glyph()).collect()
    }

    /// Parse an identity string produced by `identity()`.
    pub fn parse(s: &str) -> Result<Self, ParseTriadError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 3 {
            return Err(ParseTriadError::WrongLength(chars.len()));
        }
        Ok(TriadCell([
            Limb::from_glyph(chars[0])?,
            Limb::from_glyph(chars[1])?,
            Limb::from_glyph(chars[2])?,
        ]))
    }

    pub fn contains(&self, limb: Limb) -> bool {
        self.0.contains(&limb)
    }

    /// True if any two of the three positions hold the same limb. Positions
    /// 0 and 2 count even though they are not adjacent.
    pub fn has_double(&self) -> bool {
        let [a, b, c] = self.0;
        a == b || b == c || a == c
    }

    /// True if the kick plays two adjacent strokes (positions 0-1 or 1-2).
    /// A kick on 0 and 2 only is not a kick double.
    pub fn has_kick_double(&self) -> bool {
        let [a, b, c] = self.0;
        b == Limb::Kick && (a == Limb::Kick || c == Limb::Kick)
    }
}

impl fmt::Display for TriadCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in &self.0 {
            write!(f, "{}", limb.glyph())?;
        }
        Ok(())
    }
}

impl From<TriadCell> for String {
    fn from(cell: TriadCell) -> Self {
        cell.identity()
    }
}

impl TryFrom<String> for TriadCell {
    type Error = ParseTriadError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TriadCell::parse(&s)
    }
}

impl FromStr for TriadCell {
    type Err = ParseTriadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriadCell::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Limb::*;
    use super::*;

    #[test]
    fn identity_uses_one_glyph_per_limb() {
        assert_eq!(TriadCell::new(RightHand, LeftHand, Kick).identity(), "RLK");
        assert_eq!(TriadCell::new(Kick, Kick, LeftHand).to_string(), "KKL");
    }

    #[test]
    fn order_matters_for_equality() {
        let rlk = TriadCell::new(RightHand, LeftHand, Kick);
        let lrk = TriadCell::new(LeftHand, RightHand, Kick);
        assert_ne!(rlk, lrk);
        assert_ne!(rlk.identity(), lrk.identity());
    }

    #[test]
    fn parse_inverts_identity() {
        for &a in &Limb::ALL {
            for &b in &Limb::ALL {
                for &c in &Limb::ALL {
                    let cell = TriadCell::new(a, b, c);
                    assert_eq!(TriadCell::parse(&cell.identity()), Ok(cell));
                }
            }
        }
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(TriadCell::parse("RL"), Err(ParseTriadError::WrongLength(2)));
        assert_eq!(TriadCell::parse("RLKR"), Err(ParseTriadError::WrongLength(4)));
        assert_eq!(TriadCell::parse(""), Err(ParseTriadError::WrongLength(0)));
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        assert_eq!(TriadCell::parse("RLX"), Err(ParseTriadError::UnknownLimb('X')));
        // Glyphs are case-sensitive.
        assert_eq!(TriadCell::parse("rlk"), Err(ParseTriadError::UnknownLimb('r')));
    }

    #[test]
    fn doubles_include_outer_pair() {
        assert!(TriadCell::new(RightHand, LeftHand, RightHand).has_double());
        assert!(TriadCell::new(RightHand, RightHand, LeftHand).has_double());
        assert!(!TriadCell::new(RightHand, LeftHand, Kick).has_double());
    }

    #[test]
    fn kick_double_is_adjacent_only() {
        assert!(TriadCell::new(Kick, Kick, RightHand).has_kick_double());
        assert!(TriadCell::new(LeftHand, Kick, Kick).has_kick_double());
        assert!(TriadCell::new(Kick, Kick, Kick).has_kick_double());
        assert!(!TriadCell::new(Kick, RightHand, Kick).has_kick_double());
    }

    #[test]
    fn serializes_as_identity_string() {
        let cell = TriadCell::new(RightHand, LeftHand, Kick);
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, "\"RLK\"");
        let restored: TriadCell = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cell);

        let phrase = vec![cell, TriadCell::new(Kick, LeftHand, RightHand)];
        assert_eq!(serde_json::to_string(&phrase).unwrap(), "[\"RLK\",\"KLR\"]");
    }

    #[test]
    fn deserialize_rejects_bad_identity() {
        assert!(serde_json::from_str::<TriadCell>("\"RLX\"").is_err());
        assert!(serde_json::from_str::<TriadCell>("\"RL\"").is_err());
        let verbose = "[\"right_hand\",\"left_hand\",\"kick\"]";
        assert!(serde_json::from_str::<TriadCell>(verbose).is_err());
    }

    #[test]
    fn scope_limbs() {
        assert_eq!(LimbScope::HandsOnly.limbs(), &[RightHand, LeftHand]);
        assert_eq!(LimbScope::HandsAndKick.limbs().len(), 3);
    }
}
