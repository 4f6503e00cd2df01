// Genre presets: named bundles of generation defaults plus constraints.
//
// The built-in table is fixed and created once; presets are immutable values.
// A "tuned" variant is just a modified copy (`with_*` helpers take `self` by
// value), so the table entries are never mutated.
//
// Custom tables can be loaded from JSON with the same schema the built-ins
// serialize to, following the JSON-string-in, typed-struct-out pattern used
// for other data-driven tables.

use crate::accent::AccentRule;
use crate::constraints::GeneratorConstraints;
use crate::error::{EngineError, EngineResult};
use crate::limb::LimbScope;
use serde::{Deserialize, Serialize};

/// Rhythmic grid the cells are written on. Carried through to the pattern
/// for the renderer; it does not change how many notes a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subdivision {
    EighthTriplet,
    Sixteenth,
    SixteenthTriplet,
}

impl Subdivision {
    pub fn tag(self) -> &'static str {
        match self {
            Subdivision::EighthTriplet => "t8",
            Subdivision::Sixteenth => "s16",
            Subdivision::SixteenthTriplet => "t16",
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "t8" => Some(Subdivision::EighthTriplet),
            "s16" => Some(Subdivision::Sixteenth),
            "t16" => Some(Subdivision::SixteenthTriplet),
            _ => None,
        }
    }
}

/// Shape of the generated phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseType {
    /// Two distinct cells, A B.
    SingleCell,
    /// Two distinct cells played twice, A B A B.
    TwoCell,
    /// N distinct cells in sequence (chain length).
    Chain,
}

impl PhraseType {
    pub fn tag(self) -> &'static str {
        match self {
            PhraseType::SingleCell => "single",
            PhraseType::TwoCell => "two",
            PhraseType::Chain => "chain",
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s {
            "single" => Some(PhraseType::SingleCell),
            "two" => Some(PhraseType::TwoCell),
            "chain" => Some(PhraseType::Chain),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenrePreset {
    pub id: String,
    pub name: String,
    pub subdivision: Subdivision,
    pub phrase_type: PhraseType,
    pub repeats: u32,
    pub chain_cells: u32,
    pub accent: AccentRule,
    /// Orchestration preset id, see `orchestration.rs`.
    pub orchestration: String,
    pub constraints: GeneratorConstraints,
}

impl GenrePreset {
    pub fn with_constraints(mut self, constraints: GeneratorConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_accent(mut self, accent: AccentRule) -> Self {
        self.accent = accent;
        self
    }

    pub fn with_phrase(mut self, phrase_type: PhraseType, chain_cells: u32) -> Self {
        self.phrase_type = phrase_type;
        self.chain_cells = chain_cells;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreTable {
    presets: Vec<GenrePreset>,
}

impl GenreTable {
    /// The built-in presets, in display order.
    #[rustfmt::skip]
    pub fn builtin() -> Self {
        let kit = |include_doubles, require_kick, allow_kick_doubles| GeneratorConstraints {
            scope: LimbScope::HandsAndKick,
            include_doubles,
            require_kick,
            allow_kick_doubles,
        };
        let preset = |id: &str,
                      name: &str,
                      subdivision,
                      phrase_type,
                      repeats,
                      chain_cells,
                      accent,
                      orchestration: &str,
                      constraints| GenrePreset {
            id: id.to_string(),
            name: name.to_string(),
            subdivision,
            phrase_type,
            repeats,
            chain_cells,
            accent,
            orchestration: orchestration.to_string(),
            constraints,
        };

        use crate::accent::AccentRule::*;
        use crate::genre::PhraseType::*;
        use crate::genre::Subdivision::*;
        GenreTable {
            presets: vec![
                preset("rudiments", "Rudiments", EighthTriplet, SingleCell, 4, 4, CellStart, "snare",
                    GeneratorConstraints::hands_only()),
                preset("rock", "Rock", Sixteenth, TwoCell, 4, 4, EveryNth(4), "kit",
                    kit(false, true, false)),
                preset("funk", "Funk", Sixteenth, Chain, 2, 4, EveryNth(3), "kit",
                    kit(true, true, false)),
                preset("jazz", "Jazz", EighthTriplet, TwoCell, 4, 3, Off, "ride",
                    kit(true, false, false)),
                preset("gospel", "Gospel", SixteenthTriplet, Chain, 2, 6, CellStart, "toms",
                    kit(true, true, true)),
                preset("metal", "Metal", SixteenthTriplet, SingleCell, 8, 4, EveryNth(6), "double-kick",
                    GeneratorConstraints::full_kit()),
            ],
        }
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, id: &str) -> EngineResult<&GenrePreset> {
        self.presets
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::UnknownGenre(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.id.as_str())
    }

    pub fn presets(&self) -> &[GenrePreset] {
        &self.presets
    }
}

impl Default for GenreTable {
    fn default() -> Self {
        GenreTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::EligibleSet;

    #[test]
    fn builtin_ids_are_unique() {
        let table = GenreTable::builtin();
        let mut ids: Vec<&str> = table.ids().collect();
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }

    #[test]
    fn every_builtin_has_cells_to_draw() {
        for preset in GenreTable::builtin().presets() {
            assert!(
                !EligibleSet::enumerate(&preset.constraints).is_empty(),
                "preset {} has an empty eligible set",
                preset.id
            );
        }
    }

    #[test]
    fn tuned_copy_leaves_table_untouched() {
        let table = GenreTable::builtin();
        let rock = table.get("rock").unwrap();
        let tuned = rock.clone().with_accent(AccentRule::Off);
        assert_eq!(tuned.accent, AccentRule::Off);
        assert_eq!(table.get("rock").unwrap().accent, AccentRule::EveryNth(4));
    }

    #[test]
    fn unknown_genre_is_an_error() {
        let table = GenreTable::builtin();
        assert!(matches!(table.get("polka"), Err(EngineError::UnknownGenre(id)) if id == "polka"));
    }

    #[test]
    fn json_round_trip_preserves_table() {
        let table = GenreTable::builtin();
        let json = table.to_json().unwrap();
        assert_eq!(GenreTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(GenreTable::from_json("{\"presets\": 3}"), Err(EngineError::Config(_))));
    }

    #[test]
    fn tag_parsing_inverts_tags() {
        for p in [PhraseType::SingleCell, PhraseType::TwoCell, PhraseType::Chain] {
            assert_eq!(PhraseType::from_tag(p.tag()), Some(p));
        }
        let subdivisions = [
            Subdivision::EighthTriplet,
            Subdivision::Sixteenth,
            Subdivision::SixteenthTriplet,
        ];
        for s in subdivisions {
            assert_eq!(Subdivision::from_tag(s.tag()), Some(s));
        }
    }
}
