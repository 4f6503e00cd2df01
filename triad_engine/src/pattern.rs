// Request and result values for pattern generation.
//
// A `PatternRequest` names a genre preset and optionally overrides any of its
// defaults for one call. `resolve()` merges the two and applies the tuning
// bounds; it is pure, so the same request always resolves the same way.
//
// A `Pattern` is built only by the engine and is read-only afterwards. The
// renderer and commentary layers consume it through the accessors here.

use crate::accent::{AccentRule, NOTES_PER_CELL};
use crate::constraints::GeneratorConstraints;
use crate::coverage::{CoverageState, MAX_CHAIN_CELLS, MIN_CHAIN_CELLS};
use crate::genre::{GenrePreset, PhraseType, Subdivision};
use crate::limb::{Limb, TriadCell};
use serde::Serialize;

pub const MIN_REPEATS: u32 = 1;
pub const MAX_REPEATS: u32 = 64;

/// Separator between identifier fields.
const ID_SEPARATOR: &str = "|";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRequest {
    pub genre: GenrePreset,
    pub subdivision: Option<Subdivision>,
    pub phrase_type: Option<PhraseType>,
    pub repeats: Option<u32>,
    pub chain_cells: Option<u32>,
    pub accent: Option<AccentRule>,
    pub orchestration: Option<String>,
    pub coverage_mode: bool,
    pub seed: Option<u64>,
    pub infinite_repeat: bool,
}

impl PatternRequest {
    /// A request that takes every default from `genre`, with coverage mode
    /// off and no seed.
    pub fn new(genre: GenrePreset) -> Self {
        PatternRequest {
            genre,
            subdivision: None,
            phrase_type: None,
            repeats: None,
            chain_cells: None,
            accent: None,
            orchestration: None,
            coverage_mode: false,
            seed: None,
            infinite_repeat: false,
        }
    }

    pub fn with_coverage(mut self, on: bool) -> Self {
        self.coverage_mode = on;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_phrase(mut self, phrase_type: PhraseType) -> Self {
        self.phrase_type = Some(phrase_type);
        self
    }

    pub fn with_chain_cells(mut self, cells: u32) -> Self {
        self.chain_cells = Some(cells);
        self
    }

    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.repeats = Some(repeats);
        self
    }

    pub fn with_accent(mut self, accent: AccentRule) -> Self {
        self.accent = Some(accent);
        self
    }

    /// Merge overrides over the genre defaults and clamp repeats and chain
    /// length into range.
    pub fn resolve(&self) -> ResolvedRequest {
        let g = &self.genre;
        ResolvedRequest {
            genre_id: g.id.clone(),
            subdivision: self.subdivision.unwrap_or(g.subdivision),
            phrase_type: self.phrase_type.unwrap_or(g.phrase_type),
            repeats: self.repeats.unwrap_or(g.repeats).clamp(MIN_REPEATS, MAX_REPEATS),
            chain_cells: (self.chain_cells.unwrap_or(g.chain_cells) as usize)
                .clamp(MIN_CHAIN_CELLS, MAX_CHAIN_CELLS),
            accent: self.accent.unwrap_or(g.accent),
            orchestration: self.orchestration.clone().unwrap_or_else(|| g.orchestration.clone()),
            constraints: g.constraints,
            coverage_mode: self.coverage_mode,
            infinite_repeat: self.infinite_repeat,
        }
    }
}

/// A request with every field decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub genre_id: String,
    pub subdivision: Subdivision,
    pub phrase_type: PhraseType,
    pub repeats: u32,
    pub chain_cells: usize,
    pub accent: AccentRule,
    pub orchestration: String,
    pub constraints: GeneratorConstraints,
    pub coverage_mode: bool,
    pub infinite_repeat: bool,
}

impl ResolvedRequest {
    /// Stable identifier for a phrase generated under these parameters.
    ///
    /// Layout: `genre|phrase|subdivision|x=N|acc=..|orchestration|c1-c2-..`,
    /// with `x=inf` for infinite repeat.
    pub fn identifier(&self, phrase: &[TriadCell]) -> String {
        let repeat = if self.infinite_repeat {
            "x=inf".to_string()
        } else {
            format!("x={}", self.repeats)
        };
        let cells: Vec<String> = phrase.iter().map(TriadCell::identity).collect();
        [
            self.genre_id.clone(),
            self.phrase_type.tag().to_string(),
            self.subdivision.tag().to_string(),
            repeat,
            self.accent.tag(),
            self.orchestration.clone(),
            cells.join("-"),
        ]
        .join(ID_SEPARATOR)
    }
}

/// Strike counts per limb over one pass of the phrase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LimbCounts {
    pub right: usize,
    pub left: usize,
    pub kick: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    id: String,
    genre_id: String,
    subdivision: Subdivision,
    phrase_type: PhraseType,
    repeats: u32,
    infinite_repeat: bool,
    phrase: Vec<TriadCell>,
    accents: Vec<usize>,
    orchestration: String,
}

impl Pattern {
    pub(crate) fn build(resolved: &ResolvedRequest, phrase: Vec<TriadCell>) -> Self {
        let accents = resolved
            .accent
            .compute_indices(phrase.len(), NOTES_PER_CELL, resolved.repeats as usize);
        Pattern {
            id: resolved.identifier(&phrase),
            genre_id: resolved.genre_id.clone(),
            subdivision: resolved.subdivision,
            phrase_type: resolved.phrase_type,
            repeats: resolved.repeats,
            infinite_repeat: resolved.infinite_repeat,
            phrase,
            accents,
            orchestration: resolved.orchestration.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn genre_id(&self) -> &str {
        &self.genre_id
    }

    pub fn subdivision(&self) -> Subdivision {
        self.subdivision
    }

    pub fn phrase_type(&self) -> PhraseType {
        self.phrase_type
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    pub fn infinite_repeat(&self) -> bool {
        self.infinite_repeat
    }

    pub fn phrase(&self) -> &[TriadCell] {
        &self.phrase
    }

    /// Accented note indices into the expanded stream, ascending.
    pub fn accents(&self) -> &[usize] {
        &self.accents
    }

    pub fn orchestration(&self) -> &str {
        &self.orchestration
    }

    pub fn phrase_note_count(&self) -> usize {
        self.phrase.len() * NOTES_PER_CELL
    }

    pub fn total_note_count(&self) -> usize {
        self.phrase_note_count() * self.repeats as usize
    }

    /// The full note stream: the phrase's limbs, repeated.
    pub fn notes(&self) -> Vec<Limb> {
        let one_pass: Vec<Limb> = self.phrase.iter().flat_map(|c| c.limbs()).collect();
        one_pass
            .iter()
            .copied()
            .cycle()
            .take(self.total_note_count())
            .collect()
    }

    pub fn is_accented(&self, index: usize) -> bool {
        self.accents.binary_search(&index).is_ok()
    }

    pub fn limb_counts(&self) -> LimbCounts {
        let mut counts = LimbCounts::default();
        for limb in self.phrase.iter().flat_map(|c| c.limbs()) {
            match limb {
                Limb::RightHand => counts.right += 1,
                Limb::LeftHand => counts.left += 1,
                Limb::Kick => counts.kick += 1,
            }
        }
        counts
    }
}

/// A generated pattern together with the coverage state left behind by the
/// call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternResult {
    pub pattern: Pattern,
    pub coverage: CoverageState,
}
