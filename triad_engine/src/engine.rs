// PatternEngine: the stateful façade over selection.
//
// The engine owns one `CoverageState` and a cache of the eligible set for the
// most recent constraints. Each `generate_next` call:
//   1. resolves the request against its genre defaults (clamping tuning),
//   2. rebuilds the eligible set if the constraints changed,
//   3. refreshes coverage (signature change or exhaustion -> rebuild),
//   4. assembles the phrase with `coverage::select_phrase`,
//   5. computes accents and the identifier, and returns the pattern with a
//      snapshot of the coverage state.
//
// Contradictory constraints (empty eligible set) are not an error: the
// fixed fallback phrase is returned and a warning is logged so the
// misconfiguration is still visible.
//
// Not synchronized. One engine per practice session, called sequentially;
// wrap it in a mutex if it must be shared.

use crate::constraints::{EligibleSet, GeneratorConstraints};
use crate::coverage::{self, CoverageState};
use crate::genre::{GenrePreset, GenreTable};
use crate::limb::{Limb, TriadCell};
use crate::pattern::{Pattern, PatternRequest, PatternResult};
use tracing::{trace, warn};
use triad_prng::TriadRng;

/// Alternating singles, returned whenever the constraints admit no cells.
pub const FALLBACK_PHRASE: [TriadCell; 2] = [
    TriadCell([Limb::RightHand, Limb::LeftHand, Limb::RightHand]),
    TriadCell([Limb::LeftHand, Limb::RightHand, Limb::LeftHand]),
];

#[derive(Debug, Clone, Default)]
pub struct PatternEngine {
    genres: GenreTable,
    coverage: CoverageState,
    eligible: Option<(GeneratorConstraints, EligibleSet)>,
}

impl PatternEngine {
    /// An engine over the built-in genre table.
    pub fn new() -> Self {
        Self::with_genres(GenreTable::builtin())
    }

    pub fn with_genres(genres: GenreTable) -> Self {
        PatternEngine {
            genres,
            coverage: CoverageState::new(),
            eligible: None,
        }
    }

    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    /// Convenience lookup returning an owned preset ready for a request.
    pub fn genre(&self, id: &str) -> crate::error::EngineResult<GenrePreset> {
        self.genres.get(id).cloned()
    }

    pub fn coverage(&self) -> &CoverageState {
        &self.coverage
    }

    /// Forget all coverage history.
    pub fn reset_coverage(&mut self) {
        self.coverage = CoverageState::new();
    }

    /// The eligible set for arbitrary constraints, without touching state.
    pub fn eligible_for(constraints: &GeneratorConstraints) -> EligibleSet {
        EligibleSet::enumerate(constraints)
    }

    /// Generate one pattern. Seeds from `request.seed` when present,
    /// otherwise from the clock.
    pub fn generate_next(&mut self, request: &PatternRequest) -> PatternResult {
        let mut rng = match request.seed {
            Some(seed) => TriadRng::new(seed),
            None => TriadRng::from_entropy(),
        };
        self.generate_next_with_rng(request, &mut rng)
    }

    /// Generate one pattern drawing randomness from `rng`.
    pub fn generate_next_with_rng(
        &mut self,
        request: &PatternRequest,
        rng: &mut TriadRng,
    ) -> PatternResult {
        let resolved = request.resolve();
        let constraints = resolved.constraints;

        let PatternEngine {
            coverage: cycle,
            eligible,
            ..
        } = self;
        let eligible = cached_eligible(eligible, &constraints);
        let phrase = if eligible.is_empty() {
            warn!(
                genre = %resolved.genre_id,
                signature = %constraints.signature(),
                "constraints admit no triads, using fallback phrase"
            );
            FALLBACK_PHRASE.to_vec()
        } else {
            let state = std::mem::take(cycle).refreshed(&constraints, eligible);
            let (phrase, state) = coverage::select_phrase(
                eligible,
                state,
                resolved.phrase_type,
                resolved.chain_cells,
                resolved.coverage_mode,
                rng,
            );
            *cycle = state;
            phrase
        };

        let pattern = Pattern::build(&resolved, phrase);
        trace!(id = %pattern.id(), "generated pattern");
        PatternResult {
            pattern,
            coverage: self.coverage.clone(),
        }
    }
}

/// The cached eligible set for `constraints`, enumerated again only when the
/// constraints differ from the cached ones.
fn cached_eligible<'a>(
    cache: &'a mut Option<(GeneratorConstraints, EligibleSet)>,
    constraints: &GeneratorConstraints,
) -> &'a EligibleSet {
    if cache.as_ref().is_some_and(|(cached, _)| cached != constraints) {
        *cache = None;
    }
    let (_, set) =
        cache.get_or_insert_with(|| (*constraints, EligibleSet::enumerate(constraints)));
    set
}
