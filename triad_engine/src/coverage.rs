// Coverage tracking and phrase selection.
//
// Coverage mode is sampling without replacement over the eligible set: every
// cell is drawn once before any cell repeats. `CoverageState` remembers the
// not-yet-drawn identities and the constraint signature they were built for.
//
// Lifecycle:
//   fresh (no signature) -> active (remaining non-empty)
//     -> exhausted (remaining empty) -> active (refilled) -> ...
// A signature change at the start of a call discards history immediately,
// so switching constraints (say, adding kick) starts a new cycle. There is
// no terminal state.
//
// `select_phrase` is a pure function of (eligible set, coverage state, shape,
// rng): it takes the state by value and hands back the updated one. The
// engine just owns the current value between calls.
//
// Within one phrase a "banned" set holds the identities already chosen, so
// a phrase never repeats a cell internally as long as the eligible set is
// large enough. When the remaining pool minus banned runs dry mid-phrase,
// remaining is refilled before the pick continues; if even a full pool minus
// banned is empty, that single pick comes from the whole eligible set and is
// not consumed.

use crate::constraints::{EligibleSet, GeneratorConstraints};
use crate::genre::PhraseType;
use crate::limb::TriadCell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use triad_prng::TriadRng;

/// Bounds applied to the chain length before assembly.
pub const MIN_CHAIN_CELLS: usize = 2;
pub const MAX_CHAIN_CELLS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoveragePhase {
    Fresh,
    Active,
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageState {
    remaining: BTreeSet<String>,
    signature: Option<String>,
}

impl CoverageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> &BTreeSet<String> {
        &self.remaining
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn phase(&self) -> CoveragePhase {
        match (&self.signature, self.remaining.is_empty()) {
            (None, _) => CoveragePhase::Fresh,
            (Some(_), false) => CoveragePhase::Active,
            (Some(_), true) => CoveragePhase::Exhausted,
        }
    }

    /// Start-of-call check. Rebuilds from `eligible` when the constraints'
    /// signature differs from the stored one or nothing remains.
    pub fn refreshed(mut self, constraints: &GeneratorConstraints, eligible: &EligibleSet) -> Self {
        let signature = constraints.signature();
        let changed = self.signature.as_deref() != Some(signature.as_str());
        if changed || self.remaining.is_empty() {
            debug!(
                old = ?self.signature,
                new = %signature,
                pool = eligible.len(),
                "rebuilding coverage"
            );
            self.fill_from(eligible);
            self.signature = Some(signature);
        }
        self
    }

    fn fill_from(&mut self, eligible: &EligibleSet) {
        self.remaining = eligible.ids().map(str::to_string).collect();
    }
}

/// Number of cells a phrase type draws before any repetition is applied.
/// `chain_cells` is clamped to `[MIN_CHAIN_CELLS, MAX_CHAIN_CELLS]`.
pub fn picks_for(phrase_type: PhraseType, chain_cells: usize) -> usize {
    match phrase_type {
        PhraseType::SingleCell | PhraseType::TwoCell => 2,
        PhraseType::Chain => chain_cells.clamp(MIN_CHAIN_CELLS, MAX_CHAIN_CELLS),
    }
}

/// Assemble one phrase.
///
/// Returns an empty phrase, with `coverage` unchanged, if `eligible` is
/// empty; the engine substitutes its fallback phrase before ever getting
/// here in that case.
pub fn select_phrase(
    eligible: &EligibleSet,
    mut coverage: CoverageState,
    phrase_type: PhraseType,
    chain_cells: usize,
    coverage_mode: bool,
    rng: &mut TriadRng,
) -> (Vec<TriadCell>, CoverageState) {
    let picks = picks_for(phrase_type, chain_cells);
    let mut banned = BTreeSet::new();
    let mut chosen = Vec::with_capacity(picks);

    for _ in 0..picks {
        let Some(cell) = pick_one(eligible, &mut coverage, &banned, coverage_mode, rng) else {
            return (Vec::new(), coverage);
        };
        banned.insert(cell.identity());
        chosen.push(cell);
    }

    let phrase = match phrase_type {
        PhraseType::TwoCell => {
            let (a, b) = (chosen[0], chosen[1]);
            vec![a, b, a, b]
        }
        PhraseType::SingleCell | PhraseType::Chain => chosen,
    };
    (phrase, coverage)
}

fn pick_one(
    eligible: &EligibleSet,
    coverage: &mut CoverageState,
    banned: &BTreeSet<String>,
    coverage_mode: bool,
    rng: &mut TriadRng,
) -> Option<TriadCell> {
    if !coverage_mode {
        let pool: Vec<&str> = eligible
            .ids()
            .filter(|id| !banned.contains(*id))
            .collect();
        let id = if pool.is_empty() {
            pick_from(eligible.ids(), rng)?
        } else {
            pick_from(pool.into_iter(), rng)?
        };
        return eligible.get(&id);
    }

    if unbanned(&coverage.remaining, banned).next().is_none() {
        debug!(banned = banned.len(), "coverage pool dry mid-phrase, refilling");
        coverage.fill_from(eligible);
    }

    let picked = pick_from(unbanned(&coverage.remaining, banned), rng);
    match picked {
        Some(id) => {
            coverage.remaining.remove(&id);
            eligible.get(&id)
        }
        // Every eligible cell is already in this phrase; reuse one without
        // consuming coverage.
        None => {
            let id = pick_from(eligible.ids(), rng)?;
            eligible.get(&id)
        }
    }
}

fn unbanned<'a>(
    remaining: &'a BTreeSet<String>,
    banned: &'a BTreeSet<String>,
) -> impl Iterator<Item = &'a str> {
    remaining
        .iter()
        .map(String::as_str)
        .filter(move |id| !banned.contains(*id))
}

fn pick_from<'a>(ids: impl Iterator<Item = &'a str>, rng: &mut TriadRng) -> Option<String> {
    let pool: Vec<&str> = ids.collect();
    let i = rng.pick_index(pool.len())?;
    Some(pool[i].to_string())
}
