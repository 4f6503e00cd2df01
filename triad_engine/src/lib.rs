// Triad sticking exercise generator.
//
// Generates short drum-sticking exercises built from triads (ordered groups
// of three limb strikes) under playability constraints, and tracks which
// triads a session has already seen so practice works through the whole
// eligible vocabulary before repeating ("coverage mode").
//
// Architecture:
// - limb.rs: Limb, LimbScope, TriadCell (identity string + parse)
// - constraints.rs: GeneratorConstraints predicate, signatures, eligible-set
//   enumeration
// - accent.rs: AccentRule and accent index computation over expanded phrases
// - genre.rs: Subdivision, PhraseType, GenrePreset and the built-in table
// - orchestration.rs: per-limb voice labels for the renderer
// - coverage.rs: CoverageState lifecycle and pure phrase selection
// - pattern.rs: PatternRequest resolution, Pattern, PatternResult, identifiers
// - engine.rs: PatternEngine, the single-owner façade tying it together
// - error.rs: parse and config errors
//
// Deterministic given a seed: all randomness comes from `triad_prng::TriadRng`
// and every set a random pick iterates is ordered.

pub mod accent;
pub mod constraints;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod genre;
pub mod limb;
pub mod orchestration;
pub mod pattern;

pub use accent::AccentRule;
pub use constraints::{EligibleSet, GeneratorConstraints};
pub use coverage::CoverageState;
pub use engine::PatternEngine;
pub use error::{EngineError, EngineResult, ParseTriadError};
pub use genre::{GenrePreset, GenreTable, PhraseType, Subdivision};
pub use limb::{Limb, LimbScope, TriadCell};
pub use pattern::{Pattern, PatternRequest, PatternResult};
