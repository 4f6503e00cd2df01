// Error types for the triad engine.
//
// Only two things can genuinely fail: parsing a triad identity string and
// loading a custom genre table. Everything else the engine absorbs locally
// (degenerate constraints get the fallback phrase, out-of-range tuning is
// clamped), so generation itself never returns an error.

use thiserror::Error;

/// Failure to turn a 3-character identity string back into a `TriadCell`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTriadError {
    /// The input did not contain exactly three characters.
    #[error("triad identity must be 3 characters, got {0}")]
    WrongLength(usize),

    /// A character other than `R`, `L` or `K`.
    #[error("unrecognized limb glyph '{0}'")]
    UnknownLimb(char),
}

/// Root error type for the engine crate.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid triad: {0}")]
    InvalidTriad(#[from] ParseTriadError),

    /// A genre id that is not present in the table being queried.
    #[error("unknown genre '{0}'")]
    UnknownGenre(String),

    /// A custom genre table failed to deserialize.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
