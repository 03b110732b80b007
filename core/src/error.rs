use thiserror::Error;

#[derive(Error, Debug)]
pub enum LottoError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caller supplied a combination that breaks a validation rule.
    /// The reason names the specific rule broken. Never retried.
    #[error("Invalid combination: {reason}")]
    InvalidCombination { reason: String },

    /// Uniform rejection sampling ran out of attempts. A property of the
    /// search space, not a caller error, and never silently converted
    /// into a best-effort result.
    #[error("No unique combination found after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },

    /// A raw draw row failed to parse at the ingestion boundary.
    /// Malformed rows are rejected, never included in statistics.
    #[error("Malformed draw row: {reason}")]
    MalformedRow { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LottoError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidCombination {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            reason: reason.into(),
        }
    }
}

pub type LottoResult<T> = Result<T, LottoError>;
