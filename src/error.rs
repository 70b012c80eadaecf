use thiserror::Error;

/// Errors surfaced by the matching engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Missing entity or keyword, or an entity the scorer cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One candidate in a scan could not be scored; the scan carries on without it
    #[error("Failed to score candidate {candidate_id}: {reason}")]
    CandidateScoring {
        candidate_id: String,
        reason: String,
    },
}

impl MatchError {
    pub(crate) fn candidate(candidate_id: &str, source: MatchError) -> Self {
        MatchError::CandidateScoring {
            candidate_id: candidate_id.to_string(),
            reason: source.to_string(),
        }
    }
}
