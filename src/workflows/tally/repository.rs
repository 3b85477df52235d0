use super::domain::{CompetitionSession, JudgeScore};

/// Read-side abstraction over whatever store holds the tournament records,
/// so the standings service can be exercised in isolation.
pub trait ScoreRepository: Send + Sync {
    fn sessions(&self) -> Result<Vec<CompetitionSession>, RepositoryError>;
    fn judge_scores(&self) -> Result<Vec<JudgeScore>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
