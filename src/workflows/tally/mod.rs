//! Score aggregation and standings for the tournament dashboards.
//!
//! The aggregate and standings modules are pure computation over records
//! supplied by a [`ScoreRepository`]; the service and router expose them to
//! the HTTP surface.

pub mod aggregate;
pub mod domain;
pub mod repository;
pub mod router;
pub mod rubric;
pub mod service;
pub mod standings;

#[cfg(test)]
mod tests;

pub use aggregate::{explain, final_score, ScoreBreakdown, TrimRule};
pub use domain::{
    AgeGroup, Category, ClassGroup, CompetitionSession, JudgeScore, SessionId, SessionStatus,
    StandingKey, Village,
};
pub use repository::{RepositoryError, ScoreRepository};
pub use router::standings_router;
pub use rubric::{CriterionBounds, RubricConfig};
pub use service::{StandingsService, StandingsServiceError};
pub use standings::views::{
    ChampionBoardView, ChampionEntryView, CombinedEntryView, SessionScoreView, StandingEntryView,
};
pub use standings::{
    completed_full_schedule, rank_standings, ChampionStanding, CombinedStanding,
    ParticipantStanding, StandingsEngine, StandingsFilter,
};
