use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::aggregate;
use super::domain::{ClassGroup, CompetitionSession, JudgeScore, SessionId};
use super::repository::{RepositoryError, ScoreRepository};
use super::rubric::RubricConfig;
use super::standings::views::{
    ChampionBoardView, ChampionEntryView, CombinedEntryView, SessionScoreView, StandingEntryView,
};
use super::standings::{rank_standings, ChampionStanding, StandingsEngine, StandingsFilter};

/// Facade composing the retrieval collaborator with the standings engine.
///
/// Every operation recomputes from a fresh repository snapshot; nothing is
/// cached between calls.
pub struct StandingsService<R> {
    repository: Arc<R>,
    engine: StandingsEngine,
}

impl<R> StandingsService<R>
where
    R: ScoreRepository + 'static,
{
    pub fn new(repository: Arc<R>, rubric: RubricConfig) -> Self {
        Self {
            repository,
            engine: StandingsEngine::new(rubric),
        }
    }

    fn snapshot(
        &self,
    ) -> Result<(Vec<CompetitionSession>, HashMap<SessionId, Vec<JudgeScore>>), StandingsServiceError>
    {
        let sessions = self.repository.sessions()?;
        let mut scores_by_session: HashMap<SessionId, Vec<JudgeScore>> = HashMap::new();
        for score in self.repository.judge_scores()? {
            scores_by_session
                .entry(score.session_id.clone())
                .or_default()
                .push(score);
        }
        debug!(
            sessions = sessions.len(),
            panels = scores_by_session.len(),
            "snapshot loaded"
        );
        Ok((sessions, scores_by_session))
    }

    /// Ranked standings for the requested scope.
    pub fn standings(
        &self,
        filter: &StandingsFilter,
    ) -> Result<Vec<StandingEntryView>, StandingsServiceError> {
        let (sessions, scores_by_session) = self.snapshot()?;
        let standings = rank_standings(&sessions, &scores_by_session, filter);
        Ok(standings.iter().map(|entry| entry.to_view()).collect())
    }

    /// Overall-champion board for one class group.
    pub fn champion(
        &self,
        class_group: ClassGroup,
    ) -> Result<ChampionBoardView, StandingsServiceError> {
        let (sessions, scores_by_session) = self.snapshot()?;
        let entries: Vec<ChampionEntryView> = self
            .engine
            .champion(&sessions, &scores_by_session, class_group)
            .iter()
            .map(ChampionStanding::to_view)
            .collect();

        Ok(ChampionBoardView {
            class_group,
            class_group_label: class_group.label(),
            expected_sessions: self.engine.rubric().expected_session_count(),
            entries,
        })
    }

    /// Joint Putra+Putri champion board.
    pub fn combined_champion(&self) -> Result<Vec<CombinedEntryView>, StandingsServiceError> {
        let (sessions, scores_by_session) = self.snapshot()?;
        Ok(self
            .engine
            .combined_champion(&sessions, &scores_by_session)
            .iter()
            .map(|entry| entry.to_view())
            .collect())
    }

    /// Aggregation breakdown for one session, for dashboard transparency.
    pub fn session_breakdown(
        &self,
        session_id: &SessionId,
    ) -> Result<SessionScoreView, StandingsServiceError> {
        let session = self
            .repository
            .sessions()?
            .into_iter()
            .find(|session| session.id == *session_id)
            .ok_or(RepositoryError::NotFound)?;

        let panel: Vec<JudgeScore> = self
            .repository
            .judge_scores()?
            .into_iter()
            .filter(|score| score.session_id == *session_id)
            .collect();

        Ok(SessionScoreView {
            session_id: session.id.0,
            village: session.village.0,
            class_group_label: session.class_group.label(),
            status: session.status.label(),
            scheduled_for: session.scheduled_for,
            breakdown: aggregate::explain(&panel),
        })
    }
}

/// Error raised by the standings service.
#[derive(Debug, thiserror::Error)]
pub enum StandingsServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
