use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::tally::domain::{
    AgeGroup, Category, ClassGroup, CompetitionSession, JudgeScore, SessionId, SessionStatus,
    Village,
};
use crate::workflows::tally::repository::{RepositoryError, ScoreRepository};
use crate::workflows::tally::rubric::RubricConfig;
use crate::workflows::tally::service::StandingsService;

pub(super) fn session(id: &str, village: &str, class_group: ClassGroup) -> CompetitionSession {
    session_in(id, village, class_group, "Remaja", "Tunggal")
}

pub(super) fn session_in(
    id: &str,
    village: &str,
    class_group: ClassGroup,
    age_group: &str,
    category: &str,
) -> CompetitionSession {
    CompetitionSession {
        id: SessionId(id.to_string()),
        village: Village(village.to_string()),
        class_group,
        age_group: AgeGroup(age_group.to_string()),
        category: Category(category.to_string()),
        status: SessionStatus::Completed,
        scheduled_for: NaiveDate::from_ymd_opt(2025, 7, 12).expect("valid date"),
    }
}

pub(super) fn active_session(
    id: &str,
    village: &str,
    class_group: ClassGroup,
) -> CompetitionSession {
    CompetitionSession {
        status: SessionStatus::Active,
        ..session(id, village, class_group)
    }
}

pub(super) fn judge_score(session: &str, judge: &str, total: i32) -> JudgeScore {
    JudgeScore {
        session_id: SessionId(session.to_string()),
        judge_name: judge.to_string(),
        criteria_scores: BTreeMap::new(),
        total_score: total,
    }
}

pub(super) fn panel(session: &str, totals: &[i32]) -> Vec<JudgeScore> {
    totals
        .iter()
        .enumerate()
        .map(|(index, total)| judge_score(session, &format!("judge-{}", index + 1), *total))
        .collect()
}

pub(super) fn scores_map(panels: &[(&str, &[i32])]) -> HashMap<SessionId, Vec<JudgeScore>> {
    panels
        .iter()
        .map(|(session, totals)| (SessionId(session.to_string()), panel(session, totals)))
        .collect()
}

/// Rubric with a 2x2 schedule so eligibility fixtures stay small.
pub(super) fn small_rubric() -> RubricConfig {
    RubricConfig {
        age_groups: vec![
            AgeGroup("Remaja".to_string()),
            AgeGroup("Dewasa".to_string()),
        ],
        categories: vec![
            Category("Tunggal".to_string()),
            Category("Ganda".to_string()),
        ],
        criteria: RubricConfig::standard().criteria,
    }
}

/// Sessions covering the full 2x2 schedule of [`small_rubric`] for one
/// village, ids prefixed to stay unique per village.
pub(super) fn full_schedule(village: &str, class_group: ClassGroup) -> Vec<CompetitionSession> {
    let mut sessions = Vec::new();
    for (index, (age_group, category)) in [
        ("Remaja", "Tunggal"),
        ("Remaja", "Ganda"),
        ("Dewasa", "Tunggal"),
        ("Dewasa", "Ganda"),
    ]
    .into_iter()
    .enumerate()
    {
        sessions.push(session_in(
            &format!("{village}-{}", index + 1),
            village,
            class_group,
            age_group,
            category,
        ));
    }
    sessions
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Vec<CompetitionSession>,
    pub(super) scores: Vec<JudgeScore>,
}

impl ScoreRepository for MemoryRepository {
    fn sessions(&self) -> Result<Vec<CompetitionSession>, RepositoryError> {
        Ok(self.sessions.clone())
    }

    fn judge_scores(&self) -> Result<Vec<JudgeScore>, RepositoryError> {
        Ok(self.scores.clone())
    }
}

pub(super) struct UnavailableRepository;

impl ScoreRepository for UnavailableRepository {
    fn sessions(&self) -> Result<Vec<CompetitionSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn judge_scores(&self) -> Result<Vec<JudgeScore>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_over(
    sessions: Vec<CompetitionSession>,
    scores: Vec<JudgeScore>,
) -> StandingsService<MemoryRepository> {
    let repository = Arc::new(MemoryRepository { sessions, scores });
    StandingsService::new(repository, small_rubric())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
