use chrono::NaiveDate;
use serde::Serialize;

use super::super::aggregate::ScoreBreakdown;
use super::super::domain::ClassGroup;

/// One row of the standings table.
#[derive(Debug, Clone, Serialize)]
pub struct StandingEntryView {
    pub village: String,
    pub class_group: ClassGroup,
    pub class_group_label: &'static str,
    pub total_score: i32,
    pub completed_sessions: usize,
    pub rank: u32,
}

/// One row of an overall-champion board.
#[derive(Debug, Clone, Serialize)]
pub struct ChampionEntryView {
    pub village: String,
    pub class_group: ClassGroup,
    pub class_group_label: &'static str,
    pub total_score: i32,
    pub completed_sessions: usize,
    pub is_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

/// Overall-champion board with its qualification quota.
#[derive(Debug, Clone, Serialize)]
pub struct ChampionBoardView {
    pub class_group: ClassGroup,
    pub class_group_label: &'static str,
    pub expected_sessions: usize,
    pub entries: Vec<ChampionEntryView>,
}

/// One row of the joint Putra+Putri board.
#[derive(Debug, Clone, Serialize)]
pub struct CombinedEntryView {
    pub village: String,
    pub putra_total: i32,
    pub putri_total: i32,
    pub joint_total: i32,
    pub completed_sessions: usize,
    pub rank: u32,
}

/// Per-session aggregation breakdown exposed for dashboard transparency.
#[derive(Debug, Clone, Serialize)]
pub struct SessionScoreView {
    pub session_id: String,
    pub village: String,
    pub class_group_label: &'static str,
    pub status: &'static str,
    pub scheduled_for: NaiveDate,
    pub breakdown: ScoreBreakdown,
}
