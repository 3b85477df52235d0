use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for one scored performance on the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// The competing village (desa) whose sessions are aggregated for standings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Village(pub String);

/// Age-group classification (golongan) defined by the rubric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgeGroup(pub String);

/// Performance category (kategori) defined by the rubric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Category(pub String);

/// Top-level division split for the tournament bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassGroup {
    Putra,
    Putri,
}

impl ClassGroup {
    pub const fn label(self) -> &'static str {
        match self {
            ClassGroup::Putra => "Putra",
            ClassGroup::Putri => "Putri",
        }
    }

    pub const fn ordered() -> [ClassGroup; 2] {
        [ClassGroup::Putra, ClassGroup::Putri]
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "putra" => Some(Self::Putra),
            "putri" => Some(Self::Putri),
            _ => None,
        }
    }
}

/// Lifecycle of a session; only completed sessions enter standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Completed,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// One scheduled performance by one village in a class/golongan/kategori slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSession {
    pub id: SessionId,
    pub village: Village,
    pub class_group: ClassGroup,
    pub age_group: AgeGroup,
    pub category: Category,
    pub status: SessionStatus,
    pub scheduled_for: NaiveDate,
}

/// A single judge's submitted marks for one session.
///
/// `total_score` is fixed at submission time as the sum of `criteria_scores`;
/// the aggregator consumes the total and never re-derives it from the
/// per-criterion breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeScore {
    pub session_id: SessionId,
    pub judge_name: String,
    pub criteria_scores: BTreeMap<String, i32>,
    pub total_score: i32,
}

/// Composite grouping key for standings accumulation.
///
/// Ordered by village name first so accumulation maps iterate villages
/// alphabetically within a board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StandingKey {
    pub village: Village,
    pub class_group: ClassGroup,
}
