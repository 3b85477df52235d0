//! Import of circulator recap exports (one CSV row per judge per session).
//!
//! This is the score-submission boundary: duplicate judges, unknown
//! criteria, and out-of-range marks are rejected here, and each judge's
//! total is computed from the marks, so the aggregation core downstream can
//! assume totals are consistent with their breakdowns.

mod parser;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::workflows::tally::domain::{
    AgeGroup, Category, ClassGroup, CompetitionSession, JudgeScore, SessionId, SessionStatus,
    Village,
};
use crate::workflows::tally::repository::{RepositoryError, ScoreRepository};
use crate::workflows::tally::rubric::RubricConfig;

use parser::RecapRecord;

/// Fully validated snapshot produced from a recap export.
#[derive(Debug, Clone, Default)]
pub struct ScoreBook {
    pub sessions: Vec<CompetitionSession>,
    pub scores: Vec<JudgeScore>,
}

impl ScoreBook {
    pub fn scores_by_session(&self) -> HashMap<SessionId, Vec<JudgeScore>> {
        let mut grouped: HashMap<SessionId, Vec<JudgeScore>> = HashMap::new();
        for score in &self.scores {
            grouped
                .entry(score.session_id.clone())
                .or_default()
                .push(score.clone());
        }
        grouped
    }
}

/// Importer for recap CSV exports.
pub struct RecapImporter;

impl RecapImporter {
    pub fn from_path(
        path: impl AsRef<Path>,
        rubric: &RubricConfig,
    ) -> Result<ScoreBook, RecapImportError> {
        let file = File::open(path)?;
        Self::from_reader(file, rubric)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        rubric: &RubricConfig,
    ) -> Result<ScoreBook, RecapImportError> {
        let records = parser::parse_records(reader)?;
        build_book(records, rubric)
    }
}

fn build_book(
    records: Vec<RecapRecord>,
    rubric: &RubricConfig,
) -> Result<ScoreBook, RecapImportError> {
    let mut sessions: BTreeMap<SessionId, CompetitionSession> = BTreeMap::new();
    let mut judges: HashSet<(SessionId, String)> = HashSet::new();
    let mut scores = Vec::new();

    for record in records {
        let session_id = SessionId(record.session_id.clone());
        let session = session_from_record(&record)?;

        match sessions.get(&session_id) {
            Some(existing) if *existing != session => {
                return Err(RecapImportError::ConflictingSession {
                    session: record.session_id,
                });
            }
            Some(_) => {}
            None => {
                sessions.insert(session_id.clone(), session);
            }
        }

        if !judges.insert((session_id.clone(), record.judge_name.clone())) {
            return Err(RecapImportError::DuplicateJudge {
                session: record.session_id,
                judge: record.judge_name,
            });
        }

        let criteria_scores = parse_marks(&record, rubric)?;
        let total_score = criteria_scores.values().sum();
        scores.push(JudgeScore {
            session_id,
            judge_name: record.judge_name,
            criteria_scores,
            total_score,
        });
    }

    debug!(
        sessions = sessions.len(),
        scores = scores.len(),
        "recap import complete"
    );

    Ok(ScoreBook {
        sessions: sessions.into_values().collect(),
        scores,
    })
}

fn session_from_record(record: &RecapRecord) -> Result<CompetitionSession, RecapImportError> {
    let class_group = ClassGroup::parse(&record.class_group).ok_or_else(|| {
        RecapImportError::UnknownClassGroup {
            session: record.session_id.clone(),
            value: record.class_group.clone(),
        }
    })?;

    let status =
        SessionStatus::parse(&record.status).ok_or_else(|| RecapImportError::UnknownStatus {
            session: record.session_id.clone(),
            value: record.status.clone(),
        })?;

    let scheduled_for = NaiveDate::parse_from_str(record.scheduled_for.trim(), "%Y-%m-%d")
        .map_err(|_| RecapImportError::InvalidDate {
            session: record.session_id.clone(),
            value: record.scheduled_for.clone(),
        })?;

    Ok(CompetitionSession {
        id: SessionId(record.session_id.clone()),
        village: Village(record.village.clone()),
        class_group,
        age_group: AgeGroup(record.age_group.clone()),
        category: Category(record.category.clone()),
        status,
        scheduled_for,
    })
}

/// Parses a `criterion=value;...` marks cell against the rubric bounds.
/// An absent cell is a submission with no marks yet (total 0).
fn parse_marks(
    record: &RecapRecord,
    rubric: &RubricConfig,
) -> Result<BTreeMap<String, i32>, RecapImportError> {
    let mut marks = BTreeMap::new();
    let Some(raw) = record.marks.as_deref() else {
        return Ok(marks);
    };

    for entry in raw.split(';').map(str::trim).filter(|entry| !entry.is_empty()) {
        let malformed = || RecapImportError::MalformedMark {
            session: record.session_id.clone(),
            judge: record.judge_name.clone(),
            entry: entry.to_string(),
        };

        let (name, value) = entry.split_once('=').ok_or_else(malformed)?;
        let name = name.trim();
        let value: i32 = value.trim().parse().map_err(|_| malformed())?;

        let bounds = rubric.criterion_bounds(name).ok_or_else(|| {
            RecapImportError::UnknownCriterion {
                session: record.session_id.clone(),
                judge: record.judge_name.clone(),
                name: name.to_string(),
            }
        })?;
        if value < bounds.min || value > bounds.max {
            return Err(RecapImportError::MarkOutOfRange {
                session: record.session_id.clone(),
                judge: record.judge_name.clone(),
                name: name.to_string(),
                value,
                min: bounds.min,
                max: bounds.max,
            });
        }

        if marks.insert(name.to_string(), value).is_some() {
            return Err(malformed());
        }
    }

    Ok(marks)
}

/// Repository adapter serving a [`ScoreBook`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecapRepository {
    book: ScoreBook,
}

impl RecapRepository {
    pub fn new(book: ScoreBook) -> Self {
        Self { book }
    }
}

impl ScoreRepository for RecapRepository {
    fn sessions(&self) -> Result<Vec<CompetitionSession>, RepositoryError> {
        Ok(self.book.sessions.clone())
    }

    fn judge_scores(&self) -> Result<Vec<JudgeScore>, RepositoryError> {
        Ok(self.book.scores.clone())
    }
}

/// Error raised while importing a recap export.
#[derive(Debug, thiserror::Error)]
pub enum RecapImportError {
    #[error("failed to read recap export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid recap CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("session {session}: unknown class group '{value}'")]
    UnknownClassGroup { session: String, value: String },
    #[error("session {session}: unknown status '{value}'")]
    UnknownStatus { session: String, value: String },
    #[error("session {session}: invalid scheduled date '{value}'")]
    InvalidDate { session: String, value: String },
    #[error("session {session}: conflicting descriptions across rows")]
    ConflictingSession { session: String },
    #[error("session {session}: judge {judge} already scored this session")]
    DuplicateJudge { session: String, judge: String },
    #[error("session {session}, judge {judge}: malformed marks entry '{entry}'")]
    MalformedMark {
        session: String,
        judge: String,
        entry: String,
    },
    #[error("session {session}, judge {judge}: unknown criterion '{name}'")]
    UnknownCriterion {
        session: String,
        judge: String,
        name: String,
    },
    #[error("session {session}, judge {judge}: {name} mark {value} outside {min}..={max}")]
    MarkOutOfRange {
        session: String,
        judge: String,
        name: String,
        value: i32,
        min: i32,
        max: i32,
    },
}
