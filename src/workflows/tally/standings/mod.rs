//! Ranking and overall-champion eligibility over completed sessions.

pub mod views;

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use super::aggregate;
use super::domain::{
    AgeGroup, Category, ClassGroup, CompetitionSession, JudgeScore, SessionId, SessionStatus,
    StandingKey, Village,
};
use super::rubric::RubricConfig;
use views::{ChampionEntryView, CombinedEntryView, StandingEntryView};

/// Scope restriction for a standings computation. Absent fields do not
/// filter; a fully defaulted value spans the whole tournament.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsFilter {
    pub class_group: Option<ClassGroup>,
    pub age_group: Option<AgeGroup>,
    pub category: Option<Category>,
}

impl StandingsFilter {
    pub fn for_class_group(class_group: ClassGroup) -> Self {
        Self {
            class_group: Some(class_group),
            ..Self::default()
        }
    }

    fn matches(&self, session: &CompetitionSession) -> bool {
        self.class_group
            .map_or(true, |class_group| class_group == session.class_group)
            && self
                .age_group
                .as_ref()
                .map_or(true, |age_group| *age_group == session.age_group)
            && self
                .category
                .as_ref()
                .map_or(true, |category| *category == session.category)
    }
}

/// Accumulated result for one village within one class group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantStanding {
    pub village: Village,
    pub class_group: ClassGroup,
    pub total_score: i32,
    pub completed_sessions: usize,
    pub rank: u32,
}

/// One row of an overall-champion board. `rank` is assigned only when the
/// village is eligible; ineligible villages stay listed for reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionStanding {
    pub village: Village,
    pub class_group: ClassGroup,
    pub total_score: i32,
    pub completed_sessions: usize,
    pub is_eligible: bool,
    pub rank: Option<u32>,
}

/// Joint board row combining both class groups for one village.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedStanding {
    pub village: Village,
    pub putra_total: i32,
    pub putri_total: i32,
    pub joint_total: i32,
    pub completed_sessions: usize,
    pub rank: u32,
}

#[derive(Debug, Default)]
struct Tally {
    total_score: i32,
    completed_sessions: usize,
}

/// Competition ranking: equal totals share a rank, the next distinct total
/// resumes at its 1-based position.
fn shared_rank(previous: &mut Option<(i32, u32)>, position: u32, total: i32) -> u32 {
    let rank = match *previous {
        Some((prev_total, prev_rank)) if prev_total == total => prev_rank,
        _ => position,
    };
    *previous = Some((total, rank));
    rank
}

/// Ranked standings over the completed sessions in scope.
///
/// Sessions are de-duplicated by id before counting. A session missing from
/// `scores_by_session` is an empty panel: it scores 0 but still counts as a
/// completed session. Villages with no completed session in scope are absent
/// from the result. Equal totals share a rank with a gap after them; tied
/// entries are listed by village name ascending, then Putra before Putri.
pub fn rank_standings(
    sessions: &[CompetitionSession],
    scores_by_session: &HashMap<SessionId, Vec<JudgeScore>>,
    filter: &StandingsFilter,
) -> Vec<ParticipantStanding> {
    let mut seen: HashSet<&SessionId> = HashSet::new();
    let mut tallies: BTreeMap<StandingKey, Tally> = BTreeMap::new();

    for session in sessions {
        if session.status != SessionStatus::Completed || !filter.matches(session) {
            continue;
        }
        if !seen.insert(&session.id) {
            debug!(session = %session.id.0, "duplicate session record skipped");
            continue;
        }

        let panel = scores_by_session
            .get(&session.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let final_score = aggregate::final_score(panel);

        let tally = tallies
            .entry(StandingKey {
                village: session.village.clone(),
                class_group: session.class_group,
            })
            .or_default();
        tally.total_score += final_score;
        tally.completed_sessions += 1;
    }

    let mut standings: Vec<ParticipantStanding> = tallies
        .into_iter()
        .map(|(key, tally)| ParticipantStanding {
            village: key.village,
            class_group: key.class_group,
            total_score: tally.total_score,
            completed_sessions: tally.completed_sessions,
            rank: 0,
        })
        .collect();

    // Stable sort keeps the alphabetical key order for equal totals.
    standings.sort_by(|a, b| b.total_score.cmp(&a.total_score));

    let mut previous = None;
    for (position, entry) in standings.iter_mut().enumerate() {
        entry.rank = shared_rank(&mut previous, position as u32 + 1, entry.total_score);
    }

    debug!(entries = standings.len(), "standings computed");
    standings
}

/// Overall-champion eligibility: the village must have completed exactly the
/// full schedule. A count above the schedule is a data anomaly and does not
/// qualify either.
pub fn completed_full_schedule(completed_sessions: usize, expected_sessions: usize) -> bool {
    completed_sessions == expected_sessions
}

/// Standings computations that depend on the tournament rubric.
pub struct StandingsEngine {
    rubric: RubricConfig,
}

impl StandingsEngine {
    pub fn new(rubric: RubricConfig) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &RubricConfig {
        &self.rubric
    }

    /// Overall-champion board for one class group.
    ///
    /// Every village with a completed session is listed; ranks are assigned
    /// only among villages that completed the full schedule, with the same
    /// shared-rank rule as [`rank_standings`].
    pub fn champion(
        &self,
        sessions: &[CompetitionSession],
        scores_by_session: &HashMap<SessionId, Vec<JudgeScore>>,
        class_group: ClassGroup,
    ) -> Vec<ChampionStanding> {
        let expected = self.rubric.expected_session_count();
        let standings = rank_standings(
            sessions,
            scores_by_session,
            &StandingsFilter::for_class_group(class_group),
        );

        let mut board: Vec<ChampionStanding> = standings
            .into_iter()
            .map(|entry| ChampionStanding {
                is_eligible: completed_full_schedule(entry.completed_sessions, expected),
                village: entry.village,
                class_group: entry.class_group,
                total_score: entry.total_score,
                completed_sessions: entry.completed_sessions,
                rank: None,
            })
            .collect();

        let mut previous = None;
        let mut eligible_position = 0u32;
        for entry in board.iter_mut().filter(|entry| entry.is_eligible) {
            eligible_position += 1;
            entry.rank = Some(shared_rank(
                &mut previous,
                eligible_position,
                entry.total_score,
            ));
        }

        debug!(
            class_group = class_group.label(),
            expected, "champion board computed"
        );
        board
    }

    /// Joint champion board over both class groups.
    ///
    /// Subtotals are computed independently per class group and summed into
    /// the joint total; a village absent from one class group contributes 0
    /// on that side and is still listed.
    pub fn combined_champion(
        &self,
        sessions: &[CompetitionSession],
        scores_by_session: &HashMap<SessionId, Vec<JudgeScore>>,
    ) -> Vec<CombinedStanding> {
        let per_class = rank_standings(sessions, scores_by_session, &StandingsFilter::default());

        let mut combined: BTreeMap<Village, CombinedStanding> = BTreeMap::new();
        for entry in per_class {
            let row = combined
                .entry(entry.village.clone())
                .or_insert_with(|| CombinedStanding {
                    village: entry.village.clone(),
                    putra_total: 0,
                    putri_total: 0,
                    joint_total: 0,
                    completed_sessions: 0,
                    rank: 0,
                });
            match entry.class_group {
                ClassGroup::Putra => row.putra_total += entry.total_score,
                ClassGroup::Putri => row.putri_total += entry.total_score,
            }
            row.completed_sessions += entry.completed_sessions;
        }

        let mut board: Vec<CombinedStanding> = combined
            .into_values()
            .map(|mut row| {
                row.joint_total = row.putra_total + row.putri_total;
                row
            })
            .collect();

        board.sort_by(|a, b| b.joint_total.cmp(&a.joint_total));

        let mut previous = None;
        for (position, entry) in board.iter_mut().enumerate() {
            entry.rank = shared_rank(&mut previous, position as u32 + 1, entry.joint_total);
        }

        board
    }
}

impl ParticipantStanding {
    pub fn to_view(&self) -> StandingEntryView {
        StandingEntryView {
            village: self.village.0.clone(),
            class_group: self.class_group,
            class_group_label: self.class_group.label(),
            total_score: self.total_score,
            completed_sessions: self.completed_sessions,
            rank: self.rank,
        }
    }
}

impl ChampionStanding {
    pub fn to_view(&self) -> ChampionEntryView {
        ChampionEntryView {
            village: self.village.0.clone(),
            class_group: self.class_group,
            class_group_label: self.class_group.label(),
            total_score: self.total_score,
            completed_sessions: self.completed_sessions,
            is_eligible: self.is_eligible,
            rank: self.rank,
        }
    }
}

impl CombinedStanding {
    pub fn to_view(&self) -> CombinedEntryView {
        CombinedEntryView {
            village: self.village.0.clone(),
            putra_total: self.putra_total,
            putri_total: self.putri_total,
            joint_total: self.joint_total,
            completed_sessions: self.completed_sessions,
            rank: self.rank,
        }
    }
}
