//! Score aggregation for one session's judge panel.
//!
//! A panel of any size reduces to one trusted final score by trimming
//! extreme totals before summing, so a single outlier judge cannot swing a
//! session. The rule is pure over the multiset of submitted totals: judge
//! identity and input order never change the result.

mod trim;

use serde::{Deserialize, Serialize};

use super::domain::JudgeScore;
use trim::counted_window;

/// Branch of the trimming rule that produced a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimRule {
    SumAll,
    DropHighest,
    DropExtremes,
    CenteredMiddle,
}

impl TrimRule {
    pub const fn label(self) -> &'static str {
        match self {
            TrimRule::SumAll => "sum_all",
            TrimRule::DropHighest => "drop_highest",
            TrimRule::DropExtremes => "drop_extremes",
            TrimRule::CenteredMiddle => "centered_middle",
        }
    }

    pub(crate) const fn for_panel(judges: usize) -> Self {
        match judges {
            0..=3 => TrimRule::SumAll,
            4 => TrimRule::DropHighest,
            5 => TrimRule::DropExtremes,
            _ => TrimRule::CenteredMiddle,
        }
    }

    fn describe(self, judges: usize) -> String {
        match self {
            TrimRule::SumAll if judges == 0 => "no scores submitted".to_string(),
            TrimRule::SumAll => format!("all {judges} score(s) counted"),
            TrimRule::DropHighest => "3 lowest scores counted, 1 highest discarded".to_string(),
            TrimRule::DropExtremes => {
                "3 middle scores counted, lowest and highest discarded".to_string()
            }
            TrimRule::CenteredMiddle => {
                format!("3 centered scores counted of {judges}, lowest and highest discarded")
            }
        }
    }
}

/// Transparent account of one session's aggregation, for dashboard audits.
///
/// `used_scores` and `discarded_scores` partition the sorted totals of the
/// panel, and `used_scores` always sums to `final_score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub final_score: i32,
    pub used_scores: Vec<i32>,
    pub discarded_scores: Vec<i32>,
    pub rule: TrimRule,
    pub method: String,
}

fn sorted_totals(scores: &[JudgeScore]) -> Vec<i32> {
    let mut totals: Vec<i32> = scores.iter().map(|score| score.total_score).collect();
    totals.sort_unstable();
    totals
}

/// Trusted final score for one session's judge panel.
///
/// An empty panel scores 0; a panel below 3 judges is summed without
/// trimming. Totals outside the rubric range are not rejected here — range
/// enforcement belongs to the submission boundary.
pub fn final_score(scores: &[JudgeScore]) -> i32 {
    let totals = sorted_totals(scores);
    let window = counted_window(totals.len());
    totals[window.range()].iter().sum()
}

/// Same trimming rule as [`final_score`], with the used/discarded partition
/// retained so dashboards can show which judges counted.
pub fn explain(scores: &[JudgeScore]) -> ScoreBreakdown {
    let totals = sorted_totals(scores);
    let window = counted_window(totals.len()).range();

    let used_scores = totals[window.clone()].to_vec();
    let mut discarded_scores = totals[..window.start].to_vec();
    discarded_scores.extend_from_slice(&totals[window.end..]);

    let rule = TrimRule::for_panel(totals.len());
    ScoreBreakdown {
        final_score: used_scores.iter().sum(),
        used_scores,
        discarded_scores,
        rule,
        method: rule.describe(totals.len()),
    }
}
