use serde::{Deserialize, Serialize};

use super::domain::{AgeGroup, Category};

/// Inclusive mark bounds for one judging criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionBounds {
    pub name: String,
    pub min: i32,
    pub max: i32,
}

/// Tournament rubric: the classification matrix and the judging criteria.
///
/// The full schedule for one class group is the cross product of age groups
/// and categories, so the overall-champion quota always tracks the rubric
/// instead of a separately maintained constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricConfig {
    pub age_groups: Vec<AgeGroup>,
    pub categories: Vec<Category>,
    pub criteria: Vec<CriterionBounds>,
}

impl RubricConfig {
    /// Reference configuration used by the tournament dashboards.
    pub fn standard() -> Self {
        let age_groups = ["Usia Dini", "Pra Remaja", "Remaja", "Dewasa", "Master"]
            .into_iter()
            .map(|name| AgeGroup(name.to_string()))
            .collect();
        let categories = ["Tunggal", "Ganda", "Regu", "Solo Kreatif", "Tanding"]
            .into_iter()
            .map(|name| Category(name.to_string()))
            .collect();
        let criteria = [
            ("kebenaran", 0, 100),
            ("kemantapan", 0, 100),
            ("penghayatan", 0, 100),
        ]
        .into_iter()
        .map(|(name, min, max)| CriterionBounds {
            name: name.to_string(),
            min,
            max,
        })
        .collect();

        Self {
            age_groups,
            categories,
            criteria,
        }
    }

    /// Number of sessions a village must complete per class group to qualify
    /// for the overall-champion board.
    pub fn expected_session_count(&self) -> usize {
        self.age_groups.len() * self.categories.len()
    }

    pub fn criterion_bounds(&self, name: &str) -> Option<&CriterionBounds> {
        self.criteria.iter().find(|bounds| bounds.name == name)
    }
}
