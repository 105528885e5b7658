//! ESG scoring: fixed point weights per answer, graded A/B/C per dimension.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::answers::{QuestionnaireAnswers, is_yes, parse_quantity};

pub const ENVIRONMENTAL_MAX: u32 = 8;
pub const SOCIAL_MAX: u32 = 6;
pub const GOVERNANCE_MAX: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum scores for an A and a B. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeThresholds {
    pub a: u32,
    pub b: u32,
}

impl GradeThresholds {
    pub fn grade(&self, score: u32) -> Grade {
        if score >= self.a {
            Grade::A
        } else if score >= self.b {
            Grade::B
        } else {
            Grade::C
        }
    }
}

pub const ENVIRONMENTAL_THRESHOLDS: GradeThresholds = GradeThresholds { a: 7, b: 4 };
pub const SOCIAL_THRESHOLDS: GradeThresholds = GradeThresholds { a: 5, b: 3 };
pub const GOVERNANCE_THRESHOLDS: GradeThresholds = GradeThresholds { a: 5, b: 3 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: u32,
    pub max: u32,
    pub grade: Grade,
}

impl DimensionScore {
    fn new(score: u32, max: u32, thresholds: GradeThresholds) -> Self {
        Self {
            score,
            max,
            grade: thresholds.grade(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub environmental: DimensionScore,
    pub social: DimensionScore,
    pub governance: DimensionScore,
}

fn points(condition: bool, value: u32) -> u32 {
    if condition { value } else { 0 }
}

/// Score a questionnaire snapshot. Missing answers contribute nothing.
pub fn score(answers: &QuestionnaireAnswers) -> ScoreResult {
    let environmental = environmental_score(answers);
    let social = social_score(answers);
    let governance = governance_score(answers);

    debug!(environmental, social, governance, "computed ESG scores");

    ScoreResult {
        environmental: DimensionScore::new(
            environmental,
            ENVIRONMENTAL_MAX,
            ENVIRONMENTAL_THRESHOLDS,
        ),
        social: DimensionScore::new(social, SOCIAL_MAX, SOCIAL_THRESHOLDS),
        governance: DimensionScore::new(governance, GOVERNANCE_MAX, GOVERNANCE_THRESHOLDS),
    }
}

fn environmental_score(answers: &QuestionnaireAnswers) -> u32 {
    let fuel_data = is_yes(&answers.consumes_fuel) && parse_quantity(&answers.total_fuel_liters) > 0.0;
    let electricity_data = is_yes(&answers.uses_grid_electricity)
        && parse_quantity(&answers.electricity_usage_kwh) > 0.0;
    let water_tracked = matches!(answers.tracks_water_usage.as_str(), "yes" | "estimate");
    let complete_energy_data = (answers.consumes_fuel == "no" || fuel_data)
        && (answers.uses_grid_electricity == "no" || electricity_data);
    let confidence = match answers.data_confidence.as_str() {
        "high" => 2,
        "medium" => 1,
        _ => 0,
    };

    points(fuel_data, 2)
        + points(electricity_data, 2)
        + points(water_tracked, 1)
        + points(complete_energy_data, 1)
        + confidence
}

fn social_score(answers: &QuestionnaireAnswers) -> u32 {
    points(!answers.employee_range.is_empty(), 1)
        + points(is_yes(&answers.health_safety_practices), 2)
        + points(is_yes(&answers.training_provided), 2)
        + points(!answers.female_workforce_percent.is_empty(), 1)
}

fn governance_score(answers: &QuestionnaireAnswers) -> u32 {
    points(is_yes(&answers.business_registered), 2)
        + points(!answers.management_structure.is_empty(), 2)
        + points(answers.has_written_policy(), 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_answers() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            employee_range: "11-50".into(),
            consumes_fuel: "yes".into(),
            total_fuel_liters: "1000".into(),
            uses_grid_electricity: "yes".into(),
            electricity_usage_kwh: "12000".into(),
            tracks_water_usage: "estimate".into(),
            health_safety_practices: "yes".into(),
            training_provided: "yes".into(),
            female_workforce_percent: "45".into(),
            business_registered: "yes".into(),
            management_structure: "board".into(),
            written_policies: vec!["ethics".into()],
            data_confidence: "high".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_answers_score_zero() {
        let result = score(&QuestionnaireAnswers::default());
        for dim in [result.environmental, result.social, result.governance] {
            assert_eq!(dim.score, 0);
            assert_eq!(dim.grade, Grade::C);
        }
    }

    #[test]
    fn full_answers_reach_maximum() {
        let result = score(&full_answers());
        assert_eq!(result.environmental.score, ENVIRONMENTAL_MAX);
        assert_eq!(result.social.score, SOCIAL_MAX);
        assert_eq!(result.governance.score, GOVERNANCE_MAX);
        assert_eq!(result.environmental.grade, Grade::A);
        assert_eq!(result.social.grade, Grade::A);
        assert_eq!(result.governance.grade, Grade::A);
    }

    #[test]
    fn grade_boundaries_are_closed_below() {
        assert_eq!(ENVIRONMENTAL_THRESHOLDS.grade(8), Grade::A);
        assert_eq!(ENVIRONMENTAL_THRESHOLDS.grade(7), Grade::A);
        assert_eq!(ENVIRONMENTAL_THRESHOLDS.grade(6), Grade::B);
        assert_eq!(ENVIRONMENTAL_THRESHOLDS.grade(4), Grade::B);
        assert_eq!(ENVIRONMENTAL_THRESHOLDS.grade(3), Grade::C);
        assert_eq!(SOCIAL_THRESHOLDS.grade(5), Grade::A);
        assert_eq!(SOCIAL_THRESHOLDS.grade(4), Grade::B);
        assert_eq!(SOCIAL_THRESHOLDS.grade(3), Grade::B);
        assert_eq!(SOCIAL_THRESHOLDS.grade(2), Grade::C);
        assert_eq!(GOVERNANCE_THRESHOLDS.grade(5), Grade::A);
        assert_eq!(GOVERNANCE_THRESHOLDS.grade(3), Grade::B);
        assert_eq!(GOVERNANCE_THRESHOLDS.grade(2), Grade::C);
    }

    #[test]
    fn declining_energy_still_counts_as_complete() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "no".into(),
            uses_grid_electricity: "no".into(),
            ..Default::default()
        };
        assert_eq!(score(&answers).environmental.score, 1);
    }

    #[test]
    fn yes_without_quantity_is_incomplete() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "yes".into(),
            total_fuel_liters: "0".into(),
            uses_grid_electricity: "no".into(),
            ..Default::default()
        };
        assert_eq!(score(&answers).environmental.score, 0);
    }

    #[test]
    fn negative_quantity_is_not_data() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "yes".into(),
            total_fuel_liters: "-10".into(),
            ..Default::default()
        };
        assert_eq!(score(&answers).environmental.score, 0);
    }

    #[test]
    fn confidence_levels() {
        let with = |level: &str| {
            score(&QuestionnaireAnswers {
                data_confidence: level.into(),
                ..Default::default()
            })
            .environmental
            .score
        };
        assert_eq!(with("high"), 2);
        assert_eq!(with("medium"), 1);
        assert_eq!(with("low"), 0);
        assert_eq!(with(""), 0);
    }

    #[test]
    fn water_tracking_answers() {
        for (answer, expected) in [("yes", 1), ("estimate", 1), ("no", 0), ("", 0)] {
            let answers = QuestionnaireAnswers {
                tracks_water_usage: answer.into(),
                ..Default::default()
            };
            assert_eq!(score(&answers).environmental.score, expected, "{answer}");
        }
    }

    #[test]
    fn none_policy_earns_nothing() {
        let mut answers = QuestionnaireAnswers {
            written_policies: vec!["none".into()],
            ..Default::default()
        };
        assert_eq!(score(&answers).governance.score, 0);

        answers.toggle_policy("anti-corruption");
        assert_eq!(score(&answers).governance.score, 2);
    }

    #[test]
    fn social_partial() {
        let answers = QuestionnaireAnswers {
            employee_range: "1-10".into(),
            health_safety_practices: "yes".into(),
            training_provided: "no".into(),
            ..Default::default()
        };
        let result = score(&answers);
        assert_eq!(result.social.score, 3);
        assert_eq!(result.social.grade, Grade::B);
    }

    #[test]
    fn scores_never_exceed_maxima() {
        let mut answers = full_answers();
        for confidence in ["high", "medium", "low", ""] {
            answers.data_confidence = confidence.into();
            let result = score(&answers);
            assert!(result.environmental.score <= ENVIRONMENTAL_MAX);
            assert!(result.social.score <= SOCIAL_MAX);
            assert!(result.governance.score <= GOVERNANCE_MAX);
        }
    }
}
