//! Monthly carbon tracker: unrounded Scope 1 / Scope 2 figures for a single
//! month, and per-section completion of the questionnaire.

use serde::{Deserialize, Serialize};

use crate::answers::{QuestionnaireAnswers, is_yes};

pub const ELECTRICITY_KG_CO2E_PER_KWH: f64 = 0.4;
pub const FUEL_KG_CO2E_PER_LITER: f64 = 2.3;
pub const VEHICLE_KG_CO2E_PER_KM: f64 = 0.21;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyInput {
    pub electricity_kwh: f64,
    pub fuel_liters: f64,
    pub vehicle_km: f64,
}

/// Monthly emissions in kg CO2e.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEmissions {
    pub scope1: f64,
    pub scope2: f64,
    pub total: f64,
}

pub fn compute_monthly(input: &MonthlyInput) -> MonthlyEmissions {
    let scope1 =
        input.fuel_liters * FUEL_KG_CO2E_PER_LITER + input.vehicle_km * VEHICLE_KG_CO2E_PER_KM;
    let scope2 = input.electricity_kwh * ELECTRICITY_KG_CO2E_PER_KWH;
    MonthlyEmissions {
        scope1,
        scope2,
        total: scope1 + scope2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Complete,
    InProgress,
    Pending,
}

impl StepStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::InProgress => "In progress",
            Self::Pending => "Not started",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Complete => "✓",
            Self::InProgress => "•",
            Self::Pending => "○",
        }
    }

    fn from_counts(answered: usize, total: usize) -> Self {
        if answered == total {
            Self::Complete
        } else if answered == 0 {
            Self::Pending
        } else {
            Self::InProgress
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProgress {
    pub title: &'static str,
    pub answered: usize,
    pub total: usize,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub sections: Vec<SectionProgress>,
}

impl Progress {
    pub fn complete_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.status == StepStatus::Complete)
            .count()
    }

    /// Share of complete sections, rounded down to a whole percent.
    pub fn percent_complete(&self) -> u32 {
        if self.sections.is_empty() {
            return 0;
        }
        (self.complete_count() * 100 / self.sections.len()) as u32
    }
}

fn section(title: &'static str, fields: &[bool]) -> SectionProgress {
    let answered = fields.iter().filter(|&&f| f).count();
    SectionProgress {
        title,
        answered,
        total: fields.len(),
        status: StepStatus::from_counts(answered, fields.len()),
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Completion of each questionnaire section.
///
/// Follow-up questions only count once the gating answer enables them, e.g.
/// fuel quantities are only expected after answering "yes" to fuel use.
pub fn section_progress(answers: &QuestionnaireAnswers) -> Progress {
    let a = answers;

    let company = section(
        "Company profile",
        &[
            filled(&a.company_name),
            filled(&a.country),
            filled(&a.industry),
            filled(&a.employee_range),
            filled(&a.reporting_period),
        ],
    );

    let mut fuel_fields = vec![filled(&a.consumes_fuel)];
    if is_yes(&a.consumes_fuel) {
        fuel_fields.extend([
            !a.fuel_types.is_empty(),
            filled(&a.total_fuel_liters),
            filled(&a.primary_fuel_use),
        ]);
    }
    if is_yes(&a.operates_vehicles) {
        fuel_fields.push(filled(&a.vehicle_distance_km));
    }
    let fuel = section("Fuel consumption (Scope 1)", &fuel_fields);

    let mut electricity_fields = vec![filled(&a.uses_grid_electricity)];
    if is_yes(&a.uses_grid_electricity) {
        electricity_fields.extend([
            filled(&a.electricity_usage_kwh),
            filled(&a.facility_count),
            filled(&a.uses_backup_power),
        ]);
    }
    let electricity = section("Electricity usage (Scope 2)", &electricity_fields);

    let mut water_fields = vec![filled(&a.tracks_water_usage)];
    if matches!(a.tracks_water_usage.as_str(), "yes" | "estimate") {
        water_fields.push(filled(&a.estimated_water_usage));
    }
    let water = section("Water usage", &water_fields);

    let social = section(
        "Social",
        &[
            filled(&a.health_safety_practices),
            filled(&a.training_provided),
            filled(&a.female_workforce_percent),
        ],
    );

    let governance = section(
        "Governance",
        &[
            filled(&a.business_registered),
            filled(&a.management_structure),
            !a.written_policies.is_empty(),
        ],
    );

    let confidence = section("Data confidence", &[filled(&a.data_confidence)]);

    Progress {
        sections: vec![
            company,
            fuel,
            electricity,
            water,
            social,
            governance,
            confidence,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn monthly_scopes() {
        let result = compute_monthly(&MonthlyInput {
            electricity_kwh: 1000.0,
            fuel_liters: 100.0,
            vehicle_km: 500.0,
        });
        assert!(close(result.scope1, 230.0 + 105.0));
        assert!(close(result.scope2, 400.0));
        assert!(close(result.total, 735.0));
    }

    #[test]
    fn monthly_zero() {
        let result = compute_monthly(&MonthlyInput::default());
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn status_labels() {
        assert_eq!(StepStatus::Complete.label(), "Complete");
        assert_eq!(StepStatus::InProgress.label(), "In progress");
        assert_eq!(StepStatus::Pending.label(), "Not started");
        assert_eq!(
            serde_json::to_string(&StepStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }

    #[test]
    fn empty_answers_are_pending() {
        let progress = section_progress(&QuestionnaireAnswers::default());
        assert_eq!(progress.sections.len(), 7);
        assert!(progress
            .sections
            .iter()
            .all(|s| s.status == StepStatus::Pending));
        assert_eq!(progress.percent_complete(), 0);
    }

    #[test]
    fn declining_fuel_completes_section() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "no".into(),
            ..Default::default()
        };
        let progress = section_progress(&answers);
        assert_eq!(progress.sections[1].status, StepStatus::Complete);
        assert_eq!(progress.complete_count(), 1);
        assert_eq!(progress.percent_complete(), 14);
    }

    #[test]
    fn follow_up_questions_count_after_yes() {
        let answers = QuestionnaireAnswers {
            consumes_fuel: "yes".into(),
            total_fuel_liters: "900".into(),
            ..Default::default()
        };
        let fuel = &section_progress(&answers).sections[1];
        assert_eq!(fuel.answered, 2);
        assert_eq!(fuel.total, 4);
        assert_eq!(fuel.status, StepStatus::InProgress);
    }

    #[test]
    fn water_estimate_needs_figure() {
        let answers = QuestionnaireAnswers {
            tracks_water_usage: "estimate".into(),
            ..Default::default()
        };
        assert_eq!(
            section_progress(&answers).sections[3].status,
            StepStatus::InProgress
        );
    }
}
