//! Questionnaire answer snapshot.
//!
//! Answers are kept as the raw strings the questionnaire collects (`"yes"`,
//! `"no"`, `"estimate"`, numeric text, multi-select lists). Calculators read
//! them through [`QuestionnaireAnswers::activity_inputs`] and the lenient
//! [`parse_quantity`] rule, so a half-filled snapshot always evaluates.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::CoreError;

/// Multi-select sentinel meaning "no written policies".
pub const POLICY_NONE: &str = "none";

pub const FUEL_TYPES: &[&str] = &["petrol", "diesel", "lpg", "other"];
pub const POLICIES: &[&str] = &["ethics", "anti-corruption", POLICY_NONE];

/// Reporting period of a consumption figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    #[default]
    Annual,
}

impl Period {
    /// Anything other than `"monthly"` is treated as an annual figure.
    pub fn from_answer(s: &str) -> Self {
        if s == "monthly" {
            Self::Monthly
        } else {
            Self::Annual
        }
    }

    /// Factor that converts a figure in this period to an annual figure.
    pub fn annual_multiplier(self) -> f64 {
        match self {
            Self::Monthly => 12.0,
            Self::Annual => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

/// Parse a numeric answer the way the questionnaire does.
///
/// Surrounding whitespace is ignored, the empty string is zero, and anything
/// unparsable or non-finite degrades to zero. Negative values pass through.
pub fn parse_quantity(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Activity quantities feeding the emissions calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityInputs {
    pub consumes_fuel: bool,
    /// Litres over the reporting period.
    pub fuel_liters: f64,
    pub uses_grid_electricity: bool,
    pub electricity_kwh: f64,
    pub electricity_period: Period,
    pub operates_vehicles: bool,
    pub vehicle_km: f64,
    pub vehicle_period: Period,
}

/// A snapshot of every questionnaire answer.
///
/// JSON keys are camelCase. Every key is optional: strings default to `""`,
/// lists to `[]`, and both period fields to `"annual"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestionnaireAnswers {
    // Company profile
    #[serde(deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub employee_range: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reporting_period: String,

    // Fuel (Scope 1)
    #[serde(deserialize_with = "null_as_default")]
    pub consumes_fuel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fuel_types: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub total_fuel_liters: String,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_fuel_use: String,

    // Electricity (Scope 2)
    #[serde(deserialize_with = "null_as_default")]
    pub uses_grid_electricity: String,
    #[serde(deserialize_with = "string_or_number")]
    pub electricity_usage_kwh: String,
    #[serde(deserialize_with = "period_answer")]
    pub electricity_usage_period: String,
    #[serde(deserialize_with = "null_as_default")]
    pub facility_count: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uses_backup_power: String,

    // Vehicles (Scope 1)
    #[serde(deserialize_with = "null_as_default")]
    pub operates_vehicles: String,
    #[serde(deserialize_with = "string_or_number")]
    pub vehicle_distance_km: String,
    #[serde(deserialize_with = "period_answer")]
    pub vehicle_distance_period: String,

    // Water
    #[serde(deserialize_with = "null_as_default")]
    pub tracks_water_usage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub estimated_water_usage: String,

    // Social
    #[serde(deserialize_with = "null_as_default")]
    pub health_safety_practices: String,
    #[serde(deserialize_with = "null_as_default")]
    pub training_provided: String,
    #[serde(deserialize_with = "string_or_number")]
    pub female_workforce_percent: String,

    // Governance
    #[serde(deserialize_with = "null_as_default")]
    pub business_registered: String,
    #[serde(deserialize_with = "null_as_default")]
    pub management_structure: String,
    #[serde(deserialize_with = "null_as_default")]
    pub written_policies: Vec<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub data_confidence: String,
}

impl Default for QuestionnaireAnswers {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            country: String::new(),
            industry: String::new(),
            employee_range: String::new(),
            reporting_period: String::new(),
            consumes_fuel: String::new(),
            fuel_types: Vec::new(),
            total_fuel_liters: String::new(),
            primary_fuel_use: String::new(),
            uses_grid_electricity: String::new(),
            electricity_usage_kwh: String::new(),
            electricity_usage_period: Period::Annual.as_str().to_string(),
            facility_count: String::new(),
            uses_backup_power: String::new(),
            operates_vehicles: String::new(),
            vehicle_distance_km: String::new(),
            vehicle_distance_period: Period::Annual.as_str().to_string(),
            tracks_water_usage: String::new(),
            estimated_water_usage: String::new(),
            health_safety_practices: String::new(),
            training_provided: String::new(),
            female_workforce_percent: String::new(),
            business_registered: String::new(),
            management_structure: String::new(),
            written_policies: Vec::new(),
            data_confidence: String::new(),
        }
    }
}

/// `true` only for the exact answer `"yes"`.
pub fn is_yes(answer: &str) -> bool {
    answer == "yes"
}

impl QuestionnaireAnswers {
    /// Parse a snapshot from JSON. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let answers = Self::from_json(&json)?;
        debug!(path = %path.display(), company = %answers.company_name, "loaded answers");
        Ok(answers)
    }

    /// Project the answers onto the quantities the emissions calculator needs.
    pub fn activity_inputs(&self) -> ActivityInputs {
        ActivityInputs {
            consumes_fuel: is_yes(&self.consumes_fuel),
            fuel_liters: parse_quantity(&self.total_fuel_liters),
            uses_grid_electricity: is_yes(&self.uses_grid_electricity),
            electricity_kwh: parse_quantity(&self.electricity_usage_kwh),
            electricity_period: Period::from_answer(&self.electricity_usage_period),
            operates_vehicles: is_yes(&self.operates_vehicles),
            vehicle_km: parse_quantity(&self.vehicle_distance_km),
            vehicle_period: Period::from_answer(&self.vehicle_distance_period),
        }
    }

    /// Toggle a written-policy selection.
    ///
    /// `"none"` is exclusive: choosing it clears every other policy, and
    /// choosing any other policy drops `"none"`.
    pub fn toggle_policy(&mut self, value: &str) {
        let exists = self.written_policies.iter().any(|p| p == value);
        if value == POLICY_NONE && !exists {
            self.written_policies = vec![POLICY_NONE.to_string()];
        } else if exists {
            self.written_policies.retain(|p| p != value);
        } else {
            self.written_policies.retain(|p| p != POLICY_NONE);
            self.written_policies.push(value.to_string());
        }
    }

    pub fn toggle_fuel_type(&mut self, value: &str) {
        if self.fuel_types.iter().any(|f| f == value) {
            self.fuel_types.retain(|f| f != value);
        } else {
            self.fuel_types.push(value.to_string());
        }
    }

    /// Whether at least one real policy (not the `"none"` sentinel) is selected.
    pub fn has_written_policy(&self) -> bool {
        self.written_policies.iter().any(|p| p != POLICY_NONE)
    }
}

/// Treat an explicit JSON `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Period answers fall back to `"annual"`, same as a missing key.
fn period_answer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| Period::Annual.as_str().to_string()))
}

/// Accept numeric answers written either as JSON strings or JSON numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}
