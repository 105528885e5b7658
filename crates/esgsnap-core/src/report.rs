//! Report composition: the read-only report content, its export payload and
//! the fixed eight-page PDF document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::QuestionnaireAnswers;
use crate::emissions::{self, EmissionsResult};
use crate::pdf;
use crate::scoring::{self, ScoreResult};

pub const REPORT_TITLE: &str = "ESG & Emissions Snapshot";
pub const REPORT_VERSION: &str = "v1.0";

pub const ACTIONS: &[&str] = &[
    "Identify efficiency opportunities tied to your primary emission driver.",
    "Set a quarterly review to capture energy use and emissions trends.",
    "Document ESG practices and update policies annually.",
];

pub const METHODOLOGY: &[&str] = &[
    "Conservative emissions assumptions are applied for fuel and electricity.",
    "Results are rounded to whole numbers.",
    "This is a self-reported, non-audited ESG baseline.",
];

pub const DISCLAIMER: &str = "Self-reported data only. Not audited or certified.";

const NOT_PROVIDED: &str = "Not provided";
const NOT_SPECIFIED: &str = "Not specified";

/// Identity of one generated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub report_id: String,
    pub prepared_on: NaiveDate,
    pub version: String,
}

impl ReportMeta {
    pub fn new(report_id: impl Into<String>, prepared_on: NaiveDate) -> Self {
        Self {
            report_id: report_id.into(),
            prepared_on,
            version: REPORT_VERSION.to_string(),
        }
    }

    /// Fresh random report id, prepared today (local time).
    pub fn generate() -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            chrono::Local::now().date_naive(),
        )
    }

    pub fn prepared_on_display(&self) -> String {
        self.prepared_on.format("%Y-%m-%d").to_string()
    }

    /// Suggested download name for the exported PDF.
    pub fn pdf_filename(&self) -> String {
        format!("esg-emissions-report-{}.pdf", self.report_id)
    }

    /// File name for the saved report payload.
    pub fn payload_filename(&self) -> String {
        format!("{}.json", self.report_id)
    }
}

/// The "data inputs summary": the report id plus the raw answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub report_id: String,
    pub inputs: QuestionnaireAnswers,
}

/// Title plus pages of plain text lines. The title heads every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub pages: Vec<Vec<String>>,
}

impl ReportDocument {
    pub fn to_pdf(&self) -> Vec<u8> {
        pdf::build(&self.title, &self.pages)
    }
}

/// A questionnaire snapshot evaluated by the calculators.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub answers: QuestionnaireAnswers,
    pub emissions: EmissionsResult,
    pub scores: ScoreResult,
}

impl Snapshot {
    pub fn evaluate(answers: QuestionnaireAnswers) -> Self {
        let emissions = emissions::compute(&answers.activity_inputs());
        let scores = scoring::score(&answers);
        Self {
            answers,
            emissions,
            scores,
        }
    }

    pub fn payload(&self, meta: &ReportMeta) -> ReportPayload {
        ReportPayload {
            report_id: meta.report_id.clone(),
            inputs: self.answers.clone(),
        }
    }

    pub fn document(&self, meta: &ReportMeta) -> ReportDocument {
        compose(&self.answers, &self.emissions, &self.scores, meta)
    }

    pub fn interpretation(&self) -> String {
        interpretation(&self.emissions)
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// One-sentence reading of the emissions result.
pub fn interpretation(emissions: &EmissionsResult) -> String {
    if emissions.total_emissions == 0 {
        return "Add fuel or electricity data to generate emissions insights.".to_string();
    }
    format!(
        "{} is the largest contributor at {} tCO2e. Focus efficiency actions here to reduce total emissions.",
        emissions.primary_driver.label(),
        emissions.driver_emissions()
    )
}

/// `part` as a percentage of `total`; zero when the total is zero.
pub fn share_percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Fuel's share of total emissions, in percent.
pub fn fuel_share_percent(emissions: &EmissionsResult) -> f64 {
    share_percent(emissions.fuel_emissions, emissions.total_emissions)
}

/// Lay out the eight report pages. Each page starts with its section name.
pub fn compose(
    answers: &QuestionnaireAnswers,
    emissions: &EmissionsResult,
    scores: &ScoreResult,
    meta: &ReportMeta,
) -> ReportDocument {
    let e = &scores.environmental;
    let s = &scores.social;
    let g = &scores.governance;
    let confidence = or_default(&answers.data_confidence, NOT_SPECIFIED);

    let cover = vec![
        "Cover".to_string(),
        format!("Report ID: {}", meta.report_id),
        format!("Prepared for: {}", or_default(&answers.company_name, "Company")),
        format!("Date: {}", meta.prepared_on_display()),
        format!("Version: {}", meta.version),
    ];

    let summary = vec![
        "Executive summary".to_string(),
        format!("Total emissions: {} tCO2e", emissions.total_emissions),
        format!("Primary driver: {}", emissions.primary_driver.label()),
        format!("Environmental grade: {}", e.grade),
        format!("Social grade: {}", s.grade),
        format!("Governance grade: {}", g.grade),
    ];

    let mut environmental = vec![
        "Environmental overview".to_string(),
        "Charts: emissions by activity, fuel vs electricity".to_string(),
        format!("Fuel emissions: {} tCO2e", emissions.fuel_emissions),
        format!("Electricity emissions: {} tCO2e", emissions.electricity_emissions),
    ];
    if emissions.vehicle_emissions != 0 {
        environmental.push(format!(
            "Vehicle emissions: {} tCO2e",
            emissions.vehicle_emissions
        ));
    }

    let scope = vec![
        "Scope & boundary".to_string(),
        "Scope 1 fuel usage and Scope 2 grid electricity.".to_string(),
        "Self-reported baseline for the reporting period.".to_string(),
    ];

    let snapshot = vec![
        "ESG snapshot".to_string(),
        format!("Environmental score: {}/{} ({})", e.score, e.max, e.grade),
        format!("Social score: {}/{} ({})", s.score, s.max, s.grade),
        format!("Governance score: {}/{} ({})", g.score, g.max, g.grade),
        format!("Data confidence: {confidence}"),
    ];

    let inputs = vec![
        "Data inputs summary".to_string(),
        format!("Company: {}", or_default(&answers.company_name, NOT_PROVIDED)),
        format!("Industry: {}", or_default(&answers.industry, NOT_PROVIDED)),
        format!("Employees: {}", or_default(&answers.employee_range, NOT_PROVIDED)),
        format!(
            "Reporting period: {}",
            or_default(&answers.reporting_period, NOT_PROVIDED)
        ),
    ];

    let methodology = vec![
        "Methodology & assumptions".to_string(),
        "Conservative emissions factors applied for fuel and electricity.".to_string(),
        "Rounded to whole tCO2e values.".to_string(),
        "No third-party verification.".to_string(),
    ];

    let recommendations = vec![
        "Recommendations & targets".to_string(),
        "Prioritize efficiency on the primary emission driver.".to_string(),
        "Monitor electricity usage monthly where possible.".to_string(),
        "Strengthen ESG practices based on scorecard outcomes.".to_string(),
        format!(
            "Self-reported data; not audited or certified. Version {}.",
            meta.version
        ),
    ];

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        pages: vec![
            cover,
            summary,
            environmental,
            scope,
            snapshot,
            inputs,
            methodology,
            recommendations,
        ],
    }
}
