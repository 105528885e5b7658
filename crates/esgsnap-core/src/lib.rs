//! Core of the ESG & Emissions Snapshot: questionnaire model, emissions
//! calculators, ESG scoring, report composition and the PDF writer.
//!
//! The `esgsnap` CLI drives the evaluation, report, gate and tracker paths.
//! Interactive editing helpers ([`wizard::Wizard`],
//! [`QuestionnaireAnswers::toggle_policy`],
//! [`QuestionnaireAnswers::toggle_fuel_type`]) are library surface for a
//! questionnaire front end and have no CLI command.

pub mod answers;
pub mod emissions;
mod error;
pub mod gate;
pub mod pdf;
pub mod report;
pub mod scoring;
pub mod tracker;
pub mod wizard;

pub use answers::{ActivityInputs, Period, QuestionnaireAnswers, parse_quantity};
pub use emissions::{EmissionsResult, PrimaryDriver};
pub use error::CoreError;
pub use gate::{AccessGate, Capability, GateStatus, Plan, Prompt};
pub use pdf::PdfBuilder;
pub use report::{ReportDocument, ReportMeta, ReportPayload};
pub use scoring::{Grade, ScoreResult};
