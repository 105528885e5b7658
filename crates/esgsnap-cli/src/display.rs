//! Plain-text rendering of results for the terminal.
//!
//! Every renderer returns a `String` so callers decide where it goes; the
//! layout is a titled card with labelled rows grouped into sections.

use std::fmt::Write as _;

use esgsnap_core::report::{self, ACTIONS, DISCLAIMER, METHODOLOGY, Snapshot};
use esgsnap_core::scoring::DimensionScore;
use esgsnap_core::tracker::{MonthlyEmissions, Progress};
use esgsnap_core::{EmissionsResult, ReportMeta, ScoreResult};

const BAR_WIDTH: usize = 30;

// ── Cards ──

pub fn render_emissions(emissions: &EmissionsResult) -> String {
    let mut out = String::new();
    heading(&mut out, "Emissions (tCO2e, annual)");
    emissions_rows(&mut out, emissions);
    out
}

pub fn render_scores(scores: &ScoreResult) -> String {
    let mut out = String::new();
    heading(&mut out, "ESG scorecard");
    scorecard_rows(&mut out, scores);
    out
}

/// Full read-only report view.
pub fn render_report(snapshot: &Snapshot, meta: &ReportMeta) -> String {
    let emissions = &snapshot.emissions;
    let scores = &snapshot.scores;
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===", report::REPORT_TITLE);
    let company = &snapshot.answers.company_name;
    if !company.is_empty() {
        let _ = writeln!(out, "{company}");
    }
    let _ = writeln!(
        out,
        "Report ID: {}  Version {}  Prepared {}",
        meta.report_id,
        meta.version,
        meta.prepared_on_display()
    );
    out.push('\n');

    section(&mut out, "Key figures");
    row(&mut out, "Total emissions", format!("{} tCO2e", emissions.total_emissions));
    row(&mut out, "Primary emission driver", emissions.primary_driver.label());
    row(
        &mut out,
        "ESG grades",
        format!(
            "E: {} · S: {} · G: {}",
            scores.environmental.grade, scores.social.grade, scores.governance.grade
        ),
    );
    let confidence = &snapshot.answers.data_confidence;
    row(
        &mut out,
        "Data confidence",
        if confidence.is_empty() {
            "Not specified"
        } else {
            confidence.as_str()
        },
    );
    out.push('\n');

    section(&mut out, "Emissions by activity");
    let max = emissions
        .fuel_emissions
        .max(emissions.electricity_emissions)
        .max(emissions.vehicle_emissions)
        .max(1);
    bar(&mut out, "Fuel", emissions.fuel_emissions, max);
    bar(&mut out, "Electricity", emissions.electricity_emissions, max);
    if emissions.vehicle_emissions != 0 {
        bar(&mut out, "Vehicles", emissions.vehicle_emissions, max);
    }
    out.push('\n');

    section(&mut out, "Fuel vs electricity");
    let fuel_share = report::fuel_share_percent(emissions);
    row(&mut out, "Fuel share", format!("{}%", fuel_share.round()));
    if emissions.vehicle_emissions == 0 {
        row(
            &mut out,
            "Electricity share",
            format!("{}%", (100.0 - fuel_share).round()),
        );
    } else {
        let total = emissions.total_emissions;
        row(
            &mut out,
            "Electricity share",
            format!(
                "{}%",
                report::share_percent(emissions.electricity_emissions, total).round()
            ),
        );
        row(
            &mut out,
            "Vehicle share",
            format!(
                "{}%",
                report::share_percent(emissions.vehicle_emissions, total).round()
            ),
        );
    }
    out.push('\n');

    section(&mut out, "Interpretation");
    let _ = writeln!(out, "  {}", snapshot.interpretation());
    out.push('\n');

    section(&mut out, "ESG scorecard");
    scorecard_rows(&mut out, scores);

    section(&mut out, "Targets & actions");
    list(&mut out, ACTIONS);

    section(&mut out, "Methodology & assumptions");
    list(&mut out, METHODOLOGY);

    let _ = writeln!(out, "{DISCLAIMER}");
    let _ = writeln!(out, "Version {} · {}", meta.version, meta.prepared_on_display());
    out
}

pub fn render_monthly(monthly: &MonthlyEmissions) -> String {
    let mut out = String::new();
    heading(&mut out, "Monthly carbon tracker (kg CO2e)");
    row(&mut out, "Scope 1 (fuel, vehicles)", format!("{:.1}", monthly.scope1));
    row(&mut out, "Scope 2 (electricity)", format!("{:.1}", monthly.scope2));
    row(&mut out, "Total", format!("{:.1}", monthly.total));
    out.push('\n');
    out
}

pub fn render_progress(progress: &Progress) -> String {
    let mut out = String::new();
    section(&mut out, "Questionnaire progress");
    for s in &progress.sections {
        let _ = writeln!(
            out,
            "  {} {:<28} {:<12} {}/{}",
            s.status.glyph(),
            s.title,
            s.status.label(),
            s.answered,
            s.total
        );
    }
    row(
        &mut out,
        "Reported to date",
        format!("{}%", progress.percent_complete()),
    );
    out.push('\n');
    out
}

// ── Shared rows ──

fn emissions_rows(out: &mut String, emissions: &EmissionsResult) {
    row(out, "Fuel (Scope 1)", emissions.fuel_emissions);
    row(out, "Electricity (Scope 2)", emissions.electricity_emissions);
    row(out, "Vehicles (Scope 1)", emissions.vehicle_emissions);
    row(out, "Total", emissions.total_emissions);
    row(out, "Primary driver", emissions.primary_driver.label());
    out.push('\n');
}

fn scorecard_rows(out: &mut String, scores: &ScoreResult) {
    dimension(out, "Environmental", &scores.environmental);
    dimension(out, "Social", &scores.social);
    dimension(out, "Governance", &scores.governance);
    out.push('\n');
}

fn dimension(out: &mut String, name: &str, dim: &DimensionScore) {
    row(out, name, format!("{}/{} ({})", dim.score, dim.max, dim.grade));
}

// ── Primitives ──

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "=== {title} ===");
}

fn section(out: &mut String, header: &str) {
    let _ = writeln!(out, "{header}");
}

fn row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {label:<26} {value}");
}

fn list(out: &mut String, items: &[&str]) {
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
    out.push('\n');
}

/// Horizontal bar scaled against `max`; negative values draw an empty bar.
fn bar(out: &mut String, label: &str, value: i64, max: i64) {
    let filled = if value <= 0 {
        0
    } else {
        ((value as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
    };
    let filled = filled.min(BAR_WIDTH);
    let _ = writeln!(
        out,
        "  {label:<12} [{}{}] {value} tCO2e",
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled)
    );
}
