mod display;
mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use esgsnap_core::report::Snapshot;
use esgsnap_core::tracker::{self, MonthlyInput};
use esgsnap_core::{AccessGate, Capability, GateStatus, Plan, QuestionnaireAnswers, ReportMeta};
use tracing_subscriber::EnvFilter;

/// ESG & emissions snapshot for small businesses
#[derive(Parser, Debug)]
#[command(
    name = "esgsnap",
    version,
    about = "Self-reported ESG & emissions snapshot for small businesses",
    long_about = "Computes annual emissions, ESG scores and grades from a questionnaire \
                  answers file (JSON), renders a read-only report and exports it as PDF.\n\n\
                  Run 'esgsnap template' for an empty answers file."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show annual emissions by category
    Emissions(AnswersArg),

    /// Show ESG scores and grades
    Score(AnswersArg),

    /// Show the read-only report view
    Report {
        #[command(flatten)]
        input: AnswersArg,

        /// Print the report payload as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Save the report payload (requires an account)
    Save {
        #[command(flatten)]
        input: AnswersArg,

        #[command(flatten)]
        account: AccountArgs,
    },

    /// Export the report as PDF (requires an account and a plan)
    Export {
        #[command(flatten)]
        input: AnswersArg,

        #[command(flatten)]
        account: AccountArgs,
    },

    /// Monthly Scope 1 / Scope 2 tracker in kg CO2e
    Track(TrackArgs),

    /// Print an empty answers file
    Template,
}

#[derive(Args, Debug)]
struct AnswersArg {
    /// Questionnaire answers (JSON)
    answers: PathBuf,
}

#[derive(Args, Debug)]
struct AccountArgs {
    /// Treat the session as signed in
    #[arg(long, env = "ESGSNAP_SIGNED_IN")]
    signed_in: bool,

    /// Purchased plan
    #[arg(long, value_enum, env = "ESGSNAP_PLAN")]
    plan: Option<PlanArg>,

    /// Directory for written files
    #[arg(long, env = "ESGSNAP_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct TrackArgs {
    /// Electricity used this month (kWh)
    #[arg(long, default_value_t = 0.0)]
    electricity_kwh: f64,

    /// Fuel burned this month (litres)
    #[arg(long, default_value_t = 0.0)]
    fuel_liters: f64,

    /// Vehicle distance this month (km)
    #[arg(long, default_value_t = 0.0)]
    vehicle_km: f64,

    /// Answers file for questionnaire progress
    #[arg(long)]
    answers: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PlanArg {
    /// One-off PDF (EUR 15)
    OneOff,
    /// Annual access (EUR 59)
    Annual,
}

impl From<PlanArg> for Plan {
    fn from(p: PlanArg) -> Self {
        match p {
            PlanArg::OneOff => Plan::OneOff,
            PlanArg::Annual => Plan::Annual,
        }
    }
}

impl AccountArgs {
    fn gate(&self) -> AccessGate {
        let mut gate = AccessGate::new();
        if self.signed_in {
            gate.sign_up();
        }
        if let Some(plan) = self.plan {
            gate.purchase(plan.into());
        }
        gate
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    tracing::debug!("esgsnap v{}", env!("CARGO_PKG_VERSION"));
    run(cli)
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Emissions(input) => {
            let snapshot = evaluate(&input.answers)?;
            print!("{}", display::render_emissions(&snapshot.emissions));
        }
        Command::Score(input) => {
            let snapshot = evaluate(&input.answers)?;
            print!("{}", display::render_scores(&snapshot.scores));
        }
        Command::Report { input, json } => {
            let snapshot = evaluate(&input.answers)?;
            let meta = ReportMeta::generate();
            if json {
                let payload = serde_json::to_string_pretty(&snapshot.payload(&meta))?;
                println!("{payload}");
            } else {
                print!("{}", display::render_report(&snapshot, &meta));
            }
        }
        Command::Save { input, account } => {
            ensure_unlocked(&account.gate(), Capability::Save)?;
            let snapshot = evaluate(&input.answers)?;
            let path = output::save_payload(&snapshot, &ReportMeta::generate(), &account.out_dir)?;
            println!("Report saved to {}", path.display());
        }
        Command::Export { input, account } => {
            ensure_unlocked(&account.gate(), Capability::Export)?;
            let snapshot = evaluate(&input.answers)?;
            let path = output::export_pdf(&snapshot, &ReportMeta::generate(), &account.out_dir)?;
            println!("PDF written to {}", path.display());
        }
        Command::Track(args) => {
            let monthly = tracker::compute_monthly(&MonthlyInput {
                electricity_kwh: args.electricity_kwh,
                fuel_liters: args.fuel_liters,
                vehicle_km: args.vehicle_km,
            });
            print!("{}", display::render_monthly(&monthly));
            if let Some(path) = &args.answers {
                let answers = load_answers(path)?;
                print!("{}", display::render_progress(&tracker::section_progress(&answers)));
            }
        }
        Command::Template => {
            let template = serde_json::to_string_pretty(&QuestionnaireAnswers::default())?;
            println!("{template}");
        }
    }
    Ok(())
}

fn load_answers(path: &Path) -> anyhow::Result<QuestionnaireAnswers> {
    QuestionnaireAnswers::load(path)
        .with_context(|| format!("loading answers from {}", path.display()))
}

fn evaluate(path: &Path) -> anyhow::Result<Snapshot> {
    Ok(Snapshot::evaluate(load_answers(path)?))
}

fn ensure_unlocked(gate: &AccessGate, capability: Capability) -> anyhow::Result<()> {
    match gate.status(capability) {
        GateStatus::Unlocked => Ok(()),
        GateStatus::Locked(prompt) => anyhow::bail!("{}", prompt.message(capability)),
    }
}
