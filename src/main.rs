use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use quickmed::analysis::{AnalysisGateway, AnalysisKind, UrineMode};
use quickmed::calc::compatibility::BloodType;
use quickmed::calc::dose::{self, Concentration};
use quickmed::calc::{CalcError, due_date};
use quickmed::error::{self, ErrorCode};
use quickmed::llm::{ImagePayload, LlmError};
use quickmed::reference;
use quickmed::render;
use quickmed::state::{self, PanelError, PanelStatus, Session, View};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("--donor and --recipient must be given together")]
    HalfPair,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Calc(e) => e.error_code(),
            Self::Llm(e) => e.error_code(),
            Self::Panel(e) => e.error_code(),
            Self::AnalysisFailed(_) => "E_ANALYSIS_FAILED",
            Self::HalfPair => "E_USAGE",
            Self::Json(_) => "E_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quickmed", about = "QuickMed Nepal: dose, due date, blood compatibility and AI image checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pediatric syrup dose by body weight.
    Dose {
        #[arg(long)]
        weight: f64,
        #[arg(long, default_value = "paracetamol_syrup")]
        medicine: String,
        #[arg(long)]
        concentration_mg: Option<f64>,
        #[arg(long)]
        volume_ml: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Due date from the last menstrual period.
    DueDate {
        #[arg(long)]
        lmp: String,
        /// Defaults to the current UTC date.
        #[arg(long)]
        today: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Blood transfusion compatibility; the full chart when no pair is given.
    Compat {
        #[arg(long)]
        donor: Option<String>,
        #[arg(long)]
        recipient: Option<String>,
    },
    /// Send an image to the vision model.
    Analyze {
        kind: AnalyzeKind,
        image: PathBuf,
        #[arg(long)]
        json: bool,
    },
    Emergency,
    Transport,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum AnalyzeKind {
    Blood,
    Urine,
    Pregnancy,
    Skin,
    Xray,
}

impl From<AnalyzeKind> for AnalysisKind {
    fn from(kind: AnalyzeKind) -> Self {
        match kind {
            AnalyzeKind::Blood => AnalysisKind::BloodSlide,
            AnalyzeKind::Urine => AnalysisKind::Urine,
            AnalyzeKind::Pregnancy => AnalysisKind::Pregnancy,
            AnalyzeKind::Skin => AnalysisKind::Skin,
            AnalyzeKind::Xray => AnalysisKind::Xray,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Dose { weight, medicine, concentration_mg, volume_ml, json } => {
            run_dose(weight, &medicine, concentration_mg, volume_ml, json)
        }
        Command::DueDate { lmp, today, json } => run_due_date(&lmp, today.as_deref(), json),
        Command::Compat { donor, recipient } => run_compat(donor.as_deref(), recipient.as_deref()),
        Command::Analyze { kind, image, json } => run_analyze(kind, &image, json).await,
        Command::Emergency => {
            println!("{}", render::emergency_card());
            Ok(())
        }
        Command::Transport => {
            println!("{}", render::transport_card());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error::describe(&e));
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// CALCULATORS
// =============================================================================

fn run_dose(
    weight: f64,
    medicine: &str,
    concentration_mg: Option<f64>,
    volume_ml: Option<f64>,
    json: bool,
) -> Result<(), CliError> {
    let medicine = reference::find_medicine(medicine)?;
    let defaults = Concentration::default_for(medicine);
    let concentration = Concentration {
        mg: concentration_mg.unwrap_or(defaults.mg),
        ml: volume_ml.unwrap_or(defaults.ml),
    };
    let result = dose::calculate(medicine, weight, concentration)?;
    emit(json, &result, || render::dose_card(medicine, weight, concentration, &result))
}

fn run_due_date(lmp: &str, today: Option<&str>, json: bool) -> Result<(), CliError> {
    let lmp = due_date::parse_date(lmp)?;
    let today = match today {
        Some(raw) => due_date::parse_date(raw)?,
        None => time::OffsetDateTime::now_utc().date(),
    };
    let result = due_date::calculate(lmp, today)?;
    emit(json, &result, || render::due_date_card(&result))
}

fn run_compat(donor: Option<&str>, recipient: Option<&str>) -> Result<(), CliError> {
    let card = match (donor, recipient) {
        (None, None) => render::compatibility_chart(),
        (Some(d), Some(r)) => render::compatibility_pair(d.parse::<BloodType>()?, r.parse::<BloodType>()?),
        _ => return Err(CliError::HalfPair),
    };
    println!("{}", render::with_disclaimer(&card));
    Ok(())
}

// =============================================================================
// ANALYSIS
// =============================================================================

async fn run_analyze(kind: AnalyzeKind, path: &Path, json: bool) -> Result<(), CliError> {
    let image = ImagePayload::from_path(path)?;
    let gateway = AnalysisGateway::from_env()?;
    let analysis_kind = AnalysisKind::from(kind);
    let mut session = Session::new();
    session.navigate(View::for_kind(analysis_kind));

    match kind {
        AnalyzeKind::Blood => {
            session.blood.select_image(image);
            let ticket = session.blood.submit()?;
            let result = gateway.analyze_blood_slide(&ticket.image).await;
            session.blood.complete(ticket, Ok(result));
            finish(session.blood.status(), json, render::blood_card)
        }
        AnalyzeKind::Urine | AnalyzeKind::Pregnancy => {
            let mode = if matches!(kind, AnalyzeKind::Pregnancy) { UrineMode::Pregnancy } else { UrineMode::Standard };
            session.set_urine_mode(mode);
            session.urine.select_image(image);
            let ticket = session.urine.submit()?;
            let result = gateway.analyze_urine(&ticket.image, mode).await;
            session.urine.complete(ticket, Ok(result));
            finish(session.urine.status(), json, |findings| render::urine_card(findings, mode))
        }
        AnalyzeKind::Skin => {
            session.skin.select_image(image);
            let ticket = session.skin.submit()?;
            let outcome = state::caught(analysis_kind, gateway.analyze_skin(&ticket.image).await);
            session.skin.complete(ticket, outcome);
            if !json {
                println!("{}", render::with_disclaimer(&render::skin_panel(session.skin.status())));
            }
            finish_strict(session.skin.status(), json)
        }
        AnalyzeKind::Xray => {
            session.xray.select_image(image);
            let ticket = session.xray.submit()?;
            let outcome = state::caught(analysis_kind, gateway.analyze_xray(&ticket.image).await);
            session.xray.complete(ticket, outcome);
            if !json {
                println!("{}", render::with_disclaimer(&render::xray_panel(session.xray.status())));
            }
            finish_strict(session.xray.status(), json)
        }
    }
}

/// Print a degrading panel's result. Blood and urine panels always end in
/// `Done`.
fn finish<T: Serialize>(status: &PanelStatus<T>, json: bool, card: impl Fn(&T) -> String) -> Result<(), CliError> {
    match status {
        PanelStatus::Done(result) => emit(json, result, || card(result)),
        PanelStatus::Failed(message) => Err(CliError::AnalysisFailed(message.clone())),
        PanelStatus::Idle | PanelStatus::Loading => Err(CliError::AnalysisFailed("no result".into())),
    }
}

/// Skin and X-ray: the card was already printed for human output.
fn finish_strict<T: Serialize>(status: &PanelStatus<T>, json: bool) -> Result<(), CliError> {
    match status {
        PanelStatus::Done(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(result)?);
            }
            Ok(())
        }
        PanelStatus::Failed(message) => Err(CliError::AnalysisFailed(message.clone())),
        PanelStatus::Idle | PanelStatus::Loading => Err(CliError::AnalysisFailed("no result".into())),
    }
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, card: impl FnOnce() -> String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render::with_disclaimer(&card()));
    }
    Ok(())
}
