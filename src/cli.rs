#![expect(clippy::print_stdout)] // the CLI reports on stdout

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use preop::assessment::AssessmentInput;
use preop::client::EvaluationClient;
use preop::config::{self, AppSettings};
use preop::session::{EvaluationReply, Session};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "preop", about = "Pre-anesthesia testing tool")]
pub struct Cli {
    /// Launches the GUI when no subcommand is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one assessment for evaluation and print the recommendations
    Evaluate {
        /// Patient age in years
        #[arg(long, default_value_t = 0)]
        age: u32,

        /// Comma separated comorbidities (e.g. "diabetes, CAD, COPD")
        #[arg(long, default_value = "")]
        comorbidities: String,

        /// Functional status (e.g. "METs <4, ADLs")
        #[arg(long, default_value = "")]
        functional_status: String,

        /// ASA classification (1-4)
        #[arg(long, default_value = "")]
        asa_class: String,

        /// Procedure type (e.g. vascular, ortho, endoscopy); stored lower-case
        #[arg(long, default_value = "")]
        procedure_type: String,

        /// Evaluation endpoint. Defaults to the configured one.
        #[arg(long, env = "PREOP_ENDPOINT")]
        endpoint: Option<String>,

        /// Also write a summary file
        #[arg(long)]
        summary: bool,

        /// Directory for the summary file. Defaults to the configured one.
        #[arg(long, requires = "summary")]
        export_dir: Option<PathBuf>,
    },
    /// Show or update the saved settings
    Config {
        /// Evaluation endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Request timeout in seconds
        #[arg(long, conflicts_with = "no_timeout")]
        timeout_secs: Option<u64>,

        /// Remove the request timeout
        #[arg(long)]
        no_timeout: bool,

        /// Directory summaries are written to
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

pub async fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Evaluate {
            age,
            comorbidities,
            functional_status,
            asa_class,
            procedure_type,
            endpoint,
            summary,
            export_dir,
        } => {
            let mut settings = config::load_app_settings();
            if let Some(endpoint) = endpoint {
                settings.endpoint = endpoint;
            }

            let mut input = AssessmentInput {
                age,
                comorbidities,
                functional_status,
                asa_class,
                procedure_type: String::new(),
            };
            input.set_procedure_type(&procedure_type);

            let mut session = Session::new();
            session.input = input;
            let succeeded = evaluate(&mut session, &settings).await?;

            if summary {
                let dir = export_dir.unwrap_or_else(|| settings.resolved_export_dir());
                let path = session
                    .export_summary(&dir)
                    .context("Failed to export summary")?;
                println!("Summary written to {}", path.display());
            }

            if !succeeded {
                anyhow::bail!("Evaluation against {} failed", settings.endpoint);
            }
        }
        Commands::Config {
            endpoint,
            timeout_secs,
            no_timeout,
            export_dir,
        } => {
            let mut settings = config::load_app_settings();
            let changed = apply_config_changes(
                &mut settings,
                endpoint,
                timeout_secs,
                no_timeout,
                export_dir,
            );
            if changed {
                config::save_app_settings(&settings).context("Failed to save settings")?;
                tracing::info!("Settings updated");
            }

            println!("Config file: {}", config::get_config_path().display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

async fn evaluate(session: &mut Session, settings: &AppSettings) -> Result<bool> {
    let client = EvaluationClient::from_settings(settings)?;
    println!("Evaluating via {} ...", client.endpoint());

    let sent = session.request_payload();
    let outcome = client.evaluate_outcome(&sent).await;
    let succeeded = outcome.is_success();
    session.apply_reply(EvaluationReply { sent, outcome });

    if succeeded && let Some(entry) = session.history().latest() {
        println!("Evaluated at {}", entry.timestamp);
    }
    println!("Recommendations:");
    for rec in session.recommendations() {
        println!("- {rec}");
    }

    Ok(succeeded)
}

fn apply_config_changes(
    settings: &mut AppSettings,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    no_timeout: bool,
    export_dir: Option<PathBuf>,
) -> bool {
    let before = settings.clone();

    if let Some(endpoint) = endpoint {
        settings.endpoint = endpoint;
    }
    if no_timeout {
        settings.request_timeout_secs = None;
    } else if let Some(secs) = timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    if let Some(dir) = export_dir {
        settings.export_dir = Some(dir);
    }

    *settings != before
}
