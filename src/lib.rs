//! # preop - Pre-Anesthesia Testing Tool
//!
//! A small client for an external pre-anesthesia evaluation service. An
//! assessment (age, comorbidities, functional status, ASA class and
//! procedure type) is posted as JSON; the service answers with a timestamp
//! and a list of recommendations, which the tool displays, keeps in an
//! in-session history, and can export as a plain-text summary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use preop::client::EvaluationClient;
//! use preop::session::{EvaluationReply, Session};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut session = Session::new();
//! session.input.age = 45;
//! session.input.comorbidities = "diabetes".to_owned();
//! session.input.set_procedure_type("Vascular");
//!
//! let client = EvaluationClient::new("http://localhost:5000/evaluate", None)?;
//! let sent = session.request_payload();
//! let outcome = client.evaluate_outcome(&sent).await;
//! session.apply_reply(EvaluationReply { sent, outcome });
//!
//! for rec in session.recommendations() {
//!     println!("- {rec}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`assessment`]: request/response data model and the decision history
//! - [`client`]: HTTP evaluation client and its tagged outcome
//! - [`session`]: UI state shared by the GUI and CLI
//! - [`summary`]: plain-text summary export
//! - [`worker`]: background evaluation threads
//! - [`config`]: persisted settings
//! - [`error`]: error types
//! - [`logging`]: tracing setup

#![warn(clippy::all, rust_2018_idioms)]

pub mod assessment;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod summary;
pub mod worker;
