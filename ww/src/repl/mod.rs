//! Interactive REPL for Wander Wise
//!
//! Drives the session controller from slash commands and a guided questionnaire.

pub mod render;
mod session;

pub use session::{ReplSession, SlashCommand, parse_command, parse_duration, pick_option};

use std::sync::Arc;

use eyre::Result;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::auth::MockAuthenticator;
use crate::config::Config;
use crate::gateway::TripGateway;
use crate::session::SessionController;

/// Run the interactive REPL
///
/// This is the main entry point for `ww session`.
pub async fn run_interactive(config: &Config) -> Result<()> {
    // Validate API key early
    config.validate()?;

    let gateway = Arc::new(TripGateway::from_config(config)?);
    let ctl = SessionController::new(gateway, Arc::new(MockAuthenticator));

    let session_id = Uuid::now_v7();
    let span = info_span!("session", id = %session_id);

    async move {
        info!("Session started");
        let mut session = ReplSession::new(ctl)?;
        let result = session.run().await;
        info!("Session ended");
        result
    }
    .instrument(span)
    .await
}
