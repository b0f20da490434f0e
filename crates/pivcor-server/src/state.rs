// Server state
// Configuration and collaborators shared by every request handler

use std::sync::Arc;

use pivcor_lib::services::mail::{ResendMailer, SharedMailer};
use pivcor_lib::services::Intake;
use pivcor_lib::AppConfig;

/// Shared handler state
pub struct AppState {
    pub config: AppConfig,
    pub intake: Intake,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig, mailer: SharedMailer) -> Self {
        let intake = Intake::new(mailer, config.from_email.clone(), config.lead_email.clone());
        Self { config, intake }
    }

    /// State backed by the Resend API
    pub fn from_config(config: AppConfig) -> Self {
        let mailer = Arc::new(ResendMailer::new(
            config.resend_api_url.clone(),
            config.resend_api_key.clone(),
        ));
        Self::new(config, mailer)
    }
}
