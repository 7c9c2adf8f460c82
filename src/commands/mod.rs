pub mod add;
pub mod app;
pub mod auth;
pub mod config;
pub mod delete;
pub mod list;

use anyhow::{Context, Result};
use countdown_core::config::CountdownConfig;
use countdown_core::controller::Controller;
use countdown_core::session::ConfiguredSession;
use countdown_core::store::HttpStore;
use owo_colors::OwoColorize;

use crate::utils::tui;

pub type AppController = Controller<HttpStore<ConfiguredSession>>;

/// Build a controller talking to the configured events API.
pub fn connect(config: &CountdownConfig) -> Result<AppController> {
    let session = ConfiguredSession::from_config(&config.auth)?;
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;
    let store = HttpStore::with_client(http, &config.api_base, session)?;

    tracing::debug!(api_base = %config.api_base, "connected event store");

    Ok(Controller::new(store))
}

/// Fetch the event list behind a loading spinner.
pub async fn load(controller: &mut AppController) -> Result<()> {
    let spinner = tui::create_spinner("Loading events...");
    let result = controller.load().await;
    spinner.finish_and_clear();

    result.context("Failed to load events")
}

pub fn print_heading() {
    println!("{}", "Upcoming Events".bold());
    println!();
}
