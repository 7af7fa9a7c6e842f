//! Browser front end for Sketchnotes.
//!
//! Serves a single notebook page on a local address. Every user action is one
//! HTTP request that runs one [`sketchnotes_core::Session`] operation. The browser
//! is then redirected to a freshly rendered page.

pub mod commands;
pub mod page;
pub mod routes;
pub mod settings;
pub mod state;

pub use routes::router;
pub use settings::AppSettings;
pub use state::AppState;

/// Opens the stores named in `settings` and serves the notebook until the
/// process is stopped.
///
/// # Errors
///
/// Returns a user-facing message if the stores cannot be opened or the address
/// cannot be bound.
pub async fn run(settings: AppSettings) -> std::result::Result<(), String> {
    let state = AppState::open(&settings).map_err(|e| {
        log::error!("Failed to open notebook in {}: {e}", settings.data_directory);
        e.user_message()
    })?;

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", settings.bind_address))?;
    log::info!("Sketchnotes listening on http://{}", settings.bind_address);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| format!("Server error: {e}"))
}
