//! Application server
//!
//! This module provides the main application server implementation
//! including initialization and graceful shutdown handling.

use crate::{
    config::Settings,
    server::{routes, state::AppState},
};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::signal;

/// Main application struct
pub struct App {
    addr: SocketAddr,
    state: AppState,
}

impl App {
    /// Create a new application instance
    ///
    /// Builds the inference client from settings; fails if the server
    /// address is invalid or no API key is configured.
    pub fn new(settings: Settings) -> Result<Self> {
        let addr = settings
            .server_addr()
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server address {}", settings.server_addr()))?;

        tracing::debug!("Initializing application state");
        let state = AppState::new(settings)?;

        Ok(Self { addr, state })
    }

    /// Run the server until Ctrl+C or SIGTERM, then drain in-flight requests
    pub async fn run_with_graceful_shutdown(self) -> Result<()> {
        let router = routes::create_router(self.state);

        tracing::info!("Starting server on {} with graceful shutdown enabled", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create a future that completes when a shutdown signal is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        let err = App::new(Settings::default()).err().unwrap();
        assert!(format!("{err:#}").contains("Missing API key"));
    }

    #[test]
    fn test_new_with_api_key() {
        let mut settings = Settings::default();
        settings.inference.api_key = Some("hf_test".to_string());

        let app = App::new(settings).unwrap();
        assert_eq!(app.state().horoscope.model(), "meta-llama/Llama-3.2-3B-Instruct");
    }

    #[test]
    fn test_new_rejects_bad_host() {
        let mut settings = Settings::default();
        settings.host = "not a host".to_string();
        settings.inference.api_key = Some("hf_test".to_string());

        assert!(App::new(settings).is_err());
    }
}
