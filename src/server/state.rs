//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use anyhow::Context;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::services::{HoroscopeService, HuggingFaceClient, TextGenerator};

/// Shared application state
///
/// Cheap to clone; every field is either `Arc`-backed or `Copy`. Nothing in
/// here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Horoscope generation service
    pub horoscope: Arc<HoroscopeService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create the state with the Hugging Face client built from settings
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        tracing::debug!(
            model = %settings.inference.model_name,
            base_url = %settings.inference.base_url,
            "Creating Hugging Face inference client"
        );

        let client = HuggingFaceClient::new(&settings.inference)
            .context("Failed to create Hugging Face inference client")?;

        Ok(Self::with_generator(settings, Arc::new(client)))
    }

    /// Create the state around an already constructed text generator
    pub fn with_generator(settings: Settings, generator: Arc<dyn TextGenerator>) -> Self {
        let horoscope = HoroscopeService::from_config(generator, &settings.inference);

        tracing::info!(model = %horoscope.model(), "Application state initialized successfully");

        Self {
            settings: Arc::new(settings),
            horoscope: Arc::new(horoscope),
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
