//! Schema module
//!
//! Wire types for the public HTTP API and the inference backend.

pub mod horoscope;
pub mod inference;

pub use horoscope::{ErrorBody, HoroscopeRequest, HoroscopeResponse, WelcomeResponse};
