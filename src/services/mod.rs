//! Services module
//!
//! Contains business logic and external service integrations.

pub mod horoscope;
pub mod inference;

pub use horoscope::{HoroscopeError, HoroscopeService, NO_HOROSCOPE};
pub use inference::{Generation, HuggingFaceClient, InferenceError, TextGenerator};
