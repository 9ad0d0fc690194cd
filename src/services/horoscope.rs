//! Horoscope generation
//!
//! Builds the astrologer prompt, calls the configured [`TextGenerator`] once,
//! and shapes whatever comes back into a short single-line horoscope.

use std::sync::Arc;

use thiserror::Error;

use crate::config::InferenceConfig;
use crate::schemas::HoroscopeResponse;
use crate::services::inference::{Generation, InferenceError, TextGenerator};

/// Text used when the backend answers with something other than text
pub const NO_HOROSCOPE: &str = "No horoscope generated";

/// Number of period-separated segments kept in the final horoscope
pub const MAX_SEGMENTS: usize = 3;

const SYSTEM_MESSAGE: &str = "You are an expert astrologer, providing personalized horoscopes \
based on the user's birthdate and zodiac sign. Be insightful, clear, and include advice on \
personal growth, relationships, and career.";

/// Errors surfaced by [`HoroscopeService`]
#[derive(Error, Debug)]
pub enum HoroscopeError {
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Stateless horoscope generator around an injected text-generation backend
#[derive(Clone)]
pub struct HoroscopeService {
    generator: Arc<dyn TextGenerator>,
    model: String,
    max_new_tokens: u32,
}

impl HoroscopeService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        model: impl Into<String>,
        max_new_tokens: u32,
    ) -> Self {
        Self {
            generator,
            model: model.into(),
            max_new_tokens,
        }
    }

    /// Build a service using the model and token budget from configuration
    pub fn from_config(generator: Arc<dyn TextGenerator>, config: &InferenceConfig) -> Self {
        Self::new(generator, config.model_name.clone(), config.max_new_tokens)
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a horoscope for the given birthdate and sign.
    ///
    /// Both inputs are echoed back unchanged. Backend failures are returned
    /// as-is; there is no retry and no fallback text.
    pub async fn generate_horoscope(
        &self,
        birthdate: &str,
        zodiac_sign: &str,
    ) -> Result<HoroscopeResponse, HoroscopeError> {
        let prompt = build_prompt(birthdate, zodiac_sign);

        let generation = self
            .generator
            .generate(&prompt, &self.model, self.max_new_tokens)
            .await?;

        tracing::debug!(output = ?generation, "Raw model output");

        Ok(HoroscopeResponse {
            birthdate: birthdate.to_string(),
            zodiac_sign: zodiac_sign.to_string(),
            horoscope: shape_horoscope(&generation),
        })
    }
}

/// Build the astrologer prompt for one request
pub fn build_prompt(birthdate: &str, zodiac_sign: &str) -> String {
    format!(
        "{SYSTEM_MESSAGE}\n\n\
         User: I was born on {birthdate}. My zodiac sign is {zodiac_sign}. What is my horoscope for today?\n\n\
         Astrologer: Provide a concise horoscope for today in 3 lines."
    )
}

/// Turn raw model output into the returned horoscope text
pub fn shape_horoscope(generation: &Generation) -> String {
    let text = match generation {
        Generation::Text(text) => text.trim(),
        Generation::NonText(_) => NO_HOROSCOPE,
    };

    let single_line = text.replace('\n', " ");
    shorten(single_line.trim())
}

/// Keep the first [`MAX_SEGMENTS`] period-separated segments, joined by `". "`.
///
/// Splitting is purely on `.`, so abbreviations and decimals count as
/// sentence ends and the separator adds a space after each kept segment.
pub fn shorten(text: &str) -> String {
    text.split('.')
        .take(MAX_SEGMENTS)
        .collect::<Vec<_>>()
        .join(". ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Returns a canned result and remembers the last call
    struct StubGenerator {
        result: Mutex<Option<Result<Generation, InferenceError>>>,
        last_call: Mutex<Option<(String, String, u32)>>,
    }

    impl StubGenerator {
        fn returning(result: Result<Generation, InferenceError>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                last_call: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            prompt: &str,
            model: &str,
            max_new_tokens: u32,
        ) -> Result<Generation, InferenceError> {
            *self.last_call.lock().unwrap() =
                Some((prompt.to_string(), model.to_string(), max_new_tokens));
            self.result.lock().unwrap().take().expect("generator called twice")
        }
    }

    fn text(s: &str) -> Generation {
        Generation::Text(s.to_string())
    }

    #[test]
    fn test_prompt_embeds_inputs() {
        let prompt = build_prompt("1990-01-01", "Capricorn");
        assert!(prompt.starts_with("You are an expert astrologer"));
        assert!(prompt.contains("User: I was born on 1990-01-01. My zodiac sign is Capricorn."));
        assert!(prompt.ends_with("Astrologer: Provide a concise horoscope for today in 3 lines."));
    }

    #[test]
    fn test_shape_removes_newlines() {
        let shaped = shape_horoscope(&text(
            "You will find clarity today.\nFocus on your goals.\nLove is near.",
        ));
        assert_eq!(shaped, "You will find clarity today.  Focus on your goals.  Love is near");
        assert!(!shaped.contains('\n'));
    }

    #[test]
    fn test_shape_without_periods_is_whole_text() {
        let shaped = shape_horoscope(&text("  Clarity today\nFocus on goals\nLove is near \n"));
        assert_eq!(shaped, "Clarity today Focus on goals Love is near");
    }

    #[test]
    fn test_shape_keeps_three_segments() {
        let shaped = shape_horoscope(&text("One. Two. Three. Four. Five."));
        assert_eq!(shaped, "One.  Two.  Three");
        assert!(shaped.split('.').count() <= MAX_SEGMENTS);
    }

    #[test]
    fn test_shape_splits_on_decimals() {
        // 3.5 counts as a sentence boundary
        let shaped = shape_horoscope(&text("Luck rises 3.5 times. Rest well."));
        assert_eq!(shaped, "Luck rises 3. 5 times.  Rest well");
    }

    #[test]
    fn test_shape_non_text() {
        let shaped = shape_horoscope(&Generation::NonText(json!({ "tokens": [1, 2] })));
        assert_eq!(shaped, NO_HOROSCOPE);
    }

    #[test]
    fn test_shorten_reapplied_stays_bounded() {
        let samples = [
            "A. B. C. D. E.",
            "No periods at all",
            "...",
            "",
            "Mr. Smith met Dr. Jones at 4.30 p.m.",
        ];

        for sample in samples {
            let once = shorten(sample);
            let twice = shorten(&once);
            assert!(once.split('.').count() <= MAX_SEGMENTS);
            assert!(twice.split('.').count() <= MAX_SEGMENTS);
        }

        assert_eq!(shorten(&shorten("No periods at all")), "No periods at all");
    }

    #[tokio::test]
    async fn test_generate_echoes_inputs() {
        let generator = StubGenerator::returning(Ok(text("Bright day. Be bold.")));
        let service = HoroscopeService::new(generator.clone(), "test/model", 200);

        let response = service
            .generate_horoscope("1990-01-01", "Capricorn")
            .await
            .unwrap();

        assert_eq!(response.birthdate, "1990-01-01");
        assert_eq!(response.zodiac_sign, "Capricorn");
        assert_eq!(response.horoscope, "Bright day.  Be bold. ");

        let (prompt, model, budget) = generator.last_call.lock().unwrap().clone().unwrap();
        assert_eq!(prompt, build_prompt("1990-01-01", "Capricorn"));
        assert_eq!(model, "test/model");
        assert_eq!(budget, 200);
    }

    #[tokio::test]
    async fn test_generate_echoes_odd_inputs_verbatim() {
        let generator = StubGenerator::returning(Ok(text("ok")));
        let service = HoroscopeService::new(generator, "test/model", 50);

        let response = service
            .generate_horoscope(" not-a-date ", "  leo\n")
            .await
            .unwrap();

        assert_eq!(response.birthdate, " not-a-date ");
        assert_eq!(response.zodiac_sign, "  leo\n");
    }

    #[tokio::test]
    async fn test_generate_propagates_backend_error() {
        let generator = StubGenerator::returning(Err(InferenceError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        }));
        let service = HoroscopeService::new(generator, "test/model", 200);

        let err = service
            .generate_horoscope("1990-01-01", "Capricorn")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error: 401 - Invalid credentials");
    }
}
