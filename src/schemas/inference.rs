//! Hugging Face Inference API schema definitions
//!
//! Request body for the text-generation task. Responses are decoded as raw
//! JSON and classified by [`crate::services::Generation::from_json`], since the
//! backend answers with several shapes depending on model and parameters.

use serde::Serialize;

/// Text-generation request body
#[derive(Debug, Clone, Serialize)]
pub struct TextGenerationRequest<'a> {
    /// The prompt
    pub inputs: &'a str,

    /// Generation parameters
    pub parameters: GenerationParameters,
}

/// Parameters for the text-generation task
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    /// Maximum number of newly generated tokens
    pub max_new_tokens: u32,

    /// Whether the prompt is echoed in front of the generated text
    pub return_full_text: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = TextGenerationRequest {
            inputs: "Hello",
            parameters: GenerationParameters {
                max_new_tokens: 200,
                return_full_text: false,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], "Hello");
        assert_eq!(json["parameters"]["max_new_tokens"], 200);
        assert_eq!(json["parameters"]["return_full_text"], false);
    }
}
