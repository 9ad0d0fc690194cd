//! Horoscope API request and response bodies

use serde::{Deserialize, Serialize};

/// Input for a horoscope prediction.
///
/// Used both as the POST JSON body and as the GET query string. The
/// birthdate is expected as `YYYY-MM-DD` but is passed through unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeRequest {
    pub birthdate: String,
    pub zodiac_sign: String,
}

/// A generated horoscope, echoing the request fields verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoroscopeResponse {
    pub birthdate: String,
    pub zodiac_sign: String,
    pub horoscope: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Error body returned for every non-success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_requires_both_fields() {
        let ok: Result<HoroscopeRequest, _> =
            serde_json::from_str(r#"{"birthdate":"1990-01-01","zodiac_sign":"Capricorn"}"#);
        assert!(ok.is_ok());

        let missing: Result<HoroscopeRequest, _> =
            serde_json::from_str(r#"{"birthdate":"1990-01-01"}"#);
        assert!(missing.is_err());
    }
}
