//! DTOs for link shortening endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// A missing or `null` `longUrl` deserializes to an empty string so it is
/// reported as a validation error rather than a JSON rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        length(min = 1, message = "Long URL is required"),
        url(message = "Invalid URL format")
    )]
    pub long_url: String,

    /// Optional custom short code. Disallowed characters are stripped, not rejected.
    #[serde(default)]
    pub custom_code: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_long_url_is_empty() {
        let request: ShortenRequest = serde_json::from_value(json!({ "longUrl": null })).unwrap();
        assert_eq!(request.long_url, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_missing_long_url_is_empty() {
        let request: ShortenRequest =
            serde_json::from_value(json!({ "customCode": "abc" })).unwrap();
        assert_eq!(request.long_url, "");
        assert_eq!(request.custom_code.as_deref(), Some("abc"));
    }

    #[test]
    fn test_valid_request() {
        let request: ShortenRequest = serde_json::from_value(json!({
            "longUrl": "https://example.com/path",
            "customCode": null
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(request.custom_code.is_none());
    }
}
