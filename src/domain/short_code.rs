//! Short code value type.
//!
//! A short code is the path segment a client visits (`/{code}`). It may only
//! contain ASCII letters, digits, hyphens and underscores, and must not be empty.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Matches every character that is not allowed in a short code.
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("static regex is valid"));

/// Returned by [`ShortCode::new`] when a string is not a well-formed code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid short code: {0:?}")]
pub struct InvalidShortCode(pub String);

/// A validated short code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Accepts `raw` only if it is non-empty and already uses the allowed alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidShortCode`] otherwise. Nothing is stripped here, see
    /// [`ShortCode::sanitize`] for the lenient variant used on user input.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidShortCode> {
        let raw = raw.into();
        if raw.is_empty() || DISALLOWED_CHARS.is_match(&raw) {
            return Err(InvalidShortCode(raw));
        }
        Ok(Self(raw))
    }

    /// Strips every character outside `[A-Za-z0-9_-]`.
    ///
    /// Returns `None` when nothing is left, which callers treat as
    /// "no custom code requested".
    ///
    /// # Examples
    ///
    /// ```
    /// use shortlink::domain::ShortCode;
    ///
    /// let code = ShortCode::sanitize("a!b@c#1").unwrap();
    /// assert_eq!(code.as_str(), "abc1");
    /// assert!(ShortCode::sanitize("!!!").is_none());
    /// ```
    pub fn sanitize(raw: &str) -> Option<Self> {
        let cleaned = DISALLOWED_CHARS.replace_all(raw, "");
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned.into_owned()))
        }
    }

    /// Wraps `raw` without checking it. Callers must guarantee the alphabet.
    pub(crate) fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_allowed_alphabet() {
        let code = ShortCode::new("Ab9_-z").unwrap();
        assert_eq!(code.as_str(), "Ab9_-z");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(ShortCode::new(""), Err(InvalidShortCode(String::new())));
    }

    #[test]
    fn test_new_rejects_disallowed_chars() {
        assert!(ShortCode::new("abc/def").is_err());
        assert!(ShortCode::new("with space").is_err());
        assert!(ShortCode::new("ünï").is_err());
    }

    #[test]
    fn test_sanitize_strips_symbols() {
        let code = ShortCode::sanitize("a!b@c#1").unwrap();
        assert_eq!(code.as_str(), "abc1");
    }

    #[test]
    fn test_sanitize_keeps_hyphen_and_underscore() {
        let code = ShortCode::sanitize("my-link_2024").unwrap();
        assert_eq!(code.as_str(), "my-link_2024");
    }

    #[test]
    fn test_sanitize_strips_non_ascii() {
        let code = ShortCode::sanitize("café links").unwrap();
        assert_eq!(code.as_str(), "caflinks");
    }

    #[test]
    fn test_sanitize_nothing_left() {
        assert!(ShortCode::sanitize("").is_none());
        assert!(ShortCode::sanitize("!@# $%").is_none());
    }

    #[test]
    fn test_sanitized_code_is_valid() {
        let code = ShortCode::sanitize("x?y=z").unwrap();
        assert_eq!(ShortCode::new(code.as_str()).unwrap(), code);
    }
}
