//! Case-sensitivity / backslash-escape codec for the `keywords7` family.
//!
//! The blob packs two booleans into one string: `"true"` or `"false"` for
//! case sensitivity, optionally followed by `no_backslash_escape`.

use crate::error::{Error, Result};

/// Token that turns backslash string escapes off.
pub const NO_BACKSLASH_ESCAPE: &str = "no_backslash_escape";

/// Decoded `keywords7` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseEscape {
    pub case_sensitive: bool,
    pub backslash_escape: bool,
}

impl Default for CaseEscape {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            backslash_escape: true,
        }
    }
}

impl CaseEscape {
    pub fn new(case_sensitive: bool, backslash_escape: bool) -> Self {
        Self {
            case_sensitive,
            backslash_escape,
        }
    }

    /// Decode a raw `keywords7` value.
    ///
    /// Whitespace between tokens is incidental. The first token must be
    /// exactly `true` or `false`.
    pub fn decode(raw: &str) -> Result<Self> {
        let mut tokens = raw.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        let case_sensitive = parse_bool_token(first).ok_or_else(|| Error::InvalidCaseToken {
            raw: raw.to_string(),
            token: first.to_string(),
        })?;
        let backslash_escape = !tokens.any(|t| t == NO_BACKSLASH_ESCAPE);

        Ok(Self {
            case_sensitive,
            backslash_escape,
        })
    }

    /// Canonical encoded form.
    pub fn encode(&self) -> String {
        let mut raw = bool_token(self.case_sensitive).to_string();
        if !self.backslash_escape {
            raw.push(' ');
            raw.push_str(NO_BACKSLASH_ESCAPE);
        }
        raw
    }
}

/// Parse the exact `true`/`false` tokens used throughout the external formats.
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

pub fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
