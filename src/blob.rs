//! Flat blob data structures
//!
//! Araxis Merge stores every generic language in one flat JSON object of
//! string keys to string values, optionally preceded by a `json: ` header.
//! Keys fall into two families:
//!
//! ```text
//! file.patterns.<id>                 -> filenamePattern
//! genericlanguage.description.<id>   -> name
//! keywords.*.<suffix> .. lexer.*.<suffix>
//! ```
//!
//! where `<suffix>` is derived from the filename pattern (see
//! [`crate::pattern::derive_suffix`]).

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;

// Blob text constants
pub const HEADER: &str = "json: ";
pub const HEADER_TAG: &str = "json:";

// Identifier-keyed family
pub const FILE_PATTERNS_PREFIX: &str = "file.patterns.";
pub const DESCRIPTION_PREFIX: &str = "genericlanguage.description.";

/// Output layout of blob text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobFormat {
    /// Minified JSON behind the `json: ` header, as Araxis Merge writes it.
    #[default]
    Header,
    /// Pretty-printed JSON with no header, for reading and diffing.
    Pretty,
}

impl BlobFormat {
    pub fn from_no_header(no_header: bool) -> Self {
        if no_header {
            Self::Pretty
        } else {
            Self::Header
        }
    }
}

/// One pattern-keyed family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternFamily {
    KeywordsClass1,
    KeywordsClass2,
    OperatorSymbols,
    SingleLineComment,
    MultiLineCommentStart,
    MultiLineCommentEnd,
    CaseEscape,
    KeywordsClass3,
    Lexer,
}

impl PatternFamily {
    pub const ALL: [PatternFamily; 9] = [
        PatternFamily::KeywordsClass1,
        PatternFamily::KeywordsClass2,
        PatternFamily::OperatorSymbols,
        PatternFamily::SingleLineComment,
        PatternFamily::MultiLineCommentStart,
        PatternFamily::MultiLineCommentEnd,
        PatternFamily::CaseEscape,
        PatternFamily::KeywordsClass3,
        PatternFamily::Lexer,
    ];

    /// Key prefix, up to and including the `*.` before the suffix.
    pub fn prefix(self) -> &'static str {
        match self {
            PatternFamily::KeywordsClass1 => "keywords.*.",
            PatternFamily::KeywordsClass2 => "keywords2.*.",
            PatternFamily::OperatorSymbols => "keywords3.*.",
            PatternFamily::SingleLineComment => "keywords4.*.",
            PatternFamily::MultiLineCommentStart => "keywords5.*.",
            PatternFamily::MultiLineCommentEnd => "keywords6.*.",
            PatternFamily::CaseEscape => "keywords7.*.",
            PatternFamily::KeywordsClass3 => "keywords8.*.",
            PatternFamily::Lexer => "lexer.*.",
        }
    }

    pub fn key(self, suffix: &str) -> String {
        format!("{}{}", self.prefix(), suffix)
    }

    /// Split a key into its family and suffix, if it belongs to one.
    pub fn split_key(key: &str) -> Option<(PatternFamily, &str)> {
        Self::ALL
            .iter()
            .find_map(|family| key.strip_prefix(family.prefix()).map(|suffix| (*family, suffix)))
    }
}

pub fn file_patterns_key(id: &str) -> String {
    format!("{FILE_PATTERNS_PREFIX}{id}")
}

pub fn description_key(id: &str) -> String {
    format!("{DESCRIPTION_PREFIX}{id}")
}

/// The flat string-to-string map, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    entries: IndexMap<String, String>,
}

impl Blob {
    /// Create an empty blob
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse blob text, with or without the `json: ` header.
    ///
    /// Non-string scalar values are kept in their textual form and `null`
    /// becomes the empty string.
    pub fn parse(text: &str) -> Result<Self> {
        let body = text.trim_start_matches('\u{feff}').trim_start();
        let body = body.strip_prefix(HEADER_TAG).unwrap_or(body);

        let raw: IndexMap<String, Value> =
            serde_json::from_str(body).map_err(|e| Error::Parse(e.to_string()))?;

        let entries = raw
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect();

        Ok(Self { entries })
    }

    /// Render blob text in the given format.
    pub fn render(&self, format: BlobFormat) -> Result<String> {
        Ok(match format {
            BlobFormat::Header => format!("{HEADER}{}", serde_json::to_string(&self.entries)?),
            BlobFormat::Pretty => serde_json::to_string_pretty(&self.entries)?,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert or overwrite a key. Overwrites keep the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
