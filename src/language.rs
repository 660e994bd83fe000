//! Language record model
//!
//! [`Language`] is the canonical in-memory shape of one syntax definition.
//! [`LanguageFile`] is its on-disk per-language JSON schema, where
//! `isCaseSensitive` is the string `"true"`/`"false"` and
//! `backslashIsAStringEscape` is a real boolean. Conversion between the two
//! happens only at the file boundary.

use crate::case::{bool_token, parse_bool_token, CaseEscape};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// The only lexer Araxis Merge offers for generic languages.
pub const GENERIC_LEXER: &str = "generic";

/// One language's complete syntax-highlighting definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    /// Opaque identifier, usually a UUID literal.
    pub id: String,
    /// Display name.
    pub name: String,
    /// `;`-joined glob tokens; the cross-record uniqueness key.
    pub filename_pattern: String,
    pub keywords_class1: String,
    pub keywords_class2: String,
    pub keywords_class3: String,
    pub operator_symbols: String,
    pub single_line_comment_symbols: String,
    pub multi_line_comment_start_symbols: String,
    pub multi_line_comment_end_symbols: String,
    pub case_sensitive: bool,
    pub backslash_escape: bool,
    pub lexer: String,
}

impl Language {
    /// Create a language with empty token lists and default flags.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        filename_pattern: impl Into<String>,
    ) -> Self {
        let flags = CaseEscape::default();
        Self {
            id: id.into(),
            name: name.into(),
            filename_pattern: filename_pattern.into(),
            keywords_class1: String::new(),
            keywords_class2: String::new(),
            keywords_class3: String::new(),
            operator_symbols: String::new(),
            single_line_comment_symbols: String::new(),
            multi_line_comment_start_symbols: String::new(),
            multi_line_comment_end_symbols: String::new(),
            case_sensitive: flags.case_sensitive,
            backslash_escape: flags.backslash_escape,
            lexer: GENERIC_LEXER.to_string(),
        }
    }

    /// The compound `keywords7` value for this language.
    pub fn case_escape(&self) -> CaseEscape {
        CaseEscape::new(self.case_sensitive, self.backslash_escape)
    }

    pub fn set_case_escape(&mut self, flags: CaseEscape) {
        self.case_sensitive = flags.case_sensitive;
        self.backslash_escape = flags.backslash_escape;
    }

    /// Convert a parsed per-language file, enforcing required fields.
    ///
    /// `path` is only used for error reporting.
    pub fn from_file(raw: RawLanguageFile, path: &Path) -> Result<Self> {
        let missing = |field: &'static str| Error::MissingField {
            path: path.to_path_buf(),
            field,
        };

        let id = raw.uuid.ok_or_else(|| missing("uuid"))?;
        let name = raw.name.ok_or_else(|| missing("name"))?;
        let filename_pattern = raw.filename_pattern.ok_or_else(|| missing("filenamePattern"))?;
        let case_value = raw.is_case_sensitive.ok_or_else(|| missing("isCaseSensitive"))?;
        let lexer = raw.lexer.ok_or_else(|| missing("lexer"))?;

        let case_sensitive =
            parse_bool_token(&case_value).ok_or_else(|| Error::InvalidCaseValue {
                id: id.clone(),
                value: case_value.clone(),
            })?;

        Ok(Self {
            id,
            name,
            filename_pattern,
            keywords_class1: raw.keywords_class1,
            keywords_class2: raw.keywords_class2,
            keywords_class3: raw.keywords_class3,
            operator_symbols: raw.operator_symbols,
            single_line_comment_symbols: raw.single_line_comment_symbols,
            multi_line_comment_start_symbols: raw.multi_line_comment_start_symbols,
            multi_line_comment_end_symbols: raw.multi_line_comment_end_symbols,
            case_sensitive,
            backslash_escape: raw.backslash_is_a_string_escape,
            lexer: if lexer.is_empty() {
                GENERIC_LEXER.to_string()
            } else {
                lexer
            },
        })
    }
}

/// Per-language JSON file as written by unpack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageFile {
    pub uuid: String,
    pub name: String,
    pub filename_pattern: String,
    pub keywords_class1: String,
    pub keywords_class2: String,
    pub keywords_class3: String,
    pub operator_symbols: String,
    pub single_line_comment_symbols: String,
    pub multi_line_comment_start_symbols: String,
    pub multi_line_comment_end_symbols: String,
    pub is_case_sensitive: String,
    pub backslash_is_a_string_escape: bool,
    pub lexer: String,
}

impl From<&Language> for LanguageFile {
    fn from(lang: &Language) -> Self {
        Self {
            uuid: lang.id.clone(),
            name: lang.name.clone(),
            filename_pattern: lang.filename_pattern.clone(),
            keywords_class1: lang.keywords_class1.clone(),
            keywords_class2: lang.keywords_class2.clone(),
            keywords_class3: lang.keywords_class3.clone(),
            operator_symbols: lang.operator_symbols.clone(),
            single_line_comment_symbols: lang.single_line_comment_symbols.clone(),
            multi_line_comment_start_symbols: lang.multi_line_comment_start_symbols.clone(),
            multi_line_comment_end_symbols: lang.multi_line_comment_end_symbols.clone(),
            is_case_sensitive: bool_token(lang.case_sensitive).to_string(),
            backslash_is_a_string_escape: lang.backslash_escape,
            lexer: lang.lexer.clone(),
        }
    }
}

/// Per-language JSON file as read by pack and merge.
///
/// Required fields are optional here so their absence can be reported by
/// name instead of as a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLanguageFile {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub filename_pattern: Option<String>,
    #[serde(default)]
    pub keywords_class1: String,
    #[serde(default)]
    pub keywords_class2: String,
    #[serde(default)]
    pub keywords_class3: String,
    #[serde(default)]
    pub operator_symbols: String,
    #[serde(default)]
    pub single_line_comment_symbols: String,
    #[serde(default)]
    pub multi_line_comment_start_symbols: String,
    #[serde(default)]
    pub multi_line_comment_end_symbols: String,
    pub is_case_sensitive: Option<String>,
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub backslash_is_a_string_escape: bool,
    pub lexer: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Accept a JSON boolean, or a string where `true`/`1`/`yes` mean true.
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => matches!(text.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
    })
}
