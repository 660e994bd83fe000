//! Error types for the syntax blob codec and its commands.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure the codec, validator, merge engine and stores can report.
///
/// Variants carry the offending id, pattern or field so a user can find and
/// fix the input. None of these are recovered internally, except
/// [`Error::SourceNotFound`] for a merge target (which falls back to pack).
#[derive(Debug, Error)]
pub enum Error {
    /// Blob text is not a JSON object after header stripping.
    #[error("failed to parse blob: {0}")]
    Parse(String),

    /// JSON serialization failure while rendering output.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A per-language file could not be read as JSON.
    #[error("failed to parse language file {}: {source}", path.display())]
    LanguageFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A per-language file lacks a required field.
    #[error("missing required field '{field}' in {}", path.display())]
    MissingField { path: PathBuf, field: &'static str },

    /// A record has an empty `filenamePattern`.
    #[error("filenamePattern must be non-empty (language {id})")]
    MissingPattern { id: String },

    /// `isCaseSensitive` in a per-language file is not `"true"` or `"false"`.
    #[error("isCaseSensitive must be 'true' or 'false' (language {id}, got '{value}')")]
    InvalidCaseValue { id: String, value: String },

    /// The first token of a `keywords7` value is not `true` or `false`.
    #[error("invalid case token '{token}' in '{raw}'")]
    InvalidCaseToken { raw: String, token: String },

    /// Two records in one batch share a `filenamePattern`.
    #[error("duplicate filenamePattern between languages {first_id} and {second_id}: '{pattern}'")]
    DuplicatePattern {
        pattern: String,
        first_id: String,
        second_id: String,
    },

    /// Two records in one batch have different patterns that address the
    /// same pattern-keyed entries.
    #[error(
        "languages {first_id} and {second_id} both map to pattern-key suffix '{suffix}' \
         ('{first_pattern}' and '{second_pattern}')"
    )]
    DuplicateSuffix {
        suffix: String,
        first_id: String,
        first_pattern: String,
        second_id: String,
        second_pattern: String,
    },

    /// Two records in one batch share an id.
    #[error("duplicate language id {id} (patterns '{first_pattern}' and '{second_pattern}')")]
    DuplicateId {
        id: String,
        first_pattern: String,
        second_pattern: String,
    },

    /// An incoming record reuses the pattern of a different existing language.
    #[error(
        "merge conflict: filenamePattern '{pattern}' already belongs to language {existing_id} \
         (incoming language {incoming_id})"
    )]
    MergeConflict {
        pattern: String,
        incoming_id: String,
        existing_id: String,
    },

    /// The addressed blob location does not exist.
    #[error("source not found: {location}")]
    SourceNotFound { location: String },

    /// A `reg:<version>` location names a version that is not installed.
    #[error("Araxis Merge version {version} is not installed")]
    VersionNotInstalled { version: String },

    /// Registry locations were requested but this build has no registry access.
    #[error("registry location '{location}' is not supported on this platform")]
    RegistryUnavailable { location: String },

    /// Underlying I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failure.
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
