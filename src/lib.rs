//! # araxis-syntax
//!
//! Unpack, pack and merge the generic syntax-highlighting definitions that
//! Araxis Merge keeps in a single flat JSON blob.
//!
//! ## Blob Format
//!
//! The blob is one JSON object of string keys to string values, optionally
//! behind a `json: ` header:
//!
//! ```text
//! json: {"file.patterns.4C21":"*.bnl;*.bnh",
//!        "genericlanguage.description.4C21":"BrandNewLanguage (BNL)",
//!        "keywords.*.bnl;*.bnh":"BNL_KEYWORD1 BNL_KEYWORD2",
//!        "keywords7.*.bnl;*.bnh":"true no_backslash_escape",
//!        "lexer.*.bnl;*.bnh":"generic", ...}
//! ```
//!
//! Two keys per language are addressed by its id; nine more by a suffix
//! derived from its filename pattern ([`pattern::derive_suffix`]).
//!
//! ## Per-Language Files
//!
//! Unpacked, each language is one JSON file:
//!
//! ```text
//! {
//!   "uuid": "4C21",
//!   "name": "BrandNewLanguage (BNL)",
//!   "filenamePattern": "*.bnl;*.bnh",
//!   "keywordsClass1": "BNL_KEYWORD1 BNL_KEYWORD2",
//!   ...
//!   "isCaseSensitive": "true",
//!   "backslashIsAStringEscape": false,
//!   "lexer": "generic"
//! }
//! ```
//!
//! ## Merge Rules
//!
//! Merging upserts by id. An incoming language whose filename pattern is
//! already owned by a different id aborts the merge; see [`merge`].

pub mod blob;
pub mod case;
pub mod commands;
pub mod decoder;
pub mod directory;
pub mod encoder;
pub mod error;
pub mod language;
pub mod merge;
pub mod pattern;
pub mod store;
pub mod validate;

pub use blob::{Blob, BlobFormat, PatternFamily};
pub use case::CaseEscape;
pub use decoder::Decoder;
pub use directory::UnpackOptions;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use language::{Language, LanguageFile};
pub use merge::MergeOutcome;
pub use store::{BlobStore, FileStore, Location, RegistryBackend};
