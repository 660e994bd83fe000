//! Batch validation before pack and merge.

use crate::error::{Error, Result};
use crate::language::Language;
use crate::pattern::derive_suffix;
use std::collections::HashMap;

/// Check a candidate batch. The first failure rejects the whole batch.
///
/// `isCaseSensitive` representability is enforced earlier, when a
/// per-language file is converted (see [`Language::from_file`]).
pub fn validate(languages: &[Language]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(languages.len());
    let mut ids: HashMap<&str, &str> = HashMap::with_capacity(languages.len());
    let mut suffixes: HashMap<String, &Language> = HashMap::with_capacity(languages.len());

    for lang in languages {
        if lang.filename_pattern.is_empty() {
            return Err(Error::MissingPattern {
                id: lang.id.clone(),
            });
        }

        if let Some(first_pattern) = ids.insert(&lang.id, &lang.filename_pattern) {
            return Err(Error::DuplicateId {
                id: lang.id.clone(),
                first_pattern: first_pattern.to_string(),
                second_pattern: lang.filename_pattern.clone(),
            });
        }

        if let Some(first_id) = seen.insert(&lang.filename_pattern, &lang.id) {
            return Err(Error::DuplicatePattern {
                pattern: lang.filename_pattern.clone(),
                first_id: first_id.to_string(),
                second_id: lang.id.clone(),
            });
        }

        // Distinct patterns such as "*.mk" and "mk" still share every
        // pattern-keyed entry.
        if let Some(first) = suffixes.insert(derive_suffix(&lang.filename_pattern), lang) {
            return Err(Error::DuplicateSuffix {
                suffix: derive_suffix(&lang.filename_pattern),
                first_id: first.id.clone(),
                first_pattern: first.filename_pattern.clone(),
                second_id: lang.id.clone(),
                second_pattern: lang.filename_pattern.clone(),
            });
        }
    }

    Ok(())
}
