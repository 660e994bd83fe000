//! UPSERT merge of incoming records into an existing blob
//!
//! For every incoming record:
//! - same id as an existing language: replace it;
//! - same `filenamePattern` as a different existing language: conflict, the
//!   whole merge aborts;
//! - otherwise: insert.
//!
//! Conflicts are judged against the languages the blob held before the merge,
//! so the outcome does not depend on the order of the incoming batch. The
//! result is re-encoded from the merged records, exactly as a pack would
//! encode them: keys the old records owned under a previous suffix, orphaned
//! pattern-keyed entries and keys outside both families are not carried over.
//! The merge is computed entirely in memory, so a failure leaves nothing
//! half-applied.

use crate::blob::Blob;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::validate::validate;
use std::collections::HashMap;
use tracing::debug;

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The complete new blob.
    pub blob: Blob,
    /// Ids of existing languages that were replaced.
    pub replaced: Vec<String>,
    /// Ids of languages that were added.
    pub inserted: Vec<String>,
    /// Number of existing languages carried through unchanged.
    pub carried: usize,
}

/// Apply `incoming` to `existing`. An absent target degenerates to a pack.
pub fn merge(existing: Option<&Blob>, incoming: &[Language]) -> Result<MergeOutcome> {
    validate(incoming)?;

    let mut languages = existing
        .map(|blob| Decoder::new().decode(blob))
        .unwrap_or_default();
    let existing_count = languages.len();

    let positions: HashMap<String, usize> = languages
        .iter()
        .enumerate()
        .map(|(pos, lang)| (lang.id.clone(), pos))
        .collect();
    let owners: HashMap<String, String> = languages
        .iter()
        .map(|lang| (lang.filename_pattern.clone(), lang.id.clone()))
        .collect();

    let mut replaced = Vec::new();
    let mut inserted = Vec::new();

    for lang in incoming {
        if let Some(&pos) = positions.get(&lang.id) {
            debug!(
                "replacing language {} ('{}' -> '{}')",
                lang.id, languages[pos].filename_pattern, lang.filename_pattern
            );
            languages[pos] = lang.clone();
            replaced.push(lang.id.clone());
            continue;
        }

        if let Some(owner) = owners.get(&lang.filename_pattern) {
            return Err(Error::MergeConflict {
                pattern: lang.filename_pattern.clone(),
                incoming_id: lang.id.clone(),
                existing_id: owner.clone(),
            });
        }

        debug!("inserting language {}", lang.id);
        languages.push(lang.clone());
        inserted.push(lang.id.clone());
    }

    validate(&languages)?;

    Ok(MergeOutcome {
        blob: Encoder::new().encode(&languages),
        carried: existing_count - replaced.len(),
        replaced,
        inserted,
    })
}
