//! unpack / pack / merge / list
//!
//! Each command loads blob text at most once at the start and stores it at
//! most once at the end. Every failure happens before the store, so an
//! aborted command leaves its target untouched.

use crate::blob::{Blob, BlobFormat};
use crate::decoder::Decoder;
use crate::directory::{read_languages, write_languages, UnpackOptions};
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::merge::merge as merge_languages;
use crate::store::BlobStore;
use crate::validate::validate;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackSummary {
    pub files: Vec<PathBuf>,
    /// Pattern-key suffixes that matched no language and were dropped.
    pub orphaned: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSummary {
    pub languages: usize,
    pub keys: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub incoming: usize,
    pub replaced: Vec<String>,
    pub inserted: Vec<String>,
    pub carried: usize,
    /// The target held no blob, so the merge ran as a plain pack.
    pub packed: bool,
}

/// Decode the blob at `source`.
///
/// A missing source is fatal.
pub fn list(source: &dyn BlobStore) -> Result<Vec<Language>> {
    let blob = load_required(source)?;
    Ok(Decoder::new().decode(&blob))
}

/// Split the blob at `source` into per-language files under `dir`.
pub fn unpack(source: &dyn BlobStore, dir: &Path, options: &UnpackOptions) -> Result<UnpackSummary> {
    let blob = load_required(source)?;
    let decoder = Decoder::new();
    let languages = decoder.decode(&blob);
    let orphaned = decoder.orphaned_suffixes(&blob, &languages);

    let files = write_languages(dir, &languages, options)?;
    info!(
        "unpacked {} language(s) from {} into {}",
        languages.len(),
        source.describe(),
        dir.display()
    );

    Ok(UnpackSummary { files, orphaned })
}

/// Build a blob from the per-language files in `dir` and store it at `target`.
pub fn pack(dir: &Path, target: &dyn BlobStore, format: BlobFormat) -> Result<PackSummary> {
    let languages = read_languages(dir)?;
    validate(&languages)?;

    let blob = Encoder::new().encode(&languages);
    target.store(&blob.render(format)?)?;
    info!("packed {} language(s) into {}", languages.len(), target.describe());

    Ok(PackSummary {
        languages: languages.len(),
        keys: blob.len(),
    })
}

/// UPSERT the per-language files in `dir` into the blob at `target`.
///
/// A target with no content is packed instead.
pub fn merge(dir: &Path, target: &dyn BlobStore, format: BlobFormat) -> Result<MergeSummary> {
    let incoming = read_languages(dir)?;
    validate(&incoming)?;

    let existing = load_optional(target)?;
    if existing.is_none() {
        info!("{} holds no blob, packing instead", target.describe());
    }

    let outcome = merge_languages(existing.as_ref(), &incoming)?;
    target.store(&outcome.blob.render(format)?)?;
    info!(
        "merged {} language(s) into {} ({} replaced, {} inserted, {} carried)",
        incoming.len(),
        target.describe(),
        outcome.replaced.len(),
        outcome.inserted.len(),
        outcome.carried
    );

    Ok(MergeSummary {
        incoming: incoming.len(),
        replaced: outcome.replaced,
        inserted: outcome.inserted,
        carried: outcome.carried,
        packed: existing.is_none(),
    })
}

fn load_required(source: &dyn BlobStore) -> Result<Blob> {
    load_optional(source)?.ok_or_else(|| Error::SourceNotFound {
        location: source.describe(),
    })
}

/// Missing or blank content both count as "no blob".
fn load_optional(store: &dyn BlobStore) -> Result<Option<Blob>> {
    match store.load()? {
        Some(text) if !text.trim().is_empty() => Blob::parse(&text).map(Some),
        _ => Ok(None),
    }
}
