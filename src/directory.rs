//! Per-language JSON files on disk.
//!
//! Unpack writes one pretty-printed file per language, named after the
//! language. Pack and merge read every `*.json` directly inside a directory,
//! in filename order.

use crate::error::{Error, Result};
use crate::language::{Language, LanguageFile, RawLanguageFile};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const LANGUAGE_FILE_EXTENSION: &str = "json";
const UNNAMED: &str = "unnamed";
const ID_TAG_LEN: usize = 8;
const MAX_FILE_NAME_BYTES: usize = 250;

/// Characters no mainstream filesystem accepts in a file name.
const INVALID_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

const RESERVED_WINDOWS_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Options for writing unpacked languages.
#[derive(Debug, Clone, Default)]
pub struct UnpackOptions {
    /// Overwrite files already in the output directory instead of choosing a
    /// disambiguated name.
    pub overwrite: bool,
}

/// Load every per-language file in `dir`.
///
/// Fails on the first unreadable or invalid file, so callers never see a
/// partial batch.
pub fn read_languages(dir: &Path) -> Result<Vec<Language>> {
    if !dir.is_dir() {
        return Err(Error::SourceNotFound {
            location: dir.display().to_string(),
        });
    }

    let mut languages = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(LANGUAGE_FILE_EXTENSION)
        {
            continue;
        }

        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let raw: RawLanguageFile =
            serde_json::from_str(&text).map_err(|source| Error::LanguageFile {
                path: path.to_path_buf(),
                source,
            })?;
        let lang = Language::from_file(raw, path)?;
        debug!("loaded language {} from {}", lang.id, path.display());
        languages.push(lang);
    }

    Ok(languages)
}

/// Write one file per language into `dir`, creating it if needed.
///
/// Returns the written paths in record order.
pub fn write_languages(dir: &Path, languages: &[Language], options: &UnpackOptions) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let mut used = HashSet::new();
    let mut written = Vec::with_capacity(languages.len());

    for lang in languages {
        let base = match sanitize_file_name(&lang.name) {
            name if name.is_empty() => UNNAMED.to_string(),
            name => name,
        };

        let mut file_name = format!("{base}.{LANGUAGE_FILE_EXTENSION}");
        if is_taken(dir, &used, &file_name, options) {
            let tagged = match id_tag(&lang.id) {
                tag if tag.is_empty() => base,
                tag => format!("{base}-{tag}"),
            };
            file_name = format!("{tagged}.{LANGUAGE_FILE_EXTENSION}");
            let mut counter = 2;
            while is_taken(dir, &used, &file_name, options) {
                file_name = format!("{tagged}-{counter}.{LANGUAGE_FILE_EXTENSION}");
                counter += 1;
            }
        }
        used.insert(file_name.clone());

        let path = dir.join(&file_name);
        let json = serde_json::to_string_pretty(&LanguageFile::from(lang))?;
        fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
        debug!("wrote language {} to {}", lang.id, path.display());
        written.push(path);
    }

    Ok(written)
}

fn is_taken(dir: &Path, used: &HashSet<String>, file_name: &str, options: &UnpackOptions) -> bool {
    used.contains(file_name) || (!options.overwrite && dir.join(file_name).exists())
}

/// Make a display name safe to use as a file name on any platform.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !INVALID_FILE_NAME_CHARS.contains(c))
        .collect();
    let mut cleaned = cleaned.trim().trim_end_matches('.').trim_end().to_string();

    let stem = cleaned.split('.').next().unwrap_or_default();
    if RESERVED_WINDOWS_NAMES.iter().any(|r| r.eq_ignore_ascii_case(stem)) {
        cleaned.push('_');
    }

    if cleaned.len() > MAX_FILE_NAME_BYTES {
        let mut cut = MAX_FILE_NAME_BYTES;
        while !cleaned.is_char_boundary(cut) {
            cut -= 1;
        }
        cleaned.truncate(cut);
    }
    cleaned
}

/// Short alphanumeric tag derived from an id, for disambiguating file names.
fn id_tag(id: &str) -> String {
    id.chars().filter(char::is_ascii_alphanumeric).take(ID_TAG_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("BrandNewLanguage (BNL)"), "BrandNewLanguage (BNL)");
        assert_eq!(sanitize_file_name("C/C++ <header>"), "CC++ header");
        assert_eq!(sanitize_file_name("  trailing dots... "), "trailing dots");
        assert_eq!(sanitize_file_name("???"), "");
        assert_eq!(sanitize_file_name("con"), "con_");
    }

    #[test]
    fn test_id_tag() {
        assert_eq!(id_tag("{4C21-88AB-99CD}"), "4C2188AB");
        assert_eq!(id_tag("x"), "x");
    }

    #[test]
    fn test_write_then_read_languages() {
        let dir = tempfile::tempdir().unwrap();
        let mut alpha = Language::new("A", "Alpha", "*.a");
        alpha.keywords_class1 = "if else".to_string();
        alpha.backslash_escape = false;
        let beta = Language::new("B", "Beta", "*.b");

        let paths = write_languages(dir.path(), &[alpha.clone(), beta.clone()], &UnpackOptions::default()).unwrap();
        assert_eq!(paths, vec![dir.path().join("Alpha.json"), dir.path().join("Beta.json")]);

        let loaded = read_languages(dir.path()).unwrap();
        assert_eq!(loaded, vec![alpha, beta]);
    }

    #[test]
    fn test_write_disambiguates_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let languages = [
            Language::new("{11112222-3333}", "Same", "*.a"),
            Language::new("{44445555-6666}", "Same", "*.b"),
            Language::new("Z", "", "*.c"),
        ];

        let paths = write_languages(dir.path(), &languages, &UnpackOptions::default()).unwrap();
        assert_eq!(
            paths,
            vec![
                dir.path().join("Same.json"),
                dir.path().join("Same-44445555.json"),
                dir.path().join("unnamed.json"),
            ]
        );
    }

    #[test]
    fn test_write_never_reuses_a_tagged_name() {
        let dir = tempfile::tempdir().unwrap();
        let languages = [
            Language::new("{11112222-aaaa}", "Same", "*.a"),
            Language::new("T", "Same-11112222", "*.t"),
            Language::new("{11112222-bbbb}", "Same", "*.b"),
            Language::new("{11112222-cccc}", "Same", "*.c"),
        ];

        let paths = write_languages(dir.path(), &languages, &UnpackOptions::default()).unwrap();
        assert_eq!(
            paths,
            vec![
                dir.path().join("Same.json"),
                dir.path().join("Same-11112222.json"),
                dir.path().join("Same-11112222-2.json"),
                dir.path().join("Same-11112222-3.json"),
            ]
        );
        assert_eq!(read_languages(dir.path()).unwrap().len(), 4);
    }

    #[test]
    fn test_write_respects_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Alpha.json"), "{}").unwrap();
        let languages = [Language::new("A1", "Alpha", "*.a")];

        let paths = write_languages(dir.path(), &languages, &UnpackOptions::default()).unwrap();
        assert_eq!(paths, vec![dir.path().join("Alpha-A1.json")]);

        let paths = write_languages(dir.path(), &languages, &UnpackOptions { overwrite: true }).unwrap();
        assert_eq!(paths, vec![dir.path().join("Alpha.json")]);
    }

    #[test]
    fn test_read_ignores_other_files_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let file = |id: &str, pattern: &str| {
            format!(
                r#"{{"uuid":"{id}","name":"{id}","filenamePattern":"{pattern}","isCaseSensitive":"true","lexer":"generic"}}"#
            )
        };
        fs::write(dir.path().join("b.json"), file("B", "*.b")).unwrap();
        fs::write(dir.path().join("a.json"), file("A", "*.a")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.json"), file("C", "*.c")).unwrap();

        let ids: Vec<String> = read_languages(dir.path()).unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_read_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        assert!(matches!(read_languages(dir.path()), Err(Error::LanguageFile { .. })));
    }

    #[test]
    fn test_read_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_languages(&dir.path().join("absent")),
            Err(Error::SourceNotFound { .. })
        ));
    }
}
