//! Blob decoder

use crate::blob::{Blob, PatternFamily, DESCRIPTION_PREFIX, FILE_PATTERNS_PREFIX};
use crate::case::{CaseEscape, NO_BACKSLASH_ESCAPE};
use crate::error::Result;
use crate::language::{Language, GENERIC_LEXER};
use crate::pattern::{derive_suffix, reconstruct_pattern};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// Decodes a flat blob into language records
pub struct Decoder {
    // Currently stateless
}

impl Decoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self {}
    }

    /// Parse blob text and decode it.
    pub fn decode_str(&self, text: &str) -> Result<Vec<Language>> {
        Ok(self.decode(&Blob::parse(text)?))
    }

    /// Decode every language in the blob.
    ///
    /// Records come out in first-seen order of their id across both
    /// identifier-keyed families. Missing entries fall back to defaults;
    /// pattern-keyed entries whose suffix matches no language are dropped.
    pub fn decode(&self, blob: &Blob) -> Vec<Language> {
        let mut identities: IndexMap<&str, (Option<&str>, Option<&str>)> = IndexMap::new();

        for (key, value) in blob.iter() {
            if let Some(id) = key.strip_prefix(FILE_PATTERNS_PREFIX) {
                identities.entry(id).or_default().0 = Some(value);
            } else if let Some(id) = key.strip_prefix(DESCRIPTION_PREFIX) {
                identities.entry(id).or_default().1 = Some(value);
            }
        }

        let languages: Vec<Language> = identities
            .into_iter()
            .map(|(id, (pattern, name))| {
                if pattern.is_none() {
                    debug!("language {id} has no file.patterns entry");
                }
                self.decode_language(blob, id, pattern.unwrap_or_default(), name.unwrap_or_default())
            })
            .collect();

        for suffix in self.orphaned_suffixes(blob, &languages) {
            debug!(
                "dropping orphaned entries under suffix '{suffix}' (pattern likely '{}')",
                reconstruct_pattern(&suffix)
            );
        }

        languages
    }

    /// Suffixes of pattern-keyed entries that no decoded language addresses.
    pub fn orphaned_suffixes(&self, blob: &Blob, languages: &[Language]) -> Vec<String> {
        let known: IndexSet<String> = languages
            .iter()
            .map(|lang| derive_suffix(&lang.filename_pattern))
            .collect();

        let mut orphans = IndexSet::new();
        for (key, _) in blob.iter() {
            if let Some((_, suffix)) = PatternFamily::split_key(key) {
                if !known.contains(suffix) {
                    orphans.insert(suffix.to_string());
                }
            }
        }
        orphans.into_iter().collect()
    }

    /// Assemble one record from its identifier-keyed values
    fn decode_language(&self, blob: &Blob, id: &str, pattern: &str, name: &str) -> Language {
        let suffix = derive_suffix(pattern);
        let get = |family: PatternFamily| blob.get(&family.key(&suffix)).unwrap_or_default().to_string();

        let mut lang = Language::new(id, name, pattern);
        lang.keywords_class1 = get(PatternFamily::KeywordsClass1);
        lang.keywords_class2 = get(PatternFamily::KeywordsClass2);
        lang.keywords_class3 = get(PatternFamily::KeywordsClass3);
        lang.operator_symbols = get(PatternFamily::OperatorSymbols);
        lang.single_line_comment_symbols = get(PatternFamily::SingleLineComment);
        lang.multi_line_comment_start_symbols = get(PatternFamily::MultiLineCommentStart);
        lang.multi_line_comment_end_symbols = get(PatternFamily::MultiLineCommentEnd);

        let lexer = get(PatternFamily::Lexer);
        lang.lexer = if lexer.is_empty() {
            GENERIC_LEXER.to_string()
        } else {
            lexer
        };

        lang.set_case_escape(Self::decode_case_escape(id, &get(PatternFamily::CaseEscape)));
        lang
    }

    /// Lenient `keywords7` decoding: an unreadable case token keeps the
    /// default case sensitivity but still honors `no_backslash_escape`.
    fn decode_case_escape(id: &str, raw: &str) -> CaseEscape {
        if raw.trim().is_empty() {
            return CaseEscape::default();
        }
        match CaseEscape::decode(raw) {
            Ok(flags) => flags,
            Err(err) => {
                warn!("language {id}: {err}, assuming case-sensitive");
                CaseEscape {
                    backslash_escape: !raw.split_whitespace().any(|t| t == NO_BACKSLASH_ESCAPE),
                    ..CaseEscape::default()
                }
            }
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"json: {
        "file.patterns.4C21": "*.bnl;*.bnh",
        "genericlanguage.description.4C21": "BrandNewLanguage (BNL)",
        "keywords.*.bnl;*.bnh": "BNL_KEYWORD1 BNL_KEYWORD2",
        "keywords3.*.bnl;*.bnh": "+ - * /",
        "keywords4.*.bnl;*.bnh": "//",
        "keywords7.*.bnl;*.bnh": "true no_backslash_escape",
        "keywords8.*.bnl;*.bnh": "CLASS3",
        "lexer.*.bnl;*.bnh": "generic",
        "genericlanguage.description.77": "Expect",
        "file.patterns.77": "*.exp",
        "keywords7.*.exp": "false"
    }"#;

    #[test]
    fn test_decode_sample() {
        let languages = Decoder::new().decode_str(SAMPLE).unwrap();
        assert_eq!(languages.len(), 2);

        let bnl = &languages[0];
        assert_eq!(bnl.id, "4C21");
        assert_eq!(bnl.name, "BrandNewLanguage (BNL)");
        assert_eq!(bnl.filename_pattern, "*.bnl;*.bnh");
        assert_eq!(bnl.keywords_class1, "BNL_KEYWORD1 BNL_KEYWORD2");
        assert_eq!(bnl.keywords_class3, "CLASS3");
        assert_eq!(bnl.operator_symbols, "+ - * /");
        assert_eq!(bnl.single_line_comment_symbols, "//");
        assert!(bnl.case_sensitive);
        assert!(!bnl.backslash_escape);
    }

    #[test]
    fn test_decode_first_seen_order() {
        let languages = Decoder::new().decode_str(SAMPLE).unwrap();
        assert_eq!(languages[1].id, "77");
        assert!(!languages[1].case_sensitive);
        assert!(languages[1].backslash_escape);
    }

    #[test]
    fn test_decode_defaults_for_missing_entries() {
        let languages = Decoder::new()
            .decode_str(r#"{"file.patterns.X":"*.x"}"#)
            .unwrap();
        let lang = &languages[0];

        assert_eq!(lang.name, "");
        assert_eq!(lang.keywords_class2, "");
        assert_eq!(lang.lexer, "generic");
        assert!(lang.case_sensitive);
        assert!(lang.backslash_escape);
    }

    #[test]
    fn test_decode_description_without_pattern() {
        let languages = Decoder::new()
            .decode_str(r#"{"genericlanguage.description.X":"Lonely"}"#)
            .unwrap();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].name, "Lonely");
        assert_eq!(languages[0].filename_pattern, "");
    }

    #[test]
    fn test_decode_drops_orphans() {
        let blob = Blob::parse(
            r#"{"file.patterns.A":"*.a","keywords.*.a":"kw","keywords.*.zzz":"lost","lexer.*.zzz":"generic"}"#,
        )
        .unwrap();
        let decoder = Decoder::new();
        let languages = decoder.decode(&blob);

        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].keywords_class1, "kw");
        assert_eq!(decoder.orphaned_suffixes(&blob, &languages), vec!["zzz".to_string()]);
    }

    #[test]
    fn test_decode_invalid_case_token_is_lenient() {
        let languages = Decoder::new()
            .decode_str(r#"{"file.patterns.A":"*.a","keywords7.*.a":"TRUE no_backslash_escape"}"#)
            .unwrap();
        assert!(languages[0].case_sensitive);
        assert!(!languages[0].backslash_escape);
    }

    #[test]
    fn test_decode_parse_error() {
        assert!(Decoder::new().decode_str("json: nope").is_err());
    }
}
