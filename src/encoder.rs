//! Blob encoder

use crate::blob::{description_key, file_patterns_key, Blob, PatternFamily};
use crate::language::{Language, GENERIC_LEXER};
use crate::pattern::derive_suffix;

/// Encodes language records into a flat blob
pub struct Encoder {
    // Currently stateless
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {}
    }

    /// Encode records into a fresh blob.
    ///
    /// Records must already be validated: colliding ids or suffixes are not
    /// detected here and the later record wins.
    pub fn encode(&self, languages: &[Language]) -> Blob {
        let mut blob = Blob::new();
        for lang in languages {
            self.encode_language(&mut blob, lang);
        }
        blob
    }

    /// Encode a single language
    fn encode_language(&self, blob: &mut Blob, lang: &Language) {
        blob.insert(file_patterns_key(&lang.id), lang.filename_pattern.as_str());
        blob.insert(description_key(&lang.id), lang.name.as_str());

        let suffix = derive_suffix(&lang.filename_pattern);
        for family in PatternFamily::ALL {
            blob.insert(family.key(&suffix), Self::field(lang, family));
        }
    }

    fn field(lang: &Language, family: PatternFamily) -> String {
        match family {
            PatternFamily::KeywordsClass1 => lang.keywords_class1.clone(),
            PatternFamily::KeywordsClass2 => lang.keywords_class2.clone(),
            PatternFamily::KeywordsClass3 => lang.keywords_class3.clone(),
            PatternFamily::OperatorSymbols => lang.operator_symbols.clone(),
            PatternFamily::SingleLineComment => lang.single_line_comment_symbols.clone(),
            PatternFamily::MultiLineCommentStart => lang.multi_line_comment_start_symbols.clone(),
            PatternFamily::MultiLineCommentEnd => lang.multi_line_comment_end_symbols.clone(),
            PatternFamily::CaseEscape => lang.case_escape().encode(),
            PatternFamily::Lexer if lang.lexer.is_empty() => GENERIC_LEXER.to_string(),
            PatternFamily::Lexer => lang.lexer.clone(),
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;
    use pretty_assertions::assert_eq;

    fn brand_new_language() -> Language {
        let mut lang = Language::new("4C21", "BrandNewLanguage (BNL)", "*.bnl;*.bnh");
        lang.keywords_class1 = "BNL_KEYWORD1 BNL_KEYWORD2".to_string();
        lang.backslash_escape = false;
        lang
    }

    #[test]
    fn test_encode_single_language() {
        let blob = Encoder::new().encode(&[brand_new_language()]);

        assert_eq!(blob.len(), 11);
        assert_eq!(blob.get("file.patterns.4C21"), Some("*.bnl;*.bnh"));
        assert_eq!(blob.get("genericlanguage.description.4C21"), Some("BrandNewLanguage (BNL)"));
        assert_eq!(blob.get("keywords.*.bnl;*.bnh"), Some("BNL_KEYWORD1 BNL_KEYWORD2"));
        assert_eq!(blob.get("keywords7.*.bnl;*.bnh"), Some("true no_backslash_escape"));
        assert_eq!(blob.get("keywords8.*.bnl;*.bnh"), Some(""));
        assert_eq!(blob.get("lexer.*.bnl;*.bnh"), Some("generic"));
    }

    #[test]
    fn test_encode_empty_lexer_as_generic() {
        let mut lang = Language::new("A", "Alpha", "*.a");
        lang.lexer.clear();
        let blob = Encoder::new().encode(&[lang]);
        assert_eq!(blob.get("lexer.*.a"), Some("generic"));
    }

    #[test]
    fn test_encode_last_write_wins_on_collision() {
        let mut first = Language::new("A", "Alpha", "*.x");
        first.keywords_class1 = "first".to_string();
        let mut second = Language::new("B", "Beta", "*.x");
        second.keywords_class1 = "second".to_string();

        let blob = Encoder::new().encode(&[first, second]);
        assert_eq!(blob.get("keywords.*.x"), Some("second"));
    }

    #[test]
    fn test_decode_encode_round_trip() {
        let text = r##"{
            "file.patterns.A": "*.a;*.aa",
            "genericlanguage.description.A": "Alpha",
            "keywords.*.a;*.aa": "if else",
            "keywords2.*.a;*.aa": "int",
            "keywords3.*.a;*.aa": "+ -",
            "keywords4.*.a;*.aa": "#",
            "keywords5.*.a;*.aa": "/*",
            "keywords6.*.a;*.aa": "*/",
            "keywords7.*.a;*.aa": "false no_backslash_escape",
            "keywords8.*.a;*.aa": "self",
            "lexer.*.a;*.aa": "generic",
            "file.patterns.B": "makefile",
            "genericlanguage.description.B": "Make",
            "keywords.*.makefile": "",
            "keywords2.*.makefile": "",
            "keywords3.*.makefile": "",
            "keywords4.*.makefile": "#",
            "keywords5.*.makefile": "",
            "keywords6.*.makefile": "",
            "keywords7.*.makefile": "true",
            "keywords8.*.makefile": "",
            "lexer.*.makefile": "generic"
        }"##;
        let original = Blob::parse(text).unwrap();
        let encoded = Encoder::new().encode(&Decoder::new().decode(&original));

        let mut expected: Vec<(&str, &str)> = original.iter().collect();
        let mut actual: Vec<(&str, &str)> = encoded.iter().collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }
}
