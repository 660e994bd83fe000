//! Pattern-key suffix derivation
//!
//! Pattern-keyed blob entries (`keywords.*.<suffix>`, `lexer.*.<suffix>`, ...)
//! are not addressed by the raw `filenamePattern` but by a suffix derived from
//! it: the first `;`-separated token loses a leading `*.` (or a bare leading
//! `*`), the remaining tokens are kept verbatim.
//!
//! Derivation is forward-only. Every record carries its authoritative
//! `filenamePattern` (from `file.patterns.<id>`), so encoding never needs to
//! invert a suffix. [`reconstruct_pattern`] exists only to describe orphaned
//! entries in diagnostics.

/// Separator between glob tokens in a `filenamePattern`.
pub const PATTERN_SEPARATOR: char = ';';

/// Derive the pattern-key suffix for a `filenamePattern`.
pub fn derive_suffix(filename_pattern: &str) -> String {
    let mut tokens = filename_pattern.split(PATTERN_SEPARATOR);
    let Some(first) = tokens.next() else {
        return String::new();
    };

    let first = first
        .strip_prefix("*.")
        .or_else(|| first.strip_prefix('*'))
        .unwrap_or(first);

    let mut suffix = String::with_capacity(filename_pattern.len());
    suffix.push_str(first);
    for token in tokens {
        suffix.push(PATTERN_SEPARATOR);
        suffix.push_str(token);
    }
    suffix
}

/// Best-effort inverse of [`derive_suffix`].
///
/// Ambiguous by construction: `"exp"` may have come from `"*.exp"` or from a
/// literal `"exp"` filename. Assumes the common `*.ext` form.
pub fn reconstruct_pattern(suffix: &str) -> String {
    if suffix.is_empty() || suffix.starts_with('*') {
        suffix.to_string()
    } else {
        format!("*.{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_suffix_strips_first_token_only() {
        assert_eq!(derive_suffix("*.bnl;*.bnh"), "bnl;*.bnh");
        assert_eq!(derive_suffix("*.src;*.pkg"), "src;*.pkg");
    }

    #[test]
    fn test_derive_suffix_single_token() {
        assert_eq!(derive_suffix("*.exp"), "exp");
    }

    #[test]
    fn test_derive_suffix_bare_star() {
        assert_eq!(derive_suffix("*rc"), "rc");
        assert_eq!(derive_suffix("*"), "");
    }

    #[test]
    fn test_derive_suffix_no_glob_prefix() {
        assert_eq!(derive_suffix("makefile"), "makefile");
        assert_eq!(derive_suffix("makefile;*.mk"), "makefile;*.mk");
    }

    #[test]
    fn test_derive_suffix_empty() {
        assert_eq!(derive_suffix(""), "");
    }

    #[test]
    fn test_reconstruct_pattern_common_form() {
        assert_eq!(reconstruct_pattern("bnl;*.bnh"), "*.bnl;*.bnh");
        assert_eq!(reconstruct_pattern("exp"), "*.exp");
        assert_eq!(derive_suffix(&reconstruct_pattern("exp")), "exp");
    }

    #[test]
    fn test_reconstruct_pattern_leaves_globs() {
        assert_eq!(reconstruct_pattern("*rc"), "*rc");
        assert_eq!(reconstruct_pattern(""), "");
    }
}
