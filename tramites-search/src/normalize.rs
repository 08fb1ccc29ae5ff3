//! Spanish-aware text normalization for diacritic-insensitive search.
//!
//! Every function here coerces missing or empty input to `""` instead of
//! failing, so a bad search box value can never abort a listing.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use strsim::levenshtein;

#[cfg(feature = "unicode-decomposition")]
use unicode_normalization::UnicodeNormalization;

/// Fraction of the query length that a fuzzy match may differ by.
pub const DEFAULT_FUZZY_TOLERANCE: f64 = 0.2;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s]").unwrap();
}

/// Combining diacritical marks block (U+0300..=U+036F).
#[cfg(feature = "unicode-decomposition")]
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Canonical comparison form: lowercase, without diacritics.
///
/// `normalize_text("Certificación")` and `normalize_text("CERTIFICACION")`
/// both yield `"certificacion"`. Accepts `&str` or `Option<&str>`; `None`
/// yields an empty string.
pub fn normalize_text<'a>(text: impl Into<Option<&'a str>>) -> String {
    match text.into() {
        Some(text) if !text.is_empty() => strip_diacritics(&text.to_lowercase()),
        _ => String::new(),
    }
}

#[cfg(feature = "unicode-decomposition")]
fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_diacritic(*c)).collect()
}

#[cfg(not(feature = "unicode-decomposition"))]
fn strip_diacritics(text: &str) -> String {
    fold_diacritics(text).to_lowercase()
}

/// Replaces accented Latin letters with their base letter using a fixed table.
///
/// Characters outside the table pass through unchanged and case is
/// preserved. This is the normalization path for builds without Unicode
/// decomposition; for Spanish text it agrees with the decomposition path.
pub fn fold_diacritics(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'é' | 'è' | 'ë' | 'ê' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'í' | 'ì' | 'ï' | 'î' | 'ĩ' | 'ī' | 'ĭ' | 'į' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ú' | 'ù' | 'ü' | 'û' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        other => other,
    }
}

/// Search form: [`normalize_text`], trimmed, whitespace runs collapsed,
/// then everything outside ASCII word characters and whitespace removed.
///
/// Punctuation goes last, so `"salvo - predial"` keeps two spaces where the
/// dash was.
pub fn normalize_for_search<'a>(text: impl Into<Option<&'a str>>) -> String {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return normalized;
    }
    let collapsed = WHITESPACE_RUN.replace_all(normalized.trim(), " ");
    NON_WORD.replace_all(&collapsed, "").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Compare with [`normalize_text`] only, keeping punctuation.
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub fuzzy: bool,
    pub fuzzy_tolerance: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            fuzzy: false,
            fuzzy_tolerance: DEFAULT_FUZZY_TOLERANCE,
        }
    }
}

impl SearchOptions {
    pub fn fuzzy() -> Self {
        Self {
            fuzzy: true,
            ..Self::default()
        }
    }

    pub fn whole_word() -> Self {
        Self {
            whole_word: true,
            ..Self::default()
        }
    }
}

/// Edit distance between the search forms of `a` and `b`.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein(&normalize_for_search(a), &normalize_for_search(b))
}

/// Whether `query` matches `target` under the given options.
///
/// Modes, in order of precedence: whole word, fuzzy, plain substring.
/// An empty query or target never matches.
pub fn search_matches(query: &str, target: &str, options: &SearchOptions) -> bool {
    if query.is_empty() || target.is_empty() {
        return false;
    }

    let (query, target) = if options.case_sensitive {
        (normalize_text(query), normalize_text(target))
    } else {
        (normalize_for_search(query), normalize_for_search(target))
    };

    if options.whole_word {
        return whole_word_matches(&query, &target);
    }

    if options.fuzzy {
        return fuzzy_matches(&query, &target, options.fuzzy_tolerance);
    }

    target.contains(&query)
}

fn whole_word_matches(query: &str, target: &str) -> bool {
    RegexBuilder::new(&format!(r"\b{}\b", regex::escape(query)))
        .case_insensitive(true)
        .build()
        .map_or(false, |re| re.is_match(target))
}

fn fuzzy_matches(query: &str, target: &str, tolerance: f64) -> bool {
    if query.is_empty() {
        return true;
    }
    if target.is_empty() {
        return false;
    }
    let max_distance = (query.chars().count() as f64 * tolerance).floor() as usize;
    levenshtein(query, target) <= max_distance
}
