//! Citation key generation: `<Surname><Year><FirstTitleWord>`.

use std::sync::LazyLock;

use regex::Regex;

static TITLE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").expect("valid title word pattern"));

const UNKNOWN: &str = "Unknown";
const FALLBACK_TITLE_WORD: &str = "Title";

/// Build a citation key such as `Doe2020Advances`.
///
/// - surname: last whitespace-separated token of `first_author`, ASCII
///   letters only, `Unknown` when nothing is left
/// - year: decimal, or `Unknown`
/// - title word: first run of three or more ASCII letters, or `Title`
///
/// Keys are deterministic but not collision-free.
#[must_use]
pub fn generate_key(first_author: &str, year: Option<i32>, title: &str) -> String {
    let surname: String = first_author
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    let surname = if surname.is_empty() { UNKNOWN } else { surname.as_str() };

    let title_word = TITLE_WORD.find(title).map_or(FALLBACK_TITLE_WORD, |m| m.as_str());

    let year = year.map_or_else(|| UNKNOWN.to_string(), |y| y.to_string());

    format!("{surname}{year}{title_word}")
}
