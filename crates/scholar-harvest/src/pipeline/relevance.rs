//! Topical relevance scoring for time series literature.

/// Phrase weights. Each phrase counts once no matter how often it appears.
pub const KEYWORD_WEIGHTS: &[(&str, f64)] = &[
    ("time series", 3.0),
    ("temporal analysis", 2.5),
    ("forecasting", 2.0),
    ("arima", 2.0),
    ("garch", 2.0),
    ("stochastic process", 2.0),
    ("econometrics", 1.5),
    ("signal processing", 1.5),
    ("time domain", 1.5),
    ("frequency domain", 1.5),
    ("seasonal", 1.0),
    ("trend", 0.8),
    ("correlation", 0.5),
    ("regression", 0.3),
];

/// Weight sum that maps to a score of 1.0.
pub const SCORE_SCALE: f64 = 10.0;

/// Score `title` + `abstract_text` in `[0, 1]`.
///
/// Matching is case-insensitive substring search over
/// `"{title} {abstract}"`, so "trend" also matches "trends".
#[must_use]
pub fn score(title: &str, abstract_text: &str) -> f64 {
    let text = searchable_text(title, abstract_text);
    let total: f64 = KEYWORD_WEIGHTS
        .iter()
        .filter(|(phrase, _)| text.contains(phrase))
        .map(|(_, weight)| weight)
        .sum();

    (total / SCORE_SCALE).min(1.0)
}

/// Phrases from the weight table present in the text, in table order.
#[must_use]
pub fn matched_keywords(title: &str, abstract_text: &str) -> Vec<&'static str> {
    let text = searchable_text(title, abstract_text);
    KEYWORD_WEIGHTS
        .iter()
        .filter(|(phrase, _)| text.contains(phrase))
        .map(|(phrase, _)| *phrase)
        .collect()
}

fn searchable_text(title: &str, abstract_text: &str) -> String {
    format!("{title} {abstract_text}").to_lowercase()
}
