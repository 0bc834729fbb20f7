//! Fuzzy matching for "did you mean" suggestions on mistyped list types.

use strsim::jaro_winkler;

/// Best match for `input` among `valid_options`, if any scores at or above
/// `threshold`. Callers lowercase the input first.
pub fn find_best_match<'a>(
    input: &str,
    valid_options: &[&'a str],
    threshold: f64,
) -> Option<&'a str> {
    valid_options
        .iter()
        .map(|&option| (option, jaro_winkler(input, option)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .and_then(|(option, score)| (score >= threshold).then_some(option))
}
