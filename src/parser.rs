use regex::Regex;
use tracing::debug;

use crate::models::NameSuggestion;

lazy_static::lazy_static! {
    // `<ordinal>. <name> - <meaning>`; the lazy name stops at the first " - ".
    static ref SUGGESTION_LINE: Regex =
        Regex::new(r"\d+\.\s+(.+?)\s+-\s+(.+)").expect("suggestion pattern is valid");
}

/// Turn the model's free-form reply into name suggestions.
///
/// Lines that don't look like `N. Name - Meaning` are dropped, so the result
/// can be shorter than requested or empty. This never fails.
pub fn parse_suggestions(reply: &str) -> Vec<NameSuggestion> {
    reply
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_line(line);
            if parsed.is_none() {
                debug!(line, "Dropping reply line that is not a suggestion");
            }
            parsed
        })
        .collect()
}

fn parse_line(line: &str) -> Option<NameSuggestion> {
    let captures = SUGGESTION_LINE.captures(line)?;
    let name = captures.get(1)?.as_str().trim();
    let meaning = captures.get(2)?.as_str().trim();
    if name.is_empty() || meaning.is_empty() {
        return None;
    }
    Some(NameSuggestion {
        name: name.to_string(),
        meaning: meaning.to_string(),
    })
}
