use super::normalizer::lookup_key;
use crate::decision::table::{Score, NEUTRAL_SCORE};

/// Starting scores for roles found by keyword scan, over the eight canonical criteria.
///
/// Checked top to bottom; the first entry whose key contains the career name, or is
/// contained by it, wins. Multi-word roles sit above the single nouns they contain.
const ROLE_DEFAULTS: &[(&str, [Score; 8])] = &[
    ("software engineer", [9.0, 8.0, 8.0, 7.0, 8.0, 9.0, 6.0, 9.0]),
    ("data scientist", [8.0, 7.0, 9.0, 6.0, 8.0, 8.0, 5.0, 8.0]),
    ("product manager", [8.0, 7.0, 8.0, 6.0, 9.0, 8.0, 7.0, 7.0]),
    ("consultant", [7.0, 6.0, 7.0, 4.0, 9.0, 6.0, 6.0, 6.0]),
    ("researcher", [6.0, 8.0, 6.0, 8.0, 7.0, 5.0, 4.0, 7.0]),
    ("analyst", [6.0, 7.0, 6.0, 7.0, 7.0, 7.0, 7.0, 6.0]),
    ("designer", [6.0, 6.0, 7.0, 7.0, 7.0, 7.0, 6.0, 8.0]),
    ("developer", [8.0, 7.0, 7.0, 7.0, 7.0, 8.0, 6.0, 8.0]),
    ("architect", [9.0, 8.0, 7.0, 6.0, 8.0, 7.0, 5.0, 7.0]),
    ("manager", [7.0, 7.0, 8.0, 5.0, 8.0, 7.0, 8.0, 6.0]),
];

pub(crate) fn default_scores(career: &str) -> Vec<Score> {
    let key = lookup_key(career);
    if key.is_empty() {
        return vec![NEUTRAL_SCORE; 8];
    }

    ROLE_DEFAULTS
        .iter()
        .find(|(role, _)| key.contains(role) || role.contains(key.as_str()))
        .map(|(_, scores)| scores.to_vec())
        .unwrap_or_else(|| vec![NEUTRAL_SCORE; 8])
}
