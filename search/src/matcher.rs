use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, tokens};
use crate::record::Searchable;

// Disjoint score bands keep the tier ordering structural: any full-field
// match outranks any substring match, any substring match outranks any
// token-prefix match, and any token-prefix match outranks an edit-distance
// match. Within a band the score grows with match tightness.
const SCORE_EXACT: f32 = 1000.0;
const SCORE_SUBSTRING: f32 = 400.0;
const SUBSTRING_COVERAGE_BONUS: f32 = 100.0;
const SUBSTRING_WORD_START_BONUS: f32 = 50.0;
const SCORE_TOKEN_PREFIX: f32 = 200.0;
const PREFIX_COVERAGE_BONUS: f32 = 100.0;
const SCORE_EDIT: f32 = 100.0;

/// Tunable matching thresholds. Verified against representative catalog
/// queries rather than derived; override per deployment as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Hard cap on edit tolerance regardless of token length.
    pub max_edit_distance: usize,
    /// A token of length L tolerates L / chars_per_edit edits (capped),
    /// so longer tokens forgive proportionally more typos.
    pub chars_per_edit: usize,
    /// Raw queries are truncated to this many characters before matching.
    pub max_query_len: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            chars_per_edit: 4,
            max_query_len: 256,
        }
    }
}

impl MatchConfig {
    /// Edit tolerance for a token of the given character length.
    pub fn tolerance(&self, len: usize) -> usize {
        (len / self.chars_per_edit.max(1)).min(self.max_edit_distance)
    }
}

/// Levenshtein distance over chars, bounded by `max`. Returns `None` as soon
/// as the distance provably exceeds the bound. Single-row DP with the shorter
/// string on the column axis.
pub fn levenshtein_bounded(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    if a.is_empty() {
        return Some(b.len());
    }
    if b.is_empty() {
        return Some(a.len());
    }

    let (short, long) = if a.len() < b.len() { (&a, &b) } else { (&b, &a) };
    let w = short.len();
    let mut row: Vec<usize> = (0..=w).collect();

    for (i, &lc) in long.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];
        for j in 0..w {
            let cost = if lc == short[j] { 0 } else { 1 };
            let cell = (row[j + 1] + 1).min(row[j] + 1).min(prev + cost);
            prev = row[j + 1];
            row[j + 1] = cell;
            row_min = row_min.min(cell);
        }
        if row_min > max {
            return None;
        }
    }

    (row[w] <= max).then_some(row[w])
}

/// Score one field against a query. Both sides must already be normalized
/// (and the query corrected). 0.0 means no match.
pub fn score_field(field: &str, query: &str, config: &MatchConfig) -> f32 {
    if query.is_empty() || field.is_empty() {
        return 0.0;
    }
    if field == query {
        return SCORE_EXACT;
    }

    // Contiguous containment of the whole query.
    if let Some(pos) = field.find(query) {
        let coverage = query.chars().count() as f32 / field.chars().count() as f32;
        let mut score = SCORE_SUBSTRING + SUBSTRING_COVERAGE_BONUS * coverage;
        if pos == 0 || field.as_bytes()[pos - 1] == b' ' {
            score += SUBSTRING_WORD_START_BONUS;
        }
        return score;
    }

    let query_tokens = tokens(query);
    let field_tokens = tokens(field);
    if query_tokens.is_empty() || field_tokens.is_empty() {
        return 0.0;
    }

    // Every query token is a prefix of some field token; covers reordered
    // or gapped token matches like "beto 400" on "betoneira 400l".
    let all_prefix = query_tokens
        .iter()
        .all(|q| field_tokens.iter().any(|t| t.starts_with(q.as_str())));
    if all_prefix {
        let q_chars: usize = query_tokens.iter().map(|t| t.chars().count()).sum();
        let f_chars: usize = field_tokens.iter().map(|t| t.chars().count()).sum();
        let coverage = (q_chars as f32 / f_chars.max(1) as f32).min(1.0);
        return SCORE_TOKEN_PREFIX + PREFIX_COVERAGE_BONUS * coverage;
    }

    // Bounded edit distance: every query token must land within tolerance of
    // some field token. Graded by average tightness across query tokens.
    let mut total = 0.0f32;
    for q in &query_tokens {
        let tol = config.tolerance(q.chars().count());
        if tol == 0 {
            // Short tokens only match exactly, which earlier tiers cover.
            return 0.0;
        }
        let best = field_tokens
            .iter()
            .filter_map(|t| levenshtein_bounded(q, t, tol))
            .min();
        match best {
            Some(d) => total += 1.0 - d as f32 / (tol + 1) as f32,
            None => return 0.0,
        }
    }
    SCORE_EDIT * (total / query_tokens.len() as f32)
}

/// Best score across the given fields, taking the maximum rather than the
/// sum so repeated terms are not double-counted. Absent fields are skipped.
/// The query must already be normalized and corrected.
pub fn score_record<R: Searchable>(
    record: &R,
    query: &str,
    fields: &[&str],
    config: &MatchConfig,
) -> f32 {
    let mut best = 0.0f32;
    for name in fields {
        if let Some(raw) = record.field(name) {
            let score = score_field(&normalize(raw), query, config);
            if score > best {
                best = score;
            }
        }
    }
    best
}

/// Whether the record matches the query on at least one field. Takes the raw
/// query and normalizes it; an empty or whitespace-only query matches every
/// record. Run the query through a `CorrectionTable` first to also fold
/// known misspellings.
pub fn matches<R: Searchable>(
    record: &R,
    query: &str,
    fields: &[&str],
    config: &MatchConfig,
) -> bool {
    let q = normalize(query);
    if q.is_empty() {
        return true;
    }
    score_record(record, &q, fields, config) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CatalogItem;

    fn item(id: &str, name: &str) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            daily_price: None,
        }
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein_bounded("betoneira", "betoneira", 2), Some(0));
        assert_eq!(levenshtein_bounded("betoneria", "betoneira", 2), Some(2));
        assert_eq!(levenshtein_bounded("", "ab", 2), Some(2));
        assert_eq!(levenshtein_bounded("abc", "", 2), None);
        assert_eq!(levenshtein_bounded("gerador", "betoneira", 2), None);
    }

    #[test]
    fn tolerance_scales_with_length() {
        let config = MatchConfig::default();
        assert_eq!(config.tolerance(3), 0);
        assert_eq!(config.tolerance(5), 1);
        assert_eq!(config.tolerance(9), 2);
        assert_eq!(config.tolerance(40), 2);
    }

    #[test]
    fn tiers_are_ordered() {
        let config = MatchConfig::default();
        let exact = score_field("betoneira", "betoneira", &config);
        let substring = score_field("betoneira 400l", "betoneira", &config);
        let prefix = score_field("betoneira 400l", "beto 400", &config);
        let fuzzy = score_field("betoneira 400l", "betoneria", &config);
        assert!(exact > substring);
        assert!(substring > prefix);
        assert!(prefix > fuzzy);
        assert!(fuzzy > 0.0);
    }

    #[test]
    fn tighter_substring_scores_higher() {
        let config = MatchConfig::default();
        let short_field = score_field("betoneira 400l", "betoneira", &config);
        let long_field = score_field("betoneira profissional de obra 400l", "betoneira", &config);
        assert!(short_field > long_field);
    }

    #[test]
    fn word_start_outranks_mid_word() {
        let config = MatchConfig::default();
        let at_start = score_field("serra marmore", "serra", &config);
        let mid_word = score_field("torreserra", "serra", &config);
        assert!(at_start > mid_word);
    }

    #[test]
    fn query_longer_than_field_is_no_match() {
        let config = MatchConfig::default();
        assert_eq!(score_field("serra", "serra marmore profissional", &config), 0.0);
    }

    #[test]
    fn absent_fields_are_skipped() {
        let config = MatchConfig::default();
        let it = item("1", "Betoneira 400L");
        assert_eq!(
            score_record(&it, "betoneira", &["description"], &config),
            0.0
        );
        assert!(score_record(&it, "betoneira", &["description", "name"], &config) > 0.0);
    }

    #[test]
    fn empty_query_matches_everything() {
        let config = MatchConfig::default();
        let it = item("1", "Betoneira 400L");
        assert!(matches(&it, "", &["name"], &config));
        assert!(matches(&it, "   ", &["name"], &config));
        assert!(!matches(&it, "empilhadeira", &["name"], &config));
    }
}
