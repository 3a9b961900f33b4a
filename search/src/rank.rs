use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::corrections::CorrectionTable;
use crate::matcher::{score_field, MatchConfig};
use crate::normalize::normalize;
use crate::record::Searchable;

/// Per-field score multipliers, applied at rank time only; the matcher never
/// sees them. Fields without an entry weigh 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldWeights {
    weights: HashMap<String, f32>,
}

impl Default for FieldWeights {
    fn default() -> Self {
        let mut weights = HashMap::new();
        weights.insert("name".to_string(), 1.0);
        weights.insert("category".to_string(), 0.7);
        weights.insert("description".to_string(), 0.5);
        Self { weights }
    }
}

impl FieldWeights {
    /// Weights that treat every field equally.
    pub fn uniform() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    pub fn with(mut self, field: &str, weight: f32) -> Self {
        self.weights.insert(field.to_string(), weight);
        self
    }

    pub fn get(&self, field: &str) -> f32 {
        self.weights.get(field).copied().unwrap_or(1.0)
    }
}

/// A record paired with its relevance score. Score 0.0 only appears in the
/// empty-query passthrough, where no scoring was performed.
#[derive(Debug, Clone)]
pub struct Hit<'a, R> {
    pub record: &'a R,
    pub score: f32,
}

/// Order records by relevance, best first. An empty or whitespace-only query
/// preserves the input order and drops nothing. Otherwise zero-score records
/// are removed and the rest sorted descending; the sort is stable, so
/// equal-score records keep their relative input order.
pub fn rank<'a, R: Searchable>(
    records: &'a [R],
    query: &str,
    fields: &[&str],
    table: &CorrectionTable,
    config: &MatchConfig,
    weights: &FieldWeights,
) -> Vec<&'a R> {
    rank_scored(records, query, fields, table, config, weights)
        .into_iter()
        .map(|hit| hit.record)
        .collect()
}

/// Same ordering as [`rank`], keeping the computed score on each hit.
pub fn rank_scored<'a, R: Searchable>(
    records: &'a [R],
    query: &str,
    fields: &[&str],
    table: &CorrectionTable,
    config: &MatchConfig,
    weights: &FieldWeights,
) -> Vec<Hit<'a, R>> {
    let query: String = query.chars().take(config.max_query_len).collect();
    let corrected = table.correct(&query);
    if corrected.is_empty() {
        // No query: nothing to score, keep the caller's order.
        return records
            .iter()
            .map(|record| Hit { record, score: 0.0 })
            .collect();
    }
    tracing::trace!(%corrected, "query prepared");

    let mut hits: Vec<Hit<'a, R>> = records
        .iter()
        .filter_map(|record| {
            let score = weighted_score(record, &corrected, fields, config, weights);
            (score > 0.0).then_some(Hit { record, score })
        })
        .collect();
    // Vec::sort_by is stable; ties keep their input order.
    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits
}

// Maximum weighted per-field score, so a record matching on several fields
// is not double-counted.
fn weighted_score<R: Searchable>(
    record: &R,
    query: &str,
    fields: &[&str],
    config: &MatchConfig,
    weights: &FieldWeights,
) -> f32 {
    let mut best = 0.0f32;
    for name in fields {
        if let Some(raw) = record.field(name) {
            let score = score_field(&normalize(raw), query, config) * weights.get(name);
            if score > best {
                best = score;
            }
        }
    }
    best
}
