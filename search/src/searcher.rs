use std::time::Instant;

use crate::corrections::{CorrectionTable, DEFAULT_CORRECTIONS};
use crate::matcher::MatchConfig;
use crate::rank::{rank_scored, FieldWeights, Hit};
use crate::record::Searchable;

/// Bundles the correction table and tuning knobs behind one entry point.
/// Holds no mutable state, so a single instance can serve concurrent
/// callers; every search is one synchronous pass over the given records.
#[derive(Debug, Clone)]
pub struct Searcher {
    table: CorrectionTable,
    config: MatchConfig,
    weights: FieldWeights,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Searcher with the built-in correction table and default thresholds.
    pub fn new() -> Self {
        Self {
            table: DEFAULT_CORRECTIONS.clone(),
            config: MatchConfig::default(),
            weights: FieldWeights::default(),
        }
    }

    pub fn with_table(mut self, table: CorrectionTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_weights(mut self, weights: FieldWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Run the full pipeline: normalize and correct the query, score every
    /// record across `fields`, drop non-matches, order by relevance. An
    /// empty query returns all records in their original order, unscored.
    pub fn search<'a, R: Searchable>(
        &self,
        records: &'a [R],
        query: &str,
        fields: &[&str],
    ) -> Vec<Hit<'a, R>> {
        let start = Instant::now();
        let hits = rank_scored(records, query, fields, &self.table, &self.config, &self.weights);
        tracing::debug!(
            query,
            candidates = records.len(),
            hits = hits.len(),
            took = ?start.elapsed(),
            "search complete"
        );
        hits
    }
}
