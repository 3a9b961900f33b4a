//! Client-side search for the equipment catalog: text normalization,
//! known-typo correction, fuzzy field matching and relevance ordering in one
//! synchronous pass over an in-memory record list. No I/O, no shared mutable
//! state; the only static is the read-only default correction table.

pub mod corrections;
pub mod matcher;
pub mod normalize;
pub mod rank;
pub mod record;
pub mod searcher;

pub use corrections::{CorrectionTable, DEFAULT_CORRECTIONS};
pub use matcher::{levenshtein_bounded, matches, score_field, score_record, MatchConfig};
pub use normalize::{normalize, tokens};
pub use rank::{rank, rank_scored, FieldWeights, Hit};
pub use record::{CatalogItem, Searchable};
pub use searcher::Searcher;
