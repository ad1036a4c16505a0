//! Proof-of-work signals from ingested pull requests.
//!
//! - [`record`]: the ingested record shape and JSON loading
//! - [`forensics`]: authorship score from entropy and line structure
//! - [`search`]: TF-IDF ranking of records against a free-text query

pub mod forensics;
pub mod record;
pub mod search;

pub use forensics::{analyze, Forensics, Verdict};
pub use record::{load_records, parse_records, ProofRecord};
pub use search::{SearchHit, SearchIndex, DEFAULT_TOP_K};
