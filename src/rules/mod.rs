//! Deterministic keyword and domain heuristics that produce the base verdict.

pub mod impact;
pub mod lexicon;
pub mod reliability;
pub mod sentiment;

pub use impact::{estimate_impact, ImpactEstimate};
pub use lexicon::{KeywordSet, Lexicon, LexiconError};
pub use reliability::{estimate_reliability, ReliabilityEstimate};
pub use sentiment::{score_sentiment, SentimentScore};
