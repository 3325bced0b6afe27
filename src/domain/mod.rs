pub mod article;
pub mod feedback;
pub mod record;
pub mod types;

pub use article::{Article, InputError, NewsInput, Sector};
pub use feedback::{ClassificationFeedback, Correction};
pub use record::ClassifiedNews;
pub use types::{
    ClassificationVerdict, ImpactLevel, Provenance, ReliabilityLevel, SentimentLabel, SourceType,
};
