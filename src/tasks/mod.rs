pub mod batch;
pub mod trends;

pub use batch::{BatchClassifier, IngestOutcome, IngestReport, IngestRequest};
pub use trends::{compute_trends, TrendRange, TrendReport};
