pub mod client;
pub mod error;
pub mod inference;

pub use client::RefinementClient;
pub use error::RefinementError;
pub use inference::{BaseHints, Refinement};
