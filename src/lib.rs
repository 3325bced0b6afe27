//! Sentiment, impact and source-reliability classification for agricultural news.
//!
//! [`classifier::Classifier`] scores an article with keyword and domain rules, then
//! asks an external chat-completions service to refine the verdict, keeping the
//! rule-based result whenever that step fails.

pub mod ai;
pub mod app;
pub mod classifier;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod rules;
pub mod tasks;

pub use classifier::Classifier;
pub use domain::{Article, ClassificationVerdict, InputError, NewsInput};
