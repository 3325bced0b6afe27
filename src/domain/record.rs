use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    article::{Article, NewsInput, Sector},
    types::{
        ClassificationVerdict, ImpactLevel, Provenance, ReliabilityLevel, SentimentLabel,
        SourceType,
    },
};

/// Classified article in the shape the storage collaborator persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedNews {
    pub title: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
    pub source_name: Option<String>,
    pub source_domain: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub sector: Sector,
    pub product_type: Option<String>,
    pub municipality: Option<String>,
    pub department: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub impact_level: ImpactLevel,
    pub reliability_level: ReliabilityLevel,
    pub source_type: SourceType,
    pub classification_explanation: String,
    pub classification_version: String,
    pub classified_at: DateTime<Utc>,
}

impl ClassifiedNews {
    /// Classified fields come from the validated article; the rest pass through from the input.
    pub fn new(
        input: &NewsInput,
        article: Article,
        verdict: ClassificationVerdict,
        provenance: Provenance,
    ) -> Self {
        Self {
            title: article.title,
            summary: article.summary,
            body: article.body,
            url: input.url.clone(),
            source_name: input.source_name.clone(),
            source_domain: article.source_domain,
            published_at: input.published_at,
            sector: article.sector,
            product_type: input.product_type.clone(),
            municipality: article.municipality,
            department: article.department,
            sentiment_label: verdict.sentiment_label,
            sentiment_score: verdict.sentiment_score,
            impact_level: verdict.impact_level,
            reliability_level: verdict.reliability_level,
            source_type: verdict.source_type,
            classification_explanation: verdict.explanation,
            classification_version: format!(
                "{}-{}",
                env!("CARGO_PKG_VERSION"),
                provenance.version_tag()
            ),
            classified_at: Utc::now(),
        }
    }
}
