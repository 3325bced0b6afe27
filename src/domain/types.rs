use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    #[serde(rename = "positivo")]
    Positive,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "negativo")]
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positivo",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negativo",
        }
    }

    /// Score assigned when an editor relabels an article by hand.
    pub fn corrected_score(&self) -> f64 {
        match self {
            SentimentLabel::Positive => 0.7,
            SentimentLabel::Neutral => 0.0,
            SentimentLabel::Negative => -0.7,
        }
    }
}

/// Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ImpactLevel {
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::High => "alto",
            ImpactLevel::Medium => "medio",
            ImpactLevel::Low => "bajo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReliabilityLevel {
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "medio")]
    Medium,
    #[serde(rename = "alto")]
    High,
}

impl ReliabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReliabilityLevel::High => "alto",
            ReliabilityLevel::Medium => "medio",
            ReliabilityLevel::Low => "bajo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "oficial")]
    Official,
    #[serde(rename = "medio_nacional")]
    NationalMedia,
    #[serde(rename = "medio_regional")]
    RegionalMedia,
    #[serde(rename = "blog")]
    Blog,
    #[serde(rename = "red_social")]
    SocialMedia,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Official => "oficial",
            SourceType::NationalMedia => "medio_nacional",
            SourceType::RegionalMedia => "medio_regional",
            SourceType::Blog => "blog",
            SourceType::SocialMedia => "red_social",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(SentimentLabel, ImpactLevel, ReliabilityLevel, SourceType);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub impact_level: ImpactLevel,
    pub reliability_level: ReliabilityLevel,
    pub source_type: SourceType,
    #[serde(rename = "classification_explanation")]
    pub explanation: String,
}

/// Where the sentiment/impact/explanation of a verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Rules,
    Refined,
}

impl Provenance {
    pub fn version_tag(&self) -> &'static str {
        match self {
            Provenance::Rules => "rules",
            Provenance::Refined => "rules+llm",
        }
    }
}
