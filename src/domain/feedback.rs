use serde::{Deserialize, Serialize};

use super::types::{ClassificationVerdict, ImpactLevel, ReliabilityLevel, SentimentLabel};

/// Editor correction of a stored verdict. Absent fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub sentiment_label: Option<SentimentLabel>,
    pub impact_level: Option<ImpactLevel>,
    pub reliability_level: Option<ReliabilityLevel>,
    pub comment: Option<String>,
}

/// Old/new pairs written by the correction workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationFeedback {
    pub news_id: String,
    pub old_sentiment_label: SentimentLabel,
    pub new_sentiment_label: SentimentLabel,
    pub old_impact_level: ImpactLevel,
    pub new_impact_level: ImpactLevel,
    pub old_reliability_level: ReliabilityLevel,
    pub new_reliability_level: ReliabilityLevel,
    pub comment: Option<String>,
}

impl ClassificationFeedback {
    pub fn between(
        news_id: impl Into<String>,
        stored: &ClassificationVerdict,
        correction: &Correction,
    ) -> Self {
        Self {
            news_id: news_id.into(),
            old_sentiment_label: stored.sentiment_label,
            new_sentiment_label: correction.sentiment_label.unwrap_or(stored.sentiment_label),
            old_impact_level: stored.impact_level,
            new_impact_level: correction.impact_level.unwrap_or(stored.impact_level),
            old_reliability_level: stored.reliability_level,
            new_reliability_level: correction
                .reliability_level
                .unwrap_or(stored.reliability_level),
            comment: correction.comment.clone(),
        }
    }
}

impl Correction {
    pub fn apply(&self, stored: &ClassificationVerdict) -> ClassificationVerdict {
        let mut corrected = stored.clone();
        if let Some(label) = self.sentiment_label {
            corrected.sentiment_label = label;
            corrected.sentiment_score = label.corrected_score();
        }
        if let Some(impact) = self.impact_level {
            corrected.impact_level = impact;
        }
        if let Some(reliability) = self.reliability_level {
            corrected.reliability_level = reliability;
        }
        corrected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SourceType;

    fn stored() -> ClassificationVerdict {
        ClassificationVerdict {
            sentiment_label: SentimentLabel::Neutral,
            sentiment_score: 0.0,
            impact_level: ImpactLevel::Low,
            reliability_level: ReliabilityLevel::Medium,
            source_type: SourceType::RegionalMedia,
            explanation: "Clasificada como neutral.".to_string(),
        }
    }

    #[test]
    fn uncorrected_dimensions_keep_old_value() {
        let correction = Correction {
            impact_level: Some(ImpactLevel::High),
            comment: Some("afecta a todo el departamento".to_string()),
            ..Default::default()
        };
        let feedback = ClassificationFeedback::between("n-1", &stored(), &correction);
        assert_eq!(feedback.old_impact_level, ImpactLevel::Low);
        assert_eq!(feedback.new_impact_level, ImpactLevel::High);
        assert_eq!(feedback.new_sentiment_label, SentimentLabel::Neutral);
        assert_eq!(feedback.new_reliability_level, ReliabilityLevel::Medium);
    }

    #[test]
    fn relabeling_rederives_score() {
        let correction = Correction {
            sentiment_label: Some(SentimentLabel::Negative),
            ..Default::default()
        };
        let corrected = correction.apply(&stored());
        assert_eq!(corrected.sentiment_label, SentimentLabel::Negative);
        assert_eq!(corrected.sentiment_score, -0.7);
        assert_eq!(corrected.source_type, SourceType::RegionalMedia);
        assert_eq!(corrected.explanation, stored().explanation);
    }

    #[test]
    fn feedback_serializes_with_storage_vocabulary() {
        let correction = Correction {
            sentiment_label: Some(SentimentLabel::Positive),
            ..Default::default()
        };
        let json = serde_json::to_value(ClassificationFeedback::between(
            "n-2",
            &stored(),
            &correction,
        ))
        .unwrap();
        assert_eq!(json["old_sentiment_label"], "neutral");
        assert_eq!(json["new_sentiment_label"], "positivo");
        assert_eq!(json["old_reliability_level"], "medio");
    }
}
