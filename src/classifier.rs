use std::sync::Arc;

use crate::{
    ai::{BaseHints, Refinement, RefinementClient},
    config::RegionConfig,
    domain::{
        Article, ClassificationVerdict, ImpactLevel, InputError, NewsInput, Provenance,
        ReliabilityLevel, SentimentLabel,
    },
    rules::{estimate_impact, estimate_reliability, score_sentiment, Lexicon},
};

/// Rule-based scoring followed by optional refinement.
#[derive(Clone)]
pub struct Classifier {
    lexicon: Arc<Lexicon>,
    region: RegionConfig,
    refiner: Option<Arc<RefinementClient>>,
}

impl Classifier {
    pub fn new(
        lexicon: Arc<Lexicon>,
        region: RegionConfig,
        refiner: Option<Arc<RefinementClient>>,
    ) -> Self {
        Self {
            lexicon,
            region,
            refiner,
        }
    }

    pub fn rules_only(lexicon: Arc<Lexicon>, region: RegionConfig) -> Self {
        Self::new(lexicon, region, None)
    }

    pub fn region(&self) -> &RegionConfig {
        &self.region
    }

    pub async fn classify(
        &self,
        article: &Article,
        credential: Option<&str>,
    ) -> ClassificationVerdict {
        self.classify_with_provenance(article, credential).await.0
    }

    /// Validates raw input first; only input problems are returned as errors.
    pub async fn classify_input(
        &self,
        input: &NewsInput,
        credential: Option<&str>,
    ) -> Result<ClassificationVerdict, InputError> {
        let article = input.to_article(&self.region.name)?;
        Ok(self.classify(&article, credential).await)
    }

    pub async fn classify_with_provenance(
        &self,
        article: &Article,
        credential: Option<&str>,
    ) -> (ClassificationVerdict, Provenance) {
        let base = self.base_verdict(article);
        let refinement = self.refine(article, &base, credential).await;
        merge(base, refinement)
    }

    /// Verdict from keyword and domain rules alone.
    pub fn base_verdict(&self, article: &Article) -> ClassificationVerdict {
        let text = article.combined_text();
        let sentiment = score_sentiment(&self.lexicon, &text);
        let impact = estimate_impact(
            &self.lexicon,
            &self.region,
            &text,
            &article.department,
            article.municipality.as_deref(),
        );
        let reliability = estimate_reliability(&self.lexicon, article.source_domain.as_deref());

        tracing::debug!(
            target: "classifier",
            title = %article.title,
            positive = sentiment.positive_count,
            negative = sentiment.negative_count,
            percentage = ?impact.percentage,
            "rule-based scores computed"
        );

        ClassificationVerdict {
            sentiment_label: sentiment.label,
            sentiment_score: sentiment.score,
            impact_level: impact.level,
            reliability_level: reliability.level,
            source_type: reliability.source_type,
            explanation: synthesize_explanation(sentiment.label, impact.level, reliability.level),
        }
    }

    async fn refine(
        &self,
        article: &Article,
        base: &ClassificationVerdict,
        credential: Option<&str>,
    ) -> Option<Refinement> {
        let refiner = self.refiner.as_ref()?;
        let hints = BaseHints {
            sentiment_label: base.sentiment_label,
            sentiment_score: base.sentiment_score,
            impact_level: base.impact_level,
        };

        match refiner
            .refine(article, &hints, &self.region.name, credential)
            .await
        {
            Ok(refinement) => Some(refinement),
            Err(err) if err.is_configuration() => {
                tracing::debug!(target: "classifier", error = %err, "refinement skipped");
                None
            }
            Err(err) => {
                tracing::warn!(
                    target: "classifier",
                    error = %err,
                    title = %article.title,
                    "refinement failed, using rule-based verdict"
                );
                None
            }
        }
    }
}

/// Refinement may replace sentiment, impact and explanation; reliability always stays.
fn merge(
    base: ClassificationVerdict,
    refinement: Option<Refinement>,
) -> (ClassificationVerdict, Provenance) {
    let Some(refinement) = refinement else {
        return (base, Provenance::Rules);
    };

    let explanation = refinement.explanation.unwrap_or_else(|| {
        synthesize_explanation(
            refinement.sentiment_label,
            refinement.impact_level,
            base.reliability_level,
        )
    });

    (
        ClassificationVerdict {
            sentiment_label: refinement.sentiment_label,
            sentiment_score: refinement.sentiment_score,
            impact_level: refinement.impact_level,
            reliability_level: base.reliability_level,
            source_type: base.source_type,
            explanation,
        },
        Provenance::Refined,
    )
}

pub fn synthesize_explanation(
    sentiment: SentimentLabel,
    impact: ImpactLevel,
    reliability: ReliabilityLevel,
) -> String {
    let sentiment_text = match sentiment {
        SentimentLabel::Positive => "positiva por palabras clave como récord, aumento o mejora",
        SentimentLabel::Negative => "negativa por palabras clave como pérdidas, crisis o problemas",
        SentimentLabel::Neutral => "neutral por no presentar tendencia clara",
    };
    let impact_text = match impact {
        ImpactLevel::High => "Impacto alto porque afecta a múltiples municipios o al sector completo",
        ImpactLevel::Medium => "Impacto medio porque afecta a un grupo específico de productores",
        ImpactLevel::Low => "Impacto bajo por ser muy localizado",
    };
    let reliability_text = match reliability {
        ReliabilityLevel::High => "Veracidad alta por fuente oficial o medio reconocido",
        ReliabilityLevel::Medium => "Veracidad media por medio regional conocido",
        ReliabilityLevel::Low => "Veracidad baja por fuente no verificada",
    };
    format!("Clasificada como {sentiment_text}. {impact_text}. {reliability_text}.")
}
