use std::sync::Arc;

use futures::{stream, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    classifier::Classifier,
    domain::{ClassifiedNews, InputError, NewsInput},
    infrastructure::shutdown::ShutdownListener,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Kept untyped so one malformed article cannot reject the whole request.
    #[serde(default)]
    pub articles: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcome {
    Success {
        title: String,
        classification: Box<ClassifiedNews>,
    },
    Error {
        title: String,
        error: String,
    },
}

impl IngestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, IngestOutcome::Success { .. })
    }

    pub fn classification(&self) -> Option<&ClassifiedNews> {
        match self {
            IngestOutcome::Success { classification, .. } => Some(&**classification),
            IngestOutcome::Error { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub success: bool,
    pub processed: usize,
    pub interrupted: bool,
    pub results: Vec<IngestOutcome>,
}

pub struct BatchClassifier {
    classifier: Arc<Classifier>,
    credential: Option<Arc<str>>,
    concurrency: usize,
}

impl BatchClassifier {
    pub fn new(
        classifier: Arc<Classifier>,
        credential: Option<String>,
        concurrency: usize,
    ) -> Self {
        Self {
            classifier,
            credential: credential.map(Arc::from),
            concurrency: concurrency.max(1),
        }
    }

    /// Outcomes in input order, at most `concurrency` classifications in flight.
    pub fn classify_stream(&self, articles: Vec<Value>) -> impl Stream<Item = IngestOutcome> {
        let classifier = self.classifier.clone();
        let credential = self.credential.clone();
        stream::iter(articles)
            .map(move |input| classify_record(classifier.clone(), credential.clone(), input))
            .buffered(self.concurrency)
    }

    pub async fn classify_batch(
        &self,
        articles: Vec<Value>,
        shutdown: &mut ShutdownListener,
    ) -> IngestReport {
        let total = articles.len();
        tracing::info!(target: "batch", total, concurrency = self.concurrency, "classifying batch");

        let mut results = Vec::with_capacity(total);
        let mut interrupted = false;
        let outcomes = self.classify_stream(articles);
        tokio::pin!(outcomes);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.notified() => {
                    tracing::info!(
                        target: "batch",
                        completed = results.len(),
                        total,
                        "shutdown requested; abandoning outstanding classifications"
                    );
                    interrupted = true;
                    break;
                }
                next = outcomes.next() => match next {
                    Some(outcome) => results.push(outcome),
                    None => break,
                },
            }
        }

        let failed = results.iter().filter(|r| !r.is_success()).count();
        tracing::info!(target: "batch", processed = results.len(), failed, "batch finished");

        IngestReport {
            success: !interrupted,
            processed: results.len(),
            interrupted,
            results,
        }
    }
}

async fn classify_record(
    classifier: Arc<Classifier>,
    credential: Option<Arc<str>>,
    raw: Value,
) -> IngestOutcome {
    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    let validated = serde_json::from_value::<NewsInput>(raw)
        .map_err(|err| InputError::Malformed(err.to_string()))
        .and_then(|input| {
            let article = input.to_article(&classifier.region().name)?;
            Ok((input, article))
        });
    let (input, article) = match validated {
        Ok(pair) => pair,
        Err(err) => {
            tracing::warn!(target: "batch", error = %err, title = %title, "article rejected");
            return IngestOutcome::Error {
                title,
                error: err.to_string(),
            };
        }
    };

    let (verdict, provenance) = classifier
        .classify_with_provenance(&article, credential.as_deref())
        .await;
    tracing::info!(
        target: "batch",
        title = %title,
        sentiment = %verdict.sentiment_label,
        impact = %verdict.impact_level,
        reliability = %verdict.reliability_level,
        provenance = provenance.version_tag(),
        "article classified"
    );

    let record = ClassifiedNews::new(&input, article, verdict, provenance);
    IngestOutcome::Success {
        title,
        classification: Box::new(record),
    }
}
