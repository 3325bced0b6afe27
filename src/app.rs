use std::{path::Path, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::{
    ai::RefinementClient,
    classifier::Classifier,
    config::AppConfig,
    infrastructure::shutdown::Shutdown,
    rules::Lexicon,
    tasks::{compute_trends, BatchClassifier, IngestReport, IngestRequest, TrendRange, TrendReport},
};

pub struct ClassifierApp {
    config: Arc<AppConfig>,
    batch: BatchClassifier,
    shutdown: Shutdown,
}

impl ClassifierApp {
    pub fn initialize(config: AppConfig, shutdown: Shutdown) -> Result<Self> {
        let config = Arc::new(config);
        let lexicon = Arc::new(
            Lexicon::load(config.lexicon_path.as_deref()).context("failed to load lexicon")?,
        );

        let refiner = if config.refinement.enabled {
            let http_client = Client::builder()
                .user_agent(format!("agro-news-classifier/{}", env!("CARGO_PKG_VERSION")))
                .build()?;
            Some(Arc::new(RefinementClient::new(
                http_client,
                config.refinement.clone(),
            )))
        } else {
            tracing::info!(target: "app", "refinement disabled; rule-based verdicts only");
            None
        };

        if refiner.is_some() && config.refinement.api_key.is_none() {
            tracing::warn!(
                target: "app",
                "REFINEMENT_API_KEY is not set; refinement will be skipped"
            );
        }

        let classifier = Arc::new(Classifier::new(lexicon, config.region.clone(), refiner));
        let batch = BatchClassifier::new(
            classifier,
            config.refinement.api_key.clone(),
            config.batch.concurrency,
        );

        Ok(Self {
            config,
            batch,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let request = read_request(self.config.io.input_path.as_deref()).await?;
        let report = self.process(request).await?;
        write_report(self.config.io.output_path.as_deref(), &report).await?;
        if let Some(path) = self.config.io.trends_path.as_deref() {
            let range =
                TrendRange::resolve(None, None, self.config.batch.trends_window_days, Utc::now());
            write_json(Some(path), &batch_trends(&report, range)).await?;
            tracing::info!(target: "app", path = %path.display(), "trend summary written");
        }
        tracing::info!(
            target: "app",
            processed = report.processed,
            interrupted = report.interrupted,
            "ingest report written"
        );
        Ok(())
    }

    pub async fn process(&self, request: IngestRequest) -> Result<IngestReport> {
        if request.articles.is_empty() {
            bail!("request must contain a non-empty `articles` array");
        }
        let mut shutdown = self.shutdown.subscribe();
        Ok(self.batch.classify_batch(request.articles, &mut shutdown).await)
    }
}

pub async fn read_request(path: Option<&Path>) -> Result<IngestRequest> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("input is not a valid ingest request")
}

/// Trend summary over the successfully classified articles of a batch.
pub fn batch_trends(report: &IngestReport, range: TrendRange) -> TrendReport {
    let records: Vec<_> = report
        .results
        .iter()
        .filter_map(|outcome| outcome.classification().cloned())
        .collect();
    compute_trends(&records, range)
}

pub async fn write_report(path: Option<&Path>, report: &IngestReport) -> Result<()> {
    write_json(path, report).await
}

async fn write_json<T: serde::Serialize>(path: Option<&Path>, value: &T) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(value)?;
    json.push(b'\n');
    match path {
        Some(path) => tokio::fs::write(path, &json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&json).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
