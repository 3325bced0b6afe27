use reqwest::Client;

use crate::{config::RefinementConfig, domain::Article};

use super::{
    error::RefinementError,
    inference::{build_request, parse_completion, BaseHints, Refinement},
};

const ERROR_BODY_LIMIT: usize = 200;

#[derive(Clone)]
pub struct RefinementClient {
    http: Client,
    config: RefinementConfig,
}

impl RefinementClient {
    pub fn new(http: Client, config: RefinementConfig) -> Self {
        Self { http, config }
    }

    /// Single attempt; the caller already holds a usable rule-based verdict.
    pub async fn refine(
        &self,
        article: &Article,
        base: &BaseHints,
        region: &str,
        credential: Option<&str>,
    ) -> Result<Refinement, RefinementError> {
        let api_key = credential
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(RefinementError::MissingCredential)?;

        let request = build_request(self.config.model.clone(), region, article, base);
        let mut builder = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RefinementError::Status {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        tracing::debug!(
            target: "refinement",
            status = status.as_u16(),
            "refinement response received"
        );
        parse_completion(&body)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
