use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "caña de azúcar")]
    SugarCane,
    #[serde(rename = "café")]
    Coffee,
    #[serde(rename = "ganadería")]
    Livestock,
    #[serde(rename = "frutas")]
    Fruit,
    #[serde(rename = "hortalizas")]
    Vegetables,
    #[serde(rename = "flores")]
    Flowers,
    #[serde(rename = "otros")]
    Other,
}

impl Sector {
    pub const ALL: [Sector; 7] = [
        Sector::SugarCane,
        Sector::Coffee,
        Sector::Livestock,
        Sector::Fruit,
        Sector::Vegetables,
        Sector::Flowers,
        Sector::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::SugarCane => "caña de azúcar",
            Sector::Coffee => "café",
            Sector::Livestock => "ganadería",
            Sector::Fruit => "frutas",
            Sector::Vegetables => "hortalizas",
            Sector::Flowers => "flores",
            Sector::Other => "otros",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(InputError::MissingSector);
        }
        Sector::ALL
            .into_iter()
            .find(|sector| sector.as_str() == normalized)
            .ok_or_else(|| InputError::UnknownSector(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("article title is required")]
    MissingTitle,
    #[error("article sector is required")]
    MissingSector,
    #[error("unknown sector: {0}")]
    UnknownSector(String),
    #[error("malformed article: {0}")]
    Malformed(String),
}

/// Article as submitted by the ingestion collaborator, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsInput {
    #[serde(default)]
    pub title: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
    pub source_name: Option<String>,
    pub source_domain: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sector: String,
    pub product_type: Option<String>,
    pub municipality: Option<String>,
    pub department: Option<String>,
}

/// Validated, immutable classification input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub source_domain: Option<String>,
    pub sector: Sector,
    pub municipality: Option<String>,
    pub department: String,
}

impl Article {
    /// Title, summary and body joined with spaces and lowercased.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.summary.as_deref().unwrap_or(""),
            self.body.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

impl NewsInput {
    pub fn to_article(&self, default_department: &str) -> Result<Article, InputError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(InputError::MissingTitle);
        }
        let sector: Sector = self.sector.parse()?;

        let source_domain = clean_str(self.source_domain.as_deref())
            .or_else(|| self.url.as_deref().and_then(domain_from_url));

        Ok(Article {
            title: title.to_string(),
            summary: clean_str(self.summary.as_deref()),
            body: clean_str(self.body.as_deref()),
            source_domain,
            sector,
            municipality: clean_str(self.municipality.as_deref()),
            department: clean_str(self.department.as_deref())
                .unwrap_or_else(|| default_department.to_string()),
        })
    }
}

fn domain_from_url(raw: &str) -> Option<String> {
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            url.host_str().map(|host| host.to_lowercase())
        }
        _ => None,
    }
}

fn clean_str(value: Option<&str>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
