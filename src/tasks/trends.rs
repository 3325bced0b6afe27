use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ClassifiedNews, Sector, SentimentLabel};

const TOP_SECTORS: usize = 5;

/// Inclusive publication window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TrendRange {
    /// Missing bounds default to the `days` before `now` and to `now`.
    pub fn resolve(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        days: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            from: from.unwrap_or_else(|| now - Duration::days(days)),
            to: to.unwrap_or(now),
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTrend {
    pub sector: Sector,
    pub total: usize,
    #[serde(rename = "positivo")]
    pub positive: usize,
    pub neutral: usize,
    #[serde(rename = "negativo")]
    pub negative: usize,
    pub positive_percentage: f64,
    pub negative_percentage: f64,
}

impl SectorTrend {
    fn empty(sector: Sector) -> Self {
        Self {
            sector,
            total: 0,
            positive: 0,
            neutral: 0,
            negative: 0,
            positive_percentage: 0.0,
            negative_percentage: 0.0,
        }
    }

    fn record(&mut self, label: SentimentLabel) {
        self.total += 1;
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Negative => self.negative += 1,
        }
        let total = self.total as f64;
        self.positive_percentage = self.positive as f64 / total * 100.0;
        self.negative_percentage = self.negative as f64 / total * 100.0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub sector_stats: Vec<SectorTrend>,
    pub daily_balance: Vec<DailyBalance>,
    pub top_positive_sectors: Vec<SectorTrend>,
    pub top_negative_sectors: Vec<SectorTrend>,
    pub total_news: usize,
    pub date_range: TrendRange,
}

/// Aggregates sentiment per sector and per publication day.
///
/// Records without `published_at`, or published outside `range`, are skipped.
/// Sector stats are ordered by volume; ties keep first-seen order.
pub fn compute_trends(records: &[ClassifiedNews], range: TrendRange) -> TrendReport {
    let mut sectors: Vec<SectorTrend> = Vec::new();
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut total_news = 0;

    for record in records {
        let Some(published_at) = record.published_at.filter(|at| range.contains(*at)) else {
            continue;
        };
        total_news += 1;

        let index = match sectors.iter().position(|s| s.sector == record.sector) {
            Some(index) => index,
            None => {
                sectors.push(SectorTrend::empty(record.sector));
                sectors.len() - 1
            }
        };
        sectors[index].record(record.sentiment_label);

        *daily.entry(published_at.date_naive()).or_default() += match record.sentiment_label {
            SentimentLabel::Positive => 1,
            SentimentLabel::Negative => -1,
            SentimentLabel::Neutral => 0,
        };
    }

    sectors.sort_by(|a, b| b.total.cmp(&a.total));

    let mut top_positive_sectors = sectors.clone();
    top_positive_sectors.sort_by(|a, b| b.positive_percentage.total_cmp(&a.positive_percentage));
    top_positive_sectors.truncate(TOP_SECTORS);

    let mut top_negative_sectors = sectors.clone();
    top_negative_sectors.sort_by(|a, b| b.negative_percentage.total_cmp(&a.negative_percentage));
    top_negative_sectors.truncate(TOP_SECTORS);

    tracing::debug!(
        target: "trends",
        total_news,
        sectors = sectors.len(),
        days = daily.len(),
        "trends computed"
    );

    TrendReport {
        sector_stats: sectors,
        daily_balance: daily
            .into_iter()
            .map(|(date, balance)| DailyBalance { date, balance })
            .collect(),
        top_positive_sectors,
        top_negative_sectors,
        total_news,
        date_range: range,
    }
}
