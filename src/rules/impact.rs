use once_cell::sync::Lazy;
use regex::Regex;

use crate::{config::RegionConfig, domain::ImpactLevel};

use super::lexicon::Lexicon;

static PERCENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)%").expect("valid percentage regex"));

const HIGH_PERCENT: u64 = 20;
const MEDIUM_PERCENT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactEstimate {
    pub level: ImpactLevel,
    pub percentage: Option<u64>,
}

pub fn estimate_impact(
    lexicon: &Lexicon,
    region: &RegionConfig,
    text: &str,
    department: &str,
    municipality: Option<&str>,
) -> ImpactEstimate {
    let in_region = department.trim().to_lowercase() == region.name.to_lowercase()
        && text.contains(&region.word.to_lowercase());

    let mut level = if lexicon.high_impact.any_in(text) || in_region {
        ImpactLevel::High
    } else if lexicon.medium_impact.any_in(text) || municipality.is_some() {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    };

    // Only the first percentage counts, and it never lowers the keyword level.
    let percentage = first_percentage(text);
    if let Some(value) = percentage {
        if value >= HIGH_PERCENT {
            level = ImpactLevel::High;
        } else if value >= MEDIUM_PERCENT {
            level = level.max(ImpactLevel::Medium);
        }
    }

    ImpactEstimate { level, percentage }
}

fn first_percentage(text: &str) -> Option<u64> {
    let captures = PERCENT_REGEX.captures(text)?;
    let digits = captures.get(1)?.as_str();
    // Digit runs too long for u64 are still huge percentages.
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}
