use crate::domain::{ReliabilityLevel, SourceType};

use super::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReliabilityEstimate {
    pub level: ReliabilityLevel,
    pub source_type: SourceType,
}

/// High list wins over medium list; anything unrecognized is a low-trust blog.
pub fn estimate_reliability(lexicon: &Lexicon, source_domain: Option<&str>) -> ReliabilityEstimate {
    let domain = source_domain.unwrap_or("").trim().to_lowercase();

    if !domain.is_empty() && lexicon.high_reliability.any_in(&domain) {
        let source_type = if lexicon.official_suffixes.any_in(&domain) {
            SourceType::Official
        } else {
            SourceType::NationalMedia
        };
        return ReliabilityEstimate {
            level: ReliabilityLevel::High,
            source_type,
        };
    }

    if !domain.is_empty() && lexicon.medium_reliability.any_in(&domain) {
        return ReliabilityEstimate {
            level: ReliabilityLevel::Medium,
            source_type: SourceType::RegionalMedia,
        };
    }

    ReliabilityEstimate {
        level: ReliabilityLevel::Low,
        source_type: SourceType::Blog,
    }
}
