use crate::domain::SentimentLabel;

use super::lexicon::Lexicon;

/// Counts within this margin of each other stay neutral.
const DEAD_ZONE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub score: f64,
    pub positive_count: usize,
    pub negative_count: usize,
}

pub fn score_sentiment(lexicon: &Lexicon, text: &str) -> SentimentScore {
    let positive_count = lexicon.positive.count_in(text);
    let negative_count = lexicon.negative.count_in(text);

    let (label, score) = if positive_count > negative_count + DEAD_ZONE {
        let diff = (positive_count - negative_count) as f64;
        (SentimentLabel::Positive, ((3.0 + diff) / 10.0).min(0.8))
    } else if negative_count > positive_count + DEAD_ZONE {
        let diff = (negative_count - positive_count) as f64;
        (SentimentLabel::Negative, (-(3.0 + diff) / 10.0).max(-0.8))
    } else {
        (SentimentLabel::Neutral, 0.0)
    };

    SentimentScore {
        label,
        score,
        positive_count,
        negative_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> SentimentScore {
        score_sentiment(&Lexicon::default(), text)
    }

    #[test]
    fn tie_is_neutral() {
        let result = score("plaga y récord en la misma semana");
        assert_eq!(result.positive_count, result.negative_count);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn margin_of_two_is_still_neutral() {
        let result = score("récord de cosecha con alza, pero llegó la plaga");
        assert_eq!((result.positive_count, result.negative_count), (3, 1));
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn difference_of_three_scores_point_six() {
        let result = score("récord, cosecha y alza");
        assert_eq!((result.positive_count, result.negative_count), (3, 0));
        assert_eq!(result.label, SentimentLabel::Positive);
        assert_eq!(result.score, 0.6);
    }

    #[test]
    fn scores_are_clamped() {
        let positive = score("récord récord récord récord récord récord récord");
        assert_eq!(positive.label, SentimentLabel::Positive);
        assert_eq!(positive.score, 0.8);

        let negative = score("plaga, sequía, crisis, deuda, colapso y desastre");
        assert_eq!(negative.label, SentimentLabel::Negative);
        assert_eq!(negative.score, -0.8);
    }

    #[test]
    fn negative_difference_of_four() {
        let result = score("plaga y sequía causan pérdidas y crisis");
        assert_eq!(result.negative_count, 4);
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.score, -0.7);
    }
}
