use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

const POSITIVE_KEYWORDS: &[&str] = &[
    "récord",
    "cosecha",
    "aumento",
    "aumenta",
    "producción",
    "productividad",
    "crecimiento",
    "subsidio",
    "apoyo",
    "inversión",
    "exportaciones aumentan",
    "mejoran precios",
    "beneficio",
    "productores",
    "buenas prácticas",
    "innovación",
    "sostenible",
    "recuperación",
    "mejora",
    "incremento positivo",
    "alza",
    "bonanza",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "plaga",
    "sequía",
    "inundación",
    "pérdidas",
    "quiebra",
    "crisis",
    "paro",
    "bloqueo",
    "protesta",
    "caída de precios",
    "reducción",
    "emergencia",
    "desastre",
    "deuda",
    "incertidumbre",
    "afecta",
    "amenaza",
    "daños",
    "problemas",
    "dificultades",
    "colapso",
];

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "valle del cauca",
    "región",
    "departamento",
    "pérdidas millonarias",
    "quiebra masiva",
    "cierre de plantas",
    "más de 20%",
    "disparada",
    "emergencia climática",
    "sequía severa",
    "inundación grave",
    "nueva ley",
    "aranceles",
    "grandes subsidios",
    "todos los municipios",
    "crisis general",
];

const MEDIUM_IMPACT_KEYWORDS: &[&str] = &[
    "municipio",
    "zona específica",
    "grupo de productores",
    "variación moderada",
    "programa de apoyo",
    "5%",
    "10%",
    "15%",
    "apoyo limitado",
];

const HIGH_RELIABILITY_DOMAINS: &[&str] = &[
    ".gov.co",
    ".edu.co",
    "elpais.com.co",
    "eltiempo.com",
    "minagricultura.gov.co",
    "agronet.gov.co",
    "finagro.com.co",
];

const MEDIUM_RELIABILITY_DOMAINS: &[&str] =
    &["periodicolocal", "noticiasregionales", "agrocolombiano"];

const OFFICIAL_SUFFIXES: &[&str] = &[".gov.co", ".edu.co"];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lexicon file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Named list of lowercase match phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    name: String,
    phrases: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(name: &str, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            name: name.to_string(),
            phrases,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Total occurrences of every phrase; each repeat counts.
    pub fn count_in(&self, text: &str) -> usize {
        self.phrases
            .iter()
            .map(|phrase| text.matches(phrase.as_str()).count())
            .sum()
    }

    pub fn first_in(&self, text: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| text.contains(phrase.as_str()))
            .map(String::as_str)
    }

    pub fn any_in(&self, text: &str) -> bool {
        self.first_in(text).is_some()
    }
}

/// Keyword and domain lists shared read-only by every estimator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    pub positive: KeywordSet,
    pub negative: KeywordSet,
    pub high_impact: KeywordSet,
    pub medium_impact: KeywordSet,
    pub high_reliability: KeywordSet,
    pub medium_reliability: KeywordSet,
    pub official_suffixes: KeywordSet,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: KeywordSet::new("positive", POSITIVE_KEYWORDS),
            negative: KeywordSet::new("negative", NEGATIVE_KEYWORDS),
            high_impact: KeywordSet::new("high_impact", HIGH_IMPACT_KEYWORDS),
            medium_impact: KeywordSet::new("medium_impact", MEDIUM_IMPACT_KEYWORDS),
            high_reliability: KeywordSet::new("high_reliability", HIGH_RELIABILITY_DOMAINS),
            medium_reliability: KeywordSet::new("medium_reliability", MEDIUM_RELIABILITY_DOMAINS),
            official_suffixes: KeywordSet::new("official_suffixes", OFFICIAL_SUFFIXES),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconFile {
    positive: Option<Vec<String>>,
    negative: Option<Vec<String>>,
    high_impact: Option<Vec<String>>,
    medium_impact: Option<Vec<String>>,
    high_reliability: Option<Vec<String>>,
    medium_reliability: Option<Vec<String>>,
    official_suffixes: Option<Vec<String>>,
}

impl Lexicon {
    /// Built-in lists, with any set present in `path` replacing its default.
    pub fn load(path: Option<&Path>) -> Result<Self, LexiconError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| LexiconError::Parse {
            path: display,
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        let mut lexicon = Self::default();
        let overrides = [
            (&mut lexicon.positive, file.positive),
            (&mut lexicon.negative, file.negative),
            (&mut lexicon.high_impact, file.high_impact),
            (&mut lexicon.medium_impact, file.medium_impact),
            (&mut lexicon.high_reliability, file.high_reliability),
            (&mut lexicon.medium_reliability, file.medium_reliability),
            (&mut lexicon.official_suffixes, file.official_suffixes),
        ];
        for (set, replacement) in overrides {
            if let Some(phrases) = replacement {
                *set = KeywordSet::new(set.name(), phrases);
            }
        }
        Ok(lexicon)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn phrases_are_normalized() {
        let set = KeywordSet::new("t", ["  Récord ", "", "ALZA"]);
        assert_eq!(set.phrases(), &["récord".to_string(), "alza".to_string()]);
    }

    #[test]
    fn count_includes_repeats() {
        let set = KeywordSet::new("t", ["plaga", "sequía"]);
        assert_eq!(set.count_in("plaga tras plaga y sequía"), 3);
        assert_eq!(set.count_in("sin novedades"), 0);
    }

    #[test]
    fn default_lists_do_not_overlap() {
        let lexicon = Lexicon::default();
        for phrase in lexicon.positive.phrases() {
            assert!(!lexicon.negative.phrases().contains(phrase), "{phrase}");
        }
        for domain in lexicon.high_reliability.phrases() {
            assert!(!lexicon.medium_reliability.phrases().contains(domain), "{domain}");
        }
    }

    #[test]
    fn file_overrides_only_listed_sets() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"negative": ["Helada"], "medium_reliability": ["radiovalle"]}}"#).unwrap();

        let lexicon = Lexicon::load(Some(file.path())).unwrap();
        assert_eq!(lexicon.negative.phrases(), &["helada".to_string()]);
        assert_eq!(lexicon.negative.name(), "negative");
        assert_eq!(lexicon.medium_reliability.phrases(), &["radiovalle".to_string()]);
        assert_eq!(lexicon.positive, Lexicon::default().positive);
    }

    #[test]
    fn unreadable_or_invalid_file_is_an_error() {
        let missing = Lexicon::load(Some(Path::new("/nonexistent/lexicon.json")));
        assert!(matches!(missing, Err(LexiconError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"positivo": ["x"]}}"#).unwrap();
        let invalid = Lexicon::load(Some(file.path()));
        assert!(matches!(invalid, Err(LexiconError::Parse { .. })));
    }
}
