use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{Article, ImpactLevel, SentimentLabel};

use super::error::RefinementError;

pub const TOOL_NAME: &str = "classify_news";

const SYSTEM_PROMPT: &str = r#"Eres un clasificador experto de noticias del sector agropecuario del {region}, Colombia.
Tu tarea es analizar noticias y clasificarlas según su sentimiento (positivo, neutral, negativo) e impacto (alto, medio, bajo) para los productores agrícolas.

CRITERIOS DE SENTIMIENTO:
- POSITIVO: Noticias sobre aumentos de producción, buenos precios, subsidios, innovación, récords, recuperación
- NEGATIVO: Noticias sobre plagas, sequías, pérdidas, crisis, caída de precios, problemas climáticos
- NEUTRAL: Noticias informativas sin impacto emocional claro

CRITERIOS DE IMPACTO:
- ALTO: Afecta a todo el {region} o varios municipios, pérdidas/ganancias significativas, cambios de política importantes
- MEDIO: Afecta a un municipio específico o un grupo de productores
- BAJO: Casos muy localizados, eventos pequeños, noticias anecdóticas

Debes considerar el contexto agrícola colombiano y la importancia para los productores locales."#;

/// Rule-based verdict sent along as a hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseHints {
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub impact_level: ImpactLevel,
}

/// Parsed and validated output of the refinement service.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub impact_level: ImpactLevel,
    pub explanation: Option<String>,
}

pub fn system_prompt(region: &str) -> String {
    SYSTEM_PROMPT.replace("{region}", region)
}

pub fn user_prompt(article: &Article, base: &BaseHints) -> String {
    let mut prompt = String::from("Analiza esta noticia del sector agropecuario:\n\n");
    prompt.push_str(&format!("TÍTULO: {}\n", article.title));
    if let Some(summary) = &article.summary {
        prompt.push_str(&format!("RESUMEN: {summary}\n"));
    }
    prompt.push_str(&format!("SECTOR: {}\n", article.sector));
    if let Some(municipality) = &article.municipality {
        prompt.push_str(&format!("MUNICIPIO: {municipality}\n"));
    }
    prompt.push_str(&format!(
        "\nClasificación inicial basada en reglas:\n\
         - Sentimiento: {} (score: {})\n\
         - Impacto: {}\n\n\
         Por favor, confirma o ajusta esta clasificación y proporciona una explicación clara de 2-3 frases.",
        base.sentiment_label, base.sentiment_score, base.impact_level
    ));
    prompt
}

pub fn build_request(
    model: String,
    region: &str,
    article: &Article,
    base: &BaseHints,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system".into(),
                content: system_prompt(region),
            },
            ChatMessage {
                role: "user".into(),
                content: user_prompt(article, base),
            },
        ],
        tools: vec![Tool {
            r#type: "function".into(),
            function: FunctionDefinition {
                name: TOOL_NAME.into(),
                description: "Clasificar una noticia agrícola según sentimiento e impacto".into(),
                parameters: classification_schema(),
            },
        }],
        tool_choice: ToolChoice {
            r#type: "function".into(),
            function: ToolChoiceFunction {
                name: TOOL_NAME.into(),
            },
        },
    }
}

fn classification_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sentiment_label": {
                "type": "string",
                "enum": ["positivo", "neutral", "negativo"],
                "description": "El sentimiento de la noticia"
            },
            "sentiment_score": {
                "type": "number",
                "description": "Score de -1 a 1, donde -1 es muy negativo y 1 es muy positivo"
            },
            "impact_level": {
                "type": "string",
                "enum": ["alto", "medio", "bajo"],
                "description": "El nivel de impacto de la noticia"
            },
            "explanation": {
                "type": "string",
                "description": "Explicación breve de 2-3 frases sobre la clasificación"
            }
        },
        "required": ["sentiment_label", "sentiment_score", "impact_level", "explanation"]
    })
}

/// Extracts the forced tool call from a completion body and validates it.
pub fn parse_completion(body: &str) -> Result<Refinement, RefinementError> {
    let completion: ChatCompletionResponse = serde_json::from_str(body)?;
    let arguments = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.tool_calls)
        .and_then(|calls| calls.into_iter().next())
        .map(|call| call.function.arguments)
        .ok_or(RefinementError::MissingToolCall)?;

    // Some gateways send the arguments as an object rather than a JSON string.
    let payload: RefinementPayload = match arguments {
        Value::String(raw) => serde_json::from_str(&raw)?,
        other => serde_json::from_value(other)?,
    };
    payload.validate()
}

#[derive(Debug, Deserialize)]
struct RefinementPayload {
    sentiment_label: SentimentLabel,
    sentiment_score: f64,
    impact_level: ImpactLevel,
    #[serde(default)]
    explanation: Option<String>,
}

impl RefinementPayload {
    fn validate(self) -> Result<Refinement, RefinementError> {
        let score = self.sentiment_score;
        if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
            return Err(RefinementError::ScoreOutOfRange(score));
        }
        let contradicts = match self.sentiment_label {
            SentimentLabel::Positive => score < 0.0,
            SentimentLabel::Negative => score > 0.0,
            SentimentLabel::Neutral => false,
        };
        if contradicts {
            return Err(RefinementError::ScoreContradictsLabel {
                label: self.sentiment_label,
                score,
            });
        }

        Ok(Refinement {
            sentiment_label: self.sentiment_label,
            sentiment_score: score,
            impact_level: self.impact_level,
            explanation: self
                .explanation
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<Tool>,
    pub tool_choice: ToolChoice,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub r#type: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Serialize)]
pub struct ToolChoice {
    #[serde(rename = "type")]
    pub r#type: String,
    pub function: ToolChoiceFunction,
}

#[derive(Debug, Serialize)]
pub struct ToolChoiceFunction {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub arguments: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sector;

    fn article() -> Article {
        Article {
            title: "Plaga afecta cultivos de caña".to_string(),
            summary: Some("Productores reportan pérdidas".to_string()),
            body: None,
            source_domain: None,
            sector: Sector::SugarCane,
            municipality: Some("Palmira".to_string()),
            department: "Valle del Cauca".to_string(),
        }
    }

    fn hints() -> BaseHints {
        BaseHints {
            sentiment_label: SentimentLabel::Negative,
            sentiment_score: -0.6,
            impact_level: ImpactLevel::Medium,
        }
    }

    fn completion(arguments: Value) -> String {
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": { "name": TOOL_NAME, "arguments": arguments }
                    }]
                }
            }]
        })
        .to_string()
    }

    #[test]
    fn request_forces_the_classification_tool() {
        let request = build_request("m".into(), "Valle del Cauca", &article(), &hints());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["tool_choice"]["function"]["name"], TOOL_NAME);
        assert_eq!(body["tools"][0]["type"], "function");
        let required = body["tools"][0]["function"]["parameters"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 4);
        assert_eq!(body["messages"][0]["role"], "system");
    }

    #[test]
    fn user_prompt_embeds_article_and_hints() {
        let prompt = user_prompt(&article(), &hints());
        assert!(prompt.contains("TÍTULO: Plaga afecta cultivos de caña"));
        assert!(prompt.contains("RESUMEN: Productores reportan pérdidas"));
        assert!(prompt.contains("SECTOR: caña de azúcar"));
        assert!(prompt.contains("MUNICIPIO: Palmira"));
        assert!(prompt.contains("Sentimiento: negativo (score: -0.6)"));
        assert!(prompt.contains("Impacto: medio"));
    }

    #[test]
    fn system_prompt_names_the_region() {
        assert!(system_prompt("Huila").contains("agropecuario del Huila, Colombia"));
    }

    #[test]
    fn parses_string_arguments() {
        let args = json!({
            "sentiment_label": "negativo",
            "sentiment_score": -0.75,
            "impact_level": "alto",
            "explanation": "La plaga afecta a varios municipios."
        })
        .to_string();
        let refinement = parse_completion(&completion(Value::String(args))).unwrap();
        assert_eq!(refinement.sentiment_label, SentimentLabel::Negative);
        assert_eq!(refinement.sentiment_score, -0.75);
        assert_eq!(refinement.impact_level, ImpactLevel::High);
        assert_eq!(
            refinement.explanation.as_deref(),
            Some("La plaga afecta a varios municipios.")
        );
    }

    #[test]
    fn parses_object_arguments_and_tolerates_empty_explanation() {
        let args = json!({
            "sentiment_label": "neutral",
            "sentiment_score": 0,
            "impact_level": "bajo",
            "explanation": "  "
        });
        let refinement = parse_completion(&completion(args)).unwrap();
        assert_eq!(refinement.sentiment_label, SentimentLabel::Neutral);
        assert!(refinement.explanation.is_none());

        let without = json!({
            "sentiment_label": "positivo",
            "sentiment_score": 0.4,
            "impact_level": "medio"
        });
        assert!(parse_completion(&completion(without)).unwrap().explanation.is_none());
    }

    #[test]
    fn missing_required_field_fails() {
        let args = json!({ "sentiment_label": "positivo", "impact_level": "alto" });
        assert!(matches!(
            parse_completion(&completion(args)),
            Err(RefinementError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_enum_value_fails() {
        let args = json!({
            "sentiment_label": "muy positivo",
            "sentiment_score": 0.9,
            "impact_level": "alto"
        });
        assert!(matches!(
            parse_completion(&completion(args)),
            Err(RefinementError::Malformed(_))
        ));
    }

    #[test]
    fn invalid_scores_fail() {
        let out_of_range = json!({
            "sentiment_label": "positivo",
            "sentiment_score": 1.5,
            "impact_level": "alto"
        });
        assert!(matches!(
            parse_completion(&completion(out_of_range)),
            Err(RefinementError::ScoreOutOfRange(_))
        ));

        let contradicting = json!({
            "sentiment_label": "negativo",
            "sentiment_score": 0.5,
            "impact_level": "alto"
        });
        assert!(matches!(
            parse_completion(&completion(contradicting)),
            Err(RefinementError::ScoreContradictsLabel { .. })
        ));
    }

    #[test]
    fn response_without_tool_call_fails() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "positivo" } }]
        })
        .to_string();
        assert!(matches!(
            parse_completion(&body),
            Err(RefinementError::MissingToolCall)
        ));
        assert!(matches!(
            parse_completion(r#"{"choices": []}"#),
            Err(RefinementError::MissingToolCall)
        ));
        assert!(matches!(
            parse_completion(r#"{"choices": [{"message": {"tool_calls": null}}]}"#),
            Err(RefinementError::MissingToolCall)
        ));
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(RefinementError::Malformed(_))
        ));
    }
}
