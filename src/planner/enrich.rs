//! Optional model-backed enrichment
//!
//! The orchestrator depends only on the `Enrichment` capability; which
//! implementation it gets is decided once at startup by credential presence.
//! Every method is best-effort: any failure reports "no result" and the
//! caller falls back to its deterministic path, so a dead or misconfigured
//! model can never break a turn.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ChatMessage, TripParameters};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::tools::{BudgetResult, ElevationResult, RouteResult, WeatherResult};

/// Everything the summary prompt and fallback template interpolate
pub struct TripSummary<'a> {
    pub route: &'a RouteResult,
    pub weather: &'a WeatherResult,
    pub elevation: &'a ElevationResult,
    pub budget: &'a BudgetResult,
    pub day_count: usize,
    pub daily_km: f64,
}

/// Best-effort natural-language capabilities around the planning core
#[async_trait]
pub trait Enrichment: Send + Sync {
    /// Extract trip parameters from the utterance and prior conversation
    async fn extract_parameters(&self, message: &str, history: &[ChatMessage]) -> Option<TripParameters>;

    /// Phrase the fixed clarifying questions conversationally
    async fn phrase_clarification(&self, questions: &[String], message: &str) -> Option<String>;

    /// Narrate a completed plan
    async fn summarize_plan(&self, summary: &TripSummary<'_>) -> Option<String>;
}

/// The total, non-failing default: contributes nothing
pub struct NoEnrichment;

#[async_trait]
impl Enrichment for NoEnrichment {
    async fn extract_parameters(&self, _message: &str, _history: &[ChatMessage]) -> Option<TripParameters> {
        None
    }

    async fn phrase_clarification(&self, _questions: &[String], _message: &str) -> Option<String> {
        None
    }

    async fn summarize_plan(&self, _summary: &TripSummary<'_>) -> Option<String> {
        None
    }
}

/// LLM-backed enrichment
pub struct ModelEnrichment {
    client: Arc<dyn LlmClient>,
}

impl ModelEnrichment {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    async fn complete_text(&self, prompt: String, max_tokens: u32) -> Option<String> {
        let request = CompletionRequest {
            system_prompt: "You are a helpful cycling trip planning assistant.".to_string(),
            messages: vec![Message::user(prompt)],
            max_tokens,
        };

        match self.client.complete(request).await {
            Ok(response) => response.content.map(|text| text.trim().to_string()),
            Err(e) => {
                debug!(error = %e, "complete_text: model call failed");
                None
            }
        }
    }
}

#[async_trait]
impl Enrichment for ModelEnrichment {
    async fn extract_parameters(&self, message: &str, history: &[ChatMessage]) -> Option<TripParameters> {
        debug!(history_len = history.len(), "extract_parameters: called");
        let history_text = history
            .iter()
            .map(|msg| format!("{}: {}", msg.role.as_str(), msg.content))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Extract cycling trip parameters from this conversation.\n\
             Previous conversation:\n{history_text}\n\n\
             Current message: {message}\n\n\
             Extract these parameters if mentioned:\n\
             - origin: starting city\n\
             - destination: ending city\n\
             - month: travel month\n\
             - daily_km: kilometers per day\n\
             - hostel_every: hostel every N nights\n\
             - accommodation: preference (camping/hostel/hotel)\n\n\
             Return ONLY a JSON object with the parameters found. Use null for missing values.\n\
             Example: {{\"origin\": \"Amsterdam\", \"destination\": \"Copenhagen\", \"month\": \"June\", \
             \"daily_km\": 100, \"hostel_every\": 4, \"accommodation\": \"camping\"}}"
        );

        let text = self.complete_text(prompt, 200).await?;
        let stripped = strip_code_fences(&text);

        let extracted: ExtractedParams = match serde_json::from_str(&stripped) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "extract_parameters: model reply was not valid JSON");
                return None;
            }
        };

        let params = TripParameters {
            origin: extracted.origin,
            destination: extracted.destination,
            month: extracted.month,
            daily_km: extracted.daily_km,
            hostel_every: extracted.hostel_every,
            accommodation: extracted.accommodation,
        };

        // A reply of all nulls counts as no result
        if params.has_any() {
            debug!(?params, "extract_parameters: model extraction succeeded");
            Some(params)
        } else {
            debug!("extract_parameters: model found nothing");
            None
        }
    }

    async fn phrase_clarification(&self, questions: &[String], message: &str) -> Option<String> {
        debug!(question_count = questions.len(), "phrase_clarification: called");
        let question_list = questions
            .iter()
            .map(|q| format!("- {q}"))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "The user said: \"{message}\"\n\n\
             I need to ask for these missing details:\n{question_list}\n\n\
             Generate a friendly, natural response asking for these details. \
             Be conversational and helpful."
        );

        self.complete_text(prompt, 150).await
    }

    async fn summarize_plan(&self, summary: &TripSummary<'_>) -> Option<String> {
        debug!("summarize_plan: called");
        let prompt = format!(
            "Generate a brief, enthusiastic summary for this cycling trip plan:\n\
             - Route: {} to {}\n\
             - Distance: {}km over {} days\n\
             - Daily average: {}km\n\
             - Weather: {}C, {}\n\
             - Terrain: {} ({}m elevation gain)\n\
             - Estimated lodging budget: {:.0} EUR\n\n\
             Make it conversational and encouraging, 2-3 sentences.",
            summary.route.origin,
            summary.route.destination,
            summary.route.total_distance_km,
            summary.day_count,
            summary.daily_km,
            summary.weather.avg_temp_c,
            summary.weather.notes,
            summary.elevation.difficulty,
            summary.elevation.total_elevation_gain_m,
            summary.budget.estimated_total_eur,
        );

        self.complete_text(prompt, 200).await
    }
}

/// Strip markdown code fences the model may wrap JSON in
fn strip_code_fences(text: &str) -> String {
    if let Some((_, rest)) = text.split_once("```json") {
        return match rest.split_once("```") {
            Some((inner, _)) => inner.trim().to_string(),
            None => rest.trim().to_string(),
        };
    }
    if let Some((_, rest)) = text.split_once("```") {
        return match rest.split_once("```") {
            Some((inner, _)) => inner.trim().to_string(),
            None => rest.trim().to_string(),
        };
    }
    text.trim().to_string()
}

/// Shape of the JSON object the extraction prompt asks for
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExtractedParams {
    origin: Option<String>,
    destination: Option<String>,
    month: Option<String>,
    daily_km: Option<f64>,
    hostel_every: Option<u32>,
    accommodation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;

    #[test]
    fn test_strip_code_fences_json_block() {
        let text = "Here you go:\n```json\n{\"origin\": \"Amsterdam\"}\n```";
        assert_eq!(strip_code_fences(text), "{\"origin\": \"Amsterdam\"}");
    }

    #[test]
    fn test_strip_code_fences_plain_block() {
        let text = "```\n{\"origin\": null}\n```";
        assert_eq!(strip_code_fences(text), "{\"origin\": null}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_model_extraction_parses_fenced_json() {
        let client = Arc::new(MockLlmClient::new(vec![Ok(
            "```json\n{\"origin\": \"Amsterdam\", \"destination\": \"Copenhagen\", \"month\": \"June\", \
             \"daily_km\": 100, \"hostel_every\": null, \"accommodation\": null}\n```"
                .to_string(),
        )]));
        let enrichment = ModelEnrichment::new(client);

        let params = enrichment.extract_parameters("plan my trip", &[]).await.unwrap();
        assert_eq!(params.origin.as_deref(), Some("Amsterdam"));
        assert_eq!(params.destination.as_deref(), Some("Copenhagen"));
        assert_eq!(params.month.as_deref(), Some("June"));
        assert_eq!(params.daily_km, Some(100.0));
        assert!(params.hostel_every.is_none());
    }

    #[tokio::test]
    async fn test_model_extraction_all_nulls_is_no_result() {
        let client = Arc::new(MockLlmClient::new(vec![Ok(
            "{\"origin\": null, \"destination\": null, \"month\": null}".to_string(),
        )]));
        let enrichment = ModelEnrichment::new(client);

        assert!(enrichment.extract_parameters("hello", &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_model_extraction_tolerates_garbage() {
        let client = Arc::new(MockLlmClient::new(vec![Ok("not json at all".to_string())]));
        let enrichment = ModelEnrichment::new(client);

        assert!(enrichment.extract_parameters("hello", &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_model_failure_is_no_result() {
        let client = Arc::new(MockLlmClient::failing());
        let enrichment = ModelEnrichment::new(client);

        assert!(enrichment.extract_parameters("hello", &[]).await.is_none());
        assert!(enrichment.phrase_clarification(&["Where?".to_string()], "hi").await.is_none());
    }

    #[tokio::test]
    async fn test_no_enrichment_contributes_nothing() {
        let enrichment = NoEnrichment;
        assert!(enrichment.extract_parameters("from A to B", &[]).await.is_none());
        assert!(enrichment.phrase_clarification(&[], "hi").await.is_none());
    }
}
