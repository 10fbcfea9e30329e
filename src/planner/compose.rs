//! Response text composition
//!
//! Every user-visible sentence goes through here. Enrichment gets first
//! crack at phrasing; a deterministic template always stands behind it.

use std::sync::Arc;

use tracing::debug;

use super::enrich::{Enrichment, TripSummary};

pub struct Composer {
    enrichment: Arc<dyn Enrichment>,
}

impl Composer {
    pub fn new(enrichment: Arc<dyn Enrichment>) -> Self {
        Self { enrichment }
    }

    /// Text asking the user for the missing details
    pub async fn clarification_text(&self, questions: &[String], message: &str) -> String {
        debug!(question_count = questions.len(), "clarification_text: called");
        if let Some(text) = self.enrichment.phrase_clarification(questions, message).await {
            return text;
        }
        format!("I need a bit more detail before planning: {}", questions.join(" "))
    }

    /// Text summarizing a finished plan
    pub async fn completion_text(&self, summary: &TripSummary<'_>) -> String {
        debug!(day_count = summary.day_count, "completion_text: called");
        if let Some(text) = self.enrichment.summarize_plan(summary).await {
            return text;
        }
        format!(
            "Planned {} days from {} to {} at ~{:.0}km/day. Weather around {:.0}C with {}. \
             Elevation: {}. Estimated lodging budget around {:.0} EUR.",
            summary.day_count,
            summary.route.origin,
            summary.route.destination,
            summary.daily_km,
            summary.weather.avg_temp_c,
            summary.weather.notes,
            summary.elevation.difficulty,
            summary.budget.estimated_total_eur,
        )
    }
}
