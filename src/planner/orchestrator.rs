//! Turn orchestration
//!
//! One entry point, `Planner::handle_chat`, drives the whole pipeline:
//! record the turn, extract parameters (model first, regex fallback),
//! gate on completeness, fan out to the tools, split the route into
//! days, and compose the reply.

use std::sync::Arc;

use eyre::{Result, WrapErr, eyre};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::domain::{ChatMessage, ChatRequest, ChatResponse, TurnStatus};
use crate::session::SessionStore;
use crate::tools::{
    BudgetRequest, ElevationRequest, RouteRequest, Toolbox, WeatherRequest,
};

use super::clarify::missing_questions;
use super::compose::Composer;
use super::enrich::{Enrichment, TripSummary};
use super::extract::extract_parameters;
use super::itinerary::build_itinerary;

pub struct Planner {
    store: Arc<dyn SessionStore>,
    toolbox: Toolbox,
    enrichment: Arc<dyn Enrichment>,
    composer: Composer,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(
        store: Arc<dyn SessionStore>,
        toolbox: Toolbox,
        enrichment: Arc<dyn Enrichment>,
        config: PlannerConfig,
    ) -> Self {
        let composer = Composer::new(enrichment.clone());
        Self { store, toolbox, enrichment, composer, config }
    }

    pub async fn handle_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let session_id = match request.session_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        debug!(%session_id, "handle_chat: called");

        self.store
            .append(&session_id, ChatMessage::user(&request.message))
            .await;
        let history = self.store.get(&session_id).await;

        // History up to (not including) the turn being handled
        let prior = &history[..history.len().saturating_sub(1)];
        let mut params = match self
            .enrichment
            .extract_parameters(&request.message, prior)
            .await
        {
            Some(extracted) => {
                debug!("handle_chat: using model extraction");
                let mut extracted = extracted;
                if let Some(prefs) = &request.preferences {
                    extracted.apply_preferences(prefs);
                }
                extracted
            }
            None => {
                debug!("handle_chat: using pattern extraction");
                extract_parameters(&request.message, request.preferences.as_ref())
            }
        };

        // Nonsense values degrade to defaults rather than failing the turn
        if params.daily_km.is_some_and(|km| km <= 0.0) {
            params.daily_km = None;
        }
        if params.hostel_every == Some(0) {
            params.hostel_every = None;
        }

        if !params.is_complete() {
            let questions = missing_questions(&params);
            info!(%session_id, missing = questions.len(), "handle_chat: needs clarification");
            let text = self.composer.clarification_text(&questions, &request.message).await;
            self.store.append(&session_id, ChatMessage::assistant(&text)).await;
            let messages = self.store.get(&session_id).await;
            return Ok(ChatResponse {
                session_id,
                messages,
                day_plan: None,
                clarifying_questions: Some(questions),
                status: TurnStatus::NeedsClarification,
            });
        }

        let (Some(origin), Some(destination), Some(month)) =
            (params.origin.clone(), params.destination.clone(), params.month.clone())
        else {
            return Err(eyre!("parameters reported complete but a required field is missing"));
        };

        let daily_km = params.daily_km.unwrap_or(self.config.default_daily_km);
        let accommodation = params
            .accommodation
            .clone()
            .unwrap_or_else(|| self.config.default_accommodation.clone());

        let route_request = RouteRequest {
            origin: origin.clone(),
            destination: destination.clone(),
            preferred_daily_km: Some(daily_km),
        };
        let weather_request = WeatherRequest {
            location: destination.clone(),
            month: month.clone(),
        };
        let elevation_request = ElevationRequest {
            origin: origin.clone(),
            destination: destination.clone(),
        };
        let (route, weather, elevation) = tokio::join!(
            self.toolbox.routes.fetch(&route_request),
            self.toolbox.weather.fetch(&weather_request),
            self.toolbox.elevation.fetch(&elevation_request),
        );

        let itinerary = build_itinerary(
            &self.toolbox,
            &route,
            daily_km,
            &accommodation,
            params.hostel_every,
            &weather,
            &elevation,
        )
        .await
        .wrap_err("building itinerary")?;

        let budget = self
            .toolbox
            .budget
            .fetch(&BudgetRequest { days: itinerary.days.len() as u32, mix: itinerary.mix })
            .await;

        let summary = TripSummary {
            route: &route,
            weather: &weather,
            elevation: &elevation,
            budget: &budget,
            day_count: itinerary.days.len(),
            daily_km,
        };
        let text = self.composer.completion_text(&summary).await;

        info!(
            %session_id,
            origin,
            destination,
            days = itinerary.days.len(),
            "handle_chat: plan complete"
        );

        self.store.append(&session_id, ChatMessage::assistant(&text)).await;
        let messages = self.store.get(&session_id).await;
        Ok(ChatResponse {
            session_id,
            messages,
            day_plan: Some(itinerary.days),
            clarifying_questions: None,
            status: TurnStatus::Ok,
        })
    }
}
