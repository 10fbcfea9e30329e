//! TripDaemon - conversational cycling trip planner
//!
//! Turns free-text travel requests into day-by-day itineraries by composing
//! tool providers (routing, weather, elevation, accommodation, POI, visa,
//! budget) behind a chat-style API. An Anthropic-backed enrichment layer is
//! optional; every turn also works fully deterministically.

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod planner;
pub mod server;
pub mod session;
pub mod tools;

pub use config::Config;
pub use domain::{ChatRequest, ChatResponse, DayPlan, TripParameters, TurnStatus};
pub use planner::Planner;
