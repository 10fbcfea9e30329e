//! The planning core
//!
//! Everything between an inbound chat turn and its response: parameter
//! extraction, the clarification gate, the day-splitting itinerary builder,
//! and response composition, driven by the orchestrator.

mod clarify;
mod compose;
mod enrich;
mod extract;
mod itinerary;
mod orchestrator;

pub use clarify::missing_questions;
pub use compose::Composer;
pub use enrich::{Enrichment, ModelEnrichment, NoEnrichment, TripSummary};
pub use extract::extract_parameters;
pub use itinerary::{Itinerary, PlanError, build_itinerary};
pub use orchestrator::Planner;
