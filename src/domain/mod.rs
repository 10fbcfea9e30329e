//! Domain types shared across the planner, session store, and HTTP surface

mod api;
mod message;
mod params;
mod plan;

pub use api::{ChatRequest, ChatResponse, TurnStatus};
pub use message::{ChatMessage, Role};
pub use params::{Preferences, TripParameters};
pub use plan::DayPlan;
