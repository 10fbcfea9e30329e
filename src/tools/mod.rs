//! Tool providers for the planner
//!
//! Every provider has the same contract: it never fails past its boundary.
//! Internal errors (network, geocoding, empty upstream results) degrade to a
//! deterministic fallback value synthesized from static local data, so the
//! orchestrator can always proceed.

mod accommodation;
mod budget;
mod elevation;
mod poi;
mod routes;
mod visa;
mod weather;

pub use accommodation::{AccommodationProvider, AccommodationRequest, AccommodationResult};
pub use budget::{AccommodationMix, BudgetProvider, BudgetRequest, BudgetResult};
pub use elevation::{ElevationProvider, ElevationRequest, ElevationResult};
pub use poi::{PoiProvider, PoiRequest, PoiResult};
pub use routes::{RouteProvider, RouteRequest, RouteResult, Waypoint};
pub use visa::{VisaProvider, VisaRequest, VisaResult};
pub use weather::{WeatherProvider, WeatherRequest, WeatherResult};

use crate::config::RoutingConfig;

/// All tool providers, injected into the planner as one unit
pub struct Toolbox {
    pub routes: RouteProvider,
    pub weather: WeatherProvider,
    pub elevation: ElevationProvider,
    pub accommodation: AccommodationProvider,
    pub poi: PoiProvider,
    pub visa: VisaProvider,
    pub budget: BudgetProvider,
}

impl Toolbox {
    /// Providers with live paths enabled where credentials exist
    pub fn new(routing: &RoutingConfig) -> Self {
        Self {
            routes: RouteProvider::new(routing),
            ..Self::offline()
        }
    }

    /// Fully static providers; no network is ever touched
    pub fn offline() -> Self {
        Self {
            routes: RouteProvider::offline(),
            weather: WeatherProvider,
            elevation: ElevationProvider,
            accommodation: AccommodationProvider,
            poi: PoiProvider,
            visa: VisaProvider,
            budget: BudgetProvider,
        }
    }
}

/// Title-case each whitespace-separated word
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
