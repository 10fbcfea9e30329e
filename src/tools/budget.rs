//! Budget estimation tool provider

use serde::{Deserialize, Serialize};
use tracing::debug;

const CAMPING_COST_EUR: f64 = 20.0;
const HOSTEL_COST_EUR: f64 = 45.0;
const HOTEL_COST_EUR: f64 = 90.0;

/// Fraction of nights spent in each accommodation type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccommodationMix {
    pub camping: f64,
    pub hostel: f64,
    pub hotel: f64,
}

impl AccommodationMix {
    /// Build a mix from per-type night counts
    pub fn from_counts(camping: u32, hostel: u32, hotel: u32) -> Self {
        let total = (camping + hostel + hotel) as f64;
        if total == 0.0 {
            return Self::default();
        }
        Self {
            camping: camping as f64 / total,
            hostel: hostel as f64 / total,
            hotel: hotel as f64 / total,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BudgetRequest {
    pub days: u32,
    pub mix: AccommodationMix,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetResult {
    pub estimated_total_eur: f64,
    pub camping_eur: f64,
    pub hostel_eur: f64,
    pub hotel_eur: f64,
}

/// Lodging budget estimates from fixed nightly rates
pub struct BudgetProvider;

impl BudgetProvider {
    /// Estimate accommodation spend; nights = days - 1, minimum 1
    pub async fn fetch(&self, request: &BudgetRequest) -> BudgetResult {
        debug!(days = request.days, "fetch: called");
        let nights = if request.days > 1 { request.days - 1 } else { 1 } as f64;

        let camping_eur = nights * request.mix.camping * CAMPING_COST_EUR;
        let hostel_eur = nights * request.mix.hostel * HOSTEL_COST_EUR;
        let hotel_eur = nights * request.mix.hotel * HOTEL_COST_EUR;

        BudgetResult {
            estimated_total_eur: camping_eur + hostel_eur + hotel_eur,
            camping_eur,
            hostel_eur,
            hotel_eur,
        }
    }
}
