//! Trip parameters and the recognized preference overrides

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structured trip parameters, partially filled during extraction
///
/// A parameter set is complete once origin, destination, and month are all
/// present. Daily distance and accommodation have defaults and never block
/// completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripParameters {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub month: Option<String>,
    pub daily_km: Option<f64>,
    pub hostel_every: Option<u32>,
    pub accommodation: Option<String>,
}

impl TripParameters {
    /// All required fields are present
    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some() && self.month.is_some()
    }

    /// At least one field was extracted
    pub fn has_any(&self) -> bool {
        self.origin.is_some()
            || self.destination.is_some()
            || self.month.is_some()
            || self.daily_km.is_some()
            || self.hostel_every.is_some()
            || self.accommodation.is_some()
    }

    /// Fill fields still absent from the explicit preference overrides
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        debug!(?prefs, "apply_preferences: called");
        if self.month.is_none() {
            self.month = prefs.month.clone();
        }
        if self.daily_km.is_none() {
            self.daily_km = prefs.daily_km;
        }
        if self.hostel_every.is_none() {
            self.hostel_every = prefs.hostel_every;
        }
        if self.accommodation.is_none() {
            self.accommodation = prefs.accommodation.clone();
        }
    }
}

/// Explicit per-request overrides
///
/// This enumerates exactly the recognized override keys; unrecognized keys in
/// the inbound JSON are ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub month: Option<String>,
    pub daily_km: Option<f64>,
    pub hostel_every: Option<u32>,
    pub accommodation: Option<String>,
}
