//! Deterministic parameter extraction
//!
//! Fixed lexical rules over the raw utterance. This path has no external
//! dependency and no hidden state: the same text always extracts to the same
//! parameters, which keeps the whole pipeline functional offline.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{Preferences, TripParameters};

/// "from X to Y", shortest run of letters/spaces, stopping at " in ",
/// sentence punctuation, or end of text
static CITIES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)from\s+([A-Za-z\s]+?)\s+to\s+([A-Za-z\s]+?)(?:\s+in\s+|[.,]|$)")
        .expect("cities pattern is valid")
});

/// 2-3 digit distance followed by an optional space and "km"
static DAILY_KM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})\s?km").expect("daily distance pattern is valid"));

/// "hostel every N night(s)"
static HOSTEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hostel every (\d+)[a-z]* night").expect("hostel pattern is valid"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Extract trip parameters from an utterance, falling back to explicit
/// preference overrides for fields the rules do not find
pub fn extract_parameters(message: &str, preferences: Option<&Preferences>) -> TripParameters {
    debug!(message_len = message.len(), "extract_parameters: called");
    let (origin, destination) = extract_cities(message);

    let mut params = TripParameters {
        origin,
        destination,
        month: extract_month(message),
        daily_km: extract_daily_distance(message),
        hostel_every: extract_hostel_frequency(message),
        accommodation: None,
    };

    if let Some(prefs) = preferences {
        params.apply_preferences(prefs);
    }

    debug!(?params, "extract_parameters: extracted");
    params
}

fn extract_cities(text: &str) -> (Option<String>, Option<String>) {
    match CITIES_RE.captures(text) {
        Some(caps) => (
            Some(caps[1].trim().to_string()),
            Some(caps[2].trim().to_string()),
        ),
        None => (None, None),
    }
}

fn extract_month(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    MONTHS
        .iter()
        .find(|month| lowered.contains(&month.to_lowercase()))
        .map(|month| month.to_string())
}

fn extract_daily_distance(text: &str) -> Option<f64> {
    DAILY_KM_RE
        .captures(&text.to_lowercase())
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

fn extract_hostel_frequency(text: &str) -> Option<u32> {
    HOSTEL_RE
        .captures(&text.to_lowercase())
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cities_with_month_clause() {
        let params = extract_parameters("Plan a trip from Amsterdam to Copenhagen in June", None);
        assert_eq!(params.origin.as_deref(), Some("Amsterdam"));
        assert_eq!(params.destination.as_deref(), Some("Copenhagen"));
        assert_eq!(params.month.as_deref(), Some("June"));
    }

    #[test]
    fn test_extract_cities_stops_at_punctuation() {
        let params = extract_parameters("I want to ride from Berlin to Munich, doing 90km a day", None);
        assert_eq!(params.origin.as_deref(), Some("Berlin"));
        assert_eq!(params.destination.as_deref(), Some("Munich"));
        assert_eq!(params.daily_km, Some(90.0));
    }

    #[test]
    fn test_extract_cities_multiword_names() {
        let params = extract_parameters("from Den Haag to Sankt Peter Ording in July", None);
        assert_eq!(params.origin.as_deref(), Some("Den Haag"));
        assert_eq!(params.destination.as_deref(), Some("Sankt Peter Ording"));
    }

    #[test]
    fn test_month_is_case_insensitive_and_title_cased() {
        let params = extract_parameters("leaving in SEPTEMBER probably", None);
        assert_eq!(params.month.as_deref(), Some("September"));
    }

    #[test]
    fn test_daily_distance_with_and_without_space() {
        assert_eq!(extract_parameters("about 120km per day", None).daily_km, Some(120.0));
        assert_eq!(extract_parameters("about 85 km per day", None).daily_km, Some(85.0));
        // Single digit never matches
        assert_eq!(extract_parameters("about 5km warmup", None).daily_km, None);
    }

    #[test]
    fn test_hostel_frequency() {
        let params = extract_parameters("a hostel every 4th night would be nice", None);
        assert_eq!(params.hostel_every, Some(4));

        let params = extract_parameters("hostel every 2 nights", None);
        assert_eq!(params.hostel_every, Some(2));
    }

    #[test]
    fn test_no_matches_leaves_fields_absent() {
        let params = extract_parameters("hello there", None);
        assert!(params.origin.is_none());
        assert!(params.destination.is_none());
        assert!(params.month.is_none());
        assert!(params.daily_km.is_none());
        assert!(params.hostel_every.is_none());
        assert!(params.accommodation.is_none());
    }

    #[test]
    fn test_preferences_fill_unfound_fields() {
        let prefs = Preferences {
            month: Some("August".into()),
            daily_km: Some(70.0),
            hostel_every: Some(3),
            accommodation: Some("hotel".into()),
        };
        let params = extract_parameters("from Ghent to Bruges in June", Some(&prefs));

        // Extracted month wins, the rest comes from preferences
        assert_eq!(params.month.as_deref(), Some("June"));
        assert_eq!(params.daily_km, Some(70.0));
        assert_eq!(params.hostel_every, Some(3));
        assert_eq!(params.accommodation.as_deref(), Some("hotel"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "from Amsterdam to Copenhagen in June, 100km per day, hostel every 4 nights";
        let first = extract_parameters(text, None);
        for _ in 0..5 {
            assert_eq!(extract_parameters(text, None), first);
        }
    }
}
