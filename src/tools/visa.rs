//! Visa requirements tool provider
//!
//! Static visa policy data for common touring scenarios. Not part of the
//! chat turn pipeline; exposed on the Toolbox for direct callers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::title_case;

#[derive(Debug, Clone)]
pub struct VisaRequest {
    pub citizenship: String,
    pub destinations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisaResult {
    pub requires_visa: bool,
    pub notes: String,
}

const SCHENGEN_COUNTRIES: [&str; 27] = [
    "austria",
    "belgium",
    "czechia",
    "czech republic",
    "denmark",
    "estonia",
    "finland",
    "france",
    "germany",
    "greece",
    "hungary",
    "iceland",
    "italy",
    "latvia",
    "liechtenstein",
    "lithuania",
    "luxembourg",
    "malta",
    "netherlands",
    "norway",
    "poland",
    "portugal",
    "slovakia",
    "slovenia",
    "spain",
    "sweden",
    "switzerland",
];

/// Countries with visa-free access to Schengen for tourism (up to 90 days)
const VISA_FREE_TO_SCHENGEN: [&str; 19] = [
    "usa",
    "united states",
    "canada",
    "australia",
    "new zealand",
    "japan",
    "south korea",
    "singapore",
    "united kingdom",
    "uk",
    "britain",
    "ireland",
    "mexico",
    "brazil",
    "argentina",
    "chile",
    "israel",
    "uae",
    "united arab emirates",
];

/// EU countries not in Schengen
const EU_NON_SCHENGEN: [&str; 5] = ["ireland", "bulgaria", "romania", "croatia", "cyprus"];

/// Visa requirement checks against static policy tables
pub struct VisaProvider;

impl VisaProvider {
    pub async fn fetch(&self, request: &VisaRequest) -> VisaResult {
        debug!(citizenship = %request.citizenship, "fetch: called");
        let citizenship = request.citizenship.trim().to_lowercase();
        let destinations: Vec<String> = request
            .destinations
            .iter()
            .map(|d| d.trim().to_lowercase())
            .collect();

        let is_schengen = |c: &str| SCHENGEN_COUNTRIES.contains(&c);
        let all_schengen = destinations.iter().all(|d| is_schengen(d));
        let all_eu = destinations
            .iter()
            .all(|d| is_schengen(d) || EU_NON_SCHENGEN.contains(&d.as_str()));

        // Schengen citizen traveling within Schengen
        if is_schengen(&citizenship) && all_schengen {
            return VisaResult {
                requires_visa: false,
                notes: "Schengen area travel - no visa required. EU/EEA citizens have freedom of movement."
                    .to_string(),
            };
        }

        // EU citizen traveling within the EU (including non-Schengen EU)
        if is_schengen(&citizenship) && all_eu {
            return VisaResult {
                requires_visa: false,
                notes: "EU travel - no visa required. Freedom of movement applies.".to_string(),
            };
        }

        // Visa-free country traveling to Schengen
        if VISA_FREE_TO_SCHENGEN.contains(&citizenship.as_str()) && all_schengen {
            return VisaResult {
                requires_visa: false,
                notes: format!(
                    "Visa-free travel to Schengen area for {} citizens. \
                     Up to 90 days in any 180-day period. Valid passport required.",
                    request.citizenship
                ),
            };
        }

        // UK special case
        if matches!(citizenship.as_str(), "united kingdom" | "uk" | "britain") {
            return VisaResult {
                requires_visa: false,
                notes: "UK citizens can travel visa-free to Schengen for up to 90 days. \
                        Check individual country requirements for longer stays."
                    .to_string(),
            };
        }

        // Domestic travel
        if destinations.len() == 1 && destinations[0] == citizenship {
            return VisaResult {
                requires_visa: false,
                notes: "Domestic travel - no visa required.".to_string(),
            };
        }

        // Default: may require a visa, recommend checking
        let dest_list = destinations
            .iter()
            .map(|d| title_case(d))
            .collect::<Vec<_>>()
            .join(", ");
        VisaResult {
            requires_visa: true,
            notes: format!(
                "Visa may be required for {} citizens traveling to {}. \
                 Please check with the relevant embassies or consulates. \
                 Visit official government travel advisory websites for accurate requirements.",
                title_case(&request.citizenship),
                dest_list
            ),
        }
    }
}
