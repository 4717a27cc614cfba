use serde::{Deserialize, Serialize};

// =============================================================================
// Language
// =============================================================================

/// Reply language for advisor output.
///
/// Markers in the response protocol stay in latin script; only body text
/// follows the selected language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Pa,
    Mr,
    Te,
    Ta,
    Kn,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::En,
        Language::Hi,
        Language::Pa,
        Language::Mr,
        Language::Te,
        Language::Ta,
        Language::Kn,
    ];

    /// Two-letter code used in configuration and on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Pa => "pa",
            Language::Mr => "mr",
            Language::Te => "te",
            Language::Ta => "ta",
            Language::Kn => "kn",
        }
    }

    /// English name of the language, as named in prompt directives.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Pa => "Punjabi",
            Language::Mr => "Marathi",
            Language::Te => "Telugu",
            Language::Ta => "Tamil",
            Language::Kn => "Kannada",
        }
    }

    /// Resolve a language code. Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Language {
        let code = code.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// A user as seen by the rest of the application (no credentials).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// =============================================================================
// Marketplace
// =============================================================================

/// Direction of a marketplace listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Buy,
    Sell,
    /// Equipment offered for hire; `crop` then holds the equipment name.
    Rent,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Buy => "buy",
            ListingKind::Sell => "sell",
            ListingKind::Rent => "rent",
        }
    }
}

/// A buy/sell/rent listing in the B2B marketplace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListing {
    #[serde(default)]
    pub id: String,
    pub crop: String,
    pub quantity: String,
    pub price: String,
    pub location: String,
    pub description: String,
    pub seller: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harvest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_power: Option<String>,
}

// =============================================================================
// Community
// =============================================================================

/// A post on the farmer community board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityPost {
    #[serde(default)]
    pub id: String,
    pub author: String,
    pub location: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub likes: u32,
    pub comments: u32,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// =============================================================================
// Advisor payloads
// =============================================================================

/// A government agriculture scheme returned by the schemes lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub benefit: String,
}

/// Daily tip and market pulse shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardInsights {
    pub tip: String,
    pub market: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_and_names() {
        assert_eq!(Language::Hi.code(), "hi");
        assert_eq!(Language::Hi.name(), "Hindi");
        assert_eq!(Language::Kn.to_string(), "Kannada");
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("ta"), Language::Ta);
        assert_eq!(Language::from_code(" PA "), Language::Pa);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_language_serde_uses_codes() {
        let json = serde_json::to_string(&Language::Mr).unwrap();
        assert_eq!(json, "\"mr\"");
        let back: Language = serde_json::from_str("\"te\"").unwrap();
        assert_eq!(back, Language::Te);
    }

    #[test]
    fn test_user_without_id_omits_field() {
        let user = User {
            id: None,
            email: "a@x.com".to_string(),
            name: "Asha".to_string(),
            location: None,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("location").is_none());
    }

    #[test]
    fn test_listing_json_layout_is_camel_case() {
        let listing = MarketListing {
            id: "5".to_string(),
            crop: "Mahindra 575 DI".to_string(),
            quantity: "1 Unit".to_string(),
            price: "₹800/hr".to_string(),
            location: "Pune, MH".to_string(),
            description: "Tractor for hire".to_string(),
            seller: "Suresh".to_string(),
            time: "1 hr ago".to_string(),
            kind: ListingKind::Rent,
            seed_type: None,
            fertilizer: None,
            harvest_date: None,
            equipment_brand: Some("Mahindra".to_string()),
            equipment_power: Some("45 HP".to_string()),
        };
        let value = serde_json::to_value(&listing).unwrap();
        assert_eq!(value["type"], "rent");
        assert_eq!(value["equipmentBrand"], "Mahindra");
        assert!(value.get("seedType").is_none());
    }

    #[test]
    fn test_listing_missing_id_defaults_empty() {
        let json = r#"{"crop":"Cotton","quantity":"20 Quintal","price":"₹6100/Q",
            "location":"Rajkot","description":"d","seller":"s","time":"t","type":"sell"}"#;
        let listing: MarketListing = serde_json::from_str(json).unwrap();
        assert!(listing.id.is_empty());
        assert_eq!(listing.kind, ListingKind::Sell);
    }

    #[test]
    fn test_scheme_tolerates_missing_fields() {
        let scheme: Scheme = serde_json::from_str(r#"{"name":"PM-Kisan"}"#).unwrap();
        assert_eq!(scheme.name, "PM-Kisan");
        assert!(scheme.benefit.is_empty());
    }
}
