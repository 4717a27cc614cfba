//! User-facing text for advisor failures.
//!
//! Advisor operations return a classified [`AdvisorError`]; this module turns
//! each (operation, error) pair into a fixed message so raw transport errors
//! never reach the farmer.

use kisan_core::types::{DashboardInsights, ListingKind};

use crate::error::AdvisorError;

/// Dashboard tip used when the model returned no tip.
pub const DEFAULT_TIP: &str = "Keep your field clean to prevent pests.";
/// Dashboard market line used when the model returned no market line.
pub const DEFAULT_MARKET: &str = "Check local mandi prices before selling.";

const OFFLINE_TIP: &str = "Water your crops early in the morning.";
const OFFLINE_MARKET: &str = "Market rates vary, check mandi.";

/// Advisor operations whose failures are shown as a fixed message.
///
/// Listing copy, schemes and post tags have no fixed message: see
/// [`listing_fallback`] and [`list_or_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Diagnose,
    AnalyzeSoil,
    FastAdvice,
    DashboardInsights,
    MarketSearch,
    GovMarketRate,
    CropCalendar,
    FertilizerPlan,
    Chat,
}

impl Operation {
    /// Text shown when the model answered with nothing.
    pub fn empty_text(&self) -> &'static str {
        match self {
            Operation::Diagnose => "Unable to diagnose. Please try again with a clearer photo.",
            Operation::AnalyzeSoil => "Could not analyze soil.",
            Operation::FastAdvice => "No advice generated.",
            Operation::DashboardInsights => DEFAULT_TIP,
            Operation::MarketSearch => "No market data found.",
            Operation::GovMarketRate => "Rate data not found.",
            Operation::CropCalendar => "Calendar generation failed.",
            Operation::FertilizerPlan => "Calculation failed.",
            Operation::Chat => "I didn't understand that.",
        }
    }

    /// Text shown when the call itself failed.
    pub fn failure_text(&self) -> &'static str {
        match self {
            Operation::Diagnose => "Error connecting to the diagnosis service.",
            Operation::AnalyzeSoil => "Error analyzing soil image.",
            Operation::FastAdvice => "Service unavailable.",
            Operation::DashboardInsights => OFFLINE_TIP,
            Operation::MarketSearch => "Could not search for buyers right now.",
            Operation::GovMarketRate => "Could not fetch government data right now.",
            Operation::CropCalendar => "Could not generate calendar.",
            Operation::FertilizerPlan => "Could not calculate fertilizer dosage.",
            Operation::Chat => "Connection lost. Starting a new conversation...",
        }
    }

    /// Message for `err` raised by this operation.
    pub fn describe(&self, err: &AdvisorError) -> String {
        match err {
            AdvisorError::EmptyResponse => self.empty_text().to_string(),
            AdvisorError::Transport(_) | AdvisorError::Decode(_) => {
                self.failure_text().to_string()
            }
            AdvisorError::Validation(_) => "Please correct the highlighted fields.".to_string(),
            AdvisorError::EmptyMessage => "Please enter a message.".to_string(),
            AdvisorError::MessageTooLong(max) => {
                format!("Message is too long. Keep it under {} characters.", max)
            }
        }
    }

    /// The successful text, or this operation's message for the error.
    pub fn text_or_message(&self, result: Result<String, AdvisorError>) -> String {
        result.unwrap_or_else(|err| {
            tracing::debug!(operation = ?self, error = %err, "Showing fallback text");
            self.describe(&err)
        })
    }
}

/// Dashboard content shown when the insights call failed outright.
pub fn offline_insights() -> DashboardInsights {
    DashboardInsights {
        tip: OFFLINE_TIP.to_string(),
        market: OFFLINE_MARKET.to_string(),
    }
}

/// Listing description shown instead of an optimized one.
///
/// An empty model reply gets a short headline naming the crop; a failed call
/// gets a plain availability line.
pub fn listing_fallback(
    kind: ListingKind,
    crop: &str,
    location: &str,
    err: &AdvisorError,
) -> String {
    match err {
        AdvisorError::EmptyResponse => {
            let lead = match kind {
                ListingKind::Sell => "Quality",
                ListingKind::Buy | ListingKind::Rent => "Need",
            };
            format!("{} {} in {}.", lead, crop, location)
        }
        _ => format!("{} available in {}.", crop, location),
    }
}

/// Items from a schema-constrained call, or nothing if it failed.
pub fn list_or_empty<T>(result: Result<Vec<T>, AdvisorError>) -> Vec<T> {
    result.unwrap_or_else(|err| {
        tracing::debug!(error = %err, "Showing an empty list");
        Vec::new()
    })
}
