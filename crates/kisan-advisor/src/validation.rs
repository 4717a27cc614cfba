//! Form validation run before any request reaches the model.
//!
//! Every form arrives as raw strings, the way a text field hands them over.
//! Validation collects one message per offending field and never stops at
//! the first failure, so a form can highlight everything at once.

use kisan_core::types::ListingKind;

use crate::error::AdvisorError;

/// Longest chat message accepted, in characters.
pub const MAX_CHAT_CHARS: usize = 2000;

const REQUIRED: &str = "Required";

/// Field name to message, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.entries))]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field, message)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn summarize(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

// =============================================================================
// Forms
// =============================================================================

/// Fertilizer dosage calculator input.
#[derive(Debug, Clone, Default)]
pub struct FertilizerForm {
    pub crop: String,
    /// Acres.
    pub land_size: String,
    /// Days since sowing; may be left blank.
    pub days: String,
}

impl FertilizerForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if is_blank(&self.crop) {
            errors.add("crop", REQUIRED);
        }

        match parse_number(&self.land_size) {
            Some(size) if size > 500.0 => errors.add("landSize", "Max 500 Acres"),
            Some(size) if size > 0.0 => {}
            _ => errors.add("landSize", "Enter valid size > 0"),
        }

        if !is_blank(&self.days) && !parse_number(&self.days).is_some_and(|d| d >= 0.0) {
            errors.add("days", "Cannot be negative");
        }

        errors.into_result()
    }
}

/// Crop calendar input.
#[derive(Debug, Clone, Default)]
pub struct CalendarForm {
    pub crop: String,
    pub sowing_date: String,
}

impl CalendarForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if is_blank(&self.crop) {
            errors.add("crop", REQUIRED);
        }
        if is_blank(&self.sowing_date) {
            errors.add("date", REQUIRED);
        }
        errors.into_result()
    }
}

/// Weather-based advice input. Temperature in °C, humidity in percent.
#[derive(Debug, Clone, Default)]
pub struct WeatherForm {
    pub temp: String,
    pub humidity: String,
    /// Free text such as "Low" or "Heavy"; not validated.
    pub rainfall: String,
    pub crop: String,
}

impl WeatherForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        match parse_number(&self.temp) {
            None => errors.add("temp", REQUIRED),
            Some(t) if !(-10.0..=60.0).contains(&t) => {
                errors.add("temp", "Range: -10°C to 60°C")
            }
            Some(_) => {}
        }

        match parse_number(&self.humidity) {
            None => errors.add("humidity", REQUIRED),
            Some(h) if !(0.0..=100.0).contains(&h) => errors.add("humidity", "Range: 0% to 100%"),
            Some(_) => {}
        }

        if is_blank(&self.crop) {
            errors.add("crop", "Crop name is required");
        }

        errors.into_result()
    }
}

/// Income trend the farmer reports alongside their numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trend {
    Profit,
    #[default]
    Stable,
    Loss,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Profit => "profit",
            Trend::Stable => "stable",
            Trend::Loss => "loss",
        }
    }
}

/// Money management input, amounts in rupees.
#[derive(Debug, Clone, Default)]
pub struct FinanceForm {
    pub income: String,
    pub expense: String,
    pub trend: Trend,
}

impl FinanceForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [("income", &self.income), ("expense", &self.expense)] {
            if is_blank(value) {
                errors.add(field, REQUIRED);
            } else if !parse_number(value).is_some_and(|n| n >= 0.0) {
                errors.add(field, "Must be positive");
            }
        }
        errors.into_result()
    }
}

/// New marketplace listing input.
#[derive(Debug, Clone)]
pub struct ListingForm {
    pub kind: ListingKind,
    pub crop: String,
    pub quantity: String,
    pub price: String,
    pub location: String,
}

impl ListingForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("crop", &self.crop),
            ("price", &self.price),
            ("location", &self.location),
        ] {
            if is_blank(value) {
                errors.add(field, REQUIRED);
            }
        }
        errors.into_result()
    }
}

/// A community post must have some content.
pub fn validate_post(content: &str) -> Result<(), AdvisorError> {
    if is_blank(content) {
        return Err(AdvisorError::EmptyMessage);
    }
    Ok(())
}

/// A chat message must be non-blank and at most [`MAX_CHAT_CHARS`] long.
pub fn validate_chat_message(message: &str) -> Result<(), AdvisorError> {
    if is_blank(message) {
        return Err(AdvisorError::EmptyMessage);
    }
    if message.chars().count() > MAX_CHAT_CHARS {
        return Err(AdvisorError::MessageTooLong(MAX_CHAT_CHARS));
    }
    Ok(())
}
