//! The farm advisor: one method per AI-backed feature.
//!
//! Each method builds a request, sends it through the transport and
//! classifies the outcome. Nothing here invents user-facing fallback text;
//! callers pair the returned [`AdvisorError`] with [`crate::presentation`].

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use kisan_core::config::AdvisorConfig;
use kisan_core::types::{DashboardInsights, Language, Scheme};

use crate::citation::{extract_citations, Citation};
use crate::error::AdvisorError;
use crate::presentation::{DEFAULT_MARKET, DEFAULT_TIP};
use crate::prompts;
use crate::session::ConversationSession;
use crate::transport::{AiTransport, ChatSetup, GenerateRequest, GenerateResponse};
use crate::validation::{CalendarForm, FertilizerForm, FinanceForm, ListingForm, WeatherForm};

const INSIGHT_SEPARATOR: &str = "|||";
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

static QUOTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]+"#).expect("Invalid quote regex"));

/// Web-grounded answer with the sources the model cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub text: String,
    pub sources: Vec<Citation>,
}

/// Split an image argument into (mime type, base64 payload).
///
/// Accepts either a `data:<mime>;base64,<payload>` URL or a bare payload.
/// A bare payload takes `default_mime`.
fn split_image<'a>(image: &'a str, default_mime: &'a str) -> (&'a str, &'a str) {
    let Some((header, payload)) = image.split_once(',') else {
        return (default_mime, image);
    };
    if payload.is_empty() {
        return (default_mime, image);
    }

    let mime = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|m| !m.is_empty())
        .unwrap_or(default_mime);
    (mime, payload)
}

pub struct FarmAdvisor<T: AiTransport> {
    transport: Arc<T>,
    config: AdvisorConfig,
}

impl<T: AiTransport> FarmAdvisor<T> {
    pub fn new(transport: Arc<T>, config: AdvisorConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// A fresh chat session bound to the farming instruction and chat model.
    pub fn chat_session(&self) -> ConversationSession<T> {
        ConversationSession::create(
            Arc::clone(&self.transport),
            ChatSetup {
                model: self.config.chat_model.clone(),
                system_instruction: prompts::FARMING_SYSTEM_INSTRUCTION.to_string(),
            },
        )
    }

    async fn call(
        &self,
        operation: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, AdvisorError> {
        debug!(operation, model = %request.model, "Advisor request");
        self.transport.generate(&request).await.map_err(|e| {
            warn!(operation, error = %e, "Advisor transport failed");
            AdvisorError::Transport(e)
        })
    }

    async fn call_text(
        &self,
        operation: &str,
        request: GenerateRequest,
    ) -> Result<String, AdvisorError> {
        let response = self.call(operation, request).await?;
        response
            .non_empty_text()
            .map(str::to_string)
            .ok_or(AdvisorError::EmptyResponse)
    }

    // =========================================================================
    // Image analysis
    // =========================================================================

    /// Diagnose a crop problem from a photo and a short description.
    ///
    /// `image` may be a data URL or bare base64; `mime_type` describes it.
    pub async fn diagnose(
        &self,
        prompt: &str,
        image: &str,
        mime_type: &str,
        language: Language,
    ) -> Result<String, AdvisorError> {
        let (_, payload) = split_image(image, mime_type);
        let request = GenerateRequest::new(&self.config.vision_model)
            .system_instruction(prompts::FARMING_SYSTEM_INSTRUCTION)
            .image(mime_type, payload)
            .text(prompts::localize(prompt, language))
            .temperature(self.config.diagnosis_temperature);
        self.call_text("diagnose", request).await
    }

    /// Identify soil type and suitable crops from a photo.
    pub async fn analyze_soil(
        &self,
        image: &str,
        language: Language,
    ) -> Result<String, AdvisorError> {
        let (mime, payload) = split_image(image, DEFAULT_IMAGE_MIME);
        let request = GenerateRequest::new(&self.config.vision_model)
            .image(mime, payload)
            .text(prompts::localize(&prompts::soil_prompt(), language))
            .temperature(self.config.diagnosis_temperature);
        self.call_text("analyze_soil", request).await
    }

    // =========================================================================
    // Text advice
    // =========================================================================

    /// Short advice from the low-latency model.
    pub async fn fast_advice(
        &self,
        prompt: &str,
        language: Language,
    ) -> Result<String, AdvisorError> {
        let request = GenerateRequest::new(&self.config.fast_model)
            .system_instruction(prompts::FARMING_SYSTEM_INSTRUCTION)
            .text(prompts::localize(prompt, language))
            .temperature(self.config.advice_temperature);
        self.call_text("fast_advice", request).await
    }

    /// Weather-based suggestions. Invalid input never reaches the model.
    pub async fn weather_advice(
        &self,
        form: &WeatherForm,
        language: Language,
    ) -> Result<String, AdvisorError> {
        form.validate()?;
        self.fast_advice(&prompts::weather_prompt(form), language).await
    }

    /// Money management advice. Invalid input never reaches the model.
    pub async fn finance_advice(
        &self,
        form: &FinanceForm,
        language: Language,
    ) -> Result<String, AdvisorError> {
        form.validate()?;
        self.fast_advice(&prompts::finance_prompt(form), language).await
    }

    /// Daily tip and market pulse.
    ///
    /// The reply is split on `|||`; a missing or blank part takes its default,
    /// so an empty reply still yields both defaults. Only a transport failure
    /// is an error.
    pub async fn dashboard_insights(
        &self,
        language: Language,
    ) -> Result<DashboardInsights, AdvisorError> {
        let request = GenerateRequest::new(&self.config.fast_model)
            .text(prompts::localize(&prompts::dashboard_prompt(), language))
            .temperature(self.config.insight_temperature);
        let response = self.call("dashboard_insights", request).await?;

        let text = response.text.unwrap_or_default();
        let mut parts = text.split(INSIGHT_SEPARATOR).map(str::trim);
        let pick = |part: Option<&str>, default: &str| {
            part.filter(|p| !p.is_empty())
                .map_or_else(|| default.to_string(), str::to_string)
        };

        Ok(DashboardInsights {
            tip: pick(parts.next(), DEFAULT_TIP),
            market: pick(parts.next(), DEFAULT_MARKET),
        })
    }

    // =========================================================================
    // Web-grounded search
    // =========================================================================

    async fn search(
        &self,
        operation: &str,
        request: GenerateRequest,
    ) -> Result<SearchResult, AdvisorError> {
        let response = self.call(operation, request).await?;
        let text = response
            .non_empty_text()
            .ok_or(AdvisorError::EmptyResponse)?
            .to_string();
        let sources = extract_citations(response.grounding.as_ref());
        debug!(operation, sources = sources.len(), "Search answered");
        Ok(SearchResult { text, sources })
    }

    /// Find buyers, platforms and price trends for `query`.
    pub async fn market_search(
        &self,
        query: &str,
        language: Language,
    ) -> Result<SearchResult, AdvisorError> {
        let request = GenerateRequest::new(&self.config.search_model)
            .system_instruction(prompts::market_search_instruction(language))
            .text(prompts::market_search_prompt(query, language))
            .web_search();
        self.search("market_search", request).await
    }

    /// Latest official mandi rate for `crop` near `market`.
    pub async fn gov_market_rate(
        &self,
        crop: &str,
        market: &str,
        language: Language,
    ) -> Result<SearchResult, AdvisorError> {
        let request = GenerateRequest::new(&self.config.search_model)
            .system_instruction(prompts::GOV_RATE_INSTRUCTION)
            .text(prompts::localize(&prompts::gov_rate_prompt(crop, market), language))
            .web_search();
        self.search("gov_market_rate", request).await
    }

    // =========================================================================
    // Marketplace and community
    // =========================================================================

    /// A short marketing line for a listing, with quote characters removed.
    pub async fn optimize_listing(
        &self,
        form: &ListingForm,
        language: Language,
    ) -> Result<String, AdvisorError> {
        form.validate()?;
        let prompt = prompts::listing_prompt(
            form.kind,
            &form.crop,
            &form.quantity,
            &form.price,
            &form.location,
        );
        let request = GenerateRequest::new(&self.config.fast_model)
            .text(prompts::localize(&prompt, language))
            .temperature(self.config.listing_temperature);

        let response = self.call("optimize_listing", request).await?;
        let text = response.text.unwrap_or_default();
        let cleaned = QUOTES_RE.replace_all(text.trim(), "");
        if cleaned.is_empty() {
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(cleaned.into_owned())
    }

    /// Government schemes relevant to `location`.
    ///
    /// Any failure, including a reply that is not a JSON array of schemes,
    /// is an error; callers show an empty list via
    /// [`crate::presentation::list_or_empty`].
    pub async fn government_schemes(
        &self,
        location: &str,
        language: Language,
    ) -> Result<Vec<Scheme>, AdvisorError> {
        let request = GenerateRequest::new(&self.config.vision_model)
            .text(prompts::localize(&prompts::schemes_prompt(location), language))
            .temperature(self.config.advice_temperature)
            .json_array(json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "benefit": { "type": "string" }
                }
            }));
        let response = self.call("government_schemes", request).await?;
        decode_array(response.text.as_deref())
    }

    /// Two or three topic tags for a community post.
    pub async fn post_tags(&self, content: &str) -> Result<Vec<String>, AdvisorError> {
        crate::validation::validate_post(content)?;
        let request = GenerateRequest::new(&self.config.fast_model)
            .text(prompts::post_tags_prompt(content))
            .json_array(json!({ "type": "string" }));
        let response = self.call("post_tags", request).await?;
        decode_array(response.text.as_deref())
    }

    // =========================================================================
    // Planning
    // =========================================================================

    /// Stage-by-stage calendar from sowing to harvest.
    pub async fn crop_calendar(
        &self,
        form: &CalendarForm,
        language: Language,
    ) -> Result<String, AdvisorError> {
        form.validate()?;
        let request = GenerateRequest::new(&self.config.fast_model)
            .text(prompts::localize(
                &prompts::calendar_prompt(form.crop.trim(), form.sowing_date.trim()),
                language,
            ))
            .temperature(self.config.diagnosis_temperature);
        self.call_text("crop_calendar", request).await
    }

    /// Urea, DAP and MOP dosage for a field.
    pub async fn fertilizer_plan(
        &self,
        form: &FertilizerForm,
        language: Language,
    ) -> Result<String, AdvisorError> {
        form.validate()?;
        let request = GenerateRequest::new(&self.config.fast_model)
            .text(prompts::localize(
                &prompts::fertilizer_prompt(form.crop.trim(), form.land_size.trim(), &form.days),
                language,
            ))
            .temperature(self.config.advice_temperature);
        self.call_text("fertilizer_plan", request).await
    }
}

/// Decode a schema-constrained reply. A missing reply reads as `[]`.
fn decode_array<T>(text: Option<&str>) -> Result<Vec<T>, AdvisorError>
where
    T: serde::de::DeserializeOwned,
{
    let text = text.filter(|t| !t.trim().is_empty()).unwrap_or("[]");
    serde_json::from_str(text).map_err(|e| {
        warn!(error = %e, "Model reply is not the requested JSON array");
        AdvisorError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::{GroundingChunk, GroundingMetadata, WebSource};
    use crate::presentation::{list_or_empty, listing_fallback, offline_insights, Operation};
    use crate::transport::{MockTransport, Part, ResponseFormat, TransportError};
    use kisan_core::types::ListingKind;

    fn advisor() -> (MockTransport, FarmAdvisor<MockTransport>) {
        let mock = MockTransport::new();
        let advisor = FarmAdvisor::new(Arc::new(mock.clone()), AdvisorConfig::default());
        (mock, advisor)
    }

    fn network_down() -> TransportError {
        TransportError::Network("offline".to_string())
    }

    fn listing_form(kind: ListingKind) -> ListingForm {
        ListingForm {
            kind,
            crop: "Onion".to_string(),
            quantity: "10 Quintal".to_string(),
            price: "₹1800/Q".to_string(),
            location: "Nashik".to_string(),
        }
    }

    // ---- image helpers ----

    #[test]
    fn test_split_image_data_url() {
        assert_eq!(
            split_image("data:image/png;base64,iVBORw0", "image/jpeg"),
            ("image/png", "iVBORw0")
        );
    }

    #[test]
    fn test_split_image_bare_payload() {
        assert_eq!(split_image("iVBORw0", "image/jpeg"), ("image/jpeg", "iVBORw0"));
        assert_eq!(split_image("abc,", "image/jpeg"), ("image/jpeg", "abc,"));
    }

    // ---- diagnose / soil ----

    #[tokio::test]
    async fn test_diagnose_sends_stripped_image_and_directive() {
        let (mock, advisor) = advisor();
        mock.push_text("TITLE: Leaf Rust");

        let text = advisor
            .diagnose("Yellow spots on wheat", "data:image/png;base64,QUJD", "image/png", Language::Hi)
            .await
            .unwrap();
        assert_eq!(text, "TITLE: Leaf Rust");

        let requests = mock.requests();
        let req = &requests[0];
        assert_eq!(req.model, "gemini-2.5-flash");
        assert_eq!(req.temperature, Some(0.4));
        assert!(req.system_instruction.is_some());
        assert_eq!(
            req.parts[0],
            Part::InlineImage {
                mime_type: "image/png".to_string(),
                data: "QUJD".to_string()
            }
        );
        assert!(req
            .prompt_text()
            .ends_with("(IMPORTANT: Reply strictly in Hindi language/script)"));
    }

    #[tokio::test]
    async fn test_diagnose_empty_and_failure() {
        let (mock, advisor) = advisor();
        mock.push_text("").push_error(network_down());

        let err = advisor.diagnose("p", "QUJD", "image/jpeg", Language::En).await.unwrap_err();
        assert_eq!(
            Operation::Diagnose.describe(&err),
            "Unable to diagnose. Please try again with a clearer photo."
        );
        let err = advisor.diagnose("p", "QUJD", "image/jpeg", Language::En).await.unwrap_err();
        assert_eq!(
            Operation::Diagnose.describe(&err),
            "Error connecting to the diagnosis service."
        );
    }

    #[tokio::test]
    async fn test_analyze_soil_uses_data_url_mime() {
        let (mock, advisor) = advisor();
        mock.push_text("TITLE: Soil Analysis");
        advisor
            .analyze_soil("data:image/webp;base64,AAAA", Language::En)
            .await
            .unwrap();

        let requests = mock.requests();
        let req = &requests[0];
        assert!(req.system_instruction.is_none());
        assert!(matches!(&req.parts[0], Part::InlineImage { mime_type, .. } if mime_type == "image/webp"));
    }

    // ---- text advice ----

    #[tokio::test]
    async fn test_fast_advice_uses_fast_model() {
        let (mock, advisor) = advisor();
        mock.push_text("Irrigate in the evening.");
        let text = advisor.fast_advice("Hot week ahead", Language::En).await.unwrap();
        assert_eq!(text, "Irrigate in the evening.");

        let requests = mock.requests();
        let req = &requests[0];
        assert_eq!(req.model, "gemini-2.5-flash-lite");
        assert_eq!(req.temperature, Some(0.3));
    }

    #[tokio::test]
    async fn test_invalid_weather_form_never_reaches_transport() {
        let (mock, advisor) = advisor();
        let form = WeatherForm {
            temp: "75".to_string(),
            humidity: "40".to_string(),
            rainfall: String::new(),
            crop: "Rice".to_string(),
        };
        let err = advisor.weather_advice(&form, Language::En).await.unwrap_err();
        match err {
            AdvisorError::Validation(errors) => {
                assert_eq!(errors.get("temp"), Some("Range: -10°C to 60°C"))
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_finance_advice_prompt() {
        let (mock, advisor) = advisor();
        mock.push_text("TITLE: Healthy");
        let form = FinanceForm {
            income: "50000".to_string(),
            expense: "30000".to_string(),
            trend: crate::validation::Trend::Profit,
        };
        advisor.finance_advice(&form, Language::Mr).await.unwrap();
        let prompt = mock.requests()[0].prompt_text();
        assert!(prompt.contains("₹50000"));
        assert!(prompt.contains("Marathi"));
    }

    // ---- dashboard ----

    #[tokio::test]
    async fn test_dashboard_insights_split() {
        let (mock, advisor) = advisor();
        mock.push_text(" Mulch to save water. ||| Tomato prices are up. ");
        let insights = advisor.dashboard_insights(Language::En).await.unwrap();
        assert_eq!(insights.tip, "Mulch to save water.");
        assert_eq!(insights.market, "Tomato prices are up.");
        assert_eq!(mock.requests()[0].temperature, Some(0.5));
    }

    #[tokio::test]
    async fn test_dashboard_insights_partial_defaults() {
        let (mock, advisor) = advisor();
        mock.push_text("Only a tip").push_text("").push_text("|||");

        let insights = advisor.dashboard_insights(Language::En).await.unwrap();
        assert_eq!(insights.tip, "Only a tip");
        assert_eq!(insights.market, DEFAULT_MARKET);

        let insights = advisor.dashboard_insights(Language::En).await.unwrap();
        assert_eq!(insights.tip, DEFAULT_TIP);
        assert_eq!(insights.market, DEFAULT_MARKET);

        let insights = advisor.dashboard_insights(Language::En).await.unwrap();
        assert_eq!(insights.tip, DEFAULT_TIP);
    }

    #[tokio::test]
    async fn test_dashboard_insights_failure() {
        let (mock, advisor) = advisor();
        mock.push_error(network_down());
        let insights = advisor
            .dashboard_insights(Language::En)
            .await
            .unwrap_or_else(|_| offline_insights());
        assert_eq!(insights.tip, "Water your crops early in the morning.");
    }

    // ---- search ----

    #[tokio::test]
    async fn test_market_search_with_citations() {
        let (mock, advisor) = advisor();
        let web = |uri: &str, title: &str| GroundingChunk {
            web: Some(WebSource {
                uri: uri.to_string(),
                title: title.to_string(),
            }),
        };
        mock.push_response(
            GenerateResponse::from_text("eNAM lists 12 buyers.").with_grounding(GroundingMetadata {
                grounding_chunks: vec![
                    web("https://enam.gov.in", "eNAM"),
                    GroundingChunk::default(),
                    web("https://enam.gov.in", "eNAM"),
                ],
            }),
        );

        let result = advisor.market_search("turmeric", Language::En).await.unwrap();
        assert_eq!(result.text, "eNAM lists 12 buyers.");
        assert_eq!(result.sources.len(), 2);

        let requests = mock.requests();
        let req = &requests[0];
        assert!(req.web_search);
        assert!(req.prompt_text().contains("turmeric"));
    }

    #[tokio::test]
    async fn test_gov_market_rate_empty_and_failure() {
        let (mock, advisor) = advisor();
        mock.push_response(GenerateResponse::default()).push_error(network_down());

        let err = advisor.gov_market_rate("Soybean", "Indore", Language::En).await.unwrap_err();
        assert_eq!(Operation::GovMarketRate.describe(&err), "Rate data not found.");
        let err = advisor.gov_market_rate("Soybean", "Indore", Language::En).await.unwrap_err();
        assert_eq!(
            Operation::GovMarketRate.describe(&err),
            "Could not fetch government data right now."
        );
    }

    // ---- listing ----

    #[tokio::test]
    async fn test_optimize_listing_strips_quotes() {
        let (mock, advisor) = advisor();
        mock.push_text("  \"Fresh 'Nashik' red onions, direct from farm!\"  ");
        let text = advisor
            .optimize_listing(&listing_form(ListingKind::Sell), Language::En)
            .await
            .unwrap();
        assert_eq!(text, "Fresh Nashik red onions, direct from farm!");
        assert_eq!(mock.requests()[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_optimize_listing_fallbacks() {
        let (mock, advisor) = advisor();
        mock.push_text("\"\"").push_error(network_down());

        let form = listing_form(ListingKind::Buy);
        let err = advisor.optimize_listing(&form, Language::En).await.unwrap_err();
        assert_eq!(
            listing_fallback(form.kind, &form.crop, &form.location, &err),
            "Need Onion in Nashik."
        );
        let err = advisor.optimize_listing(&form, Language::En).await.unwrap_err();
        assert_eq!(
            listing_fallback(form.kind, &form.crop, &form.location, &err),
            "Onion available in Nashik."
        );
    }

    // ---- schema-constrained ----

    #[tokio::test]
    async fn test_government_schemes_decode() {
        let (mock, advisor) = advisor();
        mock.push_text(r#"[{"name":"PM-Kisan","benefit":"₹6000 per year"},{"name":"PMFBY"}]"#);
        let schemes = advisor.government_schemes("Bihar", Language::En).await.unwrap();
        assert_eq!(schemes.len(), 2);
        assert_eq!(schemes[0].name, "PM-Kisan");
        assert!(schemes[1].benefit.is_empty());

        let requests = mock.requests();
        let req = &requests[0];
        assert!(matches!(req.response_format, ResponseFormat::JsonArray(_)));
    }

    #[tokio::test]
    async fn test_schema_decode_failure_yields_empty() {
        let (mock, advisor) = advisor();
        mock.push_text("Here are some schemes: PM-Kisan")
            .push_error(network_down())
            .push_text("not json");

        let schemes = list_or_empty(advisor.government_schemes("Bihar", Language::En).await);
        assert!(schemes.is_empty());
        let schemes = list_or_empty(advisor.government_schemes("Bihar", Language::En).await);
        assert!(schemes.is_empty());

        let err = advisor.post_tags("Aphids on mustard").await.unwrap_err();
        assert!(matches!(err, AdvisorError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_schema_reply_is_empty_list() {
        let (mock, advisor) = advisor();
        mock.push_response(GenerateResponse::default());
        let tags = advisor.post_tags("Rain today").await.unwrap();
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_post_tags() {
        let (mock, advisor) = advisor();
        mock.push_text(r#"["Mustard","Pest Control"]"#);
        let tags = advisor.post_tags("Aphids on mustard").await.unwrap();
        assert_eq!(tags, vec!["Mustard", "Pest Control"]);
    }

    // ---- planning ----

    #[tokio::test]
    async fn test_crop_calendar() {
        let (mock, advisor) = advisor();
        mock.push_text("TITLE: Calendar for Rice");
        let form = CalendarForm {
            crop: "Rice".to_string(),
            sowing_date: "2026-06-20".to_string(),
        };
        let text = advisor.crop_calendar(&form, Language::Te).await.unwrap();
        assert_eq!(text, "TITLE: Calendar for Rice");
        assert!(mock.requests()[0].prompt_text().contains("sown on 2026-06-20"));
    }

    #[tokio::test]
    async fn test_fertilizer_plan_validation_and_fallbacks() {
        let (mock, advisor) = advisor();
        let bad = FertilizerForm {
            crop: "Maize".to_string(),
            land_size: "900".to_string(),
            days: String::new(),
        };
        let err = advisor.fertilizer_plan(&bad, Language::En).await.unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
        assert!(mock.requests().is_empty());

        mock.push_text("").push_error(network_down());
        let good = FertilizerForm {
            land_size: "2".to_string(),
            ..bad
        };
        let err = advisor.fertilizer_plan(&good, Language::En).await.unwrap_err();
        assert_eq!(Operation::FertilizerPlan.describe(&err), "Calculation failed.");
        let err = advisor.fertilizer_plan(&good, Language::En).await.unwrap_err();
        assert_eq!(
            Operation::FertilizerPlan.describe(&err),
            "Could not calculate fertilizer dosage."
        );
    }

    // ---- chat ----

    #[tokio::test]
    async fn test_chat_session_uses_chat_model() {
        let (mock, advisor) = advisor();
        mock.push_text("Namaste!");
        let mut session = advisor.chat_session();
        session.send_message("Hello", Language::En).await.unwrap();

        let setup = mock.last_chat_setup().unwrap();
        assert_eq!(setup.model, "gemini-3-pro-preview");
        assert_eq!(setup.system_instruction, prompts::FARMING_SYSTEM_INSTRUCTION);
    }
}
