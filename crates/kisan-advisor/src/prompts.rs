//! Prompt text sent to the model.
//!
//! Freeform prompts end with [`language_directive`]; chat messages end with
//! the shorter [`chat_directive`]. Response-format markers in the templates
//! stay in English regardless of the reply language so the parser can find
//! them.

use kisan_core::types::{Language, ListingKind};

use crate::validation::{FinanceForm, WeatherForm};

/// Standing instruction for diagnosis, quick advice and chat.
pub const FARMING_SYSTEM_INSTRUCTION: &str = "\
You are the advice engine of a mobile assistant used by small farmers in India.
Farmers send photos, short forms or questions. Answer with short, practical
steps they can afford. Use plain words, no jargon, at most six lines per section.

Cover, as the request needs:
- Crop disease: disease name, simple cause, severity (Low/Medium/High), affordable
  action steps, rough cost. When unsure, give the most likely cause from typical
  field symptoms and say so.
- Weeds: name, harm, removal, prevention.
- Weather: above 32°C warn about heat stress and watering; below 18°C warn about
  slow growth; humidity above 80% suggests less nitrogen; low rainfall suggests
  irrigation.
- Mixed farming: simple Indian crop combinations with benefits and cost notes.
- Money: a short financial health summary with spending and saving tips.
- Selling: listing tips, realistic prices, negotiation help, reply templates.
- Market rates: why prices move, seasonal effects.

Assume a limited budget unless told otherwise. Stay respectful and encouraging.
If the prompt names a language, write the whole answer in that language and its
native script, but keep the section markers below in English.

Always answer in this shape:

TITLE: <topic or diagnosis>

SUMMARY:
- <point>
- <point>
- <point>

ADDITIONAL ADVICE:
- <point>
";

/// Suffix asking for a freeform reply in `language`.
pub fn language_directive(language: Language) -> String {
    format!(
        "\n\n(IMPORTANT: Reply strictly in {} language/script)",
        language.name()
    )
}

/// Suffix asking for a chat reply in `language`.
pub fn chat_directive(language: Language) -> String {
    format!("\n\n(Reply in {})", language.name())
}

/// `prompt` followed by the freeform language directive.
pub fn localize(prompt: &str, language: Language) -> String {
    format!("{}{}", prompt, language_directive(language))
}

pub fn soil_prompt() -> String {
    "\
Analyze this photo of soil and identify:
1. Soil texture (clay, loam, sandy, ...).
2. Color and likely moisture.
3. Crops that suit this soil in India.

Format:
TITLE: Soil Analysis
SUMMARY:
- Type: <soil type>
- Characteristics: <details>
- Best Crops: <list>"
        .to_string()
}

pub fn dashboard_prompt() -> String {
    "\
Write two short items for an Indian farmer's home screen:
1. One practical farming tip for today, a single sentence.
2. A one or two sentence market trend for major Indian crops.

Separate the two items with \"|||\". For example:
Rotate crops to improve soil health. ||| Wheat prices are steady, onion prices are rising after the rains."
        .to_string()
}

pub fn market_search_prompt(query: &str, language: Language) -> String {
    format!(
        "Find current B2B buyers, agricultural market platforms such as eNAM, or price \
         trends for {} in India. Name specific websites or companies where found. \
         Summarize the findings in {}.",
        query,
        language.name()
    )
}

pub fn market_search_instruction(language: Language) -> String {
    format!(
        "You help farmers do business. Look up live data about buyers and markets \
         and summarize it clearly for an Indian farmer in {}.",
        language.name()
    )
}

pub const GOV_RATE_INSTRUCTION: &str = "You fetch market data. Return short, accurate \
prices as published on government agriculture websites.";

pub fn gov_rate_prompt(crop: &str, market: &str) -> String {
    format!(
        "\
Find the latest official daily mandi rate for {crop} in {market} or nearby districts in India.
Prefer agmarknet.gov.in, enam.gov.in or data.gov.in.

Give a very short summary with:
1. Market name
2. Modal price per quintal
3. Date of the data"
    )
}

pub fn listing_prompt(
    kind: ListingKind,
    crop: &str,
    quantity: &str,
    price: &str,
    location: &str,
) -> String {
    let ask = match kind {
        ListingKind::Sell => format!(
            "Write a very short (under 20 words), attractive B2B marketplace description \
             for SELLING {crop}. Stress freshness, quality and that it comes straight from the farm."
        ),
        ListingKind::Rent => format!(
            "Write a very short (under 20 words), attractive ad to RENT OUT this farm \
             equipment: {crop}. Stress its condition and performance."
        ),
        ListingKind::Buy => format!(
            "Write a very short (under 20 words), urgent B2B marketplace request for \
             BUYING {crop}. Stress urgency, payment terms or bulk need."
        ),
    };

    format!(
        "\
You are an agricultural marketing expert.
{ask}
- Quantity/Capacity: {quantity}
- Price: {price}
- Location: {location}"
    )
}

pub fn schemes_prompt(location: &str) -> String {
    format!(
        "\
List 3 major Indian government agriculture schemes or subsidies relevant to a farmer in {location}.
Include PM-Kisan if it applies.
Return a JSON array of objects with \"name\" and \"benefit\" keys."
    )
}

pub fn calendar_prompt(crop: &str, sowing_date: &str) -> String {
    format!(
        "\
Create a simple crop calendar for {crop} sown on {sowing_date} in India.
Give 4 to 5 key stages (sowing, germination and irrigation, fertilizing, flowering, harvest).

Use exactly this format:
TITLE: Calendar for {crop}

SUMMARY:
- Stage 1 (Day 1-5): <action>
- Stage 2 (Day 15-20): <action>
- Stage 3 (Day 45): <action>
- Harvest (Day 90-100): <action>

ADDITIONAL ADVICE:
- <one key tip for this season>"
    )
}

pub fn fertilizer_prompt(crop: &str, acres: &str, days_since_sowing: &str) -> String {
    let stage = if days_since_sowing.trim().is_empty() {
        "not given".to_string()
    } else {
        format!("{} days after sowing", days_since_sowing.trim())
    };

    format!(
        "\
As an agronomist, calculate the fertilizer dose (Urea, DAP, MOP) for:
- Crop: {crop}
- Land size: {acres} acres
- Crop stage: {stage}

Give a practical schedule in bags (about 50 kg) or kg, with an estimated cost in rupees if possible.

Use exactly this format:
TITLE: Fertilizer Plan for {crop}

SUMMARY:
- Basal Dose: <amount>
- Top Dressing: <amount>
- Est. Cost: <amount>

ADDITIONAL ADVICE:
- <safety or efficiency tip>"
    )
}

pub fn post_tags_prompt(content: &str) -> String {
    format!(
        "\
Read this post from a farmer community: \"{content}\".
Return a JSON array of 2 or 3 short tags, for example [\"Wheat\", \"Pest Control\", \"Success\"]."
    )
}

pub fn weather_prompt(form: &WeatherForm) -> String {
    let crop = if form.crop.trim().is_empty() {
        "General"
    } else {
        form.crop.trim()
    };
    let rainfall = if form.rainfall.trim().is_empty() {
        "not given"
    } else {
        form.rainfall.trim()
    };

    format!(
        "\
WEATHER-BASED FARMING SUGGESTIONS:
- Temperature: {}°C
- Humidity: {}%
- Rainfall: {}
- Crop: {}",
        form.temp.trim(),
        form.humidity.trim(),
        rainfall,
        crop
    )
}

pub fn finance_prompt(form: &FinanceForm) -> String {
    format!(
        "\
MONEY MANAGEMENT ADVICE:
- Monthly/Seasonal income: ₹{}
- Expenses: ₹{}
- Farmer reports the trend as: {}

Give a financial health summary, spending tips and cost-saving ideas for a small Indian farmer.",
        form.income.trim(),
        form.expense.trim(),
        form.trend.as_str()
    )
}
