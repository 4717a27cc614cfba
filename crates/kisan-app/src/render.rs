//! Plain-text rendering for the terminal.

use kisan_advisor::parser::{parse_or_raw, ParsedOutput};
use kisan_core::types::{CommunityPost, ListingKind, MarketListing, User};

/// Render a model reply as a titled card, or verbatim when it has no
/// recognizable structure.
pub fn render_reply(text: &str) -> String {
    let parsed = match parse_or_raw(text) {
        ParsedOutput::Unstructured(raw) => return raw,
        ParsedOutput::Structured(parsed) => parsed,
    };

    let mut out = String::new();
    if !parsed.title.is_empty() {
        let underline = "=".repeat(parsed.title.chars().count());
        out.push_str(&format!("{}\n{}\n\n", parsed.title, underline));
    }

    out.push_str("Insights\n");
    for point in &parsed.summary {
        out.push_str(&format!("  • {}\n", point));
    }

    if !parsed.additional.is_empty() {
        out.push_str("\nTips\n");
        for point in &parsed.additional {
            out.push_str(&format!("  → {}\n", point));
        }
    }
    out
}

fn kind_label(kind: ListingKind) -> &'static str {
    match kind {
        ListingKind::Sell => "SELL",
        ListingKind::Buy => "BUY ",
        ListingKind::Rent => "RENT",
    }
}

pub fn render_listing(listing: &MarketListing) -> String {
    let mut out = format!(
        "[{}] #{} {} | {} @ {} | {} | by {} ({})",
        kind_label(listing.kind),
        listing.id,
        listing.crop,
        listing.quantity,
        listing.price,
        listing.location,
        listing.seller,
        listing.time,
    );
    if let (Some(brand), Some(power)) = (&listing.equipment_brand, &listing.equipment_power) {
        out.push_str(&format!(" | {} {}", brand, power));
    }
    if !listing.description.is_empty() {
        out.push_str("\n    ");
        out.push_str(&listing.description);
    }
    out
}

pub fn render_post(post: &CommunityPost) -> String {
    let mut out = format!(
        "#{} {} ({}) · {}\n    {}\n    ♥ {}  💬 {}",
        post.id, post.author, post.location, post.time, post.content, post.likes, post.comments
    );
    if let Some(tags) = post.tags.as_ref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("  #{}", tags.join(" #")));
    }
    out
}

pub fn render_user(user: &User) -> String {
    match &user.location {
        Some(location) => format!("{} <{}> from {}", user.name, user.email, location),
        None => format!("{} <{}>", user.name, user.email),
    }
}
