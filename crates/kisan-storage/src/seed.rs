//! Fixed initial records for a freshly created store.

use kisan_core::types::{CommunityPost, ListingKind, MarketListing};

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    crop: &str,
    quantity: &str,
    price: &str,
    location: &str,
    description: &str,
    seller: &str,
    time: &str,
    kind: ListingKind,
) -> MarketListing {
    MarketListing {
        id: id.to_string(),
        crop: crop.to_string(),
        quantity: quantity.to_string(),
        price: price.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        seller: seller.to_string(),
        time: time.to_string(),
        kind,
        seed_type: None,
        fertilizer: None,
        harvest_date: None,
        equipment_brand: None,
        equipment_power: None,
    }
}

fn equipment(mut listing: MarketListing, brand: &str, power: &str) -> MarketListing {
    listing.equipment_brand = Some(brand.to_string());
    listing.equipment_power = Some(power.to_string());
    listing
}

/// Marketplace listings in declared order.
pub fn seed_listings() -> Vec<MarketListing> {
    let mut wheat = listing(
        "1",
        "Wheat (Sharbati)",
        "50 Quintal",
        "₹2200/Q",
        "Bhatinda, Punjab",
        "Premium Sharbati wheat, golden grains, harvested this week. Moisture content < 10%.",
        "Rajinder Singh",
        "2 hrs ago",
        ListingKind::Sell,
    );
    wheat.seed_type = Some("HD-2967".to_string());
    wheat.fertilizer = Some("DAP, Urea".to_string());

    vec![
        wheat,
        listing(
            "2",
            "Cotton",
            "20 Quintal",
            "₹6100/Q",
            "Rajkot, Gujarat",
            "Long staple cotton, clean picked. Direct from field. Ready for ginning.",
            "Patel Bros",
            "5 hrs ago",
            ListingKind::Sell,
        ),
        listing(
            "3",
            "Red Chilli",
            "500 Kg",
            "₹180/Kg",
            "Guntur, AP",
            "Spicy Guntur chilli, vibrant red color. Dried naturally under sun.",
            "Ramesh Kumar",
            "1 day ago",
            ListingKind::Sell,
        ),
        listing(
            "4",
            "Basmati Rice",
            "100 Quintal",
            "₹3500/Q",
            "Karnal, Haryana",
            "1121 Basmati Steam Rice. Best quality for export.",
            "Haryana Agro Traders",
            "Just now",
            ListingKind::Buy,
        ),
        equipment(
            listing(
                "5",
                "Mahindra 575 DI",
                "1 Unit",
                "₹800/hr",
                "Pune, MH",
                "Tractor available for ploughing and rotavator. Driver included.",
                "Suresh Farm Services",
                "1 hr ago",
                ListingKind::Rent,
            ),
            "Mahindra",
            "45 HP",
        ),
        equipment(
            listing(
                "6",
                "Drone Spraying",
                "5 Acres",
                "₹400/acre",
                "Indore, MP",
                "Agri-drone for pesticide spraying. Fast and efficient. Saves water.",
                "TechKisan Solutions",
                "3 hrs ago",
                ListingKind::Rent,
            ),
            "Garuda Aerospace",
            "Battery",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn post(
    id: &str,
    author: &str,
    location: &str,
    content: &str,
    time: &str,
    likes: u32,
    comments: u32,
    tags: &[&str],
) -> CommunityPost {
    CommunityPost {
        id: id.to_string(),
        author: author.to_string(),
        location: location.to_string(),
        content: content.to_string(),
        image: None,
        likes,
        comments,
        time: time.to_string(),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
    }
}

/// Community posts in declared order.
pub fn seed_posts() -> Vec<CommunityPost> {
    vec![
        post(
            "101",
            "Vikram Singh",
            "Punjab",
            "Used Nano Urea this season on my wheat crop. Seeing great results! Has anyone else tried it?",
            "2 hrs ago",
            15,
            4,
            &["Fertilizer", "Wheat", "Success"],
        ),
        post(
            "102",
            "Suresh Patel",
            "Gujarat",
            "Found these white spots on my cotton leaves. Is this fungal? Please help.",
            "5 hrs ago",
            8,
            12,
            &["Cotton", "Disease", "Help"],
        ),
        post(
            "103",
            "Anil Kumar",
            "Bihar",
            "Mandi prices for Maize are rising. Good time to sell brothers!",
            "1 day ago",
            42,
            10,
            &["Maize", "Market Price"],
        ),
    ]
}
