//! Command handlers behind the CLI.
//!
//! Each handler works on the shared [`KisanDb`] and [`AuthService`] and
//! returns the text to print, so the binary stays a thin dispatcher.

use kisan_advisor::parser::parse_response;
use kisan_advisor::validation::{validate_post, FieldErrors, ListingForm};
use kisan_advisor::AdvisorError;
use kisan_core::error::KisanError;
use kisan_core::types::{CommunityPost, ListingKind, MarketListing, User};
use kisan_storage::{AuthError, AuthService, KeyValueStore, KisanDb, Query};
use tracing::info;

use crate::render;

const DEFAULT_AUTHOR: &str = "Farmer";
const DEFAULT_POST_LOCATION: &str = "India";
const JUST_NOW: &str = "Just now";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] KisanError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid input: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Advisor(#[from] AdvisorError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Input for a new listing as typed on the command line.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub kind: ListingKind,
    pub crop: String,
    pub quantity: String,
    pub price: String,
    pub location: String,
    pub description: String,
}

pub struct Commands<S: KeyValueStore + ?Sized> {
    db: KisanDb<S>,
    auth: AuthService<S>,
}

impl<S: KeyValueStore + ?Sized> Commands<S> {
    pub fn new(db: KisanDb<S>, auth: AuthService<S>) -> Self {
        Self { db, auth }
    }

    pub fn db(&self) -> &KisanDb<S> {
        &self.db
    }

    /// Listings, most recent first, optionally narrowed by kind and crop.
    pub fn list_listings(&self, kind: Option<ListingKind>, crop: Option<&str>) -> Result<String> {
        let mut query = Query::new();
        if let Some(kind) = kind {
            query = query.eq("type", kind.as_str());
        }
        if let Some(crop) = crop {
            query = query.eq("crop", crop);
        }

        let listings = self.db.listings.find(&query)?;
        if listings.is_empty() {
            return Ok("No listings found.".to_string());
        }
        Ok(listings
            .iter()
            .map(render::render_listing)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Publish a listing under the signed-in user's name.
    pub fn add_listing(&self, input: NewListing) -> Result<MarketListing> {
        let form = ListingForm {
            kind: input.kind,
            crop: input.crop,
            quantity: input.quantity,
            price: input.price,
            location: input.location,
        };
        form.validate().map_err(AppError::Invalid)?;

        let seller = self
            .auth
            .current_user()?
            .map(|u| u.name)
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        let listing = self.db.listings.insert_one(MarketListing {
            id: String::new(),
            crop: form.crop,
            quantity: form.quantity,
            price: form.price,
            location: form.location,
            description: input.description,
            seller,
            time: JUST_NOW.to_string(),
            kind: form.kind,
            seed_type: None,
            fertilizer: None,
            harvest_date: None,
            equipment_brand: None,
            equipment_power: None,
        })?;
        info!(id = %listing.id, kind = listing.kind.as_str(), "Listing published");
        Ok(listing)
    }

    pub fn list_posts(&self) -> Result<String> {
        let posts = self.db.posts.find(&Query::new())?;
        if posts.is_empty() {
            return Ok("No posts yet.".to_string());
        }
        Ok(posts
            .iter()
            .map(render::render_post)
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    /// Publish a post. Author and location come from the signed-in user.
    pub fn add_post(&self, content: &str, tags: Vec<String>) -> Result<CommunityPost> {
        validate_post(content)?;

        let user = self.auth.current_user()?;
        let author = user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let location = user
            .and_then(|u| u.location)
            .unwrap_or_else(|| DEFAULT_POST_LOCATION.to_string());

        let post = self.db.posts.insert_one(CommunityPost {
            id: String::new(),
            author,
            location,
            content: content.trim().to_string(),
            image: None,
            likes: 0,
            comments: 0,
            time: JUST_NOW.to_string(),
            tags: Some(tags).filter(|t| !t.is_empty()),
        })?;
        info!(id = %post.id, "Post published");
        Ok(post)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        location: &str,
    ) -> Result<User> {
        Ok(self.auth.signup(name, email, password, location).await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        Ok(self.auth.login(email, password).await?)
    }

    pub fn logout(&self) -> Result<()> {
        Ok(self.auth.logout()?)
    }

    pub fn whoami(&self) -> Result<String> {
        Ok(match self.auth.current_user()? {
            Some(user) => render::render_user(&user),
            None => "Not signed in.".to_string(),
        })
    }

    pub async fn reset_password(&self, email: &str) -> Result<String> {
        self.auth.reset_password(email).await?;
        Ok(format!("Reset link sent to {}", email))
    }
}

/// Render a model reply as text, or as the parsed JSON structure.
pub fn render(text: &str, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&parse_response(text))?)
    } else {
        Ok(render::render_reply(text))
    }
}
