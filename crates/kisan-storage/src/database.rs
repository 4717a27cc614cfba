//! The application's document database: three named collections sharing one
//! key-value substrate.

use std::sync::Arc;

use tracing::info;

use kisan_core::error::Result;
use kisan_core::types::{CommunityPost, MarketListing};

use crate::auth::Account;
use crate::collection::Collection;
use crate::kv::KeyValueStore;
use crate::seed::{seed_listings, seed_posts};

/// Substrate key of the registered accounts.
pub const USERS_KEY: &str = "kisan_users_db";
/// Substrate key of the marketplace listings.
pub const LISTINGS_KEY: &str = "kisan_listings_db";
/// Substrate key of the community posts.
pub const POSTS_KEY: &str = "kisan_posts_db";
/// Substrate key of the signed-in user, stored without a password.
pub const CURRENT_USER_KEY: &str = "kisan_current_user_session";

pub struct KisanDb<S: KeyValueStore + ?Sized> {
    pub users: Collection<Account, S>,
    pub listings: Collection<MarketListing, S>,
    pub posts: Collection<CommunityPost, S>,
    store: Arc<S>,
}

impl<S: KeyValueStore + ?Sized> KisanDb<S> {
    /// Declare the collections without touching the substrate.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            users: Collection::new(USERS_KEY, Arc::clone(&store)),
            listings: Collection::new(LISTINGS_KEY, Arc::clone(&store)),
            posts: Collection::new(POSTS_KEY, Arc::clone(&store)),
            store,
        }
    }

    /// Declare the collections and seed any that are empty.
    pub fn open(store: Arc<S>) -> Result<Self> {
        let db = Self::new(store);
        db.seed()?;
        Ok(db)
    }

    /// Insert the fixed listings and posts into empty collections.
    ///
    /// Returns `(listings, posts)` inserted; both are zero on a store that
    /// already has content.
    pub fn seed(&self) -> Result<(usize, usize)> {
        let listings = self.listings.seed(seed_listings())?;
        let posts = self.posts.seed(seed_posts())?;
        if listings + posts > 0 {
            info!(listings, posts, "Seeded empty database");
        }
        Ok((listings, posts))
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: KeyValueStore + ?Sized> Clone for KisanDb<S> {
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            listings: self.listings.clone(),
            posts: self.posts.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Query;
    use crate::db::SqliteStore;
    use crate::kv::MemoryStore;
    use kisan_core::types::ListingKind;

    #[test]
    fn test_new_does_not_seed() {
        let db = KisanDb::new(Arc::new(MemoryStore::new()));
        assert!(db.listings.is_empty().unwrap());
        assert!(db.posts.is_empty().unwrap());
    }

    #[test]
    fn test_open_seeds_in_reverse_declared_order() {
        let db = KisanDb::open(Arc::new(MemoryStore::new())).unwrap();

        let listing_ids: Vec<_> = db
            .listings
            .find(&Query::new())
            .unwrap()
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(listing_ids, vec!["6", "5", "4", "3", "2", "1"]);

        let post_ids: Vec<_> = db
            .posts
            .find(&Query::new())
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(post_ids, vec!["103", "102", "101"]);
        assert!(db.users.is_empty().unwrap());
    }

    #[test]
    fn test_reseeding_is_a_noop() {
        let db = KisanDb::open(Arc::new(MemoryStore::new())).unwrap();
        assert_eq!(db.seed().unwrap(), (0, 0));
        assert_eq!(db.listings.find(&Query::new()).unwrap().len(), 6);
    }

    #[test]
    fn test_seed_skips_only_non_empty_collections() {
        let store = Arc::new(MemoryStore::new());
        let db = KisanDb::new(Arc::clone(&store));
        db.posts.seed(seed_posts()).unwrap();
        assert_eq!(db.seed().unwrap(), (6, 0));
    }

    #[test]
    fn test_find_listings_by_kind() {
        let db = KisanDb::open(Arc::new(MemoryStore::new())).unwrap();
        let rentals = db
            .listings
            .find(&Query::new().eq("type", ListingKind::Rent.as_str()))
            .unwrap();
        assert_eq!(rentals.len(), 2);
        assert!(rentals.iter().all(|l| l.kind == ListingKind::Rent));
    }

    #[test]
    fn test_sqlite_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kisan.db");

        {
            let db = KisanDb::open(Arc::new(SqliteStore::open(&path).unwrap())).unwrap();
            let mut listing = seed_listings().remove(1);
            listing.id = String::new();
            listing.crop = "Groundnut".to_string();
            db.listings.insert_one(listing).unwrap();
        }

        let db = KisanDb::open(Arc::new(SqliteStore::open(&path).unwrap())).unwrap();
        let listings = db.listings.find(&Query::new()).unwrap();
        assert_eq!(listings.len(), 7);
        assert_eq!(listings[0].crop, "Groundnut");
    }

    #[test]
    fn test_schema_mismatch_keeps_valid_posts_on_reopen_and_insert() {
        let store = Arc::new(MemoryStore::new());
        let mut posts: Vec<serde_json::Value> = seed_posts()
            .into_iter()
            .map(|p| serde_json::to_value(p).unwrap())
            .collect();
        posts[2].as_object_mut().unwrap().remove("likes");
        store
            .set(POSTS_KEY, &serde_json::to_string(&posts).unwrap())
            .unwrap();

        let db = KisanDb::open(Arc::clone(&store)).unwrap();
        assert_eq!(db.posts.find(&Query::new()).unwrap().len(), 2);

        let mut post = seed_posts().remove(0);
        post.id = String::new();
        post.content = "New question".to_string();
        db.posts.insert_one(post).unwrap();

        let found = db.posts.find(&Query::new()).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].content, "New question");
        assert!(found.iter().any(|p| p.id == "101"));

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&store.get(POSTS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw.len(), 4);
    }

    #[test]
    fn test_dyn_store_is_supported() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let db = KisanDb::open(store).unwrap();
        assert!(!db.listings.is_empty().unwrap());
        assert!(db.store().get(LISTINGS_KEY).unwrap().is_some());
    }
}
