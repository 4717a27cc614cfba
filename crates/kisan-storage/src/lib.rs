//! Kisan Storage crate - document collections over a key-value substrate.
//!
//! Provides the `KeyValueStore` port with in-memory and SQLite-backed
//! implementations, typed `Collection`s with find/insert semantics, the
//! application's seed data, and the account/session service.

pub mod auth;
pub mod collection;
pub mod database;
pub mod db;
pub mod kv;
pub mod seed;

pub use auth::{Account, AuthError, AuthService};
pub use collection::{Collection, Document, Query};
pub use database::{KisanDb, CURRENT_USER_KEY, LISTINGS_KEY, POSTS_KEY, USERS_KEY};
pub use db::SqliteStore;
pub use kv::{KeyValueStore, MemoryStore};
