//! Typed document collections over a [`KeyValueStore`].
//!
//! A collection is one key in the substrate holding a JSON array of
//! documents, most recent first. Every operation reads the whole array and
//! every write rewrites it in a single `set`. This keeps read-your-own-write
//! semantics trivial for the small cardinalities involved (tens to low
//! hundreds of records).
//!
//! Concurrent writers are not coordinated: two overlapping `insert_one`
//! calls may both read the same snapshot, and the later write wins.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use kisan_core::error::Result;
use kisan_core::types::{CommunityPost, MarketListing};

use crate::kv::KeyValueStore;

// =============================================================================
// Document
// =============================================================================

/// A record that can live in a [`Collection`].
///
/// The identifier is optional on the way in; the collection assigns one on
/// insert, so every document read back has a non-empty id.
pub trait Document: Serialize + DeserializeOwned + Clone {
    /// The identifier, or `None` if unset. Empty strings count as unset.
    fn id(&self) -> Option<&str>;

    /// Replace the identifier.
    fn set_id(&mut self, id: String);
}

impl Document for MarketListing {
    fn id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Document for CommunityPost {
    fn id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

// =============================================================================
// Query
// =============================================================================

/// Field-equality filter over a document's JSON form.
///
/// All listed fields must match (AND). A field missing from the document is a
/// non-match for that filter. Values compare by exact JSON equality; there is
/// no substring, range or case-insensitive matching. An empty query matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: BTreeMap<String, Value>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` exactly.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Test a document's JSON object against every filter.
    pub fn matches(&self, doc: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

// =============================================================================
// Identifier assignment
// =============================================================================

static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Millisecond-clock identifier.
///
/// Non-decreasing within the process, but two inserts inside the same
/// millisecond receive the same id, and ids from separate processes can
/// collide.
fn next_time_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_ID_MILLIS.fetch_max(now, Ordering::SeqCst);
    previous.max(now).to_string()
}

// =============================================================================
// Collection
// =============================================================================

/// A named, fully-materialized sequence of documents of type `T`.
pub struct Collection<T, S: ?Sized> {
    name: String,
    store: Arc<S>,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S: ?Sized> Clone for Collection<T, S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T, S> Collection<T, S>
where
    T: Document,
    S: KeyValueStore + ?Sized,
{
    /// Declare a collection stored under `name`. Nothing is written until the
    /// first insert.
    pub fn new(name: impl Into<String>, store: Arc<S>) -> Self {
        Self {
            name: name.into(),
            store,
            _marker: PhantomData,
        }
    }

    /// Substrate key holding this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every document matching `query`, in stored order.
    pub fn find(&self, query: &Query) -> Result<Vec<T>> {
        let docs = self.load()?;
        if query.is_empty() {
            return Ok(docs);
        }

        let mut matched = Vec::new();
        for doc in docs {
            let value = serde_json::to_value(&doc)?;
            if query.matches(&value) {
                matched.push(doc);
            }
        }
        Ok(matched)
    }

    /// The first document matching `query`, or `None`.
    pub fn find_one(&self, query: &Query) -> Result<Option<T>> {
        Ok(self.find(query)?.into_iter().next())
    }

    /// Prepend `doc`, assigning a time-derived id if it has none, and write
    /// the whole collection back. Returns the stored document.
    ///
    /// Stored records that no longer decode as `T` are written back
    /// untouched.
    pub fn insert_one(&self, mut doc: T) -> Result<T> {
        let mut docs = self.load_raw()?;
        if doc.id().is_none() {
            doc.set_id(next_time_id());
        }

        docs.insert(0, serde_json::to_value(&doc)?);
        self.save(&docs)?;

        debug!(
            collection = %self.name,
            id = doc.id().unwrap_or_default(),
            total = docs.len(),
            "Document inserted"
        );
        Ok(doc)
    }

    /// True iff the stored sequence has no elements, readable or not.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.load_raw()?.is_empty())
    }

    /// Insert `seed` one document at a time if the collection is empty.
    ///
    /// Because inserts prepend, the stored order is the reverse of the
    /// declared order. Returns the number of documents inserted, which is
    /// zero when the collection already had content.
    pub fn seed(&self, seed: impl IntoIterator<Item = T>) -> Result<usize> {
        if !self.is_empty()? {
            return Ok(0);
        }

        let mut inserted = 0;
        for doc in seed {
            self.insert_one(doc)?;
            inserted += 1;
        }
        info!(collection = %self.name, count = inserted, "Seeded collection");
        Ok(inserted)
    }

    /// Read the whole collection, skipping records that do not decode.
    fn load(&self) -> Result<Vec<T>> {
        let mut docs = Vec::new();
        for (index, value) in self.load_raw()?.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(doc) => docs.push(doc),
                Err(e) => warn!(
                    collection = %self.name,
                    index,
                    error = %e,
                    "Skipping unreadable stored record"
                ),
            }
        }
        Ok(docs)
    }

    /// Read the stored array as raw JSON. Content that is not a JSON array
    /// reads as empty.
    fn load_raw(&self) -> Result<Vec<Value>> {
        let Some(raw) = self.store.get(&self.name)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(
                    collection = %self.name,
                    error = %e,
                    "Stored collection is unreadable; treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, docs: &[Value]) -> Result<()> {
        let raw = serde_json::to_string(docs)?;
        self.store.set(&self.name, &raw)
    }
}
