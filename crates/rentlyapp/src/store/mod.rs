//! # Storage Layer
//!
//! This module defines the data-access abstraction for rently. The
//! [`ListingStore`] trait is what the action layer and the API facade
//! program against; [`DocStore`](doc_store::DocStore) implements it
//! generically over a raw-I/O [`StorageBackend`](backend::StorageBackend).
//!
//! ## Collections
//!
//! Three document collections, mirrored one-to-one by the backends:
//!
//! ```text
//! <data dir>/
//! ├── properties.json    # listings, natural (insertion) order
//! ├── users.json         # accounts, including the favorites arrays
//! └── messages.json      # inquiries between users
//! ```
//!
//! ## Query shape
//!
//! Reads load a collection and filter/slice in the store: search predicates
//! ([`crate::query::PropertySearch`]) are applied per document, pagination
//! is skip/take with tiers from [`crate::pagination`], and the featured
//! fetch sorts newest-first before limiting.
//!
//! ## Transactions
//!
//! The one multi-document mutation (deleting a property and pulling it
//! from every user's favorites) goes through
//! [`StorageBackend::commit`](backend::StorageBackend::commit), which
//! applies all collections or none. There is no application-level locking
//! on top: store methods take `&self`/`&mut self`, so within a process the
//! borrow checker serializes writers.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files with atomic temp-file + rename writes.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O,
//!   with injectable write/commit failures.

use crate::error::Result;
use crate::model::{Message, Property, User};
use crate::query::PropertySearch;
use uuid::Uuid;

pub mod backend;
pub mod doc_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

/// What a cascade delete touched, for caller-facing reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CascadeReport {
    /// How many users had the property pulled from their favorites.
    pub favorites_pulled: usize,
}

/// Abstract interface for listing storage: the data-access layer.
///
/// Direct fetches (`get_*`) raise not-found; mutating methods that return a
/// modified count report `0` instead of failing so the action layer can
/// treat a stale-id no-op as a soft error.
pub trait ListingStore {
    // --- Properties ---

    /// Insert a listing, or replace it if the id already exists.
    fn save_property(&mut self, property: &Property) -> Result<()>;

    /// Replace an existing listing. Returns the number of documents
    /// modified: `0` when the id no longer exists.
    fn replace_property(&mut self, property: &Property) -> Result<u64>;

    fn get_property(&self, id: &Uuid) -> Result<Property>;

    /// All listings in natural order.
    fn list_properties(&self) -> Result<Vec<Property>>;

    fn properties_by_owner(&self, owner: &Uuid) -> Result<Vec<Property>>;

    /// Number of listings matching `query` (all listings when `None`).
    fn count_properties(&self, query: Option<&PropertySearch>) -> Result<u64>;

    /// Ceil-divided page count for the listing tier at `viewport_width`.
    /// Zero matches is zero pages.
    fn page_count(&self, query: Option<&PropertySearch>, viewport_width: i32) -> Result<u64>;

    /// One page of listings in natural order. Pages below 1 clamp to the
    /// first page.
    fn fetch_page(
        &self,
        page: i64,
        viewport_width: i32,
        query: Option<&PropertySearch>,
    ) -> Result<Vec<Property>>;

    /// Featured listings, newest first, limited to the featured tier.
    fn fetch_featured(&self, viewport_width: i32) -> Result<Vec<Property>>;

    /// Delete a listing and pull its id from every user's favorites, as one
    /// atomic commit. A failure leaves both collections untouched.
    fn delete_property_cascade(&mut self, id: &Uuid) -> Result<CascadeReport>;

    // --- Users ---

    /// Insert an account, or replace it if the id already exists.
    fn save_user(&mut self, user: &User) -> Result<()>;

    fn get_user(&self, id: &Uuid) -> Result<User>;

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Atomically add (`favorited = true`) or remove the property from the
    /// user's favorites. Returns the number of user documents actually
    /// changed: `0` when the user is gone or already in the desired state.
    fn apply_favorite(&mut self, user_id: &Uuid, property_id: &Uuid, favorited: bool)
        -> Result<u64>;

    /// Resolve the user's favorites list to full listings. An unknown user
    /// is an error, not an empty result.
    fn fetch_favorites(&self, user_id: &Uuid) -> Result<Vec<Property>>;

    // --- Messages ---

    fn save_message(&mut self, message: &Message) -> Result<()>;

    /// Replace an existing message. Returns the number of documents
    /// modified: `0` when the id no longer exists.
    fn replace_message(&mut self, message: &Message) -> Result<u64>;

    fn get_message(&self, id: &Uuid) -> Result<Message>;

    /// The recipient's inbox: unread first, then newest first.
    fn messages_for(&self, recipient: &Uuid) -> Result<Vec<Message>>;

    /// Returns the number of documents removed: `0` when the id is gone.
    fn delete_message(&mut self, id: &Uuid) -> Result<u64>;

    fn unread_count(&self, recipient: &Uuid) -> Result<u64>;
}
