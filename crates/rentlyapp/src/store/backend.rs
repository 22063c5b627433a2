use crate::error::Result;
use crate::model::{Message, Property, User};

/// A multi-collection write that must land atomically: every collection in
/// the batch is replaced, or none is. This is the storage layer's analog of
/// the document store's multi-document transaction, and it is the only
/// isolation mechanism the cascade delete relies on.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    pub properties: Option<Vec<Property>>,
    pub users: Option<Vec<User>>,
    pub messages: Option<Vec<Message>>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_none() && self.users.is_none() && self.messages.is_none()
    }
}

/// Abstract interface for raw collection I/O.
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`DocStore`](super::doc_store::DocStore) handles the "what" (queries,
/// pagination, cascades).
pub trait StorageBackend {
    /// Load the `properties` collection in natural (insertion) order.
    fn load_properties(&self) -> Result<Vec<Property>>;

    /// Replace the `properties` collection. MUST be atomic (e.g. write to
    /// tmp then rename) to avoid partial collections on disk.
    fn save_properties(&self, properties: &[Property]) -> Result<()>;

    /// Load the `users` collection.
    fn load_users(&self) -> Result<Vec<User>>;

    /// Replace the `users` collection.
    fn save_users(&self, users: &[User]) -> Result<()>;

    /// Load the `messages` collection.
    fn load_messages(&self) -> Result<Vec<Message>>;

    /// Replace the `messages` collection.
    fn save_messages(&self, messages: &[Message]) -> Result<()>;

    /// Apply every collection in `batch`, or none of them. An error means
    /// nothing was applied.
    fn commit(&self, batch: WriteBatch) -> Result<()>;
}
