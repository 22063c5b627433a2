use super::backend::{StorageBackend, WriteBatch};
use super::{CascadeReport, ListingStore};
use crate::error::{RentlyError, Result};
use crate::model::{Message, Property, User};
use crate::pagination;
use crate::query::PropertySearch;
use tracing::error;
use uuid::Uuid;

/// Generic store over a raw-I/O backend. All query construction lives here;
/// the backend only moves whole collections.
pub struct DocStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> DocStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    fn matching_properties(&self, query: Option<&PropertySearch>) -> Result<Vec<Property>> {
        let properties = self.backend.load_properties()?;
        match query {
            None => Ok(properties),
            Some(q) => Ok(properties.into_iter().filter(|p| q.matches(p)).collect()),
        }
    }
}

impl<B: StorageBackend> ListingStore for DocStore<B> {
    fn save_property(&mut self, property: &Property) -> Result<()> {
        let mut properties = self.backend.load_properties()?;
        match properties.iter_mut().find(|p| p.id == property.id) {
            Some(existing) => *existing = property.clone(),
            None => properties.push(property.clone()),
        }
        self.backend.save_properties(&properties)
    }

    fn replace_property(&mut self, property: &Property) -> Result<u64> {
        let mut properties = self.backend.load_properties()?;
        let Some(existing) = properties.iter_mut().find(|p| p.id == property.id) else {
            return Ok(0);
        };
        *existing = property.clone();
        self.backend.save_properties(&properties)?;
        Ok(1)
    }

    fn get_property(&self, id: &Uuid) -> Result<Property> {
        self.backend
            .load_properties()?
            .into_iter()
            .find(|p| p.id == *id)
            .ok_or(RentlyError::PropertyNotFound(*id))
    }

    fn list_properties(&self) -> Result<Vec<Property>> {
        self.backend.load_properties()
    }

    fn properties_by_owner(&self, owner: &Uuid) -> Result<Vec<Property>> {
        let properties = self.backend.load_properties()?;
        Ok(properties.into_iter().filter(|p| p.owner == *owner).collect())
    }

    fn count_properties(&self, query: Option<&PropertySearch>) -> Result<u64> {
        Ok(self.matching_properties(query)?.len() as u64)
    }

    fn page_count(&self, query: Option<&PropertySearch>, viewport_width: i32) -> Result<u64> {
        let total = self.count_properties(query).map_err(|e| {
            error!("listing count failed: {e}");
            RentlyError::Store(format!("failed to compute page count: {e}"))
        })?;
        Ok(pagination::page_count(total, viewport_width))
    }

    fn fetch_page(
        &self,
        page: i64,
        viewport_width: i32,
        query: Option<&PropertySearch>,
    ) -> Result<Vec<Property>> {
        let per_page = pagination::listing_page_size(viewport_width);
        let offset = pagination::page_offset(page, per_page);
        Ok(self
            .matching_properties(query)?
            .into_iter()
            .skip(offset)
            .take(per_page)
            .collect())
    }

    fn fetch_featured(&self, viewport_width: i32) -> Result<Vec<Property>> {
        let mut featured: Vec<Property> = self
            .backend
            .load_properties()?
            .into_iter()
            .filter(|p| p.is_featured)
            .collect();
        featured.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        featured.truncate(pagination::featured_page_size(viewport_width));
        Ok(featured)
    }

    fn delete_property_cascade(&mut self, id: &Uuid) -> Result<CascadeReport> {
        let mut properties = self.backend.load_properties()?;
        let before = properties.len();
        properties.retain(|p| p.id != *id);
        if properties.len() == before {
            return Err(RentlyError::PropertyNotFound(*id));
        }

        let mut users = self.backend.load_users()?;
        let mut report = CascadeReport::default();
        for user in &mut users {
            let had = user.favorites.len();
            user.favorites.retain(|fav| fav != id);
            if user.favorites.len() != had {
                report.favorites_pulled += 1;
            }
        }

        let batch = WriteBatch::new().with_properties(properties).with_users(users);
        self.backend.commit(batch)?;
        Ok(report)
    }

    fn save_user(&mut self, user: &User) -> Result<()> {
        let mut users = self.backend.load_users()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.backend.save_users(&users)
    }

    fn get_user(&self, id: &Uuid) -> Result<User> {
        self.backend
            .load_users()?
            .into_iter()
            .find(|u| u.id == *id)
            .ok_or(RentlyError::UserNotFound(*id))
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .backend
            .load_users()?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    fn apply_favorite(
        &mut self,
        user_id: &Uuid,
        property_id: &Uuid,
        favorited: bool,
    ) -> Result<u64> {
        let mut users = self.backend.load_users()?;
        let Some(user) = users.iter_mut().find(|u| u.id == *user_id) else {
            return Ok(0);
        };
        let present = user.favorites.contains(property_id);
        // Already in the desired state: nothing modified. The action layer
        // surfaces that as a soft error (a stale read lost the race).
        if favorited == present {
            return Ok(0);
        }
        if favorited {
            user.favorites.push(*property_id);
        } else {
            user.favorites.retain(|fav| fav != property_id);
        }
        self.backend.save_users(&users)?;
        Ok(1)
    }

    fn fetch_favorites(&self, user_id: &Uuid) -> Result<Vec<Property>> {
        let user = self.get_user(user_id)?;
        let properties = self.backend.load_properties()?;
        Ok(user
            .favorites
            .iter()
            .filter_map(|fav| properties.iter().find(|p| p.id == *fav).cloned())
            .collect())
    }

    fn save_message(&mut self, message: &Message) -> Result<()> {
        let mut messages = self.backend.load_messages()?;
        match messages.iter_mut().find(|m| m.id == message.id) {
            Some(existing) => *existing = message.clone(),
            None => messages.push(message.clone()),
        }
        self.backend.save_messages(&messages)
    }

    fn replace_message(&mut self, message: &Message) -> Result<u64> {
        let mut messages = self.backend.load_messages()?;
        let Some(existing) = messages.iter_mut().find(|m| m.id == message.id) else {
            return Ok(0);
        };
        *existing = message.clone();
        self.backend.save_messages(&messages)?;
        Ok(1)
    }

    fn get_message(&self, id: &Uuid) -> Result<Message> {
        self.backend
            .load_messages()?
            .into_iter()
            .find(|m| m.id == *id)
            .ok_or(RentlyError::MessageNotFound(*id))
    }

    fn messages_for(&self, recipient: &Uuid) -> Result<Vec<Message>> {
        let mut inbox: Vec<Message> = self
            .backend
            .load_messages()?
            .into_iter()
            .filter(|m| m.recipient == *recipient)
            .collect();
        inbox.sort_by(|a, b| a.read.cmp(&b.read).then(b.created_at.cmp(&a.created_at)));
        Ok(inbox)
    }

    fn delete_message(&mut self, id: &Uuid) -> Result<u64> {
        let mut messages = self.backend.load_messages()?;
        let before = messages.len();
        messages.retain(|m| m.id != *id);
        if messages.len() == before {
            return Ok(0);
        }
        self.backend.save_messages(&messages)?;
        Ok(1)
    }

    fn unread_count(&self, recipient: &Uuid) -> Result<u64> {
        let messages = self.backend.load_messages()?;
        Ok(messages
            .iter()
            .filter(|m| m.recipient == *recipient && !m.read)
            .count() as u64)
    }
}
