//! # API Facade
//!
//! [`RentlyApi`] is the single entry point for every rently operation,
//! whatever the UI in front of it. It is a thin facade:
//!
//! - **Reads** delegate straight to the store (the data-access layer).
//! - **Mutations** authenticate through the session provider, then
//!   dispatch to the matching `commands/*` function.
//!
//! No business logic lives here, and nothing here touches stdout, files or
//! the terminal. The facade is generic over [`ListingStore`]
//! (`RentlyApi<FileStore>` in production, `RentlyApi<InMemoryStore>` in
//! tests) while the remaining collaborators are boxed trait objects
//! supplied at construction.

use crate::commands::{self, ActionResult};
use crate::error::Result;
use crate::forms::PropertyForm;
use crate::media::{ImageUpload, MediaStore};
use crate::model::{Message, Property, User};
use crate::query::PropertySearch;
use crate::revalidate::Revalidator;
use crate::session::SessionProvider;
use crate::store::ListingStore;
use uuid::Uuid;

/// One page of listings plus the page arithmetic the caller needs to
/// render pagination controls.
#[derive(Debug)]
pub struct PropertyPage {
    pub properties: Vec<Property>,
    pub page: i64,
    pub total_pages: u64,
}

pub struct RentlyApi<S: ListingStore> {
    store: S,
    media: Box<dyn MediaStore>,
    sessions: Box<dyn SessionProvider>,
    revalidator: Box<dyn Revalidator>,
}

impl<S: ListingStore> RentlyApi<S> {
    pub fn new(
        store: S,
        media: Box<dyn MediaStore>,
        sessions: Box<dyn SessionProvider>,
        revalidator: Box<dyn Revalidator>,
    ) -> Self {
        Self {
            store,
            media,
            sessions,
            revalidator,
        }
    }

    // --- Reads ---

    pub fn property(&self, id: &Uuid) -> Result<Property> {
        self.store.get_property(id)
    }

    /// One page of listings, optionally filtered by a search term, sized
    /// for the reported viewport width.
    pub fn page(&self, page: i64, viewport_width: i32, term: Option<&str>) -> Result<PropertyPage> {
        let query = term.and_then(PropertySearch::from_term);
        let total_pages = self.store.page_count(query.as_ref(), viewport_width)?;
        let properties = self.store.fetch_page(page, viewport_width, query.as_ref())?;
        Ok(PropertyPage {
            properties,
            page: page.max(1),
            total_pages,
        })
    }

    pub fn featured(&self, viewport_width: i32) -> Result<Vec<Property>> {
        self.store.fetch_featured(viewport_width)
    }

    pub fn favorites(&self) -> Result<Vec<Property>> {
        let user = self.sessions.require_user()?;
        self.store.fetch_favorites(&user.id)
    }

    pub fn my_listings(&self) -> Result<Vec<Property>> {
        let user = self.sessions.require_user()?;
        self.store.properties_by_owner(&user.id)
    }

    pub fn inbox(&self) -> Result<Vec<Message>> {
        let user = self.sessions.require_user()?;
        self.store.messages_for(&user.id)
    }

    // --- Mutations ---

    pub fn add_property(&mut self, form: PropertyForm, uploads: &[ImageUpload]) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::create::run(
            &mut self.store,
            self.media.as_ref(),
            self.revalidator.as_ref(),
            &user,
            form,
            uploads,
        )
    }

    pub fn update_property(&mut self, id: &Uuid, form: PropertyForm) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::update::run(&mut self.store, self.revalidator.as_ref(), &user, id, form)
    }

    pub fn delete_property(&mut self, id: &Uuid) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::delete::run(
            &mut self.store,
            self.media.as_ref(),
            self.revalidator.as_ref(),
            &user,
            id,
        )
    }

    pub fn toggle_favorite(&mut self, property_id: &Uuid) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::favorite::toggle(&mut self.store, self.revalidator.as_ref(), &user, property_id)
    }

    pub fn favorite_status(&self, property_id: &Uuid) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::favorite::status(&self.store, &user, property_id)
    }

    pub fn contact_owner(
        &mut self,
        property_id: &Uuid,
        contact: commands::message::ContactForm,
    ) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::message::send(&mut self.store, &user, property_id, contact)
    }

    pub fn toggle_message_read(&mut self, message_id: &Uuid) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::message::toggle_read(&mut self.store, self.revalidator.as_ref(), &user, message_id)
    }

    pub fn delete_message(&mut self, message_id: &Uuid) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::message::delete(&mut self.store, self.revalidator.as_ref(), &user, message_id)
    }

    pub fn unread_messages(&self) -> Result<ActionResult> {
        let user = self.sessions.require_user()?;
        commands::message::unread_count(&self.store, &user)
    }

    // --- Accounts ---

    /// Look the user up by email, creating the account on first sight.
    /// This is the local stand-in for the auth provider's sign-in hook.
    pub fn ensure_user(&mut self, email: &str, username: &str) -> Result<User> {
        if let Some(existing) = self.store.find_user_by_email(email)? {
            return Ok(existing);
        }
        let user = User::new(email, username);
        self.store.save_user(&user)?;
        Ok(user)
    }
}
