//! # Action Layer
//!
//! Authenticated mutations live here, one module per action. Each command
//! is a pure function over a [`ListingStore`](crate::store::ListingStore)
//! and the collaborator traits: no I/O assumptions, no presentation.
//!
//! ## Two error taxonomies
//!
//! Commands distinguish failures the caller should handle inline from
//! failures that stop the request:
//!
//! - **Returned**: validation failures, authorization failures (wrong
//!   owner or recipient), and soft failures such as a write that modified
//!   zero documents. These come back as an [`ActionResult`] with a non-Ok
//!   [`ActionStatus`] so a form can re-render with field messages.
//! - **Raised** (`Err`): missing sessions, not-found on direct fetches,
//!   and revalidation failures. These abort the calling page or action.
//!
//! The API facade authenticates through the session provider before
//! dispatching, so commands receive an already-verified
//! [`SessionUser`](crate::session::SessionUser).
//!
//! ## Testing Strategy
//!
//! This is where the lion's share of testing lives. Command tests use
//! [`InMemoryStore`](crate::store::memory::InMemoryStore) plus the
//! recording media/revalidator doubles, cover every status branch, and
//! verify the compensating-action paths.

use crate::forms::{FormErrors, PropertyForm};
use crate::model::{Message, Property};
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod favorite;
pub mod message;
pub mod update;

/// Routes whose cached renderings mutations invalidate.
pub const PROPERTIES_ROUTE: &str = "/properties";
pub const FAVORITES_ROUTE: &str = "/properties/favorites";
pub const PROFILE_ROUTE: &str = "/profile";
pub const MESSAGES_ROUTE: &str = "/messages";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// The mutation landed.
    Ok,
    /// The submission failed validation; see `form_errors`.
    Invalid,
    /// The caller is signed in but not allowed to touch this document.
    Denied,
    /// The mutation was attempted and did not land (transaction abort,
    /// zero-modified write, compensated save failure).
    Failed,
}

impl ActionStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl ActionMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command. The UI layer decides how to render it.
#[derive(Debug, Default)]
pub struct ActionResult {
    pub status: ActionStatus,
    pub messages: Vec<ActionMessage>,
    /// Listings this action touched.
    pub affected_properties: Vec<Property>,
    /// Inquiry documents this action touched.
    pub affected_messages: Vec<Message>,
    /// Field-keyed validation failures.
    pub form_errors: FormErrors,
    /// The submitted form, echoed back on validation failure so the form
    /// can be redisplayed populated.
    pub form: Option<PropertyForm>,
    /// Resulting favorite state after a toggle.
    pub favorited: Option<bool>,
    /// Resulting read state after a toggle.
    pub read: Option<bool>,
    /// Unread-message count, when the action computes one.
    pub unread: Option<u64>,
}

impl Default for ActionStatus {
    fn default() -> Self {
        Self::Ok
    }
}

impl ActionResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn invalid(form_errors: FormErrors, form: PropertyForm) -> Self {
        Self {
            status: ActionStatus::Invalid,
            messages: vec![ActionMessage::error("Please fix the highlighted fields")],
            form_errors,
            form: Some(form),
            ..Default::default()
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Denied,
            messages: vec![ActionMessage::error(reason)],
            ..Default::default()
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Failed,
            messages: vec![ActionMessage::error(reason)],
            ..Default::default()
        }
    }

    pub fn add_message(&mut self, message: ActionMessage) {
        self.messages.push(message);
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.affected_properties.push(property);
        self
    }

    pub fn with_affected_message(mut self, message: Message) -> Self {
        self.affected_messages.push(message);
        self
    }
}
