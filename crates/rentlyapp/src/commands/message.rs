use crate::commands::{ActionMessage, ActionResult, ActionStatus, MESSAGES_ROUTE};
use crate::error::Result;
use crate::forms::FormErrors;
use crate::model::Message;
use crate::revalidate::Revalidator;
use crate::session::SessionUser;
use crate::store::ListingStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact details submitted with an inquiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub body: String,
}

impl ContactForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.name.trim().is_empty() {
            errors.insert("name".into(), "Name is required".into());
        }
        if self.email.trim().is_empty() {
            errors.insert("email".into(), "Email is required".into());
        }
        if self.body.trim().is_empty() {
            errors.insert("body".into(), "Message body is required".into());
        }
        errors
    }
}

/// Send an inquiry about a listing to its owner. The sender is the session
/// user; messaging your own listing is refused.
pub fn send<S: ListingStore>(
    store: &mut S,
    user: &SessionUser,
    property_id: &Uuid,
    contact: ContactForm,
) -> Result<ActionResult> {
    let property = store.get_property(property_id)?;
    if property.owner == user.id {
        return Ok(ActionResult::denied("You cannot message your own listing"));
    }

    let errors = contact.validate();
    if !errors.is_empty() {
        let mut result = ActionResult {
            status: ActionStatus::Invalid,
            form_errors: errors,
            ..Default::default()
        };
        result.add_message(ActionMessage::error("Please fix the highlighted fields"));
        return Ok(result);
    }

    let now = Utc::now();
    let message = Message {
        id: Uuid::new_v4(),
        sender: user.id,
        recipient: property.owner,
        property: property.id,
        name: contact.name.trim().to_string(),
        email: contact.email.trim().to_string(),
        phone: contact.phone,
        body: contact.body.trim().to_string(),
        read: false,
        created_at: now,
        updated_at: now,
    };
    store.save_message(&message)?;

    let mut result = ActionResult::ok();
    result.add_message(ActionMessage::success("Message sent"));
    Ok(result.with_affected_message(message))
}

/// Flip a message between read and unread. Only the recipient may; the
/// result reports the state the message ended up in.
pub fn toggle_read<S: ListingStore>(
    store: &mut S,
    revalidator: &dyn Revalidator,
    user: &SessionUser,
    message_id: &Uuid,
) -> Result<ActionResult> {
    let mut message = store.get_message(message_id)?;
    if message.recipient != user.id {
        return Ok(ActionResult::denied("Only the recipient can update a message"));
    }

    message.read = !message.read;
    message.updated_at = Utc::now();
    if store.replace_message(&message)? == 0 {
        return Ok(ActionResult::failed(
            "Failed to update message: nothing was updated",
        ));
    }

    revalidator.revalidate(MESSAGES_ROUTE)?;

    let mut result = ActionResult::ok();
    result.read = Some(message.read);
    result.add_message(ActionMessage::success(if message.read {
        "Marked as read"
    } else {
        "Marked as unread"
    }));
    Ok(result.with_affected_message(message))
}

/// Delete a message. Only the recipient may.
pub fn delete<S: ListingStore>(
    store: &mut S,
    revalidator: &dyn Revalidator,
    user: &SessionUser,
    message_id: &Uuid,
) -> Result<ActionResult> {
    let message = store.get_message(message_id)?;
    if message.recipient != user.id {
        return Ok(ActionResult::denied("Only the recipient can delete a message"));
    }

    if store.delete_message(message_id)? == 0 {
        return Ok(ActionResult::failed(
            "Failed to delete message: nothing was deleted",
        ));
    }

    revalidator.revalidate(MESSAGES_ROUTE)?;

    let mut result = ActionResult::ok();
    result.add_message(ActionMessage::success("Message deleted"));
    Ok(result.with_affected_message(message))
}

/// The session user's unread-message count.
pub fn unread_count<S: ListingStore>(store: &S, user: &SessionUser) -> Result<ActionResult> {
    let mut result = ActionResult::ok();
    result.unread = Some(store.unread_count(&user.id)?);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ActionStatus;
    use crate::error::RentlyError;
    use crate::revalidate::RecordingRevalidator;
    use crate::store::memory::fixtures::{sample_property, sample_user};
    use crate::store::memory::InMemoryStore;

    struct Inbox {
        store: InMemoryStore,
        owner: SessionUser,
        visitor: SessionUser,
        property_id: Uuid,
    }

    fn inbox() -> Inbox {
        let mut store = InMemoryStore::new();
        let owner_user = sample_user("owner@example.com");
        let visitor_user = sample_user("visitor@example.com");
        store.save_user(&owner_user).unwrap();
        store.save_user(&visitor_user).unwrap();
        let property = sample_property(&owner_user.id, "Listing With An Inbox");
        store.save_property(&property).unwrap();

        Inbox {
            store,
            owner: SessionUser {
                id: owner_user.id,
                email: owner_user.email,
                name: owner_user.username,
            },
            visitor: SessionUser {
                id: visitor_user.id,
                email: visitor_user.email,
                name: visitor_user.username,
            },
            property_id: property.id,
        }
    }

    fn contact() -> ContactForm {
        ContactForm {
            name: "Casey Visitor".into(),
            email: "visitor@example.com".into(),
            phone: None,
            body: "Is the listing available in March?".into(),
        }
    }

    #[test]
    fn send_routes_the_inquiry_to_the_owner() {
        let mut ctx = inbox();
        let result = send(&mut ctx.store, &ctx.visitor, &ctx.property_id, contact()).unwrap();

        assert!(result.status.is_ok());
        let saved = &ctx.store.messages_for(&ctx.owner.id).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].sender, ctx.visitor.id);
        assert_eq!(saved[0].property, ctx.property_id);
        assert!(!saved[0].read);
    }

    #[test]
    fn you_cannot_message_your_own_listing() {
        let mut ctx = inbox();
        let result = send(&mut ctx.store, &ctx.owner, &ctx.property_id, contact()).unwrap();
        assert_eq!(result.status, ActionStatus::Denied);
        assert!(ctx.store.messages_for(&ctx.owner.id).unwrap().is_empty());
    }

    #[test]
    fn blank_inquiries_come_back_as_field_errors() {
        let mut ctx = inbox();
        let mut form = contact();
        form.body = "   ".into();
        let result = send(&mut ctx.store, &ctx.visitor, &ctx.property_id, form).unwrap();
        assert_eq!(result.status, ActionStatus::Invalid);
        assert!(result.form_errors.contains_key("body"));
    }

    #[test]
    fn toggle_read_flips_both_ways_for_the_recipient() {
        let mut ctx = inbox();
        send(&mut ctx.store, &ctx.visitor, &ctx.property_id, contact()).unwrap();
        let message_id = ctx.store.messages_for(&ctx.owner.id).unwrap()[0].id;
        let revalidator = RecordingRevalidator::new();

        let first = toggle_read(&mut ctx.store, &revalidator, &ctx.owner, &message_id).unwrap();
        assert_eq!(first.read, Some(true));

        let second = toggle_read(&mut ctx.store, &revalidator, &ctx.owner, &message_id).unwrap();
        assert_eq!(second.read, Some(false));

        assert_eq!(revalidator.paths(), vec![MESSAGES_ROUTE, MESSAGES_ROUTE]);
    }

    #[test]
    fn only_the_recipient_may_toggle_or_delete() {
        let mut ctx = inbox();
        send(&mut ctx.store, &ctx.visitor, &ctx.property_id, contact()).unwrap();
        let message_id = ctx.store.messages_for(&ctx.owner.id).unwrap()[0].id;
        let revalidator = RecordingRevalidator::new();

        let toggled =
            toggle_read(&mut ctx.store, &revalidator, &ctx.visitor, &message_id).unwrap();
        assert_eq!(toggled.status, ActionStatus::Denied);

        let deleted = delete(&mut ctx.store, &revalidator, &ctx.visitor, &message_id).unwrap();
        assert_eq!(deleted.status, ActionStatus::Denied);
        assert!(ctx.store.get_message(&message_id).is_ok());
    }

    #[test]
    fn delete_removes_the_message_for_the_recipient() {
        let mut ctx = inbox();
        send(&mut ctx.store, &ctx.visitor, &ctx.property_id, contact()).unwrap();
        let message_id = ctx.store.messages_for(&ctx.owner.id).unwrap()[0].id;
        let revalidator = RecordingRevalidator::new();

        let result = delete(&mut ctx.store, &revalidator, &ctx.owner, &message_id).unwrap();
        assert!(result.status.is_ok());
        assert!(matches!(
            ctx.store.get_message(&message_id),
            Err(RentlyError::MessageNotFound(_))
        ));
        assert_eq!(revalidator.paths(), vec![MESSAGES_ROUTE]);
    }

    #[test]
    fn unread_count_tracks_toggles() {
        let mut ctx = inbox();
        send(&mut ctx.store, &ctx.visitor, &ctx.property_id, contact()).unwrap();
        send(&mut ctx.store, &ctx.visitor, &ctx.property_id, contact()).unwrap();

        let count = unread_count(&ctx.store, &ctx.owner).unwrap();
        assert_eq!(count.unread, Some(2));

        let message_id = ctx.store.messages_for(&ctx.owner.id).unwrap()[0].id;
        let revalidator = RecordingRevalidator::new();
        toggle_read(&mut ctx.store, &revalidator, &ctx.owner, &message_id).unwrap();

        let count = unread_count(&ctx.store, &ctx.owner).unwrap();
        assert_eq!(count.unread, Some(1));
    }

    #[test]
    fn unknown_messages_raise() {
        let mut ctx = inbox();
        let revalidator = RecordingRevalidator::new();
        let result = toggle_read(&mut ctx.store, &revalidator, &ctx.owner, &Uuid::new_v4());
        assert!(matches!(result, Err(RentlyError::MessageNotFound(_))));
    }
}
