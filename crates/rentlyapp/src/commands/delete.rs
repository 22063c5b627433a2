use crate::commands::{ActionMessage, ActionResult, PROFILE_ROUTE};
use crate::error::Result;
use crate::media::MediaStore;
use crate::revalidate::Revalidator;
use crate::session::SessionUser;
use crate::store::ListingStore;
use tracing::warn;
use uuid::Uuid;

/// Delete a listing the session user owns.
///
/// The document delete and the favorites cascade run as one atomic commit;
/// a failure there leaves every collection untouched and comes back as a
/// `Failed` result. Stored images are destroyed afterwards, best-effort;
/// the media host is outside the transaction.
pub fn run<S: ListingStore>(
    store: &mut S,
    media: &dyn MediaStore,
    revalidator: &dyn Revalidator,
    user: &SessionUser,
    property_id: &Uuid,
) -> Result<ActionResult> {
    let property = store.get_property(property_id)?;
    if property.owner != user.id {
        return Ok(ActionResult::denied("Only the listing owner can delete it"));
    }

    let report = match store.delete_property_cascade(property_id) {
        Ok(report) => report,
        Err(e) => {
            return Ok(ActionResult::failed(format!("Failed to delete property: {e}")));
        }
    };

    if !property.images.is_empty() {
        if let Err(e) = media.destroy_images(&property.images) {
            warn!("image cleanup failed for listing {property_id}: {e}");
        }
    }

    revalidator.revalidate(PROFILE_ROUTE)?;

    let mut result = ActionResult::ok();
    result.add_message(ActionMessage::success(format!(
        "Property deleted: {}",
        property.name
    )));
    if report.favorites_pulled > 0 {
        result.add_message(ActionMessage::info(format!(
            "Removed from {} favorites list(s)",
            report.favorites_pulled
        )));
    }
    Ok(result.with_property(property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ActionStatus;
    use crate::error::RentlyError;
    use crate::media::MemoryMedia;
    use crate::revalidate::RecordingRevalidator;
    use crate::store::memory::fixtures::{sample_property, sample_user};
    use crate::store::memory::InMemoryStore;

    fn session_for(id: Uuid) -> SessionUser {
        SessionUser {
            id,
            email: "owner@example.com".into(),
            name: "owner".into(),
        }
    }

    #[test]
    fn owner_delete_cascades_and_cleans_up_media() {
        let mut store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let property = sample_property(&owner, "Doomed Bungalow Listing");
        store.save_property(&property).unwrap();
        let mut fan = sample_user("fan@example.com");
        fan.favorites = vec![property.id];
        store.save_user(&fan).unwrap();

        let media = MemoryMedia::new();
        let revalidator = RecordingRevalidator::new();

        let result =
            run(&mut store, &media, &revalidator, &session_for(owner), &property.id).unwrap();

        assert!(result.status.is_ok());
        assert!(matches!(
            store.get_property(&property.id),
            Err(RentlyError::PropertyNotFound(_))
        ));
        assert!(store.get_user(&fan.id).unwrap().favorites.is_empty());
        assert_eq!(media.destroyed(), vec![property.images[0].public_id.clone()]);
        assert_eq!(revalidator.paths(), vec![PROFILE_ROUTE]);
    }

    #[test]
    fn non_owners_cannot_delete() {
        let mut store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let property = sample_property(&owner, "Protected Bungalow Listing");
        store.save_property(&property).unwrap();
        let media = MemoryMedia::new();
        let revalidator = RecordingRevalidator::new();

        let result = run(
            &mut store,
            &media,
            &revalidator,
            &session_for(Uuid::new_v4()),
            &property.id,
        )
        .unwrap();

        assert_eq!(result.status, ActionStatus::Denied);
        assert!(store.get_property(&property.id).is_ok());
        assert!(media.destroyed().is_empty());
    }

    #[test]
    fn transaction_abort_returns_failed_and_keeps_everything() {
        let mut store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let property = sample_property(&owner, "Sticky Bungalow Listing");
        store.save_property(&property).unwrap();
        let mut fan = sample_user("fan@example.com");
        fan.favorites = vec![property.id];
        store.save_user(&fan).unwrap();

        store.backend.set_simulate_commit_error(true);
        let media = MemoryMedia::new();
        let revalidator = RecordingRevalidator::new();

        let result =
            run(&mut store, &media, &revalidator, &session_for(owner), &property.id).unwrap();

        assert_eq!(result.status, ActionStatus::Failed);
        assert!(result.messages[0].content.contains("Failed to delete property"));

        store.backend.set_simulate_commit_error(false);
        assert!(store.get_property(&property.id).is_ok());
        assert_eq!(store.get_user(&fan.id).unwrap().favorites, vec![property.id]);
        // No media destroyed, no routes touched.
        assert!(media.destroyed().is_empty());
        assert!(revalidator.paths().is_empty());
    }

    #[test]
    fn media_cleanup_failure_does_not_fail_the_delete() {
        let mut store = InMemoryStore::new();
        let owner = Uuid::new_v4();
        let property = sample_property(&owner, "Shedding Bungalow Listing");
        store.save_property(&property).unwrap();

        let media = MemoryMedia::new();
        media.set_fail_destroy(true);
        let revalidator = RecordingRevalidator::new();

        let result =
            run(&mut store, &media, &revalidator, &session_for(owner), &property.id).unwrap();

        assert!(result.status.is_ok());
        assert!(matches!(
            store.get_property(&property.id),
            Err(RentlyError::PropertyNotFound(_))
        ));
    }
}
