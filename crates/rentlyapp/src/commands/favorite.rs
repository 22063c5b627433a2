use crate::commands::{ActionMessage, ActionResult, FAVORITES_ROUTE};
use crate::error::{RentlyError, Result};
use crate::revalidate::Revalidator;
use crate::session::SessionUser;
use crate::store::ListingStore;
use uuid::Uuid;

/// Toggle a listing in the session user's favorites.
///
/// Two states per (user, property) pair, one symmetric transition: absent
/// is pushed, present is pulled. The result reports the state the pair
/// ended up in so the caller needs no second read. An unknown user or a
/// write that modified nothing comes back as a soft error, not a panic;
/// both mean a stale id raced us.
pub fn toggle<S: ListingStore>(
    store: &mut S,
    revalidator: &dyn Revalidator,
    user: &SessionUser,
    property_id: &Uuid,
) -> Result<ActionResult> {
    let account = match store.get_user(&user.id) {
        Ok(account) => account,
        Err(RentlyError::UserNotFound(_)) => {
            return Ok(ActionResult::failed("Failed to toggle favorite: unknown user"));
        }
        Err(e) => return Err(e),
    };

    let favorited = !account.favorites.contains(property_id);
    if store.apply_favorite(&user.id, property_id, favorited)? == 0 {
        return Ok(ActionResult::failed(
            "Failed to toggle favorite: nothing was updated",
        ));
    }

    revalidator.revalidate(FAVORITES_ROUTE)?;

    let mut result = ActionResult::ok();
    result.favorited = Some(favorited);
    result.add_message(ActionMessage::success(if favorited {
        "Added to favorites"
    } else {
        "Removed from favorites"
    }));
    Ok(result)
}

/// Report whether the listing is in the session user's favorites.
pub fn status<S: ListingStore>(
    store: &S,
    user: &SessionUser,
    property_id: &Uuid,
) -> Result<ActionResult> {
    let account = match store.get_user(&user.id) {
        Ok(account) => account,
        Err(RentlyError::UserNotFound(_)) => {
            return Ok(ActionResult::failed("Failed to check favorite: unknown user"));
        }
        Err(e) => return Err(e),
    };

    let mut result = ActionResult::ok();
    result.favorited = Some(account.favorites.contains(property_id));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ActionStatus;
    use crate::revalidate::RecordingRevalidator;
    use crate::store::memory::fixtures::sample_user;
    use crate::store::memory::InMemoryStore;

    fn signed_in(store: &mut InMemoryStore, email: &str) -> SessionUser {
        let user = sample_user(email);
        store.save_user(&user).unwrap();
        SessionUser {
            id: user.id,
            email: user.email,
            name: user.username,
        }
    }

    #[test]
    fn double_toggle_round_trips_and_reports_negated_states() {
        let mut store = InMemoryStore::new();
        let revalidator = RecordingRevalidator::new();
        let user = signed_in(&mut store, "ana@example.com");
        let property_id = Uuid::new_v4();

        let first = toggle(&mut store, &revalidator, &user, &property_id).unwrap();
        assert_eq!(first.favorited, Some(true));
        assert!(store.get_user(&user.id).unwrap().favorites.contains(&property_id));

        let second = toggle(&mut store, &revalidator, &user, &property_id).unwrap();
        assert_eq!(second.favorited, Some(false));
        assert!(!store.get_user(&user.id).unwrap().favorites.contains(&property_id));

        assert_eq!(first.favorited.map(|b| !b), second.favorited);
        // Every successful toggle invalidates the favorites route.
        assert_eq!(revalidator.paths(), vec![FAVORITES_ROUTE, FAVORITES_ROUTE]);
    }

    #[test]
    fn unknown_users_get_a_soft_error() {
        let mut store = InMemoryStore::new();
        let revalidator = RecordingRevalidator::new();
        let ghost = SessionUser {
            id: Uuid::new_v4(),
            email: "ghost@example.com".into(),
            name: "ghost".into(),
        };

        let result = toggle(&mut store, &revalidator, &ghost, &Uuid::new_v4()).unwrap();
        assert_eq!(result.status, ActionStatus::Failed);
        assert!(result.favorited.is_none());
        assert!(revalidator.paths().is_empty());
    }

    #[test]
    fn status_reports_membership_without_mutating() {
        let mut store = InMemoryStore::new();
        let revalidator = RecordingRevalidator::new();
        let user = signed_in(&mut store, "ana@example.com");
        let property_id = Uuid::new_v4();

        let before = status(&store, &user, &property_id).unwrap();
        assert_eq!(before.favorited, Some(false));

        toggle(&mut store, &revalidator, &user, &property_id).unwrap();
        let after = status(&store, &user, &property_id).unwrap();
        assert_eq!(after.favorited, Some(true));
    }

    #[test]
    fn revalidation_failures_propagate_after_the_write() {
        let mut store = InMemoryStore::new();
        let revalidator = RecordingRevalidator::new();
        revalidator.set_fail(true);
        let user = signed_in(&mut store, "ana@example.com");
        let property_id = Uuid::new_v4();

        let result = toggle(&mut store, &revalidator, &user, &property_id);
        assert!(matches!(result, Err(RentlyError::Revalidate(_))));
        // The membership change itself landed.
        assert!(store.get_user(&user.id).unwrap().favorites.contains(&property_id));
    }
}
