use crate::commands::{ActionMessage, ActionResult, PROPERTIES_ROUTE};
use crate::error::Result;
use crate::forms::PropertyForm;
use crate::revalidate::Revalidator;
use crate::session::SessionUser;
use crate::store::ListingStore;
use uuid::Uuid;

/// Update a listing. Only the owner may; the ownership check runs before
/// any mutation. Owner, images, featured flag and creation time survive the
/// rewrite.
pub fn run<S: ListingStore>(
    store: &mut S,
    revalidator: &dyn Revalidator,
    user: &SessionUser,
    property_id: &Uuid,
    form: PropertyForm,
) -> Result<ActionResult> {
    let existing = store.get_property(property_id)?;
    if existing.owner != user.id {
        return Ok(ActionResult::denied("Only the listing owner can update it"));
    }

    let errors = form.validate(existing.images.len());
    if !errors.is_empty() {
        return Ok(ActionResult::invalid(errors, form));
    }

    let updated = form.apply_to(&existing);
    if store.replace_property(&updated)? == 0 {
        return Ok(ActionResult::failed(
            "Failed to update property: the listing no longer exists",
        ));
    }

    revalidator.revalidate(PROPERTIES_ROUTE)?;

    let mut result = ActionResult::ok();
    result.add_message(ActionMessage::success(format!(
        "Property updated: {}",
        updated.name
    )));
    Ok(result.with_property(updated))
}
