use crate::commands::{ActionMessage, ActionResult, PROPERTIES_ROUTE};
use crate::error::Result;
use crate::forms::PropertyForm;
use crate::media::{ImageUpload, MediaStore};
use crate::revalidate::Revalidator;
use crate::session::SessionUser;
use crate::store::ListingStore;
use tracing::warn;

/// Create a listing owned by the session user.
///
/// Validation runs before anything touches the media host. When the
/// persistence save fails after the upload, the freshly uploaded images are
/// destroyed again so no orphaned assets remain.
pub fn run<S: ListingStore>(
    store: &mut S,
    media: &dyn MediaStore,
    revalidator: &dyn Revalidator,
    user: &SessionUser,
    form: PropertyForm,
    uploads: &[ImageUpload],
) -> Result<ActionResult> {
    let errors = form.validate(uploads.len());
    if !errors.is_empty() {
        return Ok(ActionResult::invalid(errors, form));
    }

    let images = media.upload_images(uploads)?;
    let property = form.into_property(user.id, images.clone());

    if let Err(e) = store.save_property(&property) {
        warn!("listing save failed, rolling back {} uploaded image(s)", images.len());
        if let Err(cleanup) = media.destroy_images(&images) {
            warn!("image rollback failed: {cleanup}");
        }
        return Ok(ActionResult::failed(format!("Failed to add property: {e}")));
    }

    revalidator.revalidate(PROPERTIES_ROUTE)?;

    let mut result = ActionResult::ok();
    result.add_message(ActionMessage::success(format!(
        "Property added: {}",
        property.name
    )));
    Ok(result.with_property(property))
}
