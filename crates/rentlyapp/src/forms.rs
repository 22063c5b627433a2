//! # Property Form Validation
//!
//! [`PropertyForm`] is the submitted shape of the create/update listing
//! form. Both actions run it through the same [`PropertyForm::validate`];
//! failures come back as a field-keyed error map alongside the submitted
//! data so the form can be redisplayed populated. Validation never raises.
//!
//! The form is serde-deserializable so clients can submit it as JSON.

use crate::model::{Location, Property, PropertyType, Rates, SellerInfo, StoredImage};
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Validation failures keyed by form field.
pub type FormErrors = BTreeMap<String, String>;

pub const MIN_NAME_LEN: usize = 10;
pub const MIN_DESCRIPTION_LEN: usize = 20;
pub const MIN_STREET_LEN: usize = 5;
pub const MIN_CITY_LEN: usize = 2;
pub const MIN_SQUARE_FEET: u32 = 100;
pub const MIN_AMENITIES: usize = 1;

static US_STATES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
        "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
        "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
        "VT", "VA", "WA", "WV", "WI", "WY",
    ]
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyForm {
    pub name: String,
    pub property_type: String,
    pub description: String,
    pub location: Location,
    pub beds: u32,
    pub baths: f32,
    pub square_feet: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub rates: Rates,
    pub seller_info: SellerInfo,
}

impl PropertyForm {
    /// Validate the submission. `image_count` is the number of images the
    /// listing will end up with: uploads on create, the existing set on
    /// update. An empty map means the form is acceptable.
    pub fn validate(&self, image_count: usize) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.name.trim().chars().count() < MIN_NAME_LEN {
            fail(&mut errors, "name", format!("Name must be at least {MIN_NAME_LEN} characters"));
        }
        if PropertyType::from_label(&self.property_type).is_none() {
            fail(&mut errors, "property_type", format!("Unknown property type: {}", self.property_type));
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            fail(
                &mut errors,
                "description",
                format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
            );
        }
        if self.location.street.trim().chars().count() < MIN_STREET_LEN {
            fail(&mut errors, "street", format!("Street must be at least {MIN_STREET_LEN} characters"));
        }
        if self.location.city.trim().chars().count() < MIN_CITY_LEN {
            fail(&mut errors, "city", format!("City must be at least {MIN_CITY_LEN} characters"));
        }
        if !is_us_state(&self.location.state) {
            fail(&mut errors, "state", "State must be a two-letter US state code");
        }
        if !is_zipcode(&self.location.zipcode) {
            fail(&mut errors, "zipcode", "ZIP code must be 5 digits, optionally ZIP+4");
        }
        if self.beds == 0 {
            fail(&mut errors, "beds", "Beds must be a positive number");
        }
        if self.baths <= 0.0 {
            fail(&mut errors, "baths", "Baths must be a positive number");
        }
        if self.square_feet < MIN_SQUARE_FEET {
            fail(
                &mut errors,
                "square_feet",
                format!("Square footage must be at least {MIN_SQUARE_FEET}"),
            );
        }
        if self.amenities.iter().filter(|a| !a.trim().is_empty()).count() < MIN_AMENITIES {
            fail(&mut errors, "amenities", "Select at least one amenity");
        }
        if self.rates.is_empty() {
            fail(&mut errors, "rates", "Provide at least one of nightly, weekly or monthly");
        }
        if self.seller_info.name.trim().is_empty() {
            fail(&mut errors, "seller_name", "Seller name is required");
        }
        if !is_plausible_email(&self.seller_info.email) {
            fail(&mut errors, "seller_email", "Seller email does not look valid");
        }
        if self.seller_info.phone.trim().is_empty() {
            fail(&mut errors, "seller_phone", "Seller phone is required");
        }
        if image_count == 0 {
            fail(&mut errors, "images", "Upload at least one image");
        }

        errors
    }

    /// Build a fresh listing from a validated form.
    pub fn into_property(self, owner: Uuid, images: Vec<StoredImage>) -> Property {
        let now = Utc::now();
        Property {
            id: Uuid::new_v4(),
            owner,
            name: self.name.trim().to_string(),
            property_type: PropertyType::from_label(&self.property_type)
                .unwrap_or(PropertyType::Other),
            description: self.description.trim().to_string(),
            location: self.location,
            beds: self.beds,
            baths: self.baths,
            square_feet: self.square_feet,
            amenities: self.amenities,
            rates: self.rates,
            seller_info: self.seller_info,
            images,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rewrite an existing listing from a validated form. Identity, owner,
    /// images, featured flag and creation time are preserved.
    pub fn apply_to(&self, existing: &Property) -> Property {
        Property {
            id: existing.id,
            owner: existing.owner,
            name: self.name.trim().to_string(),
            property_type: PropertyType::from_label(&self.property_type)
                .unwrap_or(existing.property_type),
            description: self.description.trim().to_string(),
            location: self.location.clone(),
            beds: self.beds,
            baths: self.baths,
            square_feet: self.square_feet,
            amenities: self.amenities.clone(),
            rates: self.rates,
            seller_info: self.seller_info.clone(),
            images: existing.images.clone(),
            is_featured: existing.is_featured,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        }
    }
}

fn fail(errors: &mut FormErrors, field: &str, message: impl Into<String>) {
    errors.insert(field.to_string(), message.into());
}

fn is_us_state(code: &str) -> bool {
    US_STATES.contains(&code.trim().to_uppercase().as_str())
}

/// 5 digits, optionally followed by a dash and 4 more.
fn is_zipcode(zip: &str) -> bool {
    let zip = zip.trim();
    let (head, tail) = match zip.split_once('-') {
        Some((head, tail)) => (head, Some(tail)),
        None => (zip, None),
    };
    if head.len() != 5 || !head.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match tail {
        None => true,
        Some(tail) => tail.len() == 4 && tail.chars().all(|c| c.is_ascii_digit()),
    }
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}
