//! # Domain Model
//!
//! The three persisted document types ([`Property`], [`User`], [`Message`])
//! and their value types. Everything here is plain data: no storage or
//! presentation logic.
//!
//! Relationships are held as ids rather than nested documents:
//!
//! - `Property::owner` references a [`User`].
//! - `User::favorites` is the many-to-many favorites relation, materialized
//!   as an array of property ids on the user document.
//! - `Message::sender` / `Message::recipient` reference users;
//!   `Message::property` ties an inquiry to the listing it is about.
//!
//! Timestamps are UTC and set at construction; `updated_at` is refreshed by
//! whoever mutates the document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of rental property. The form layer submits these as lowercase
/// labels, validated against [`PropertyType::from_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    Condo,
    House,
    Cabin,
    Room,
    Studio,
    Other,
}

impl PropertyType {
    /// Parse a user-submitted type label. Case-insensitive; `None` for
    /// anything outside the enumeration.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "apartment" => Some(Self::Apartment),
            "condo" => Some(Self::Condo),
            "house" => Some(Self::House),
            "cabin" | "cottage" => Some(Self::Cabin),
            "room" => Some(Self::Room),
            "studio" => Some(Self::Studio),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::Condo => "Condo",
            Self::House => "House",
            Self::Cabin => "Cabin or Cottage",
            Self::Room => "Room",
            Self::Studio => "Studio",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// Asking rates in whole dollars. At least one must be set on a valid
/// listing; the form layer enforces that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rates {
    pub nightly: Option<u32>,
    pub weekly: Option<u32>,
    pub monthly: Option<u32>,
}

impl Rates {
    pub fn is_empty(&self) -> bool {
        self.nightly.is_none() && self.weekly.is_none() && self.monthly.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// An image as stored by the media host: where it lives, the host's handle
/// for destroying it, and the dimensions the host reported (0 when unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// A rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub property_type: PropertyType,
    pub description: String,
    pub location: Location,
    pub beds: u32,
    pub baths: f32,
    pub square_feet: u32,
    pub amenities: Vec<String>,
    pub rates: Rates,
    pub seller_info: SellerInfo,
    pub images: Vec<StoredImage>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An account. Identity fields come from the auth provider at first sign-in;
/// `favorites` is owned by this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub image: Option<String>,
    pub favorites: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            username: username.into(),
            image: None,
            favorites: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// An inquiry sent to a listing's owner. `read` is strictly toggled by the
/// recipient, never derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Uuid,
    pub recipient: Uuid,
    pub property: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_labels_round_trip() {
        for label in ["apartment", "condo", "house", "cabin", "room", "studio", "other"] {
            assert!(PropertyType::from_label(label).is_some(), "{label}");
        }
        assert_eq!(PropertyType::from_label("Cottage"), Some(PropertyType::Cabin));
        assert_eq!(PropertyType::from_label(" House "), Some(PropertyType::House));
        assert_eq!(PropertyType::from_label("castle"), None);
        assert_eq!(PropertyType::from_label(""), None);
    }

    #[test]
    fn rates_empty_only_when_all_absent() {
        assert!(Rates::default().is_empty());
        let rates = Rates {
            weekly: Some(900),
            ..Default::default()
        };
        assert!(!rates.is_empty());
    }

    #[test]
    fn new_user_has_no_favorites() {
        let user = User::new("sam@example.com", "sam");
        assert!(user.favorites.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }
}
