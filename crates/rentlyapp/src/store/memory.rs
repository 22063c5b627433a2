use super::doc_store::DocStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = DocStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        DocStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{
        Location, Message, Property, PropertyType, Rates, SellerInfo, StoredImage, User,
    };
    use crate::store::ListingStore;
    use chrono::Utc;
    use uuid::Uuid;

    /// A fully valid listing owned by `owner`. Tests tweak fields from here.
    pub fn sample_property(owner: &Uuid, name: &str) -> Property {
        let now = Utc::now();
        Property {
            id: Uuid::new_v4(),
            owner: *owner,
            name: name.to_string(),
            property_type: PropertyType::Apartment,
            description: "Bright two-bedroom walkup close to transit and cafes.".to_string(),
            location: Location {
                street: "482 Maple Avenue".to_string(),
                city: "Portland".to_string(),
                state: "OR".to_string(),
                zipcode: "97205".to_string(),
            },
            beds: 2,
            baths: 1.0,
            square_feet: 900,
            amenities: vec!["WiFi".to_string(), "Dishwasher".to_string()],
            rates: Rates {
                nightly: None,
                weekly: Some(950),
                monthly: Some(2900),
            },
            seller_info: SellerInfo {
                name: "Morgan Reyes".to_string(),
                email: "morgan@example.com".to_string(),
                phone: "555-0142".to_string(),
            },
            images: vec![StoredImage {
                url: "memory://walkup-front.jpg".to_string(),
                public_id: "walkup-front".to_string(),
                width: 1200,
                height: 800,
            }],
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn sample_user(email: &str) -> User {
        let username = email.split('@').next().unwrap_or("user").to_string();
        User::new(email, username)
    }

    pub fn sample_message(sender: &Uuid, recipient: &Uuid, property: &Uuid) -> Message {
        let now = Utc::now();
        Message {
            id: Uuid::new_v4(),
            sender: *sender,
            recipient: *recipient,
            property: *property,
            name: "Interested Renter".to_string(),
            email: "renter@example.com".to_string(),
            phone: Some("555-0199".to_string()),
            body: "Is this still available next month?".to_string(),
            read: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_user(mut self, email: &str) -> Self {
            self.store.save_user(&sample_user(email)).unwrap();
            self
        }

        pub fn with_properties(mut self, count: usize, owner: &Uuid) -> Self {
            for i in 0..count {
                let property = sample_property(owner, &format!("Test Listing {}", i + 1));
                self.store.save_property(&property).unwrap();
            }
            self
        }

        pub fn with_featured_property(mut self, owner: &Uuid, name: &str) -> Self {
            let mut property = sample_property(owner, name);
            property.is_featured = true;
            self.store.save_property(&property).unwrap();
            self
        }
    }
}
