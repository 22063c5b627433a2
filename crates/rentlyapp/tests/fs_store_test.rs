use rentlyapp::error::RentlyError;
use rentlyapp::model::{Location, Property, PropertyType, Rates, SellerInfo, User};
use rentlyapp::store::backend::{StorageBackend, WriteBatch};
use rentlyapp::store::fs::FileStore;
use rentlyapp::store::fs_backend::FsBackend;
use rentlyapp::store::ListingStore;
use chrono::Utc;
use std::fs;
use tempfile::TempDir;
use uuid::Uuid;

fn listing(owner: &Uuid, name: &str) -> Property {
    let now = Utc::now();
    Property {
        id: Uuid::new_v4(),
        owner: *owner,
        name: name.to_string(),
        property_type: PropertyType::House,
        description: "Three-bedroom house with a fenced back yard.".to_string(),
        location: Location {
            street: "9 Birchwood Court".to_string(),
            city: "Boise".to_string(),
            state: "ID".to_string(),
            zipcode: "83702".to_string(),
        },
        beds: 3,
        baths: 2.0,
        square_feet: 1500,
        amenities: vec!["Garage".to_string()],
        rates: Rates {
            monthly: Some(2400),
            ..Default::default()
        },
        seller_info: SellerInfo {
            name: "Riley Hart".to_string(),
            email: "riley@example.com".to_string(),
            phone: "555-0166".to_string(),
        },
        images: Vec::new(),
        is_featured: false,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn collections_persist_across_store_instances() {
    let dir = TempDir::new().unwrap();
    let owner = Uuid::new_v4();

    {
        let mut store = FileStore::new(dir.path().to_path_buf());
        store.save_property(&listing(&owner, "Persistent House One")).unwrap();
        store.save_property(&listing(&owner, "Persistent House Two")).unwrap();
        store.save_user(&User::new("riley@example.com", "riley")).unwrap();
    }

    let store = FileStore::new(dir.path().to_path_buf());
    let names: Vec<String> = store
        .list_properties()
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Persistent House One", "Persistent House Two"]);
    assert!(store.find_user_by_email("riley@example.com").unwrap().is_some());
}

#[test]
fn writes_leave_no_tmp_artifacts() {
    let dir = TempDir::new().unwrap();
    let owner = Uuid::new_v4();
    let mut store = FileStore::new(dir.path().to_path_buf());
    store.save_property(&listing(&owner, "Tidy Writer House")).unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {name}");
    }
    assert!(dir.path().join("properties.json").exists());
}

#[test]
fn commit_replaces_multiple_collections_together() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    let owner = Uuid::new_v4();

    backend
        .save_properties(&[listing(&owner, "Batched House One")])
        .unwrap();
    backend.save_users(&[User::new("a@example.com", "a")]).unwrap();

    let batch = WriteBatch::new()
        .with_properties(Vec::new())
        .with_users(vec![User::new("b@example.com", "b")]);
    backend.commit(batch).unwrap();

    assert!(backend.load_properties().unwrap().is_empty());
    let users = backend.load_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "b@example.com");
}

#[test]
fn cascade_delete_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let owner = Uuid::new_v4();
    let target;
    let fan_id;

    {
        let mut store = FileStore::new(dir.path().to_path_buf());
        let doomed = listing(&owner, "Cascading House");
        let kept = listing(&owner, "Surviving House");
        target = doomed.id;
        store.save_property(&doomed).unwrap();
        store.save_property(&kept).unwrap();

        let mut fan = User::new("fan@example.com", "fan");
        fan.favorites = vec![doomed.id, kept.id];
        fan_id = fan.id;
        store.save_user(&fan).unwrap();

        store.delete_property_cascade(&target).unwrap();
    }

    let store = FileStore::new(dir.path().to_path_buf());
    assert!(matches!(
        store.get_property(&target),
        Err(RentlyError::PropertyNotFound(_))
    ));
    let fan = store.get_user(&fan_id).unwrap();
    assert_eq!(fan.favorites.len(), 1);
}

#[test]
fn missing_collections_read_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("never-written"));
    assert!(store.list_properties().unwrap().is_empty());
    assert_eq!(store.page_count(None, 1280).unwrap(), 0);
}
