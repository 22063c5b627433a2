use super::backend::{StorageBackend, WriteBatch};
use crate::error::{RentlyError, Result};
use crate::model::{Message, Property, User};
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is
/// single-threaded. The simulate switches let tests inject persistence
/// failures at the write and transaction boundaries.
#[derive(Default)]
pub struct MemBackend {
    properties: RefCell<Vec<Property>>,
    users: RefCell<Vec<User>>,
    messages: RefCell<Vec<Message>>,
    simulate_write_error: RefCell<bool>,
    simulate_commit_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every collection save (but not commits) with a store error.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Fail batch commits, leaving every collection untouched: the
    /// injected "transaction abort" used by the cascade-delete tests.
    pub fn set_simulate_commit_error(&self, simulate: bool) {
        *self.simulate_commit_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load_properties(&self) -> Result<Vec<Property>> {
        Ok(self.properties.borrow().clone())
    }

    fn save_properties(&self, properties: &[Property]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RentlyError::Store("Simulated write error".to_string()));
        }
        *self.properties.borrow_mut() = properties.to_vec();
        Ok(())
    }

    fn load_users(&self) -> Result<Vec<User>> {
        Ok(self.users.borrow().clone())
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RentlyError::Store("Simulated write error".to_string()));
        }
        *self.users.borrow_mut() = users.to_vec();
        Ok(())
    }

    fn load_messages(&self) -> Result<Vec<Message>> {
        Ok(self.messages.borrow().clone())
    }

    fn save_messages(&self, messages: &[Message]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RentlyError::Store("Simulated write error".to_string()));
        }
        *self.messages.borrow_mut() = messages.to_vec();
        Ok(())
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        if *self.simulate_commit_error.borrow() || *self.simulate_write_error.borrow() {
            return Err(RentlyError::Store("Simulated commit error".to_string()));
        }
        if let Some(properties) = batch.properties {
            *self.properties.borrow_mut() = properties;
        }
        if let Some(users) = batch.users {
            *self.users.borrow_mut() = users;
        }
        if let Some(messages) = batch.messages {
            *self.messages.borrow_mut() = messages;
        }
        Ok(())
    }
}
