use super::backend::{StorageBackend, WriteBatch};
use crate::error::Result;
use crate::model::{Message, Property, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

const PROPERTIES: &str = "properties";
const USERS: &str = "users";
const MESSAGES: &str = "messages";

/// File-system backend: one JSON array file per collection under a data
/// directory. Natural order is the order of the array.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>> {
        let path = self.collection_path(name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Serialize `docs` to a temp file next to the collection. The caller
    /// renames it into place; rename on the same filesystem is atomic.
    fn stage<T: Serialize>(&self, name: &str, docs: &[T]) -> Result<PathBuf> {
        self.ensure_root()?;
        let tmp = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        let content = serde_json::to_string_pretty(docs)?;
        fs::write(&tmp, content)?;
        Ok(tmp)
    }

    fn save_collection<T: Serialize>(&self, name: &str, docs: &[T]) -> Result<()> {
        let tmp = self.stage(name, docs)?;
        fs::rename(&tmp, self.collection_path(name))?;
        Ok(())
    }

    fn stage_batch(&self, batch: &WriteBatch, staged: &mut Vec<(PathBuf, PathBuf)>) -> Result<()> {
        if let Some(properties) = &batch.properties {
            staged.push((self.stage(PROPERTIES, properties)?, self.collection_path(PROPERTIES)));
        }
        if let Some(users) = &batch.users {
            staged.push((self.stage(USERS, users)?, self.collection_path(USERS)));
        }
        if let Some(messages) = &batch.messages {
            staged.push((self.stage(MESSAGES, messages)?, self.collection_path(MESSAGES)));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_properties(&self) -> Result<Vec<Property>> {
        self.load_collection(PROPERTIES)
    }

    fn save_properties(&self, properties: &[Property]) -> Result<()> {
        self.save_collection(PROPERTIES, properties)
    }

    fn load_users(&self) -> Result<Vec<User>> {
        self.load_collection(USERS)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        self.save_collection(USERS, users)
    }

    fn load_messages(&self) -> Result<Vec<Message>> {
        self.load_collection(MESSAGES)
    }

    fn save_messages(&self, messages: &[Message]) -> Result<()> {
        self.save_collection(MESSAGES, messages)
    }

    fn commit(&self, batch: WriteBatch) -> Result<()> {
        // Stage every collection before renaming any: a failure during
        // staging aborts the whole batch with the live files untouched.
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
        if let Err(e) = self.stage_batch(&batch, &mut staged) {
            warn!("commit aborted while staging: {e}");
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            return Err(e);
        }
        for (tmp, dest) in staged {
            fs::rename(&tmp, &dest)?;
        }
        Ok(())
    }
}
