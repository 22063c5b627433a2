//! # Media Store
//!
//! Listing images live with an external media host; the application only
//! keeps the [`StoredImage`] records the host returns. [`MediaStore`] is
//! that host's seam: [`LocalMedia`] stores files under a local directory,
//! [`MemoryMedia`] records calls for tests.
//!
//! Uploads are not transactional with the document store. The create action
//! compensates by destroying freshly uploaded images when the subsequent
//! save fails; deletes destroy images best-effort after the transaction.

use crate::error::{RentlyError, Result};
use crate::model::StoredImage;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// An image file submitted with the property form, not yet stored.
/// Dimensions are whatever the submitting client reported (0 for unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            width: 0,
            height: 0,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let bytes = fs::read(path)?;
        Ok(Self::new(file_name, bytes))
    }
}

pub trait MediaStore {
    /// Store every upload, returning one record per upload in order.
    fn upload_images(&self, uploads: &[ImageUpload]) -> Result<Vec<StoredImage>>;

    /// Remove stored images. Images already gone are not an error.
    fn destroy_images(&self, images: &[StoredImage]) -> Result<()>;
}

/// Media store backed by a local directory.
pub struct LocalMedia {
    root: PathBuf,
}

impl LocalMedia {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn target_path(&self, public_id: &str, file_name: &str) -> PathBuf {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("img");
        self.root.join(format!("{public_id}.{ext}"))
    }
}

impl MediaStore for LocalMedia {
    fn upload_images(&self, uploads: &[ImageUpload]) -> Result<Vec<StoredImage>> {
        fs::create_dir_all(&self.root)
            .map_err(|e| RentlyError::Media(format!("media dir unavailable: {e}")))?;

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let public_id = format!("img-{}", Uuid::new_v4());
            let path = self.target_path(&public_id, &upload.file_name);
            if let Err(e) = fs::write(&path, &upload.bytes) {
                // Partial batches are cleaned up before reporting failure.
                let _ = self.destroy_images(&stored);
                return Err(RentlyError::Media(format!(
                    "failed to store {}: {e}",
                    upload.file_name
                )));
            }
            stored.push(StoredImage {
                url: path.display().to_string(),
                public_id,
                width: upload.width,
                height: upload.height,
            });
        }
        Ok(stored)
    }

    fn destroy_images(&self, images: &[StoredImage]) -> Result<()> {
        for image in images {
            let path = PathBuf::from(&image.url);
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| RentlyError::Media(format!("failed to destroy {}: {e}", image.public_id)))?;
            }
        }
        Ok(())
    }
}

/// Recording media store for tests: remembers what was uploaded and
/// destroyed, and can be told to fail either call.
#[derive(Default)]
pub struct MemoryMedia {
    uploaded: RefCell<Vec<StoredImage>>,
    destroyed: RefCell<Vec<String>>,
    fail_upload: RefCell<bool>,
    fail_destroy: RefCell<bool>,
}

impl MemoryMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_upload(&self, fail: bool) {
        *self.fail_upload.borrow_mut() = fail;
    }

    pub fn set_fail_destroy(&self, fail: bool) {
        *self.fail_destroy.borrow_mut() = fail;
    }

    /// Every image ever uploaded through this store.
    pub fn uploaded(&self) -> Vec<StoredImage> {
        self.uploaded.borrow().clone()
    }

    /// Public ids passed to `destroy_images`, in call order.
    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.borrow().clone()
    }
}

impl MediaStore for MemoryMedia {
    fn upload_images(&self, uploads: &[ImageUpload]) -> Result<Vec<StoredImage>> {
        if *self.fail_upload.borrow() {
            return Err(RentlyError::Media("Simulated upload error".to_string()));
        }
        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            stored.push(StoredImage {
                url: format!("memory://{}", upload.file_name),
                public_id: format!("mem-{}", Uuid::new_v4()),
                width: upload.width,
                height: upload.height,
            });
        }
        self.uploaded.borrow_mut().extend(stored.clone());
        Ok(stored)
    }

    fn destroy_images(&self, images: &[StoredImage]) -> Result<()> {
        if *self.fail_destroy.borrow() {
            return Err(RentlyError::Media("Simulated destroy error".to_string()));
        }
        self.destroyed
            .borrow_mut()
            .extend(images.iter().map(|i| i.public_id.clone()));
        Ok(())
    }
}
