use super::doc_store::DocStore;
use super::fs_backend::FsBackend;
use std::path::PathBuf;

/// Production store: JSON collections under a data directory.
pub type FileStore = DocStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        DocStore::with_backend(FsBackend::new(root))
    }
}
