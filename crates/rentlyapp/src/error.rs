use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RentlyError {
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Revalidation error: {0}")]
    Revalidate(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RentlyError>;
