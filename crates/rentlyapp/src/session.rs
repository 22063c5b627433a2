use crate::error::{RentlyError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity the auth provider vouches for on this request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Seam for the session/auth provider. The provider itself (cookie store,
/// OAuth dance) is a collaborator, not something this crate implements.
pub trait SessionProvider {
    /// Returns the signed-in user, or raises
    /// [`RentlyError::Unauthenticated`] when there is no valid session.
    fn require_user(&self) -> Result<SessionUser>;
}

/// A provider with a fixed answer: the CLI builds one from its session
/// file, tests build one directly.
pub struct StaticSession {
    user: Option<SessionUser>,
}

impl StaticSession {
    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl SessionProvider for StaticSession {
    fn require_user(&self) -> Result<SessionUser> {
        self.user.clone().ok_or(RentlyError::Unauthenticated)
    }
}
