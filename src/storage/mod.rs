use crate::{
    error::Result,
    session::{Role, Session, UserProfile},
};
use async_trait::async_trait;

pub mod file_storage;

pub use file_storage::FileProfileStore;

/// Client-side key/value store for the user profile and role.
///
/// Both entries are opaque blobs: the profile is written as JSON under
/// `user`, the role as a plain string under `userRole`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Prepares the backing store
    async fn initialize(&self) -> Result<()>;

    async fn save_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Returns `None` when no profile is stored
    async fn load_profile(&self) -> Result<Option<UserProfile>>;

    async fn save_role(&self, role: Role) -> Result<()>;

    /// Returns `None` when no role is stored
    async fn load_role(&self) -> Result<Option<Role>>;

    /// Removes both entries
    async fn clear(&self) -> Result<()>;

    /// Writes profile and role together
    async fn save_session(&self, session: &Session) -> Result<()> {
        self.save_profile(&session.profile).await?;
        self.save_role(session.role).await
    }

    /// Restores a session when both entries are present
    async fn load_session(&self) -> Result<Option<Session>> {
        match (self.load_profile().await?, self.load_role().await?) {
            (Some(profile), Some(role)) => Ok(Some(Session::new(profile, role))),
            _ => Ok(None),
        }
    }
}
