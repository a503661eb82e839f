use crate::{
    error::Result,
    session::{Role, UserProfile},
    storage::ProfileStore,
};
use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tokio::fs;
use tracing::warn;

/// File-based profile store
pub struct FileProfileStore {
    root_path: PathBuf,
}

impl FileProfileStore {
    const WORKDESK_DIR: &'static str = ".workdesk";
    const USER_FILE: &'static str = "user.json";
    const ROLE_FILE: &'static str = "userRole";

    /// Creates a store rooted at `<data_dir>/.workdesk`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().join(Self::WORKDESK_DIR),
        }
    }

    fn user_file(&self) -> PathBuf {
        self.root_path.join(Self::USER_FILE)
    }

    fn role_file(&self) -> PathBuf {
        self.root_path.join(Self::ROLE_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    async fn remove_if_exists(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.user_file(), json).await?;
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<UserProfile>> {
        let file_path = self.user_file();

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        match serde_json::from_str::<UserProfile>(&contents) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "ignoring stored profile");
                Ok(None)
            }
        }
    }

    async fn save_role(&self, role: Role) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        fs::write(self.role_file(), role.as_str()).await?;
        Ok(())
    }

    async fn load_role(&self) -> Result<Option<Role>> {
        let file_path = self.role_file();

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        match Role::from_str(&contents) {
            Ok(role) => Ok(Some(role)),
            Err(e) => {
                warn!(error = %e, "ignoring stored role");
                Ok(None)
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        Self::remove_if_exists(&self.user_file()).await?;
        Self::remove_if_exists(&self.role_file()).await
    }
}
