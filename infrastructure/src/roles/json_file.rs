//! JSON file role store.
//!
//! The file holds one object mapping group ids to role ids:
//!
//! ```json
//! { "book-club": "voters" }
//! ```
//!
//! The whole file is rewritten on every update. Reads are served from the
//! in-memory copy loaded at startup.

use async_trait::async_trait;
use confluence_application::{RoleStore, RoleStoreError};
use confluence_domain::{GroupId, RoleId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info};

type RoleMap = BTreeMap<GroupId, RoleId>;

pub struct JsonFileRoleStore {
    path: PathBuf,
    roles: RwLock<RoleMap>,
    /// Serializes file rewrites
    write_lock: Mutex<()>,
}

impl JsonFileRoleStore {
    /// Open the store at `path`, starting empty when the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RoleStoreError> {
        let path = path.as_ref().to_path_buf();

        let roles = match tokio::fs::read_to_string(&path).await {
            Ok(content) => parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Role store {} not found, starting empty", path.display());
                RoleMap::new()
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        info!(
            "Loaded {} required role(s) from {}",
            roles.len(),
            path.display()
        );

        Ok(Self {
            path,
            roles: RwLock::new(roles),
            write_lock: Mutex::new(()),
        })
    }

    fn snapshot(&self) -> RoleMap {
        self.roles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn parse(content: &str) -> Result<RoleMap, RoleStoreError> {
    if content.trim().is_empty() {
        return Ok(RoleMap::new());
    }
    serde_json::from_str(content).map_err(|e| RoleStoreError::Corrupt(e.to_string()))
}

fn io_error(path: &Path, e: std::io::Error) -> RoleStoreError {
    RoleStoreError::Io(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl RoleStore for JsonFileRoleStore {
    async fn required_role(&self, group: &GroupId) -> Result<Option<RoleId>, RoleStoreError> {
        let roles = self.roles.read().unwrap_or_else(PoisonError::into_inner);
        Ok(roles.get(group).cloned())
    }

    async fn set_required_role(
        &self,
        group: &GroupId,
        role: RoleId,
    ) -> Result<(), RoleStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut updated = self.snapshot();
        updated.insert(group.clone(), role);

        let json = serde_json::to_string_pretty(&updated)
            .map_err(|e| RoleStoreError::Corrupt(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        *self.roles.write().unwrap_or_else(PoisonError::into_inner) = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRoleStore::open(dir.path().join("roles.json"))
            .await
            .unwrap();

        assert_eq!(store.required_role(&GroupId::new("g")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_persists_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("roles.json");
        let store = JsonFileRoleStore::open(&path).await.unwrap();

        store
            .set_required_role(&GroupId::new("book-club"), RoleId::new("voters"))
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({ "book-club": "voters" }));

        let reopened = JsonFileRoleStore::open(&path).await.unwrap();
        assert_eq!(
            reopened
                .required_role(&GroupId::new("book-club"))
                .await
                .unwrap(),
            Some(RoleId::new("voters"))
        );
    }

    #[tokio::test]
    async fn test_update_replaces_previous_role() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.json");
        std::fs::write(&path, r#"{"g1": "old", "g2": "other"}"#).unwrap();
        let store = JsonFileRoleStore::open(&path).await.unwrap();

        store
            .set_required_role(&GroupId::new("g1"), RoleId::new("new"))
            .await
            .unwrap();

        assert_eq!(
            store.required_role(&GroupId::new("g1")).await.unwrap(),
            Some(RoleId::new("new"))
        );
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({ "g1": "new", "g2": "other" }));
    }

    #[tokio::test]
    async fn test_corrupt_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.json");
        std::fs::write(&path, "[not an object").unwrap();

        let result = JsonFileRoleStore::open(&path).await;

        assert!(matches!(result, Err(RoleStoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn test_concurrent_writers_keep_every_group() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.json");
        let store = Arc::new(JsonFileRoleStore::open(&path).await.unwrap());

        let writes = (0..8).map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .set_required_role(&GroupId::new(format!("g{i}")), RoleId::new("r"))
                    .await
            })
        });
        for handle in writes.collect::<Vec<_>>() {
            handle.await.unwrap().unwrap();
        }

        let reopened = JsonFileRoleStore::open(&path).await.unwrap();
        for i in 0..8 {
            assert!(
                reopened
                    .required_role(&GroupId::new(format!("g{i}")))
                    .await
                    .unwrap()
                    .is_some()
            );
        }
    }
}
