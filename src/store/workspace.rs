//! Workspace directory holding session and schema files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::schema::Schema;

use super::errors::{StoreError, StoreResult};

const SESSION_FILE: &str = "session.json";
const SCHEMA_FILE: &str = "current_schema.json";

/// A stored login session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued at login
    pub token: String,
    /// When the token was stored
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            logged_in_at: Utc::now(),
        }
    }
}

/// The last generated schema, kept for the preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSchema {
    /// Server-assigned id once the schema has been sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    pub schema: Schema,
    pub stored_at: DateTime<Utc>,
}

impl StoredSchema {
    pub fn new(schema: Schema, form_id: Option<String>) -> Self {
        Self {
            form_id,
            schema,
            stored_at: Utc::now(),
        }
    }
}

/// Directory-backed workspace
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Creates a workspace rooted at `dir`. Nothing is touched on disk
    /// until the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the workspace directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_session(&self, session: &Session) -> StoreResult<PathBuf> {
        self.write_json(SESSION_FILE, session)
    }

    /// Returns the stored session, or `None` when logged out
    pub fn load_session(&self) -> StoreResult<Option<Session>> {
        self.read_json(SESSION_FILE)
    }

    /// Removes the stored session. Returns whether one existed.
    pub fn clear_session(&self) -> StoreResult<bool> {
        let path = self.dir.join(SESSION_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    pub fn save_current_schema(&self, stored: &StoredSchema) -> StoreResult<PathBuf> {
        self.write_json(SCHEMA_FILE, stored)
    }

    /// Returns the last generated schema, if any
    pub fn load_current_schema(&self) -> StoreResult<Option<StoredSchema>> {
        self.read_json(SCHEMA_FILE)
    }

    fn ensure_dir(&self) -> StoreResult<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        }
        Ok(())
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> StoreResult<PathBuf> {
        self.ensure_dir()?;
        let path = self.dir.join(name);

        let content =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::corrupt(&path, e))?;
        fs::write(&path, content).map_err(|e| StoreError::io(&path, e))?;

        Ok(path)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Option<T>> {
        let path = self.dir.join(name);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::corrupt(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_schema() -> Schema {
        serde_json::from_value(json!({
            "name": "F1",
            "description": null,
            "account_id": 1,
            "template": []
        }))
        .unwrap()
    }

    #[test]
    fn test_session_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::new(temp_dir.path().join("ws"));

        assert_eq!(workspace.load_session().unwrap(), None);

        let session = Session::new("tok-123");
        workspace.save_session(&session).unwrap();
        assert_eq!(workspace.load_session().unwrap(), Some(session));
    }

    #[test]
    fn test_clear_session() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::new(temp_dir.path());

        assert!(!workspace.clear_session().unwrap());
        workspace.save_session(&Session::new("t")).unwrap();
        assert!(workspace.clear_session().unwrap());
        assert_eq!(workspace.load_session().unwrap(), None);
    }

    #[test]
    fn test_current_schema_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let workspace = Workspace::new(temp_dir.path());

        let stored = StoredSchema::new(sample_schema(), Some("42".into()));
        workspace.save_current_schema(&stored).unwrap();

        let loaded = workspace.load_current_schema().unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_corrupt_file_reported() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(SESSION_FILE), "not json").unwrap();

        let workspace = Workspace::new(temp_dir.path());
        assert!(matches!(
            workspace.load_session(),
            Err(StoreError::Corrupt { .. })
        ));
    }
}
