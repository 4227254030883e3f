use crate::error::auth::AuthError;

use common::{ErrorLocation, RedactedSecret};
use models::AccessToken;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const SESSION_FILE_NAME: &str = "session.json";

/// Signed-in user and token as restored from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub username: String,
    pub token: AccessToken,
    pub saved_at: SystemTime,
}

/// On-disk shape. The token is only exposed here, right before writing.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    username: String,
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    saved_at: String,
}

fn default_token_type() -> String {
    String::from("bearer")
}

/// Persists the access token between runs as `session.json` next to the
/// config file. Written atomically and, on unix, readable by the owner only.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join(SESSION_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nobody has signed in yet.
    pub fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        if !self.path.exists() {
            debug!("No stored session at {}", self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| AuthError::StoreRead {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        let file: SessionFile = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse stored session at {}: {e}", self.path.display());
            AuthError::StoreParse {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        let saved_at = humantime::parse_rfc3339(&file.saved_at).map_err(|e| AuthError::StoreParse {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: format!("invalid saved_at '{}': {e}", file.saved_at),
        })?;

        if file.access_token.is_empty() {
            return Err(AuthError::StoreParse {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: String::from("empty access_token"),
            });
        }

        Ok(Some(StoredSession {
            username: file.username,
            token: AccessToken {
                access_token: RedactedSecret::new(file.access_token),
                token_type: file.token_type,
            },
            saved_at,
        }))
    }

    pub fn save(&self, username: &str, token: &AccessToken) -> Result<(), AuthError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| AuthError::StoreWrite {
                location: ErrorLocation::from(Location::caller()),
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let file = SessionFile {
            username: username.to_string(),
            access_token: token.access_token.expose().to_string(),
            token_type: token.token_type.clone(),
            saved_at: humantime::format_rfc3339_seconds(SystemTime::now()).to_string(),
        };

        let json = serde_json::to_string_pretty(&file).map_err(|e| AuthError::StoreParse {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let temp_path = self.path.with_extension("json.tmp");

        std::fs::write(&temp_path, json).map_err(|e| AuthError::StoreWrite {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        restrict_permissions(&temp_path)?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| AuthError::StoreWrite {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        info!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored session. Missing file is not an error.
    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::StoreWrite {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), AuthError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(|e| AuthError::StoreWrite {
        location: ErrorLocation::from(Location::caller()),
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), AuthError> {
    Ok(())
}
