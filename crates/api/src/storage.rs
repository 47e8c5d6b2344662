//! Avatar image storage on the local filesystem.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

/// Largest accepted avatar, in bytes.
pub const MAX_AVATAR_BYTES: usize = 2 * 1024 * 1024;

/// URL prefix the upload directory is served under.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Errors from storing an avatar.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Only image files can be used as an avatar (got {0})")]
    NotAnImage(String),

    #[error("Avatar is too large ({size} bytes, max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Avatar upload is empty")]
    Empty,

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn is_user_error(&self) -> bool {
        !matches!(self, StorageError::Io(_))
    }
}

/// Writes avatars under `<root>/<owner-id>/<unix-millis>-<file>`.
#[derive(Debug, Clone)]
pub struct AvatarStore {
    root: PathBuf,
}

impl AvatarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store an avatar and return its key relative to the root.
    pub async fn save(
        &self,
        owner_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let filename = sanitize(filename)
            .ok_or_else(|| StorageError::InvalidName(filename.to_string()))?;
        let owner_dir = sanitize(owner_id)
            .ok_or_else(|| StorageError::InvalidName(owner_id.to_string()))?;

        let mime = mime_guess::from_path(&filename).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(StorageError::NotAnImage(mime.to_string()));
        }

        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(StorageError::TooLarge {
                size: bytes.len(),
                max: MAX_AVATAR_BYTES,
            });
        }

        let key = format!("{}/{}-{}", owner_dir, Utc::now().timestamp_millis(), filename);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(owner_id = %owner_id, key = %key, size = bytes.len(), "Stored avatar");
        Ok(key)
    }
}

/// Public URL for a stored key.
pub fn public_url(key: &str) -> String {
    format!("{}/{}", UPLOADS_PREFIX, key)
}

/// Keep ASCII letters, digits, `.`, `-`, and `_`; refuse names that would
/// escape the directory.
fn sanitize(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return None;
    }
    Some(cleaned)
}
