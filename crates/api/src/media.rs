//! Voice attachment storage.
//!
//! Chat messages may carry a voice clip uploaded as a multipart part. The
//! [`MediaStore`] trait abstracts where the bytes land; the default
//! [`LocalMediaStore`] writes them under a configured directory served back
//! at `/media/<file>`.

use async_trait::async_trait;
use salonet_core::error::CoreError;
use uuid::Uuid;

/// Maximum accepted voice clip size: 12 MB.
pub const MAX_VOICE_BYTES: usize = 12 * 1024 * 1024;

/// Storage backend for uploaded voice clips.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist the clip and return its public URL.
    async fn store_voice(&self, data: &[u8], content_type: &str) -> Result<String, CoreError>;
}

/// Filesystem-backed media store.
pub struct LocalMediaStore {
    dir: std::path::PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    /// Create a store rooted at `dir`; the directory is created if missing.
    pub fn new(dir: impl Into<std::path::PathBuf>, public_base_url: &str) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store_voice(&self, data: &[u8], content_type: &str) -> Result<String, CoreError> {
        let ext = extension_for(content_type);
        let file_name = format!("{}.{ext}", Uuid::new_v4());
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to store voice clip: {e}")))?;

        tracing::debug!(file = %file_name, bytes = data.len(), "Stored voice clip");
        Ok(format!("{}/media/{file_name}", self.public_base_url))
    }
}

/// Pick a file extension for a known audio MIME type, defaulting to `bin`.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "audio/webm" => "webm",
        "audio/ogg" => "ogg",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/aac" => "aac",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("audio/webm"), "webm");
        assert_eq!(extension_for("audio/mpeg"), "mp3");
        assert_eq!(extension_for("audio/wav"), "wav");
        assert_eq!(extension_for("audio/whatever"), "bin");
    }

    #[tokio::test]
    async fn test_store_voice_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store =
            LocalMediaStore::new(dir.path(), "http://localhost:3000/").expect("store creation");

        let url = store
            .store_voice(b"fake-audio-bytes", "audio/ogg")
            .await
            .expect("store should succeed");

        assert!(url.starts_with("http://localhost:3000/media/"));
        assert!(url.ends_with(".ogg"));

        let file_name = url.rsplit('/').next().unwrap();
        let stored = std::fs::read(dir.path().join(file_name)).expect("file should exist");
        assert_eq!(stored, b"fake-audio-bytes");
    }
}
