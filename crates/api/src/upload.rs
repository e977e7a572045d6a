//! Local-disk storage for images uploaded with a new hero.
//!
//! Files are written to the configured upload directory under a
//! timestamp-derived name that keeps the original extension, and are served
//! back under [`UPLOAD_ROUTE`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use heroes_core::document::Document;
use serde_json::Value;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Multipart field that carries the image file.
pub const IMAGE_FIELD: &str = "image";

/// Public URL prefix the upload directory is mounted at.
pub const UPLOAD_ROUTE: &str = "/uploads";

/// Longest extension kept from the client's file name.
const MAX_EXTENSION_LEN: usize = 10;

/// Suffixed names tried for one timestamp before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name inside the upload directory.
    pub file_name: String,
    /// Public URL (`/uploads/<file_name>`).
    pub url: String,
}

impl StoredImage {
    /// The `images` document stored on the hero: `{ "url": ... }`.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("url".into(), Value::String(self.url.clone()));
        doc
    }
}

/// Upload directory handle shared through application state.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` under a freshly generated name.
    ///
    /// Names are claimed with `create_new`, so concurrent uploads in the same
    /// millisecond get distinct `-<n>` suffixes instead of overwriting.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> std::io::Result<StoredImage> {
        self.save_at(original_name, data, chrono::Utc::now().timestamp_millis())
            .await
    }

    async fn save_at(
        &self,
        original_name: &str,
        data: &[u8],
        millis: i64,
    ) -> std::io::Result<StoredImage> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = generate_file_name(original_name, millis, attempt);
            let path = self.dir.join(&file_name);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            if let Err(e) = write_contents(&mut file, data).await {
                drop(file);
                let _ = tokio::fs::remove_file(&path).await;
                return Err(e);
            }

            return Ok(StoredImage {
                url: format!("{UPLOAD_ROUTE}/{file_name}"),
                file_name,
            });
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free upload name for timestamp {millis}"),
        ))
    }

    /// Remove a previously stored file. Missing files are not an error.
    pub async fn remove(&self, image: &StoredImage) -> std::io::Result<()> {
        match tokio::fs::remove_file(self.dir.join(&image.file_name)).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

async fn write_contents(file: &mut tokio::fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await
}

/// `<millis>.<ext>`, or just `<millis>` when the original has no usable
/// extension. The extension is lower-cased and must be alphanumeric.
/// Retries (`attempt > 0`) append `-<attempt>` to the stem.
pub fn generate_file_name(original_name: &str, millis: i64, attempt: u32) -> String {
    let stem = match attempt {
        0 => millis.to_string(),
        n => format!("{millis}-{n}"),
    };
    match extension(original_name) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn extension(original_name: &str) -> Option<String> {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| {
            !e.is_empty()
                && e.len() <= MAX_EXTENSION_LEN
                && e.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|e| e.to_ascii_lowercase())
}
