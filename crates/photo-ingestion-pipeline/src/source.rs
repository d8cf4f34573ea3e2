//! Where photo bytes come from.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// One user-selected file.
#[async_trait]
pub trait PhotoSource: Send + Sync + 'static {
    /// File name as shown to the user.
    fn name(&self) -> &str;

    /// Declared media type, if the source knows one.
    fn media_type(&self) -> Option<&str>;

    /// Read the whole file.
    async fn read(&self) -> std::io::Result<Vec<u8>>;
}

/// A file on disk. The declared media type comes from the extension.
#[derive(Debug, Clone)]
pub struct DiskPhoto {
    path: PathBuf,
    name: String,
    media_type: Option<String>,
}

impl DiskPhoto {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let media_type = media_type_for_path(&path);
        Self {
            path,
            name,
            media_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PhotoSource for DiskPhoto {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Bytes already in memory, e.g. handed over by an embedding host.
#[derive(Debug, Clone)]
pub struct MemoryPhoto {
    name: String,
    media_type: Option<String>,
    bytes: Vec<u8>,
}

impl MemoryPhoto {
    pub fn new(name: impl Into<String>, media_type: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl PhotoSource for MemoryPhoto {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

fn media_type_for_path(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    image::ImageFormat::from_extension(extension).map(|format| format.to_mime_type().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn disk_photo_name_and_type_from_path() {
        let photo = DiskPhoto::new("/tmp/party/Cake.JPG");
        assert_eq!(photo.name(), "Cake.JPG");
        assert_eq!(photo.media_type(), Some("image/jpeg"));

        let png = DiskPhoto::new("balloons.png");
        assert_eq!(png.media_type(), Some("image/png"));
    }

    #[test]
    fn unknown_extension_has_no_declared_type() {
        assert_eq!(DiskPhoto::new("notes.txt").media_type(), None);
        assert_eq!(DiskPhoto::new("no_extension").media_type(), None);
    }

    #[tokio::test]
    async fn disk_photo_reads_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiny.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let photo = DiskPhoto::new(&path);
        assert_eq!(photo.read().await.unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let photo = DiskPhoto::new(dir.path().join("gone.png"));
        let err = photo.read().await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn memory_photo_returns_its_bytes() {
        let photo = MemoryPhoto::new("a.bin", None, vec![1, 2, 3]);
        assert_eq!(photo.name(), "a.bin");
        assert_eq!(photo.media_type(), None);
        assert_eq!(photo.read().await.unwrap(), vec![1, 2, 3]);
    }
}
