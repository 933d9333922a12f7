use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Media category, decided by MIME type prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }
}

/// A local file selected for attachment to an ad
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub path: PathBuf,
    /// Local URL a preview can be rendered from
    pub preview_url: String,
}

impl MediaFile {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        let path = path.into();
        Self {
            name: name.into(),
            mime: mime.into(),
            size,
            preview_url: file_url(&path),
            path,
        }
    }

    /// Describe a file on disk, taking its size from metadata
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

        if !metadata.is_file() {
            anyhow::bail!("{} is not a file", path.display());
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let absolute = tokio::fs::canonicalize(path)
            .await
            .with_context(|| format!("Failed to resolve {}", path.display()))?;

        Ok(Self {
            mime: mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
            name,
            size: metadata.len(),
            preview_url: file_url(&absolute),
            path: path.to_path_buf(),
        })
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }

    pub fn is_video(&self) -> bool {
        self.kind() == MediaKind::Video
    }

    pub fn is_image(&self) -> bool {
        self.kind() == MediaKind::Image
    }
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn kind_follows_mime_prefix() {
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("application/pdf"), MediaKind::Other);
    }

    #[tokio::test]
    async fn from_path_reads_size_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("living-room.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 1234]).unwrap();

        let media = MediaFile::from_path(&path).await.unwrap();
        assert_eq!(media.name, "living-room.png");
        assert_eq!(media.mime, "image/png");
        assert_eq!(media.size, 1234);
        assert!(media.is_image());
        assert!(media.preview_url.starts_with("file://"));
        assert!(media.preview_url.ends_with("living-room.png"));
    }

    #[tokio::test]
    async fn less_common_video_extensions_are_still_videos() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["tour.m4v", "walkthrough.MPEG", "clip.ogv"] {
            let path = dir.path().join(name);
            std::fs::write(&path, [0u8; 16]).unwrap();

            let media = MediaFile::from_path(&path).await.unwrap();
            assert!(media.is_video(), "{} read as {}", name, media.mime);
        }

        let path = dir.path().join("scan.bmp");
        std::fs::write(&path, [0u8; 16]).unwrap();
        assert!(MediaFile::from_path(&path).await.unwrap().is_image());
    }

    #[tokio::test]
    async fn from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MediaFile::from_path(dir.path()).await.is_err());
    }
}
