use crate::media::file::{MediaFile, MediaKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MEGABYTE: u64 = 1024 * 1024;

/// Why an attachment set was refused; `Display` is the user-facing reason
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("At least one file is required")]
    NoFiles,
    #[error("Only {max} video can be attached")]
    TooManyVideos { count: usize, max: usize },
    #[error("With a video you can attach at most {cap} photos")]
    TooManyPhotosWithVideo { count: usize, cap: usize },
    #[error("You can attach at most {cap} photos")]
    TooManyPhotos { count: usize, cap: usize },
    #[error("You can attach at most {max} files")]
    TooManyFiles { count: usize, max: usize },
    #[error("{name} is not a photo or video")]
    UnsupportedType { name: String },
    #[error("{name} is too large: a {kind} must not exceed {limit_mb} MB")]
    FileTooLarge {
        name: String,
        kind: &'static str,
        size: u64,
        limit_mb: u64,
    },
}

/// Which ad form the attachments come from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
    /// Quick-create dialog
    #[default]
    Modal,
    /// Full-page editor
    Page,
}

impl FromStr for FormVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modal" => Ok(FormVariant::Modal),
            "page" => Ok(FormVariant::Page),
            other => anyhow::bail!("unknown form variant '{}', expected 'modal' or 'page'", other),
        }
    }
}

/// Limits applied to an ad's attachment set
///
/// The two ad forms historically disagreed on the video limits, so both are
/// kept as presets of the same validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaPolicy {
    pub max_items: usize,
    pub max_videos: usize,
    pub photo_cap: usize,
    pub photo_cap_with_video: usize,
    pub max_photo_bytes: u64,
    pub max_video_bytes: u64,
}

impl MediaPolicy {
    /// Quick-create dialog: a video plus at most 2 photos, video up to 20 MB
    pub fn modal() -> Self {
        Self {
            max_items: 5,
            max_videos: 1,
            photo_cap: 5,
            photo_cap_with_video: 2,
            max_photo_bytes: 2 * MEGABYTE,
            max_video_bytes: 20 * MEGABYTE,
        }
    }

    /// Full-page editor: a video plus at most 4 photos, video up to 10 MB
    pub fn page() -> Self {
        Self {
            photo_cap_with_video: 4,
            max_video_bytes: 10 * MEGABYTE,
            ..Self::modal()
        }
    }

    pub fn for_variant(variant: FormVariant) -> Self {
        match variant {
            FormVariant::Modal => Self::modal(),
            FormVariant::Page => Self::page(),
        }
    }

    /// Validate a proposed set, reporting the first rule it breaks
    ///
    /// An empty set passes here; emptiness only matters at submit time.
    pub fn check(&self, files: &[MediaFile]) -> Result<(), MediaError> {
        let videos = files.iter().filter(|f| f.is_video()).count();
        if videos > self.max_videos {
            return Err(MediaError::TooManyVideos {
                count: videos,
                max: self.max_videos,
            });
        }

        let photos = files.len() - videos;
        if videos > 0 && photos > self.photo_cap_with_video {
            return Err(MediaError::TooManyPhotosWithVideo {
                count: photos,
                cap: self.photo_cap_with_video,
            });
        }
        if videos == 0 && photos > self.photo_cap {
            return Err(MediaError::TooManyPhotos {
                count: photos,
                cap: self.photo_cap,
            });
        }

        if files.len() > self.max_items {
            return Err(MediaError::TooManyFiles {
                count: files.len(),
                max: self.max_items,
            });
        }

        for file in files {
            let (kind, limit) = match file.kind() {
                MediaKind::Image => ("photo", self.max_photo_bytes),
                MediaKind::Video => ("video", self.max_video_bytes),
                MediaKind::Other => {
                    return Err(MediaError::UnsupportedType {
                        name: file.name.clone(),
                    })
                }
            };

            if file.size > limit {
                return Err(MediaError::FileTooLarge {
                    name: file.name.clone(),
                    kind,
                    size: file.size,
                    limit_mb: limit / MEGABYTE,
                });
            }
        }

        Ok(())
    }

    /// Validate a set about to be submitted: same as [`check`](Self::check)
    /// but an empty set is refused
    pub fn check_submission(&self, files: &[MediaFile]) -> Result<(), MediaError> {
        if files.is_empty() {
            return Err(MediaError::NoFiles);
        }
        self.check(files)
    }
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self::modal()
    }
}
