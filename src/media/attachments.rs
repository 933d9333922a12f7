use crate::media::file::MediaFile;
use crate::media::policy::{MediaError, MediaPolicy};
use crate::toast::ToastQueue;
use tracing::debug;

/// Ordered media files attached to an ad draft
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentSet {
    files: Vec<MediaFile>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `new` to the current files if the combined set satisfies `policy`
    ///
    /// On error the stored files are left exactly as they were.
    pub fn try_add(&mut self, policy: &MediaPolicy, new: Vec<MediaFile>) -> Result<(), MediaError> {
        let mut combined = self.files.clone();
        combined.extend(new);

        policy.check(&combined)?;

        debug!("Attachment set now holds {} file(s)", combined.len());
        self.files = combined;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<MediaFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[MediaFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn photo_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_video()).count()
    }

    pub fn video(&self) -> Option<&MediaFile> {
        self.files.iter().find(|f| f.is_video())
    }
}

/// File-picker entry point: add `files` or raise an error toast
pub fn accept_files(
    set: &mut AttachmentSet,
    policy: &MediaPolicy,
    files: Vec<MediaFile>,
    toasts: &ToastQueue,
) -> bool {
    match set.try_add(policy, files) {
        Ok(()) => true,
        Err(e) => {
            toasts.error("Invalid files", e.to_string());
            false
        }
    }
}
