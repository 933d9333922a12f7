pub mod attachments;
pub mod file;
pub mod policy;

pub use attachments::{accept_files, AttachmentSet};
pub use file::{MediaFile, MediaKind};
pub use policy::{FormVariant, MediaError, MediaPolicy, MEGABYTE};
