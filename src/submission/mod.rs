pub mod form;
pub mod workflow;

pub use form::{compose, AdForm, VehicleForm};
pub use workflow::{AdSubmission, SubmitError};
