pub mod client;
pub mod error;
pub mod format;
pub mod outcome;

pub use client::{BLOB_SIDECARS_PATH, BlobSidecarClient, HttpBlobSidecarClient};
pub use error::FetchError;
pub use format::{Format, UnknownFormat};
pub use outcome::FetchOutcome;
