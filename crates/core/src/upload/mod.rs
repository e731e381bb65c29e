//! Upload request validation for the media gateway.
//!
//! Nothing in here performs I/O: a request either becomes a
//! [`ValidatedUpload`] or is rejected with an [`UploadError`] before any
//! storage host is contacted.

mod error;
mod signature;
mod types;
mod validation;

pub use error::UploadError;
pub use signature::{FileClass, MediaType, SIGNATURE_LEN};
pub use types::{FileUpload, UploadOperation, UploadRequest, ValidatedUpload};
pub use validation::{
    DENIED_EXTENSIONS, UploadPolicy, UploadValidator, check_path, denied_extension,
};
