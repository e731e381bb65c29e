//! Upload validation errors.

use thiserror::Error;
use toonshelf_shared::AppError;

/// Reasons an upload request is rejected before any storage call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// `file` or `path` missing from a store request.
    #[error("File and path are required")]
    MissingFileOrPath,

    /// `path` missing from a delete request.
    #[error("Path is required")]
    MissingPath,

    /// File exceeds the ceiling of its size class.
    #[error("File too large. Maximum size is {max_mb}MB")]
    FileTooLarge {
        /// Ceiling in whole megabytes.
        max_mb: u64,
    },

    /// Path could escape its prefix or be re-read by a URL parser.
    #[error("Invalid path")]
    UnsafePath,

    /// Filename or path ends with an executable/script/markup extension.
    #[error("File type not allowed")]
    DeniedExtension(String),

    /// Declared content type is not on the allow-list.
    #[error("Invalid file type. Allowed: JPEG, PNG, GIF, WebP, PDF")]
    DisallowedMimeType(String),

    /// Leading bytes do not match the declared type.
    #[error("File content does not match declared type")]
    SignatureMismatch {
        /// Declared MIME type.
        declared: String,
    },

    /// Unknown `action` field.
    #[error("Invalid action '{0}'. Use 'upload' or 'delete'")]
    InvalidAction(String),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        Self::Validation(err.to_string())
    }
}
