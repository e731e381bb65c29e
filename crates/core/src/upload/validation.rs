//! Upload request validation.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. presence of `file` and `path`
//! 2. size against the ceiling of the declared type's class
//! 3. path safety
//! 4. extension denylist (filename and destination path)
//! 5. MIME allow-list
//! 6. leading-byte signature of the content

use toonshelf_shared::StorageSettings;
use tracing::debug;

use super::error::UploadError;
use super::signature::{FileClass, MediaType, class_of_declared};
use super::types::{UploadRequest, ValidatedUpload};

const MIB: u64 = 1024 * 1024;

/// Extensions rejected regardless of the declared content type.
pub const DENIED_EXTENSIONS: &[&str] = &[
    "exe", "bat", "cmd", "com", "sh", "bash", "ps1", "php", "phtml", "jsp", "asp", "aspx", "cgi",
    "pl", "py", "html", "htm", "xhtml", "svg", "svgz", "js", "mjs",
];

/// Size ceilings per file class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest raster image, in bytes.
    pub max_image_bytes: u64,
    /// Largest PDF document, in bytes.
    pub max_document_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_image_bytes: 10 * MIB,
            max_document_bytes: 50 * MIB,
        }
    }
}

impl UploadPolicy {
    /// Reads the ceilings from storage settings.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self {
            max_image_bytes: settings.max_image_bytes,
            max_document_bytes: settings.max_document_bytes,
        }
    }

    /// Ceiling for a class.
    #[must_use]
    pub const fn limit_for(&self, class: FileClass) -> u64 {
        match class {
            FileClass::Image => self.max_image_bytes,
            FileClass::Document => self.max_document_bytes,
        }
    }
}

/// Validates upload gateway requests before any egress.
#[derive(Debug, Clone, Default)]
pub struct UploadValidator {
    policy: UploadPolicy,
}

impl UploadValidator {
    /// Creates a validator with the given ceilings.
    #[must_use]
    pub const fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    /// Returns the size policy.
    #[must_use]
    pub const fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validates a store request.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as an [`UploadError`].
    pub fn validate(&self, request: UploadRequest) -> Result<ValidatedUpload, UploadError> {
        let (Some(file), Some(path)) = (request.file, request.path.filter(|p| !p.is_empty()))
        else {
            return Err(UploadError::MissingFileOrPath);
        };

        let limit = self.policy.limit_for(class_of_declared(&file.content_type));
        if file.len() > limit {
            debug!(size = file.len(), limit, "Upload exceeds size ceiling");
            return Err(UploadError::FileTooLarge {
                max_mb: limit.div_ceil(MIB),
            });
        }

        check_path(&path)?;

        for name in [file.filename.as_str(), path.as_str()] {
            if let Some(ext) = denied_extension(name) {
                debug!(name, ext, "Denied extension");
                return Err(UploadError::DeniedExtension(ext));
            }
        }

        let Some(media_type) = MediaType::from_mime(&file.content_type) else {
            return Err(UploadError::DisallowedMimeType(file.content_type));
        };

        if !media_type.matches(&file.data) {
            debug!(declared = media_type.mime(), "Content signature mismatch");
            return Err(UploadError::SignatureMismatch {
                declared: media_type.mime().to_string(),
            });
        }

        Ok(ValidatedUpload {
            path,
            media_type,
            data: file.data,
        })
    }

    /// Validates a delete request and returns the path to remove.
    ///
    /// # Errors
    ///
    /// Returns `MissingPath` or `UnsafePath`.
    pub fn validate_removal(&self, path: Option<&str>) -> Result<String, UploadError> {
        let path = path
            .filter(|p| !p.is_empty())
            .ok_or(UploadError::MissingPath)?;
        check_path(path)?;
        Ok(path.to_string())
    }
}

/// Rejects paths that could escape the intended storage prefix.
///
/// # Errors
///
/// Returns `UploadError::UnsafePath` for `..`, `//`, a leading `/`, or any
/// character a URL parser would read as something other than a path byte
/// (`?`, `#`, `%`, `\`, control characters).
pub fn check_path(path: &str) -> Result<(), UploadError> {
    let escapes = path.contains("..") || path.contains("//") || path.starts_with('/');
    let reinterpreted = path
        .chars()
        .any(|c| matches!(c, '?' | '#' | '%' | '\\') || c.is_control());
    if escapes || reinterpreted {
        return Err(UploadError::UnsafePath);
    }
    Ok(())
}

/// Returns the lower-cased extension of `name` when it is on the denylist.
#[must_use]
pub fn denied_extension(name: &str) -> Option<String> {
    let last = name.rsplit('/').next().unwrap_or(name);
    // `cover.svg.` and `cover.svg ` are served as `.svg` by most hosts
    let last = last.trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    let (_, ext) = last.rsplit_once('.')?;
    let ext = ext.trim().to_ascii_lowercase();
    DENIED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
