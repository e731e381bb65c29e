//! Upload request types.

use bytes::Bytes;

use super::error::UploadError;
use super::signature::MediaType;

/// What the caller wants done with the destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadOperation {
    /// Write the file (`action=upload`).
    #[default]
    Store,
    /// Delete the object (`action=delete`).
    Remove,
}

impl UploadOperation {
    /// Parses the form `action` field. Absent or blank means `upload`.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::InvalidAction` for anything other than `upload` or `delete`.
    pub fn parse(action: Option<&str>) -> Result<Self, UploadError> {
        match action.map(str::trim) {
            None | Some("" | "upload") => Ok(Self::Store),
            Some("delete") => Ok(Self::Remove),
            Some(other) => Err(UploadError::InvalidAction(other.to_string())),
        }
    }
}

/// The `file` part of the multipart form.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Client-side filename.
    pub filename: String,
    /// Declared content type.
    pub content_type: String,
    /// Raw content.
    pub data: Bytes,
}

impl FileUpload {
    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A parsed upload gateway request.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Uploaded file, if any.
    pub file: Option<FileUpload>,
    /// Destination path inside the storage zone.
    pub path: Option<String>,
    /// Requested operation.
    pub operation: UploadOperation,
}

/// A store request that passed every check.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Safe destination path.
    pub path: String,
    /// Verified media type.
    pub media_type: MediaType,
    /// Raw content.
    pub data: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation() {
        assert_eq!(UploadOperation::parse(None).unwrap(), UploadOperation::Store);
        assert_eq!(
            UploadOperation::parse(Some("")).unwrap(),
            UploadOperation::Store
        );
        assert_eq!(
            UploadOperation::parse(Some("upload")).unwrap(),
            UploadOperation::Store
        );
        assert_eq!(
            UploadOperation::parse(Some("delete")).unwrap(),
            UploadOperation::Remove
        );
        assert!(matches!(
            UploadOperation::parse(Some("purge")),
            Err(UploadError::InvalidAction(a)) if a == "purge"
        ));
    }
}
