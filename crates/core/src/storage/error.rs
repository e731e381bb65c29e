//! Storage error types.

use thiserror::Error;
use toonshelf_shared::AppError;

/// Which storage call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    /// PUT of an object.
    Upload,
    /// DELETE of an object.
    Delete,
}

impl std::fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Upload => "upload",
            Self::Delete => "delete",
        })
    }
}

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Zone, access key, or CDN hostname missing from configuration.
    #[error("Storage not configured properly")]
    NotConfigured,

    /// Every candidate host answered 401.
    #[error(
        "Storage authentication failed on every endpoint ({}). Verify the access key is the \
         storage zone password (not the account API key) and that the storage zone name is \
         correct, or set the storage region explicitly.",
        .hosts.join(", ")
    )]
    AllHostsUnauthorized {
        /// Operation attempted.
        operation: StorageOperation,
        /// Hosts tried, in order.
        hosts: Vec<String>,
    },

    /// A host answered with a terminal non-success status.
    #[error("Failed to {operation} file ({status} from {host}): {body}")]
    Rejected {
        /// Operation attempted.
        operation: StorageOperation,
        /// Host that answered.
        host: String,
        /// HTTP status.
        status: u16,
        /// Upstream response body.
        body: String,
    },

    /// The request never got a response.
    #[error("Failed to {operation} file: could not reach {host}: {message}")]
    Transport {
        /// Operation attempted.
        operation: StorageOperation,
        /// Host contacted.
        host: String,
        /// Transport error text.
        message: String,
    },
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotConfigured => Self::StorageConfiguration(err.to_string()),
            _ => Self::StorageOperation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_unauthorized_lists_hosts() {
        let err = StorageError::AllHostsUnauthorized {
            operation: StorageOperation::Upload,
            hosts: vec![
                "storage.bunnycdn.com".to_string(),
                "ny.storage.bunnycdn.com".to_string(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("storage.bunnycdn.com, ny.storage.bunnycdn.com"));
        assert!(msg.contains("storage zone password"));
    }

    #[test]
    fn test_rejected_surfaces_upstream_body() {
        let err = StorageError::Rejected {
            operation: StorageOperation::Delete,
            host: "la.storage.bunnycdn.com".to_string(),
            status: 500,
            body: "zone is locked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to delete file (500 from la.storage.bunnycdn.com): zone is locked"
        );
    }

    #[test]
    fn test_app_error_mapping() {
        assert!(matches!(
            AppError::from(StorageError::NotConfigured),
            AppError::StorageConfiguration(_)
        ));
        let app: AppError = StorageError::Transport {
            operation: StorageOperation::Upload,
            host: "h".to_string(),
            message: "dns".to_string(),
        }
        .into();
        assert_eq!(app.status_code(), 500);
        assert!(matches!(app, AppError::StorageOperation(_)));
    }
}
