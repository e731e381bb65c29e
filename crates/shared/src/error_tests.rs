use super::*;

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::unauthorized().status_code(), 401);
    assert_eq!(AppError::forbidden().status_code(), 403);
    assert_eq!(AppError::Validation("test".into()).status_code(), 400);
    assert_eq!(
        AppError::StorageConfiguration("test".into()).status_code(),
        500
    );
    assert_eq!(AppError::StorageOperation("test".into()).status_code(), 500);
    assert_eq!(AppError::Database("test".into()).status_code(), 500);
    assert_eq!(AppError::Internal("test".into()).status_code(), 500);
}

#[test]
fn test_app_error_error_codes() {
    assert_eq!(AppError::unauthorized().error_code(), "UNAUTHORIZED");
    assert_eq!(AppError::forbidden().error_code(), "FORBIDDEN");
    assert_eq!(
        AppError::Validation("test".into()).error_code(),
        "VALIDATION_ERROR"
    );
    assert_eq!(
        AppError::StorageConfiguration("test".into()).error_code(),
        "STORAGE_CONFIGURATION_ERROR"
    );
    assert_eq!(
        AppError::StorageOperation("test".into()).error_code(),
        "STORAGE_OPERATION_ERROR"
    );
    assert_eq!(
        AppError::Database("test".into()).error_code(),
        "DATABASE_ERROR"
    );
    assert_eq!(
        AppError::Internal("test".into()).error_code(),
        "INTERNAL_ERROR"
    );
}

#[test]
fn test_display_is_bare_message() {
    assert_eq!(AppError::unauthorized().to_string(), "Unauthorized");
    assert_eq!(AppError::forbidden().to_string(), "Forbidden");
    assert_eq!(
        AppError::Validation("File too large. Maximum size is 50MB".into()).to_string(),
        "File too large. Maximum size is 50MB"
    );
}

#[test]
fn test_is_auth_failure() {
    assert!(AppError::unauthorized().is_auth_failure());
    assert!(AppError::forbidden().is_auth_failure());
    assert!(!AppError::Validation("x".into()).is_auth_failure());
    assert!(!AppError::Database("x".into()).is_auth_failure());
}
