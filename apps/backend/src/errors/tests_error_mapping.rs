// Error mapping without HTTP or database
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::AppError;

#[test]
fn maps_conflicts_to_400() {
    let unique = DomainError::conflict(ConflictKind::UniqueEmail, "taken");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_EMAIL");
    assert_eq!(app.status().as_u16(), 400);

    let other = DomainError::conflict(ConflictKind::Other("Unique".into()), "dup");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::Conflict);
}

#[test]
fn maps_infra_to_500() {
    let cases = [
        (InfraErrorKind::DbUnavailable, ErrorCode::DbUnavailable),
        (InfraErrorKind::Timeout, ErrorCode::DbTimeout),
        (InfraErrorKind::Other("x".into()), ErrorCode::DbError),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::infra(kind, "boom").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 500);
    }
}

#[test]
fn maps_missing_user_to_invalid_token() {
    let app: AppError = DomainError::not_found(NotFoundKind::User, "User not found.").into();
    assert_eq!(app.code(), ErrorCode::InvalidToken);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.message(), "User not found.");
}

#[test]
fn maps_other_not_found_to_store_error() {
    let app: AppError = DomainError::not_found(NotFoundKind::Other("Record".into()), "gone").into();
    assert_eq!(app.code(), ErrorCode::RecordNotFound);
    assert_eq!(app.status().as_u16(), 500);
}
