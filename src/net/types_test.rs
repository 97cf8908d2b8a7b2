use super::*;

fn make_user_json(email: Option<&str>, is_verified: bool) -> String {
    serde_json::json!({
        "id": "3f2d9c61-6a3e-4f0a-9c5a-1b2e3d4f5a6b",
        "email": email,
        "is_verified": is_verified,
        "is_superuser": false,
        "created_at": "2025-06-01T12:00:00Z"
    })
    .to_string()
}

// =============================================================================
// User
// =============================================================================

#[test]
fn user_deserializes_registered_account() {
    let user: User = serde_json::from_str(&make_user_json(Some("a@b.com"), true)).unwrap();
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
    assert!(user.is_verified);
    assert!(!user.is_superuser);
    assert!(!user.is_anonymous());
    assert_eq!(user.created_at, "2025-06-01T12:00:00Z");
}

#[test]
fn user_deserializes_anonymous_account() {
    let user: User = serde_json::from_str(&make_user_json(None, false)).unwrap();
    assert!(user.email.is_none());
    assert!(!user.is_verified);
    assert!(user.is_anonymous());
}

#[test]
fn user_rejects_malformed_id() {
    let raw = serde_json::json!({
        "id": "not-a-uuid",
        "email": null,
        "is_verified": false,
        "is_superuser": false,
        "created_at": "2025-06-01T12:00:00Z"
    })
    .to_string();
    assert!(serde_json::from_str::<User>(&raw).is_err());
}

#[test]
fn user_round_trips_through_serde() {
    let user: User = serde_json::from_str(&make_user_json(Some("a@b.com"), true)).unwrap();
    let raw = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&raw).unwrap();
    assert_eq!(user, back);
}

// =============================================================================
// TokenResponse
// =============================================================================

#[test]
fn token_response_deserializes_envelope() {
    let raw = serde_json::json!({
        "access_token": "tok-123",
        "token_type": "bearer",
        "user": {
            "id": "3f2d9c61-6a3e-4f0a-9c5a-1b2e3d4f5a6b",
            "email": null,
            "is_verified": false,
            "is_superuser": false,
            "created_at": "2025-06-01T12:00:00Z"
        }
    })
    .to_string();
    let grant: TokenResponse = serde_json::from_str(&raw).unwrap();
    assert_eq!(grant.access_token, "tok-123");
    assert_eq!(grant.token_type, "bearer");
    assert!(grant.user.is_anonymous());
}

// =============================================================================
// ApiError
// =============================================================================

#[test]
fn unauthorized_only_for_status_401() {
    let unauthorized = ApiError::Status { status: 401, detail: "Could not validate credentials".into() };
    assert!(unauthorized.is_unauthorized());

    let conflict = ApiError::Status { status: 409, detail: "Email already registered".into() };
    assert!(!conflict.is_unauthorized());

    let transport = ApiError::Request("connection refused".into());
    assert!(!transport.is_unauthorized());
}

#[test]
fn error_display_includes_status_and_detail() {
    let err = ApiError::Status { status: 409, detail: "Email already registered".into() };
    assert_eq!(err.to_string(), "status 409: Email already registered");
}
