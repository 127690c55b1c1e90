//! Integration tests for the API surface.
//!
//! These tests exercise the wire contract (error codes, response shapes)
//! and the domain types without requiring database or Redis connections.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use matchmaking_api::domain::{Match, MatchResponse, PublicProfile, User, UserResponse};
use matchmaking_api::errors::AppError;
use matchmaking_api::services::Claims;
use matchmaking_api::types::{Paginated, PaginationParams};

fn test_user() -> User {
    User {
        id: Uuid::new_v4(),
        city_id: 1,
        first_name: "Jeanne".to_string(),
        last_name: "Martin".to_string(),
        email: "jeanne.martin@example.com".to_string(),
        phone_number: Some("+33612345678".to_string()),
        password_hash: "hashed".to_string(),
        birthdate: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
        profile_picture_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_match(organizer_id: Uuid) -> Match {
    let now = Utc::now();
    Match {
        id: Uuid::new_v4(),
        organizer_id,
        sport_id: 1,
        latitude: 47.218,
        longitude: -1.553,
        min_players: 10,
        max_players: 22,
        price: Decimal::new(250, 2),
        duration_minutes: 90,
        scheduled_at: now + chrono::Duration::days(3),
        description: Some("Friendly game".to_string()),
        recommended_level: 2,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Error Wire Contract Tests
// =============================================================================

async fn error_body(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn invalid_header_is_bad_request_with_error_code() {
    let (status, body) = error_body(AppError::InvalidHeader).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_header");
    assert!(body["error_description"].is_string());
}

#[tokio::test]
async fn invalid_grant_is_bad_request() {
    let (status, body) = error_body(AppError::InvalidGrant).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_grant");
}

#[tokio::test]
async fn invalid_request_carries_description() {
    let (status, body) = error_body(AppError::invalid_request("This match is full.")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert_eq!(body["error_description"], "This match is full.");
}

#[tokio::test]
async fn forbidden_is_403() {
    let (status, body) = error_body(AppError::Forbidden).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn not_found_is_404() {
    let (status, body) = error_body(AppError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn internal_error_hides_details() {
    let (status, body) = error_body(AppError::internal("secret stack trace")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("error_description").is_none());
}

// =============================================================================
// Response Shape Tests
// =============================================================================

#[tokio::test]
async fn user_response_never_exposes_password_hash() {
    let user = test_user();
    let json = serde_json::to_value(UserResponse::from(user)).unwrap();

    assert!(json.get("password_hash").is_none());
    assert_eq!(json["first_name"], "Jeanne");
}

#[tokio::test]
async fn public_profile_hides_private_fields() {
    let user = test_user();
    let json = serde_json::to_value(PublicProfile::from(user)).unwrap();

    assert!(json.get("email").is_none());
    assert!(json.get("phone_number").is_none());
    assert!(json.get("birthdate").is_none());
    assert_eq!(json["last_name"], "Martin");
}

#[tokio::test]
async fn match_response_renders_duration() {
    let m = test_match(Uuid::new_v4());
    let response = MatchResponse::from(m);

    assert_eq!(response.duration, "01:30");
    assert_eq!(response.duration_minutes, 90);
    assert!(response.participant_count.is_none());
}

#[tokio::test]
async fn match_response_with_participants() {
    let m = test_match(Uuid::new_v4());
    let response = MatchResponse::from(m).with_participants(7);

    let json = serde_json::to_value(response).unwrap();
    assert_eq!(json["participant_count"], 7);
}

#[tokio::test]
async fn paginated_meta_is_consistent() {
    let params = PaginationParams::new(Some(2), Some(10));
    let page: Paginated<i32> = Paginated::new(vec![1, 2, 3], &params, 23);

    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.per_page, 10);
    assert_eq!(page.meta.total, 23);
    assert_eq!(page.meta.total_pages, 3);
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn organizer_check() {
    let organizer = Uuid::new_v4();
    let m = test_match(organizer);

    assert!(m.is_organizer(organizer));
    assert!(!m.is_organizer(Uuid::new_v4()));
}

#[tokio::test]
async fn claims_structure() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    assert!(claims.exp > claims.iat);
    assert!(!claims.jti.is_empty());
}

// =============================================================================
// Password Hashing Tests
// =============================================================================

#[tokio::test]
async fn password_hashing_roundtrip() {
    use matchmaking_api::domain::Password;

    let plain = "secure_password_123";
    let hash: String = Password::new(plain).expect("Hashing should succeed").into();

    assert_ne!(hash.as_str(), plain);

    let stored = Password::from_hash(hash);
    assert!(stored.verify(plain));
    assert!(!stored.verify("wrong_password"));
}

#[tokio::test]
async fn password_hashes_are_salted() {
    use matchmaking_api::domain::Password;

    let plain = "same_password";
    let hash1: String = Password::new(plain).unwrap().into();
    let hash2: String = Password::new(plain).unwrap().into();

    // Same password, different salt, different hash
    assert_ne!(hash1, hash2);
    assert!(Password::from_hash(hash1).verify(plain));
    assert!(Password::from_hash(hash2).verify(plain));
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    use matchmaking_api::domain::Password;

    let result = Password::new("short");
    assert!(matches!(result, Err(AppError::InvalidRequest(_))));
}
