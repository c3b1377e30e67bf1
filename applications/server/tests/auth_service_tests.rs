/// Authentication service tests
/// Tests JWT generation, password hashing, token validation
mod common;

use common::{create_test_auth_service, fixtures, TestApp};
use spendwise_core::{types::NewUser, User, UserId, UserStore};
use spendwise_server::{services::auth::AuthService, IdentityResolver};

/// Test password hashing produces valid bcrypt hashes
#[tokio::test]
async fn test_password_hashing() {
    let auth_service = create_test_auth_service();

    let hash = auth_service.hash_password(fixtures::TEST_PASSWORD).unwrap();

    assert!(hash.starts_with("$2"), "Hash should be a bcrypt hash");
    assert_ne!(hash, fixtures::TEST_PASSWORD);

    // Salted: hashing twice gives different hashes
    let second = auth_service.hash_password(fixtures::TEST_PASSWORD).unwrap();
    assert_ne!(hash, second);
}

#[tokio::test]
async fn test_password_verification() {
    let auth_service = create_test_auth_service();
    let hash = auth_service.hash_password(fixtures::TEST_PASSWORD).unwrap();

    assert!(auth_service.verify_password(fixtures::TEST_PASSWORD, &hash).unwrap());
    assert!(!auth_service.verify_password("WrongPassword", &hash).unwrap());
}

#[tokio::test]
async fn test_password_verification_invalid_hash() {
    let auth_service = create_test_auth_service();

    let result = auth_service.verify_password(fixtures::TEST_PASSWORD, "not-a-hash");
    assert!(result.is_err(), "Invalid hash should produce an error");
}

#[tokio::test]
async fn test_access_token_resolves_identity() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::new("user123");

    let token = auth_service.create_access_token(&user_id).unwrap();

    assert_eq!(auth_service.verify_access_token(&token).unwrap(), user_id);
    assert_eq!(auth_service.resolve_identity(&token).unwrap(), user_id);
}

#[tokio::test]
async fn test_refresh_token_does_not_resolve_identity() {
    let auth_service = create_test_auth_service();
    let user_id = UserId::new("user123");

    let refresh_token = auth_service.create_refresh_token(&user_id).unwrap();

    assert_eq!(auth_service.verify_refresh_token(&refresh_token).unwrap(), user_id);
    assert!(auth_service.resolve_identity(&refresh_token).is_err());
}

/// Test token validation with a token signed by another secret
#[tokio::test]
async fn test_token_validation_invalid_signature() {
    let auth_service = create_test_auth_service();

    let other_auth = AuthService::new("different-secret".to_string(), 1, 1);
    let token = other_auth.create_access_token(&UserId::new("user123")).unwrap();

    let result = auth_service.resolve_identity(&token);
    assert!(result.is_err(), "Token with wrong signature should fail validation");
}

#[tokio::test]
async fn test_token_validation_malformed_or_empty() {
    let auth_service = create_test_auth_service();

    assert!(auth_service.resolve_identity("not.a.valid.jwt.token").is_err());
    assert!(auth_service.resolve_identity("").is_err());
}

/// Test complete authentication flow with database
#[tokio::test]
async fn test_complete_authentication_flow() {
    let app = TestApp::new().await;
    let auth_service = create_test_auth_service();

    let user = create_user(&app, &auth_service, fixtures::TEST_EMAIL, fixtures::TEST_PASSWORD).await;

    // Simulate login: retrieve hash and verify password
    let (found, stored_hash) = app
        .store
        .find_credentials(fixtures::TEST_EMAIL)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
    assert!(auth_service
        .verify_password(fixtures::TEST_PASSWORD, &stored_hash)
        .unwrap());

    let access_token = auth_service.create_access_token(&user.id).unwrap();
    let refresh_token = auth_service.create_refresh_token(&user.id).unwrap();

    assert_eq!(auth_service.resolve_identity(&access_token).unwrap(), user.id);
    assert_eq!(auth_service.verify_refresh_token(&refresh_token).unwrap(), user.id);
}

#[tokio::test]
async fn test_authentication_nonexistent_user() {
    let app = TestApp::new().await;

    let result = app.store.find_credentials("nobody@example.com").await.unwrap();
    assert!(result.is_none());
}

/// Test multiple users with different passwords
#[tokio::test]
async fn test_multiple_users_authentication() {
    let app = TestApp::new().await;
    let auth_service = create_test_auth_service();

    create_user(&app, &auth_service, "user1@example.com", "Password1!").await;
    create_user(&app, &auth_service, "user2@example.com", "Password2!").await;

    let (_, hash) = app
        .store
        .find_credentials("user1@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(auth_service.verify_password("Password1!", &hash).unwrap());
    assert!(!auth_service.verify_password("Password2!", &hash).unwrap());

    let (_, hash) = app
        .store
        .find_credentials("user2@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(auth_service.verify_password("Password2!", &hash).unwrap());
    assert!(!auth_service.verify_password("Password1!", &hash).unwrap());
}

// Helper functions

async fn create_user(app: &TestApp, auth_service: &AuthService, email: &str, password: &str) -> User {
    let hash = auth_service.hash_password(password).unwrap();
    app.store
        .create_user(NewUser::new(fixtures::TEST_NAME, email, hash).unwrap())
        .await
        .unwrap()
}
