//! Credential hasher, bearer codec, and secret rotator tests

use std::time::Duration;

use turnstile::auth::{password, SecretRotator, TokenCodec};
use turnstile::Error;

// Minimum bcrypt cost keeps the tests fast
const TEST_COST: u32 = 4;

#[test]
fn test_password_hash_verifies() {
    let hash = password::hash_password("correcthorse", TEST_COST).expect("Failed to hash");
    assert!(password::verify_password("correcthorse", &hash));
    assert!(!password::verify_password("wrongpass", &hash));
}

#[test]
fn test_password_hashes_are_salted() {
    let hash1 = password::hash_password("correcthorse", TEST_COST).expect("Failed to hash");
    let hash2 = password::hash_password("correcthorse", TEST_COST).expect("Failed to hash");

    assert_ne!(hash1, hash2);
    assert!(password::verify_password("correcthorse", &hash1));
    assert!(password::verify_password("correcthorse", &hash2));
}

#[test]
fn test_malformed_hash_never_panics() {
    assert!(!password::verify_password("pw", "corrupted-hash-data"));
    assert!(!password::verify_password("pw", ""));
}

#[tokio::test]
async fn test_credential_round_trip() {
    let codec = TokenCodec::new(SecretRotator::new());

    let credential = codec
        .issue("alice", "token-1", chrono::Duration::minutes(30))
        .await
        .expect("Failed to issue");

    let claims = codec.verify(&credential).await.expect("Failed to verify");
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.session_token, "token-1");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_garbage_credential_is_invalid() {
    let codec = TokenCodec::new(SecretRotator::new());

    let result = codec.verify("not-base64-garbage").await;
    assert!(matches!(result, Err(Error::InvalidCredential)));
}

#[tokio::test]
async fn test_expired_credential_with_valid_signature() {
    let codec = TokenCodec::new(SecretRotator::new());

    // Signed correctly, but already expired beyond the validation leeway
    let credential = codec
        .issue("alice", "token-1", chrono::Duration::minutes(-5))
        .await
        .expect("Failed to issue");

    let result = codec.verify(&credential).await;
    assert!(matches!(result, Err(Error::ExpiredCredential)));
}

#[tokio::test]
async fn test_rotation_invalidates_earlier_credentials() {
    let rotator = SecretRotator::new();
    let codec = TokenCodec::new(rotator.clone());

    let before = codec
        .issue("alice", "token-1", chrono::Duration::minutes(30))
        .await
        .expect("Failed to issue");

    rotator.rotate().await;

    // The pre-rotation credential is indistinguishable from a forged one
    let result = codec.verify(&before).await;
    assert!(matches!(result, Err(Error::InvalidCredential)));

    // Credentials issued after rotation verify until their own expiry
    let after = codec
        .issue("alice", "token-1", chrono::Duration::minutes(30))
        .await
        .expect("Failed to issue");
    assert!(codec.verify(&after).await.is_ok());
}

#[tokio::test]
async fn test_rotation_task_replaces_startup_secret() {
    let rotator = SecretRotator::new();
    let startup_secret = rotator.current().await;

    // Only the immediate first tick fires within the test window
    let handle = rotator.start(Duration::from_secs(3600));
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_ne!(rotator.current().await, startup_secret);

    handle.abort();
}

#[tokio::test]
async fn test_independent_rotators_do_not_cross_verify() {
    let codec_a = TokenCodec::new(SecretRotator::new());
    let codec_b = TokenCodec::new(SecretRotator::new());

    let credential = codec_a
        .issue("alice", "token-1", chrono::Duration::minutes(30))
        .await
        .expect("Failed to issue");

    let result = codec_b.verify(&credential).await;
    assert!(matches!(result, Err(Error::InvalidCredential)));
}
