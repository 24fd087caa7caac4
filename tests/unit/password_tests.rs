// ============================
// tests/unit/password_tests.rs
// ============================
//! Unit tests for password hashing and the credential service
use catalog_backend_lib::auth::{
    hash_password, hash_password_secure, verify_password, BcryptJwtCredentials, CredentialError,
    CredentialService, TokenSigner,
};

const TEST_COST: u32 = 4;

#[test]
fn test_hash_is_salted() {
    let first = hash_password("pw1", TEST_COST).unwrap();
    let second = hash_password("pw1", TEST_COST).unwrap();

    assert_ne!(first, second);
    assert_ne!(first, "pw1");
    assert!(verify_password(&first, "pw1"));
    assert!(verify_password(&second, "pw1"));
}

#[test]
fn test_verify_rejects_wrong_password_and_bad_hash() {
    let hash = hash_password("pw1", TEST_COST).unwrap();
    assert!(!verify_password(&hash, "pw2"));
    assert!(!verify_password("not-a-bcrypt-hash", "pw1"));
}

#[test]
fn test_secure_hash_wipes_plaintext() {
    let mut plain = "pw1".to_string();
    let hash = hash_password_secure(&mut plain, TEST_COST).unwrap();

    assert!(plain.is_empty());
    assert!(verify_password(&hash, "pw1"));
}

#[test]
fn test_empty_password_rejected() {
    assert!(matches!(
        hash_password("", TEST_COST),
        Err(CredentialError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_service_round_trip() {
    let credentials = BcryptJwtCredentials::new(TEST_COST, TokenSigner::new(b"secret", None));

    let hash = credentials.hash_password("pw1").await.unwrap();
    assert!(credentials.verify_password("pw1", &hash).await);
    assert!(!credentials.verify_password("pw2", &hash).await);

    let token = credentials.issue_token("bob").unwrap();
    assert_eq!(credentials.verify_token(&token).unwrap().username, "bob");
    assert!(matches!(
        credentials.verify_token("garbage"),
        Err(CredentialError::InvalidToken(_))
    ));
}
