mod common;

use common::{ADMIN_PASSWORD, ADMIN_USERNAME, MockRepo, mock_state, sqlite_state};
use portfolio_site::{
    AppError, bootstrap_admin, config::AdminSeed, password::CredentialHasher,
    repository::Repository,
};

fn seed(username: &str, email: &str, password: &str) -> AdminSeed {
    AdminSeed {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_fresh_store_gets_hashed_admin() {
    let (state, repo) = mock_state(MockRepo::default());

    let created = bootstrap_admin(&state, &seed("owner", "owner@example.com", "s3cret-pass"))
        .await
        .unwrap();

    assert!(created);
    let users = repo.users.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "owner");
    assert_ne!(users[0].password_hash, "s3cret-pass");
    assert!(state.hasher.verify("s3cret-pass", &users[0].password_hash));
}

#[tokio::test]
async fn test_existing_admin_is_left_untouched() {
    // sqlite_state() has already provisioned ADMIN_USERNAME.
    let state = sqlite_state().await;
    let before = state
        .repo
        .find_user_by_username(ADMIN_USERNAME)
        .await
        .unwrap()
        .expect("admin seeded at startup");

    let rerun = seed(ADMIN_USERNAME, "changed@example.com", "a-different-password");
    let created = bootstrap_admin(&state, &rerun).await.unwrap();

    assert!(!created);
    let after = state
        .repo
        .find_user_by_username(ADMIN_USERNAME)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.id, before.id);
    assert_eq!(after.email, before.email);
    assert_eq!(after.password_hash, before.password_hash);
    assert!(state.hasher.verify(ADMIN_PASSWORD, &after.password_hash));
    assert!(!state.hasher.verify("a-different-password", &after.password_hash));
}

#[tokio::test]
async fn test_new_username_with_taken_email_fails() {
    let state = sqlite_state().await;

    let clash = seed("second-admin", "admin@example.com", "another-password");
    let result = bootstrap_admin(&state, &clash).await;

    assert!(matches!(result, Err(AppError::Database(_))));
    assert!(
        state
            .repo
            .find_user_by_username("second-admin")
            .await
            .unwrap()
            .is_none()
    );
}
