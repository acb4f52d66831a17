use pigeon_client_core::{Client, FileStorage, SessionStore};
use pigeon_shared::errors::NotLoggedInError;

use crate::helpers::{api_error, login_as, no_cb, spawn_app};

#[tokio::test]
async fn rejected_token_clears_session() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.normal_user).await;
    app.backend.revoke_all_tokens();

    // Act
    let outcome = app.core_client.get_my_orders(no_cb).await.unwrap();

    // Assert
    assert!(api_error(outcome.unwrap_err()).is_unauthorized());
    assert!(!app.core_client.is_logged_in());
    assert!(app.core_client.user_info().is_none());
}

#[tokio::test]
async fn stale_rejection_keeps_newer_session() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.normal_user).await;
    app.backend.revoke_all_tokens();
    let in_flight = app.core_client.get_my_orders(no_cb);
    app.core_client
        .session()
        .set_session("fresh-token".to_string().into(), app.admin_user.profile())
        .unwrap();

    // Act
    let outcome = in_flight.await.unwrap();

    // Assert
    assert!(api_error(outcome.unwrap_err()).is_unauthorized());
    assert!(app.core_client.is_logged_in());
    assert_eq!(
        app.core_client.session().token().unwrap().expose_secret(),
        "fresh-token"
    );
    assert_eq!(
        app.core_client.user_info().as_ref(),
        Some(app.admin_user.profile())
    );
}

#[tokio::test]
async fn anonymous_request_is_unauthorized() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let outcome = app.core_client.get_my_orders(no_cb).await.unwrap();

    // Assert
    let error = api_error(outcome.unwrap_err());
    assert!(error.is_unauthorized());
    assert_eq!(error.message, Some(NotLoggedInError.to_string()));
}

#[tokio::test]
async fn forbidden_keeps_session() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.normal_user).await;

    // Act
    let outcome = app.core_client.get_users(no_cb).await.unwrap();

    // Assert
    assert!(api_error(outcome.unwrap_err()).is_forbidden());
    assert!(app.core_client.is_logged_in());
}

#[tokio::test]
async fn clones_share_one_session() {
    // Arrange
    let app = spawn_app().await;
    let other = app.core_client.clone();

    // Act
    login_as(&app, &app.normal_user).await;

    // Assert
    assert!(other.is_logged_in());
    other.logout();
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn file_session_survives_restart() {
    // Arrange
    let app = spawn_app().await;
    let session_path = std::env::temp_dir()
        .join(format!("pigeon-test-{}", uuid::Uuid::new_v4()))
        .join("session.ron");
    let first = Client::new(
        app.address.clone(),
        SessionStore::new(FileStorage::open(&session_path).unwrap()),
    );
    first
        .login(app.normal_user.login_args(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Act
    let restarted = Client::new(
        app.address.clone(),
        SessionStore::new(FileStorage::open(&session_path).unwrap()),
    );
    let orders = restarted.get_my_orders(no_cb).await.unwrap();

    // Assert
    assert!(restarted.is_logged_in());
    assert_eq!(
        restarted.user_info().unwrap().username.as_ref(),
        app.normal_user.username
    );
    assert!(orders.unwrap().is_empty());
}
