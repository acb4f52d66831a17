use pigeon_client_core::{GuardDecision, Route};
use pigeon_shared::{
    req_args::RegisterReqArgs,
    uac::{RoleName, Roles},
};

use crate::helpers::{api_error, login_as, no_cb, spawn_app};

#[tokio::test]
async fn login_failure_invalid_password() {
    // Arrange
    let app = spawn_app().await;
    let login_args = app
        .normal_user
        .login_args()
        .password("random-password".to_string().into());

    // Act
    let outcome = app.core_client.login(login_args, no_cb).await.unwrap();

    // Assert
    let error = api_error(outcome.unwrap_err());
    assert_eq!(error.status.as_u16(), 400);
    assert_eq!(error.message.as_deref(), Some("Error: Invalid credentials"));
    assert!(!app.core_client.is_logged_in());
    assert!(app.core_client.user_info().is_none());
}

#[tokio::test]
async fn login_stores_session_with_normalized_roles() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let profile = login_as(&app, &app.admin_user).await;

    // Assert
    let session = app.core_client.session();
    assert_eq!(profile.username.as_ref(), app.admin_user.username);
    assert_eq!(
        profile.roles,
        Roles::from(vec![RoleName::User, RoleName::Admin])
    );
    assert!(session.is_authenticated());
    assert!(session.is_admin());
    assert!(!session.is_super_admin());
    assert!(session.has_admin_privileges());
    assert_eq!(session.current_user(), Some(profile));
}

#[tokio::test]
async fn login_logout_round_trip() {
    // Arrange
    let app = spawn_app().await;

    // Assert - Ensure not logged in
    assert!(
        !app.core_client.is_logged_in(),
        "should not be logged in before logging in"
    );

    // Act - Login
    login_as(&app, &app.normal_user).await;

    // Assert - Login successful and user info stored
    assert_eq!(
        app.core_client.user_info().unwrap().username.as_ref(),
        app.normal_user.username
    );

    // Act - Logout
    app.core_client.logout();

    // Assert - Session removed
    assert!(!app.core_client.is_logged_in());
    assert!(app.core_client.session().token().is_none());
    assert!(app.core_client.user_info().is_none());
}

#[tokio::test]
async fn second_login_replaces_session() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;

    // Act
    login_as(&app, &app.normal_user).await;

    // Assert
    let session = app.core_client.session();
    assert_eq!(
        session.current_user().unwrap().username.as_ref(),
        app.normal_user.username
    );
    assert!(!session.has_admin_privileges());
}

#[tokio::test]
async fn guard_follows_login_and_logout() {
    // Arrange
    let app = spawn_app().await;
    let session = app.core_client.session();
    let to_login = GuardDecision::Redirect {
        to: Route::Login,
        replace_history: true,
    };
    assert_eq!(Route::AdminDashboard.guard(session), to_login);

    // Act - Login as customer
    login_as(&app, &app.normal_user).await;

    // Assert - Customer views only
    assert!(Route::MyOrders.guard(session).is_proceed());
    assert_eq!(
        Route::AdminDashboard.guard(session),
        GuardDecision::Redirect {
            to: Route::Home,
            replace_history: true
        }
    );

    // Act - Login as super admin
    login_as(&app, &app.super_admin_user).await;

    // Assert - Admin views open
    assert!(Route::AdminUsers.guard(session).is_proceed());

    // Act - Logout
    app.core_client.logout();

    // Assert - Back to login
    assert_eq!(Route::MyOrders.guard(session), to_login);
}

#[tokio::test]
async fn register_then_login() {
    // Arrange
    let app = spawn_app().await;
    let args = RegisterReqArgs {
        username: "new-customer".try_into().unwrap(),
        email: "new-customer@example.com".into(),
        password: "correct horse".to_string().into(),
    };

    // Act - Register
    let message = app
        .core_client
        .register(args.clone(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Registered but not logged in
    assert_eq!(message.message, "User registered successfully!");
    assert!(!app.core_client.is_logged_in());

    // Act - Login with new account
    let login_args = pigeon_shared::req_args::LoginReqArgs::new(
        "new-customer",
        "correct horse".to_string().into(),
    );
    let profile = app
        .core_client
        .login(login_args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Plain customer
    assert!(!profile.has_admin_privileges());
    assert_eq!(profile.email.as_ref(), "new-customer@example.com");

    // Act - Register the same name again
    let outcome = app.core_client.register(args, no_cb).await.unwrap();

    // Assert - Rejected with the backend's message
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "Error: Username is already taken!"
    );
}
