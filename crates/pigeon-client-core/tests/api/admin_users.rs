use pigeon_client_core::policy::{can_modify, can_toggle_admin_role, toggled_admin_roles};
use pigeon_shared::{
    catalog::PageRequest,
    dashboard::DashboardStats,
    req_args::admin::UserUpdateReqArgs,
    uac::RoleName,
};

use crate::helpers::{api_error, login_as, no_cb, spawn_app};

#[tokio::test]
async fn admin_lists_users() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;

    // Act
    let users = app.core_client.get_users(no_cb).await.unwrap().unwrap();

    // Assert
    assert_eq!(users.len(), 3);
    let super_admin = users
        .iter()
        .find(|x| x.same_user(app.super_admin_user.profile()))
        .unwrap();
    assert!(super_admin.is_super_admin());
    let single = app
        .core_client
        .get_user(&super_admin.id, no_cb)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&single, super_admin);
}

#[tokio::test]
async fn super_admin_toggles_admin_role() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.super_admin_user).await;
    let actor_is_super_admin = app.core_client.session().is_super_admin();
    let target = app.normal_user.profile().clone();
    assert!(can_toggle_admin_role(actor_is_super_admin, &target));

    // Act - Promote
    let promoted = app
        .core_client
        .update_user_roles(&target.id, &toggled_admin_roles(&target), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Now an admin
    assert!(promoted.is_admin());

    // Act - Demote
    let demoted = app
        .core_client
        .update_user_roles(&target.id, &toggled_admin_roles(&promoted), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Back to customer
    assert!(!demoted.has_admin_privileges());
    assert_eq!(demoted.roles.iter().collect::<Vec<_>>(), [&RoleName::User]);
}

#[tokio::test]
async fn admin_cannot_grant_admin() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;
    let actor_is_super_admin = app.core_client.session().is_super_admin();
    let target = app.normal_user.profile().clone();

    // Act
    let outcome = app
        .core_client
        .update_user_roles(&target.id, &toggled_admin_roles(&target), no_cb)
        .await
        .unwrap();

    // Assert - Client and backend agree
    assert!(!can_toggle_admin_role(actor_is_super_admin, &target));
    assert_eq!(
        outcome.unwrap_err().to_string(),
        "Only SUPER_ADMIN can assign ADMIN role"
    );
}

#[tokio::test]
async fn super_admin_accounts_are_protected() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;
    let target = app.super_admin_user.profile().clone();

    // Act
    let outcome = app.core_client.delete_user(&target.id, no_cb).await.unwrap();

    // Assert
    assert!(!can_modify(false, &target));
    assert!(!can_modify(true, &target));
    let error = api_error(outcome.unwrap_err());
    assert_eq!(error.status.as_u16(), 400);
    assert_eq!(
        error.message.as_deref(),
        Some("Cannot delete SUPER_ADMIN accounts")
    );
    assert!(app.backend.user(&target.id).is_some());
}

#[tokio::test]
async fn disabled_user_cannot_login() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;
    let target = app.normal_user.profile().clone();
    assert!(can_modify(false, &target));

    // Act - Disable
    let updated = app
        .core_client
        .set_user_enabled(&target.id, false, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Disabled and login refused
    assert!(!updated.enabled);
    let outcome = app
        .core_client
        .login(app.normal_user.login_args(), no_cb)
        .await
        .unwrap();
    assert!(outcome.is_err());
}

#[tokio::test]
async fn admin_updates_user_details() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;
    let target = app.normal_user.profile().clone();
    let args = UserUpdateReqArgs {
        username: "renamed-customer".try_into().unwrap(),
        email: "renamed@example.com".into(),
        password: Some("new-password".to_string().into()),
    };

    // Act
    let updated = app
        .core_client
        .update_user(&target.id, &args, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(updated.username.as_ref(), "renamed-customer");
    assert_eq!(updated.email.as_ref(), "renamed@example.com");
    let login_args = pigeon_shared::req_args::LoginReqArgs::new(
        "renamed-customer",
        "new-password".to_string().into(),
    );
    let profile = app
        .core_client
        .login(login_args, no_cb)
        .await
        .unwrap()
        .unwrap();
    assert!(profile.same_user(&target));
}

#[tokio::test]
async fn admin_deletes_customer() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;
    let target = app.normal_user.profile().clone();

    // Act
    let message = app
        .core_client
        .delete_user(&target.id, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(message.message, "User deleted successfully!");
    assert!(app.backend.user(&target.id).is_none());
}

#[tokio::test]
async fn dashboard_stats_from_listings() {
    // Arrange
    let app = spawn_app().await;
    let product = app
        .backend
        .add_product(&crate::helpers::product_draft("Lamp", 12.5, 10));
    login_as(&app, &app.normal_user).await;
    let args = pigeon_shared::req_args::OrderReqArgs {
        product_id: product.id.clone(),
        quantity: 1.try_into().unwrap(),
    };
    app.core_client
        .create_order(&args, no_cb)
        .await
        .unwrap()
        .unwrap();
    login_as(&app, &app.admin_user).await;

    // Act
    let users = app.core_client.get_users(no_cb).await.unwrap().unwrap();
    let orders = app.core_client.get_all_orders(no_cb).await.unwrap().unwrap();
    let products = app
        .core_client
        .get_products(PageRequest::default(), no_cb)
        .await
        .unwrap()
        .unwrap();
    let stats = DashboardStats::new(&users, &orders, &products);

    // Assert
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.total_products, 1);
    assert_eq!(stats.pending_orders, 1);
}
