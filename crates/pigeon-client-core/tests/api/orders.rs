use pigeon_client_core::policy::can_cancel_own_order;
use pigeon_shared::{
    orders::{OrderStatus, Quantity},
    req_args::OrderReqArgs,
};

use crate::helpers::{api_error, login_as, no_cb, product_draft, spawn_app};

fn order_args(product_id: &pigeon_shared::id::RecordId, quantity: u32) -> OrderReqArgs {
    OrderReqArgs {
        product_id: product_id.clone(),
        quantity: Quantity::try_from(quantity).unwrap(),
    }
}

#[tokio::test]
async fn customer_places_and_lists_orders() {
    // Arrange
    let app = spawn_app().await;
    let product = app.backend.add_product(&product_draft("Lamp", 12.5, 10));
    login_as(&app, &app.normal_user).await;

    // Act
    let order = app
        .core_client
        .create_order(&order_args(&product.id, 2), no_cb)
        .await
        .unwrap()
        .unwrap();
    let mine = app.core_client.get_my_orders(no_cb).await.unwrap().unwrap();

    // Assert
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.quantity, 2);
    assert_eq!(order.total_amount, Some(25.0));
    assert_eq!(order.product.as_ref().map(|x| &x.id), Some(&product.id));
    assert_eq!(mine, [order]);
}

#[tokio::test]
async fn orders_of_others_are_not_listed() {
    // Arrange
    let app = spawn_app().await;
    let product = app.backend.add_product(&product_draft("Lamp", 12.5, 10));
    login_as(&app, &app.admin_user).await;
    app.core_client
        .create_order(&order_args(&product.id, 1), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Act
    login_as(&app, &app.normal_user).await;
    let mine = app.core_client.get_my_orders(no_cb).await.unwrap().unwrap();

    // Assert
    assert!(mine.is_empty());
}

#[tokio::test]
async fn pending_order_can_be_cancelled() {
    // Arrange
    let app = spawn_app().await;
    let product = app.backend.add_product(&product_draft("Lamp", 12.5, 10));
    login_as(&app, &app.normal_user).await;
    let order = app
        .core_client
        .create_order(&order_args(&product.id, 1), no_cb)
        .await
        .unwrap()
        .unwrap();
    assert!(can_cancel_own_order(&order));

    // Act
    let message = app
        .core_client
        .delete_my_order(&order.id, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(message.message, "Order deleted successfully!");
    assert!(app.backend.order(&order.id).is_none());
}

#[tokio::test]
async fn shipped_order_cannot_be_cancelled() {
    // Arrange
    let app = spawn_app().await;
    let product = app.backend.add_product(&product_draft("Lamp", 12.5, 10));
    login_as(&app, &app.normal_user).await;
    let order = app
        .core_client
        .create_order(&order_args(&product.id, 1), no_cb)
        .await
        .unwrap()
        .unwrap();
    app.backend.set_order_status(&order.id, OrderStatus::Shipped);
    let order = app.core_client.get_my_orders(no_cb).await.unwrap().unwrap()[0].clone();

    // Act
    let outcome = app
        .core_client
        .delete_my_order(&order.id, no_cb)
        .await
        .unwrap();

    // Assert
    assert!(!can_cancel_own_order(&order));
    assert_eq!(api_error(outcome.unwrap_err()).status.as_u16(), 400);
    assert!(app.backend.order(&order.id).is_some());
}

#[tokio::test]
async fn admin_manages_all_orders() {
    // Arrange
    let app = spawn_app().await;
    let product = app.backend.add_product(&product_draft("Lamp", 12.5, 10));
    login_as(&app, &app.normal_user).await;
    let order = app
        .core_client
        .create_order(&order_args(&product.id, 3), no_cb)
        .await
        .unwrap()
        .unwrap();
    login_as(&app, &app.admin_user).await;

    // Act - List
    let all = app.core_client.get_all_orders(no_cb).await.unwrap().unwrap();

    // Assert - Customer order visible with its owner
    assert_eq!(all.len(), 1);
    assert_eq!(
        all[0].user.as_ref().map(|x| x.username.as_ref()),
        Some(app.normal_user.username.as_str())
    );

    // Act - Change status
    let updated = app
        .core_client
        .update_order_status(&order.id, OrderStatus::Shipped, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Status stored
    assert_eq!(updated.status, OrderStatus::Shipped);
    assert_eq!(
        app.backend.order(&order.id).map(|x| x.status),
        Some(OrderStatus::Shipped)
    );

    // Act - Delete
    app.core_client
        .delete_order(&order.id, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Gone
    assert!(app.core_client.get_all_orders(no_cb).await.unwrap().unwrap().is_empty());
}
