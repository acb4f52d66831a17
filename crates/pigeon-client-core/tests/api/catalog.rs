use pigeon_shared::{
    catalog::{CategoryName, CategoryRef, PageRequest},
    errors::ConversionError,
    id::RecordId,
};

use crate::helpers::{api_error, login_as, no_cb, product_draft, product_draft_in, spawn_app};

#[tokio::test]
async fn products_are_paged() {
    // Arrange
    let app = spawn_app().await;
    for name in ["Lamp", "Desk", "Chair"] {
        app.backend.add_product(&product_draft(name, 20.0, 3));
    }

    // Act
    let first = app
        .core_client
        .get_products(PageRequest::new(0, 2), no_cb)
        .await
        .unwrap()
        .unwrap();
    let second = app
        .core_client
        .get_products(PageRequest::new(0, 2).next(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    assert_eq!(first.content.len(), 2);
    assert_eq!(first.total_elements, 3);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next());
    assert_eq!(second.content.len(), 1);
    assert_eq!(second.content[0].name, "Chair");
    assert!(!second.has_next());
    assert!(second.has_previous());
}

#[tokio::test]
async fn search_matches_name_ignoring_case() {
    // Arrange
    let app = spawn_app().await;
    for name in ["Desk Lamp", "Floor lamp", "Chair"] {
        app.backend.add_product(&product_draft(name, 20.0, 3));
    }

    // Act
    let actual = app
        .core_client
        .search_products("LAMP", PageRequest::default(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert
    let names: Vec<_> = actual.content.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, ["Desk Lamp", "Floor lamp"]);
}

#[tokio::test]
async fn product_detail_and_missing_product() {
    // Arrange
    let app = spawn_app().await;
    let category = app.backend.add_category("Lighting");
    let stored = app.backend.add_product(&product_draft_in(
        "Lamp",
        CategoryRef {
            id: category.id.clone(),
        },
    ));

    // Act
    let found = app
        .core_client
        .get_product(&stored.id, no_cb)
        .await
        .unwrap()
        .unwrap();
    let missing = app
        .core_client
        .get_product(&RecordId::from("does-not-exist"), no_cb)
        .await
        .unwrap();

    // Assert
    assert_eq!(found, stored);
    assert_eq!(found.category, Some(category));
    let error = api_error(missing.unwrap_err());
    assert_eq!(error.status.as_u16(), 404);
    assert_eq!(error.message.as_deref(), Some("Product not found"));
}

#[tokio::test]
async fn product_id_stays_inside_its_path_segment() {
    // Arrange
    let app = spawn_app().await;
    app.backend.add_product(&product_draft("Lamp", 20.0, 3));

    // Act
    let slashed = app
        .core_client
        .get_product(&RecordId::from("lamp/../../categories"), no_cb)
        .await
        .unwrap();
    let dotted = app
        .core_client
        .get_product(&RecordId::from(".."), no_cb)
        .await
        .unwrap();

    // Assert
    let error = api_error(slashed.unwrap_err());
    assert_eq!(error.status.as_u16(), 404);
    assert_eq!(error.message.as_deref(), Some("Product not found"));
    let error = dotted.unwrap_err();
    assert_eq!(
        error.downcast_ref::<ConversionError>(),
        Some(&ConversionError::DotSegment)
    );
}

#[tokio::test]
async fn admin_manages_products() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.admin_user).await;

    // Act - Create
    let created = app
        .core_client
        .create_product(&product_draft("Lamp", 19.5, 4), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Created
    assert_eq!(created.name, "Lamp");
    assert!(created.is_in_stock());

    // Act - Update
    let mut draft = created.to_draft();
    draft.stock_quantity = 0;
    let updated = app
        .core_client
        .update_product(&created.id, &draft, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Updated
    assert_eq!(updated.id, created.id);
    assert!(!updated.is_in_stock());

    // Act - Delete
    let message = app
        .core_client
        .delete_product(&created.id, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Gone
    assert_eq!(message.message, "Product deleted successfully!");
    let page = app
        .core_client
        .get_products(PageRequest::default(), no_cb)
        .await
        .unwrap()
        .unwrap();
    assert!(page.content.is_empty());
}

#[tokio::test]
async fn customer_cannot_create_product() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.normal_user).await;

    // Act
    let outcome = app
        .core_client
        .create_product(&product_draft("Lamp", 19.5, 4), no_cb)
        .await
        .unwrap();

    // Assert
    assert!(api_error(outcome.unwrap_err()).is_forbidden());
}

#[tokio::test]
async fn admin_manages_categories() {
    // Arrange
    let app = spawn_app().await;
    login_as(&app, &app.super_admin_user).await;
    let name: CategoryName = "Garden".try_into().unwrap();

    // Act - Create
    let created = app
        .core_client
        .create_category(&name, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Listed publicly
    app.core_client.logout();
    let listed = app
        .core_client
        .get_categories(no_cb)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(listed, [created.clone()]);
    login_as(&app, &app.super_admin_user).await;

    // Act - Rename
    let renamed = app
        .core_client
        .update_category(&created.id, &"Outdoor".try_into().unwrap(), no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Renamed
    assert_eq!(renamed.name.as_ref(), "Outdoor");
    let fetched = app
        .core_client
        .get_category(&created.id, no_cb)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, renamed);

    // Act - Delete
    let message = app
        .core_client
        .delete_category(&created.id, no_cb)
        .await
        .unwrap()
        .unwrap();

    // Assert - Deleted
    assert_eq!(message.message, "Category deleted successfully!");
    let missing = app
        .core_client
        .get_category(&created.id, no_cb)
        .await
        .unwrap();
    assert_eq!(api_error(missing.unwrap_err()).status.as_u16(), 404);
}
