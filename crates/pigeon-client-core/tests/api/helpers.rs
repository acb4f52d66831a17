use pigeon_client_core::{Client, SessionStore};
use pigeon_shared::{
    catalog::{CategoryRef, ProductDraft},
    errors::ApiError,
    uac::UserProfile,
};

pub use pigeon_test_helper::{no_cb, TestApp, TestUser};

pub async fn spawn_app() -> TestApp<Client> {
    pigeon_test_helper::spawn_app(|address| Client::new(address, SessionStore::in_memory())).await
}

pub async fn login_as(app: &TestApp<Client>, user: &TestUser) -> UserProfile {
    app.core_client
        .login(user.login_args(), no_cb)
        .await
        .unwrap()
        .unwrap()
}

/// Extracts the status and message the backend returned
pub fn api_error(error: anyhow::Error) -> ApiError {
    error
        .downcast_ref::<ApiError>()
        .unwrap_or_else(|| panic!("expected an ApiError but got: {error:?}"))
        .clone()
}

pub fn product_draft(name: &str, price: f64, stock_quantity: u32) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("A fine {name}"),
        price,
        category: None,
        stock_quantity,
        image_url: None,
    }
}

pub fn product_draft_in(name: &str, category: CategoryRef) -> ProductDraft {
    ProductDraft {
        category: Some(category),
        ..product_draft(name, 10.0, 5)
    }
}
