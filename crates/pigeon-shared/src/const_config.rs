//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Used when no configuration is found
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8080";
}

pub mod session {
    /// Storage key for the bearer token
    pub const SESSION_KEY_TOKEN: &str = "token";
    /// Storage key for the JSON serialized user profile
    pub const SESSION_KEY_USER: &str = "user";
}

pub mod paging {
    pub const PAGING_DEFAULT_SIZE: u32 = 10;
    /// Size used by the product grid on the home view
    pub const PAGING_HOME_SIZE: u32 = 12;
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/api/auth/login");
    pub const PATH_AUTH_REGISTER: PathSpec = PathSpec::post("/api/auth/register");

    pub const PATH_CATEGORIES: PathSpec = PathSpec::get("/api/categories");
    pub const PATH_CATEGORY: PathSpec = PathSpec::get("/api/categories/{id}");
    pub const PATH_CATEGORY_CREATE: PathSpec = PathSpec::post("/api/categories");
    pub const PATH_CATEGORY_UPDATE: PathSpec = PathSpec::put("/api/categories/{id}");
    pub const PATH_CATEGORY_DELETE: PathSpec = PathSpec::delete("/api/categories/{id}");

    pub const PATH_PRODUCTS: PathSpec = PathSpec::get("/api/products");
    pub const PATH_PRODUCTS_SEARCH: PathSpec = PathSpec::get("/api/products/search");
    pub const PATH_PRODUCT: PathSpec = PathSpec::get("/api/products/{id}");

    pub const PATH_ORDER_CREATE: PathSpec = PathSpec::post("/api/orders");
    pub const PATH_ORDERS_MINE: PathSpec = PathSpec::get("/api/orders/my-orders");
    pub const PATH_ORDER_DELETE_MINE: PathSpec = PathSpec::delete("/api/orders/{id}");

    pub const PATH_ADMIN_PRODUCT_CREATE: PathSpec = PathSpec::post("/api/admin/products");
    pub const PATH_ADMIN_PRODUCT_UPDATE: PathSpec = PathSpec::put("/api/admin/products/{id}");
    pub const PATH_ADMIN_PRODUCT_DELETE: PathSpec = PathSpec::delete("/api/admin/products/{id}");

    pub const PATH_ADMIN_ORDERS: PathSpec = PathSpec::get("/api/admin/orders");
    pub const PATH_ADMIN_ORDER_STATUS: PathSpec = PathSpec::put("/api/admin/orders/{id}/status");
    pub const PATH_ADMIN_ORDER_DELETE: PathSpec = PathSpec::delete("/api/admin/orders/{id}");

    pub const PATH_ADMIN_USERS: PathSpec = PathSpec::get("/api/admin/users");
    pub const PATH_ADMIN_USER: PathSpec = PathSpec::get("/api/admin/users/{id}");
    pub const PATH_ADMIN_USER_UPDATE: PathSpec = PathSpec::put("/api/admin/users/{id}");
    pub const PATH_ADMIN_USER_ENABLED: PathSpec = PathSpec::put("/api/admin/users/{id}/enabled");
    pub const PATH_ADMIN_USER_ROLES: PathSpec = PathSpec::put("/api/admin/users/{id}/roles");
    pub const PATH_ADMIN_USER_DELETE: PathSpec = PathSpec::delete("/api/admin/users/{id}");

    /// The backend has no dedicated endpoint so the public category list is used
    pub const PATH_HEALTH_CHECK: PathSpec = PATH_CATEGORIES;
}
