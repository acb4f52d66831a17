//! In memory stand in for the storefront backend
//!
//! Serves the same paths the client calls and applies the same access rules
//! the real backend does, so the client can be exercised end to end without
//! a database.

use actix_web::{
    dev::Server,
    http::{header, StatusCode},
    web, App, HttpRequest, HttpResponse, HttpServer, ResponseError,
};
use anyhow::Context as _;
use pigeon_shared::{
    catalog::{Category, CategoryName, Page, PageRequest, Product, ProductDraft},
    const_config::path::{
        PathSpec, PATH_ADMIN_ORDERS, PATH_ADMIN_ORDER_DELETE, PATH_ADMIN_ORDER_STATUS,
        PATH_ADMIN_PRODUCT_CREATE, PATH_ADMIN_PRODUCT_DELETE, PATH_ADMIN_PRODUCT_UPDATE,
        PATH_ADMIN_USER, PATH_ADMIN_USERS, PATH_ADMIN_USER_DELETE, PATH_ADMIN_USER_ENABLED,
        PATH_ADMIN_USER_ROLES, PATH_ADMIN_USER_UPDATE, PATH_AUTH_LOGIN, PATH_AUTH_REGISTER,
        PATH_CATEGORIES, PATH_CATEGORY, PATH_CATEGORY_CREATE, PATH_CATEGORY_DELETE,
        PATH_CATEGORY_UPDATE, PATH_ORDERS_MINE, PATH_ORDER_CREATE, PATH_ORDER_DELETE_MINE,
        PATH_PRODUCT, PATH_PRODUCTS, PATH_PRODUCTS_SEARCH,
    },
    errors::{ConversionError, MessageResponse, NotLoggedInError},
    id::RecordId,
    orders::{Order, OrderStatus},
    req_args::{LoginReqArgs, OrderReqArgs, RegisterReqArgs, SearchReqArgs},
    uac::{RoleName, UserProfile},
};
use secrecy::ExposeSecret as _;
use std::{
    collections::HashMap,
    fmt::Display,
    net::TcpListener,
    sync::{Arc, Mutex, MutexGuard},
};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct StubBackend {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredUser>,
    /// Issued token to user id
    tokens: HashMap<String, RecordId>,
    categories: Vec<Category>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

#[derive(Debug)]
struct StoredUser {
    profile: UserProfile,
    password: String,
}

#[derive(Debug)]
struct StubError {
    status: StatusCode,
    message: String,
}

type StubResult<T> = Result<web::Json<T>, StubError>;

impl StubError {
    fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, NotLoggedInError.to_string())
    }

    fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Access denied")
    }

    fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{what} not found"))
    }
}

impl Display for StubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl ResponseError for StubError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(MessageResponse::new(self.message.clone()))
    }
}

fn new_id() -> RecordId {
    Uuid::new_v4().simple().to_string().into()
}

fn method_route(path_spec: &PathSpec) -> actix_web::Route {
    match path_spec.method.as_str() {
        "GET" => web::get(),
        "POST" => web::post(),
        "PUT" => web::put(),
        "DELETE" => web::delete(),
        other => unreachable!("no paths use {other}"),
    }
}

/// Registers `handler` on the path and method of `path_spec`
fn serve<F, Args>(cfg: &mut web::ServiceConfig, path_spec: &PathSpec, handler: F)
where
    F: actix_web::Handler<Args>,
    Args: actix_web::FromRequest + 'static,
    F::Output: actix_web::Responder + 'static,
{
    cfg.route(&path_spec.path, method_route(path_spec).to(handler));
}

/// Every client path, served with the method the client uses
fn register_routes(cfg: &mut web::ServiceConfig) {
    serve(cfg, &PATH_AUTH_LOGIN, login);
    serve(cfg, &PATH_AUTH_REGISTER, register);
    serve(cfg, &PATH_PRODUCTS, products);
    // Must come before the single product path so "search" is not taken as an id
    serve(cfg, &PATH_PRODUCTS_SEARCH, product_search);
    serve(cfg, &PATH_PRODUCT, product);
    serve(cfg, &PATH_ADMIN_PRODUCT_CREATE, product_create);
    serve(cfg, &PATH_ADMIN_PRODUCT_UPDATE, product_update);
    serve(cfg, &PATH_ADMIN_PRODUCT_DELETE, product_delete);
    serve(cfg, &PATH_CATEGORIES, categories);
    serve(cfg, &PATH_CATEGORY, category);
    serve(cfg, &PATH_CATEGORY_CREATE, category_create);
    serve(cfg, &PATH_CATEGORY_UPDATE, category_update);
    serve(cfg, &PATH_CATEGORY_DELETE, category_delete);
    serve(cfg, &PATH_ORDER_CREATE, order_create);
    serve(cfg, &PATH_ORDERS_MINE, orders_mine);
    serve(cfg, &PATH_ORDER_DELETE_MINE, order_delete_mine);
    serve(cfg, &PATH_ADMIN_ORDERS, orders_all);
    serve(cfg, &PATH_ADMIN_ORDER_STATUS, order_status);
    serve(cfg, &PATH_ADMIN_ORDER_DELETE, order_delete);
    serve(cfg, &PATH_ADMIN_USERS, users);
    serve(cfg, &PATH_ADMIN_USER, user);
    serve(cfg, &PATH_ADMIN_USER_UPDATE, user_update);
    serve(cfg, &PATH_ADMIN_USER_ENABLED, user_enabled);
    serve(cfg, &PATH_ADMIN_USER_ROLES, user_roles);
    serve(cfg, &PATH_ADMIN_USER_DELETE, user_delete);
}

impl StubBackend {
    #[tracing::instrument(err(Debug), skip(self))]
    pub fn build_server(&self, listener: TcpListener) -> anyhow::Result<Server> {
        let backend = web::Data::new(self.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(backend.clone())
                .configure(register_routes)
        })
        .workers(1)
        .listen(listener)
        .context("failed to listen on provided listener")?
        .run();
        Ok(server)
    }

    pub fn add_user(&self, username: &str, password: &str, roles: &[RoleName]) -> UserProfile {
        let profile = UserProfile {
            id: new_id(),
            username: username.try_into().expect("test usernames are not empty"),
            email: format!("{username}@example.com").into(),
            roles: roles.iter().cloned().collect(),
            enabled: true,
            created_at: None,
        };
        self.lock().users.push(StoredUser {
            profile: profile.clone(),
            password: password.to_string(),
        });
        profile
    }

    pub fn add_category(&self, name: &str) -> Category {
        let category = Category {
            id: new_id(),
            name: name.try_into().expect("test category names are not empty"),
        };
        self.lock().categories.push(category.clone());
        category
    }

    pub fn add_product(&self, draft: &ProductDraft) -> Product {
        let mut state = self.lock();
        let product = state.product_from_draft(new_id(), draft);
        state.products.push(product.clone());
        product
    }

    pub fn user(&self, id: &RecordId) -> Option<UserProfile> {
        self.lock().find_user(id).map(|x| x.profile.clone())
    }

    pub fn order(&self, id: &RecordId) -> Option<Order> {
        self.lock().orders.iter().find(|x| &x.id == id).cloned()
    }

    pub fn set_order_status(&self, id: &RecordId, status: OrderStatus) {
        let mut state = self.lock();
        let order = state
            .orders
            .iter_mut()
            .find(|x| &x.id == id)
            .expect("order should exist");
        order.status = status;
    }

    /// Simulates every issued token expiring
    pub fn revoke_all_tokens(&self) {
        self.lock().tokens.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("mutex poisoned")
    }
}

impl State {
    fn find_user(&self, id: &RecordId) -> Option<&StoredUser> {
        self.users.iter().find(|x| &x.profile.id == id)
    }

    fn find_user_mut(&mut self, id: &RecordId) -> Result<&mut StoredUser, StubError> {
        self.users
            .iter_mut()
            .find(|x| &x.profile.id == id)
            .ok_or_else(|| StubError::not_found("User"))
    }

    fn caller(&self, req: &HttpRequest) -> Result<UserProfile, StubError> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|x| x.to_str().ok())
            .and_then(|x| x.strip_prefix("Bearer "))
            .ok_or_else(StubError::unauthorized)?;
        let user_id = self.tokens.get(token).ok_or_else(StubError::unauthorized)?;
        match self.find_user(user_id) {
            Some(user) if user.profile.enabled => Ok(user.profile.clone()),
            _ => Err(StubError::unauthorized()),
        }
    }

    fn admin_caller(&self, req: &HttpRequest) -> Result<UserProfile, StubError> {
        let caller = self.caller(req)?;
        if caller.has_admin_privileges() {
            Ok(caller)
        } else {
            Err(StubError::forbidden())
        }
    }

    fn product_from_draft(&self, id: RecordId, draft: &ProductDraft) -> Product {
        let category = draft.category.as_ref().and_then(|category_ref| {
            self.categories
                .iter()
                .find(|x| x.id == category_ref.id)
                .cloned()
        });
        Product {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            category,
            stock_quantity: draft.stock_quantity,
            image_url: draft.image_url.clone(),
            created_at: None,
        }
    }

    fn find_product(&self, id: &RecordId) -> Result<&Product, StubError> {
        self.products
            .iter()
            .find(|x| &x.id == id)
            .ok_or_else(|| StubError::not_found("Product"))
    }
}

fn paginate<T: Clone>(items: &[T], page_request: PageRequest) -> Page<T> {
    let size = page_request.size.max(1) as usize;
    Page {
        content: items
            .iter()
            .skip(page_request.page as usize * size)
            .take(size)
            .cloned()
            .collect(),
        total_pages: items.len().div_ceil(size) as u32,
        total_elements: items.len() as u64,
        number: page_request.page,
        size: size as u32,
    }
}

fn deleted(what: &str) -> StubResult<MessageResponse> {
    Ok(web::Json(MessageResponse::new(format!(
        "{what} deleted successfully!"
    ))))
}

/// Super admins may only be changed by themselves and admins only by a
/// super admin (or themselves)
fn check_can_modify(caller: &UserProfile, target: &UserProfile) -> Result<(), StubError> {
    if caller.same_user(target) {
        return Ok(());
    }
    if target.is_super_admin() {
        return Err(StubError::bad_request("Cannot modify SUPER_ADMIN accounts"));
    }
    if target.is_admin() && !caller.is_super_admin() {
        return Err(StubError::bad_request(
            "Only SUPER_ADMIN can modify ADMIN accounts",
        ));
    }
    Ok(())
}

#[tracing::instrument(skip(backend))]
async fn login(
    backend: web::Data<StubBackend>,
    web::Json(args): web::Json<LoginReqArgs>,
) -> Result<HttpResponse, StubError> {
    let mut state = backend.lock();
    let profile = state
        .users
        .iter()
        .find(|x| {
            x.profile.username.as_ref() == args.username
                && x.password == args.password.expose_secret()
                && x.profile.enabled
        })
        .map(|x| x.profile.clone())
        .ok_or_else(|| StubError::bad_request("Error: Invalid credentials"))?;
    let token = Uuid::new_v4().to_string();
    state.tokens.insert(token.clone(), profile.id.clone());
    // The real backend sends role names with the Spring prefix here
    let roles: Vec<String> = profile
        .roles
        .iter()
        .map(|x| format!("{}{x}", RoleName::PREFIX))
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "token": token,
        "type": "Bearer",
        "id": profile.id,
        "username": profile.username,
        "email": profile.email,
        "roles": roles,
    })))
}

#[tracing::instrument(skip(backend))]
async fn register(
    backend: web::Data<StubBackend>,
    web::Json(args): web::Json<RegisterReqArgs>,
) -> StubResult<MessageResponse> {
    let mut state = backend.lock();
    if state
        .users
        .iter()
        .any(|x| x.profile.username == args.username)
    {
        return Err(StubError::bad_request("Error: Username is already taken!"));
    }
    state.users.push(StoredUser {
        profile: UserProfile {
            id: new_id(),
            username: args.username,
            email: args.email,
            roles: Default::default(),
            enabled: true,
            created_at: None,
        },
        password: args.password.expose_secret().to_string(),
    });
    Ok(web::Json(MessageResponse::new("User registered successfully!")))
}

async fn products(
    backend: web::Data<StubBackend>,
    web::Query(page_request): web::Query<PageRequest>,
) -> StubResult<Page<Product>> {
    Ok(web::Json(paginate(&backend.lock().products, page_request)))
}

async fn product_search(
    backend: web::Data<StubBackend>,
    web::Query(args): web::Query<SearchReqArgs>,
) -> StubResult<Page<Product>> {
    let keyword = args.keyword.to_lowercase();
    let matches: Vec<Product> = backend
        .lock()
        .products
        .iter()
        .filter(|x| x.name.to_lowercase().contains(&keyword))
        .cloned()
        .collect();
    Ok(web::Json(paginate(
        &matches,
        PageRequest::new(args.page, args.size),
    )))
}

async fn product(
    backend: web::Data<StubBackend>,
    id: web::Path<RecordId>,
) -> StubResult<Product> {
    Ok(web::Json(backend.lock().find_product(&id)?.clone()))
}

async fn product_create(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    web::Json(draft): web::Json<ProductDraft>,
) -> StubResult<Product> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    let product = state.product_from_draft(new_id(), &draft);
    state.products.push(product.clone());
    Ok(web::Json(product))
}

async fn product_update(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
    web::Json(draft): web::Json<ProductDraft>,
) -> StubResult<Product> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    state.find_product(&id)?;
    let updated = state.product_from_draft(id.into_inner(), &draft);
    let existing = state
        .products
        .iter_mut()
        .find(|x| x.id == updated.id)
        .ok_or_else(|| StubError::not_found("Product"))?;
    *existing = updated.clone();
    Ok(web::Json(updated))
}

async fn product_delete(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
) -> StubResult<MessageResponse> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    state.find_product(&id)?;
    state.products.retain(|x| x.id != *id);
    deleted("Product")
}

async fn categories(backend: web::Data<StubBackend>) -> StubResult<Vec<Category>> {
    Ok(web::Json(backend.lock().categories.clone()))
}

async fn category(
    backend: web::Data<StubBackend>,
    id: web::Path<RecordId>,
) -> StubResult<Category> {
    backend
        .lock()
        .categories
        .iter()
        .find(|x| x.id == *id)
        .cloned()
        .map(web::Json)
        .ok_or_else(|| StubError::not_found("Category"))
}

#[derive(serde::Deserialize)]
struct CategoryBody {
    name: String,
}

async fn category_create(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    web::Json(body): web::Json<CategoryBody>,
) -> StubResult<Category> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    let name =
        CategoryName::try_from(body.name).map_err(|e| StubError::bad_request(e.to_string()))?;
    if state.categories.iter().any(|x| x.name == name) {
        return Err(StubError::bad_request("Category already exists"));
    }
    let category = Category { id: new_id(), name };
    state.categories.push(category.clone());
    Ok(web::Json(category))
}

async fn category_update(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
    web::Json(body): web::Json<CategoryBody>,
) -> StubResult<Category> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    let name =
        CategoryName::try_from(body.name).map_err(|e| StubError::bad_request(e.to_string()))?;
    let category = state
        .categories
        .iter_mut()
        .find(|x| x.id == *id)
        .ok_or_else(|| StubError::not_found("Category"))?;
    category.name = name;
    Ok(web::Json(category.clone()))
}

async fn category_delete(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
) -> StubResult<MessageResponse> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    if !state.categories.iter().any(|x| x.id == *id) {
        return Err(StubError::not_found("Category"));
    }
    state.categories.retain(|x| x.id != *id);
    deleted("Category")
}

async fn order_create(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    web::Json(args): web::Json<OrderReqArgs>,
) -> StubResult<Order> {
    let mut state = backend.lock();
    let caller = state.caller(&req)?;
    let product = state.find_product(&args.product_id)?.clone();
    let quantity = args.quantity.get();
    if quantity > product.stock_quantity {
        return Err(StubError::bad_request("Insufficient stock"));
    }
    let order = Order {
        id: new_id(),
        user: Some(caller),
        total_amount: Some(product.price * f64::from(quantity)),
        product: Some(product),
        quantity,
        order_date: None,
        status: OrderStatus::Pending,
    };
    state.orders.push(order.clone());
    Ok(web::Json(order))
}

async fn orders_mine(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
) -> StubResult<Vec<Order>> {
    let state = backend.lock();
    let caller = state.caller(&req)?;
    Ok(web::Json(
        state
            .orders
            .iter()
            .filter(|x| x.user.as_ref().is_some_and(|user| user.same_user(&caller)))
            .cloned()
            .collect(),
    ))
}

async fn order_delete_mine(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
) -> StubResult<MessageResponse> {
    let mut state = backend.lock();
    let caller = state.caller(&req)?;
    let order = state
        .orders
        .iter()
        .find(|x| x.id == *id)
        .ok_or_else(|| StubError::not_found("Order"))?;
    if !order.user.as_ref().is_some_and(|x| x.same_user(&caller)) {
        return Err(StubError::forbidden());
    }
    if !order.status.is_pending() {
        return Err(StubError::bad_request("Only pending orders can be deleted"));
    }
    state.orders.retain(|x| x.id != *id);
    deleted("Order")
}

async fn orders_all(backend: web::Data<StubBackend>, req: HttpRequest) -> StubResult<Vec<Order>> {
    let state = backend.lock();
    state.admin_caller(&req)?;
    Ok(web::Json(state.orders.clone()))
}

async fn order_status(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
    web::Json(status): web::Json<OrderStatus>,
) -> StubResult<Order> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    let order = state
        .orders
        .iter_mut()
        .find(|x| x.id == *id)
        .ok_or_else(|| StubError::not_found("Order"))?;
    order.status = status;
    Ok(web::Json(order.clone()))
}

async fn order_delete(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
) -> StubResult<MessageResponse> {
    let mut state = backend.lock();
    state.admin_caller(&req)?;
    if !state.orders.iter().any(|x| x.id == *id) {
        return Err(StubError::not_found("Order"));
    }
    state.orders.retain(|x| x.id != *id);
    deleted("Order")
}

async fn users(backend: web::Data<StubBackend>, req: HttpRequest) -> StubResult<Vec<UserProfile>> {
    let state = backend.lock();
    state.admin_caller(&req)?;
    Ok(web::Json(
        state.users.iter().map(|x| x.profile.clone()).collect(),
    ))
}

async fn user(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
) -> StubResult<UserProfile> {
    let state = backend.lock();
    state.admin_caller(&req)?;
    state
        .find_user(&id)
        .map(|x| web::Json(x.profile.clone()))
        .ok_or_else(|| StubError::not_found("User"))
}

#[derive(serde::Deserialize)]
struct UserUpdateBody {
    username: String,
    email: String,
    password: Option<String>,
}

async fn user_update(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
    web::Json(body): web::Json<UserUpdateBody>,
) -> StubResult<UserProfile> {
    let mut state = backend.lock();
    let caller = state.admin_caller(&req)?;
    let target = state.find_user_mut(&id)?;
    check_can_modify(&caller, &target.profile)?;
    target.profile.username = body
        .username
        .try_into()
        .map_err(|e: ConversionError| StubError::bad_request(e.to_string()))?;
    target.profile.email = body.email.into();
    if let Some(password) = body.password.filter(|x| !x.is_empty()) {
        target.password = password;
    }
    Ok(web::Json(target.profile.clone()))
}

async fn user_enabled(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
    web::Json(enabled): web::Json<bool>,
) -> StubResult<UserProfile> {
    let mut state = backend.lock();
    let caller = state.admin_caller(&req)?;
    let target = state.find_user_mut(&id)?;
    check_can_modify(&caller, &target.profile)?;
    target.profile.enabled = enabled;
    Ok(web::Json(target.profile.clone()))
}

async fn user_roles(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
    web::Json(roles): web::Json<Vec<RoleName>>,
) -> StubResult<UserProfile> {
    let mut state = backend.lock();
    let caller = state.admin_caller(&req)?;
    let target = state.find_user_mut(&id)?;
    if roles.contains(&RoleName::SuperAdmin) {
        return Err(StubError::bad_request("Cannot assign SUPER_ADMIN role"));
    }
    if target.profile.is_super_admin() {
        return Err(StubError::bad_request("Cannot modify SUPER_ADMIN roles"));
    }
    if !caller.is_super_admin() {
        if roles.contains(&RoleName::Admin) {
            return Err(StubError::bad_request(
                "Only SUPER_ADMIN can assign ADMIN role",
            ));
        }
        if target.profile.is_admin() {
            return Err(StubError::bad_request(
                "Only SUPER_ADMIN can modify ADMIN roles",
            ));
        }
    }
    target.profile.roles = roles.into();
    Ok(web::Json(target.profile.clone()))
}

async fn user_delete(
    backend: web::Data<StubBackend>,
    req: HttpRequest,
    id: web::Path<RecordId>,
) -> StubResult<MessageResponse> {
    let mut state = backend.lock();
    let caller = state.admin_caller(&req)?;
    let target = state.find_user_mut(&id)?.profile.clone();
    if target.is_super_admin() {
        return Err(StubError::bad_request("Cannot delete SUPER_ADMIN accounts"));
    }
    if target.is_admin() && !caller.is_super_admin() {
        return Err(StubError::bad_request(
            "Only SUPER_ADMIN can delete ADMIN accounts",
        ));
    }
    if target.has_admin_privileges() && caller.same_user(&target) {
        return Err(StubError::bad_request("Cannot delete your own account"));
    }
    state.users.retain(|x| x.profile.id != *id);
    state.tokens.retain(|_, user_id| *user_id != *id);
    deleted("User")
}
