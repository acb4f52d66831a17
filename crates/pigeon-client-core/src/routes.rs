//! Route table and the guard the router consults before each navigation

use pigeon_shared::{id::RecordId, uac::Username};
use std::borrow::Cow;
use tracing::instrument;

use crate::session::SessionStore;

/// What a view asks of the session before it may be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteRequirement {
    Public,
    Authenticated,
    AdminOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Route {
    Home,
    Login,
    Register,
    ProductDetail(RecordId),
    MyOrders,
    AdminDashboard,
    AdminProducts,
    AdminUsers,
    AdminOrders,
    AdminCategories,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// `replace_history` means the denied location should not be kept in
    /// the history so "back" does not return to it
    Redirect { to: Route, replace_history: bool },
}

impl GuardDecision {
    fn redirect(to: Route) -> Self {
        Self::Redirect {
            to,
            replace_history: true,
        }
    }

    /// Returns `true` if the guard decision is [`Proceed`].
    ///
    /// [`Proceed`]: GuardDecision::Proceed
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

impl Route {
    const PRODUCT_PREFIX: &'static str = "/products/";

    /// Maps a location to a route, ignoring any query string, fragment or
    /// trailing slash
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        let result = match path {
            "/" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/orders" => Self::MyOrders,
            "/admin" => Self::AdminDashboard,
            "/admin/products" => Self::AdminProducts,
            "/admin/users" => Self::AdminUsers,
            "/admin/orders" => Self::AdminOrders,
            "/admin/categories" => Self::AdminCategories,
            other => {
                let id = other.strip_prefix(Self::PRODUCT_PREFIX)?;
                if id.contains('/') {
                    return None;
                }
                let id = RecordId::from(id);
                id.as_path_segment().ok()?;
                Self::ProductDetail(id)
            }
        };
        Some(result)
    }

    pub fn path(&self) -> Cow<'static, str> {
        match self {
            Route::Home => "/".into(),
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::ProductDetail(id) => format!("{}{id}", Self::PRODUCT_PREFIX).into(),
            Route::MyOrders => "/orders".into(),
            Route::AdminDashboard => "/admin".into(),
            Route::AdminProducts => "/admin/products".into(),
            Route::AdminUsers => "/admin/users".into(),
            Route::AdminOrders => "/admin/orders".into(),
            Route::AdminCategories => "/admin/categories".into(),
        }
    }

    pub fn requirement(&self) -> RouteRequirement {
        match self {
            Route::Home | Route::Login | Route::Register | Route::ProductDetail(_) => {
                RouteRequirement::Public
            }
            Route::MyOrders => RouteRequirement::Authenticated,
            Route::AdminDashboard
            | Route::AdminProducts
            | Route::AdminUsers
            | Route::AdminOrders
            | Route::AdminCategories => RouteRequirement::AdminOnly,
        }
    }

    pub fn guard(&self, session: &SessionStore) -> GuardDecision {
        guard(self.requirement(), session)
    }
}

/// Decides whether navigation may continue
///
/// Reads the session fresh on every call so a login or logout is reflected
/// on the next navigation
#[instrument(ret, skip(session))]
pub fn guard(requirement: RouteRequirement, session: &SessionStore) -> GuardDecision {
    match requirement {
        RouteRequirement::Public => GuardDecision::Proceed,
        RouteRequirement::Authenticated if !session.is_authenticated() => {
            GuardDecision::redirect(Route::Login)
        }
        RouteRequirement::Authenticated => GuardDecision::Proceed,
        RouteRequirement::AdminOnly if !session.is_authenticated() => {
            GuardDecision::redirect(Route::Login)
        }
        RouteRequirement::AdminOnly if !session.has_admin_privileges() => {
            GuardDecision::redirect(Route::Home)
        }
        RouteRequirement::AdminOnly => GuardDecision::Proceed,
    }
}

/// One entry of the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Link { label: &'static str, to: Route },
    CurrentUser(Username),
    Logout,
}

pub fn nav_links(session: &SessionStore) -> Vec<NavItem> {
    let mut result = vec![NavItem::Link {
        label: "Home",
        to: Route::Home,
    }];
    if session.is_authenticated() {
        result.push(NavItem::Link {
            label: "My Orders",
            to: Route::MyOrders,
        });
        let user = session.current_user();
        if user.as_ref().is_some_and(|x| x.has_admin_privileges()) {
            result.push(NavItem::Link {
                label: "Admin",
                to: Route::AdminDashboard,
            });
        }
        if let Some(user) = user {
            result.push(NavItem::CurrentUser(user.username));
        }
        result.push(NavItem::Logout);
    } else {
        result.push(NavItem::Link {
            label: "Login",
            to: Route::Login,
        });
        result.push(NavItem::Link {
            label: "Register",
            to: Route::Register,
        });
    }
    result
}
