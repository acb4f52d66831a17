use crate::{catalog::Page, catalog::Product, orders::Order, uac::UserProfile};

/// Counts shown on the admin landing page
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_orders: usize,
    pub total_products: u64,
    pub pending_orders: usize,
}

impl DashboardStats {
    pub fn new(users: &[UserProfile], orders: &[Order], products: &Page<Product>) -> Self {
        Self {
            total_users: users.len(),
            total_orders: orders.len(),
            total_products: products.total_elements,
            pending_orders: orders.iter().filter(|o| o.status.is_pending()).count(),
        }
    }
}
