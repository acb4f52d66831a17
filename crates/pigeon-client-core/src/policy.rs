//! Who may see and do what
//!
//! Every check here fails closed: no session, an unreadable profile or an
//! unknown role never grants anything. These checks decide what the UI
//! offers. The backend enforces the same rules again.

use pigeon_shared::{
    orders::Order,
    uac::{RoleName, UserProfile},
};

use crate::session::SessionStore;

impl SessionStore {
    /// True when a credential is stored. The profile is not consulted.
    pub fn is_authenticated(&self) -> bool {
        self.has_token()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_admin())
    }

    pub fn is_super_admin(&self) -> bool {
        self.current_user().is_some_and(|user| user.is_super_admin())
    }

    /// Holds [`RoleName::Admin`] or [`RoleName::SuperAdmin`]
    pub fn has_admin_privileges(&self) -> bool {
        self.current_user()
            .is_some_and(|user| user.has_admin_privileges())
    }
}

/// Whether the actor may edit, enable/disable or delete `target`
///
/// Super admins cannot be modified from the client at all. Admin accounts
/// can only be modified by a super admin.
#[must_use]
pub fn can_modify(actor_is_super_admin: bool, target: &UserProfile) -> bool {
    if target.is_super_admin() {
        return false;
    }
    actor_is_super_admin || !target.is_admin()
}

/// Whether the actor may grant or revoke the admin role on `target`
#[must_use]
pub fn can_toggle_admin_role(actor_is_super_admin: bool, target: &UserProfile) -> bool {
    actor_is_super_admin && !target.is_super_admin()
}

/// The role list to send when toggling admin on `target`
///
/// Admins drop back to a plain user, everyone else becomes an admin. Any
/// other role the target held is not carried over.
pub fn toggled_admin_roles(target: &UserProfile) -> Vec<RoleName> {
    if target.is_admin() {
        vec![RoleName::User]
    } else {
        vec![RoleName::User, RoleName::Admin]
    }
}

/// Orders can be withdrawn by their owner until processing starts
#[must_use]
pub fn can_cancel_own_order(order: &Order) -> bool {
    order.status.is_pending()
}
