use pigeon_shared::uac::UserProfile;

use crate::Client;

pub mod admin;
mod catalog;
mod orders;

impl Client {
    /// The backend is stateless so only the local session is removed
    #[tracing::instrument]
    pub fn logout(&self) {
        self.session.clear_session();
    }

    /// The profile stored at login, see [`crate::SessionStore::current_user`]
    pub fn user_info(&self) -> Option<UserProfile> {
        self.session.current_user()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_authenticated()
    }
}
