//! Process wide record of who is acting now
//!
//! The token and the user profile are always written and cleared together
//! while holding the storage lock, so readers never see one without the other.

use anyhow::Context as _;
use pigeon_shared::{
    const_config::session::{SESSION_KEY_TOKEN, SESSION_KEY_USER},
    log_err_as_warn,
    token::AuthToken,
    uac::UserProfile,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{instrument, warn};

mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, SessionStorage};

#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<Mutex<Box<dyn SessionStorage>>>,
}

impl Default for SessionStore {
    /// Browser builds persist to local storage, native builds default to
    /// memory (use [`FileStorage`] to persist)
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        return Self::new(LocalStorage);
        #[cfg(not(target_arch = "wasm32"))]
        Self::in_memory()
    }
}

impl SessionStore {
    pub fn new<S: SessionStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(Box::new(storage))),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Stores the credential and the profile as one unit
    ///
    /// Fails only if the pair could not be written, in which case any
    /// previous session is left as it was. Failing to persist the pair
    /// (for example to disk) is logged and the session is still usable.
    #[instrument(skip(token))]
    pub fn set_session(&self, token: AuthToken, user: &UserProfile) -> anyhow::Result<()> {
        let user_json = serde_json::to_string(user).context("failed to serialize user profile")?;
        let mut storage = self.lock();
        let previous_token = storage.get_string(SESSION_KEY_TOKEN);
        storage
            .set_string(SESSION_KEY_TOKEN, token.expose_secret().to_string())
            .context("failed to store token")?;
        if let Err(e) = storage.set_string(SESSION_KEY_USER, user_json) {
            // Put the token back the way it was so the pair stays consistent
            match previous_token {
                Some(previous) => log_err_as_warn!(
                    storage.set_string(SESSION_KEY_TOKEN, previous),
                    "failed to restore previous token"
                ),
                None => log_err_as_warn!(
                    storage.remove(SESSION_KEY_TOKEN),
                    "failed to remove partial session"
                ),
            }
            return Err(e.context("failed to store user profile"));
        }
        log_err_as_warn!(storage.flush(), "failed to persist session");
        Ok(())
    }

    /// Removes the session. Calling it without a session does nothing.
    #[instrument]
    pub fn clear_session(&self) {
        clear_locked(self.lock().as_mut());
    }

    /// Removes the session only if it still holds `token`
    ///
    /// Returns true if the session was cleared. A session written after
    /// `token` was read (for example by a newer login) is left alone.
    #[instrument(skip(token))]
    pub fn clear_session_if_token(&self, token: &AuthToken) -> bool {
        let mut storage = self.lock();
        let matches = storage
            .get_string(SESSION_KEY_TOKEN)
            .is_some_and(|stored| stored == token.expose_secret());
        if matches {
            clear_locked(storage.as_mut());
        }
        matches
    }

    /// The cached profile of the logged in user
    ///
    /// Returns `None` when there is no token or when the stored profile
    /// cannot be parsed. A corrupt record is treated as not logged in.
    pub fn current_user(&self) -> Option<UserProfile> {
        let storage = self.lock();
        storage.get_string(SESSION_KEY_TOKEN)?;
        let raw = storage.get_string(SESSION_KEY_USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(?e, "stored user profile is corrupt, treating as logged out");
                None
            }
        }
    }

    /// True if a credential is stored, even if the profile is unreadable
    pub fn has_token(&self) -> bool {
        self.lock().get_string(SESSION_KEY_TOKEN).is_some()
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.lock().get_string(SESSION_KEY_TOKEN).map(AuthToken::from)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn SessionStorage>> {
        self.storage.lock().expect("mutex poisoned")
    }

    #[cfg(test)]
    pub(crate) fn with_storage<R>(&self, f: impl FnOnce(&mut dyn SessionStorage) -> R) -> R {
        f(self.lock().as_mut())
    }
}

fn clear_locked(storage: &mut dyn SessionStorage) {
    log_err_as_warn!(storage.remove(SESSION_KEY_TOKEN));
    log_err_as_warn!(storage.remove(SESSION_KEY_USER));
    log_err_as_warn!(storage.flush(), "failed to persist cleared session");
}
