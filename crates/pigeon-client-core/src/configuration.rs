use config::ConfigError;
use pigeon_shared::const_config::client::CLIENT_DEFAULT_SERVER_ADDRESS;
use std::path::PathBuf;

use crate::session::{FileStorage, SessionStore};

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL of the backend without a trailing slash
    pub server_address: String,
    /// Where to keep the session between runs. Memory only when not set.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_address: CLIENT_DEFAULT_SERVER_ADDRESS.to_string(),
            session_file: None,
        }
    }
}

impl ClientSettings {
    pub fn session_store(&self) -> anyhow::Result<SessionStore> {
        Ok(match &self.session_file {
            Some(path) => SessionStore::new(FileStorage::open(path)?),
            None => SessionStore::in_memory(),
        })
    }
}

/// Reads `configuration/client.toml` (if present) then applies overrides
/// from the environment
pub fn get_configuration() -> Result<ClientSettings, ConfigError> {
    let base_path = std::env::current_dir().expect("failed to determine the current directory");
    let settings_file =
        config::File::from(base_path.join("configuration").join("client.toml")).required(false);
    build_settings(settings_file)
}

fn build_settings<S>(file_source: S) -> Result<ClientSettings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    config::Config::builder()
        .set_default("server_address", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .add_source(file_source)
        // E.g. `PIGEON_SERVER_ADDRESS=http://shop.example.com` sets `server_address`
        .add_source(
            config::Environment::with_prefix("PIGEON")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
