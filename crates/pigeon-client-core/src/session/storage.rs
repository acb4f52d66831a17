use std::{collections::BTreeMap, fmt::Debug};

/// Key value store the session is persisted in
///
/// Writes may be buffered until [`SessionStorage::flush`] is called.
pub trait SessionStorage: Debug + Send {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage(BTreeMap<String, String>);

impl SessionStorage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.0.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.0.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use anyhow::Context as _;
    use std::{
        collections::BTreeMap,
        io::ErrorKind,
        path::{Path, PathBuf},
    };
    use tracing::warn;

    use super::SessionStorage;

    /// Keeps the entries in a RON file so a session survives restarts
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl FileStorage {
        /// Loads existing entries from `path` if the file exists
        ///
        /// A file that cannot be parsed is discarded (with a warning) and
        /// the store starts empty
        #[tracing::instrument(err(Debug))]
        pub fn open(path: impl Into<PathBuf> + std::fmt::Debug) -> anyhow::Result<Self> {
            let path = path.into();
            let entries = match std::fs::read_to_string(&path) {
                Ok(text) => ron::from_str(&text).unwrap_or_else(|e| {
                    warn!(?e, ?path, "session file is corrupt and will be replaced");
                    BTreeMap::new()
                }),
                Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to read session file {path:?}"))
                }
            };
            Ok(Self { path, entries })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SessionStorage for FileStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.entries.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) -> anyhow::Result<()> {
            self.entries.insert(key.to_string(), value);
            Ok(())
        }

        fn remove(&mut self, key: &str) -> anyhow::Result<()> {
            self.entries.remove(key);
            Ok(())
        }

        fn flush(&mut self) -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create folder for session file: {parent:?}")
                    })?;
                }
            }
            let text = ron::ser::to_string_pretty(&self.entries, Default::default())
                .context("failed to serialize session")?;
            std::fs::write(&self.path, text)
                .with_context(|| format!("failed to write session file {:?}", self.path))
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use anyhow::{anyhow, Context as _};

    use super::SessionStorage;

    /// The browser's `localStorage`, shared by every tab on the origin
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> anyhow::Result<web_sys::Storage> {
            web_sys::window()
                .context("no window available")?
                .local_storage()
                .map_err(|e| anyhow!("failed to access local storage: {e:?}"))?
                .context("local storage is not available")
        }
    }

    impl SessionStorage for LocalStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            Self::storage().ok()?.get_item(key).ok().flatten()
        }

        fn set_string(&mut self, key: &str, value: String) -> anyhow::Result<()> {
            Self::storage()?
                .set_item(key, &value)
                .map_err(|e| anyhow!("failed to set {key:?}: {e:?}"))
        }

        fn remove(&mut self, key: &str) -> anyhow::Result<()> {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| anyhow!("failed to remove {key:?}: {e:?}"))
        }
    }
}
