use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument, warn};

pub mod messages;
pub use messages::MessageMap;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

/// A persisted config record that carries its own schema version.
///
/// Stored versions are compared byte-wise against the running build's
/// version; an older record is handed to [`VersionedConfig::migrate`] and then
/// stamped with the current version.
pub trait VersionedConfig: Serialize + DeserializeOwned {
    fn version(&self) -> &str;

    fn set_version(&mut self, version: &str);

    /// Built-in record written when nothing usable is on disk.
    fn defaults(current_version: &str) -> Self;

    /// Upgrade a record stored by an older build. Runs before the version stamp.
    fn migrate(self, current_version: &str) -> Self;
}

/// Where the record returned by [`ConfigManager::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No file existed; defaults were written.
    Defaults,
    /// The file could not be parsed and was replaced with defaults.
    Recovered,
    /// The file was older than the running build and was migrated.
    Migrated,
    /// The file was current and loaded as-is.
    Stored,
}

pub struct ConfigManager {
    config_dir: PathBuf,
    lang_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_data_dir(Self::find_data_dir())
    }

    /// Lay out `config/` and `lang/` under a single plugin data directory.
    pub fn with_data_dir<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            lang_dir: root.join("lang"),
        }
    }

    pub fn with_dirs(config_dir: PathBuf, lang_dir: PathBuf) -> Self {
        Self {
            config_dir,
            lang_dir,
        }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn lang_dir(&self) -> &PathBuf {
        &self.lang_dir
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(format!("{}.json", name))
    }

    pub fn lang_path(&self, language: &str, name: &str) -> PathBuf {
        self.lang_dir.join(language).join(format!("{}.json", name))
    }

    fn find_data_dir() -> PathBuf {
        if let Ok(data_dir) = std::env::var("PLUGIN_DATA_DIR") {
            PathBuf::from(data_dir)
        } else {
            PathBuf::from("oxide")
        }
    }

    /// Load the named config, creating, repairing or migrating it as needed.
    /// The file is always rewritten afterwards so it reflects what was loaded.
    #[instrument(skip(self))]
    pub fn load<T: VersionedConfig>(
        &self,
        name: &str,
        current_version: &str,
    ) -> Result<(T, LoadSource), ConfigError> {
        let path = self.config_path(name);
        debug!("Loading config from: {:?}", path);

        let (config, source) = match read_optional(&path)? {
            None => {
                debug!("Config file not found, writing defaults");
                (T::defaults(current_version), LoadSource::Defaults)
            }
            Some(content) => match serde_json::from_str::<T>(&content) {
                Ok(stored) if stored.version() < current_version => {
                    (upgrade(stored, current_version), LoadSource::Migrated)
                }
                Ok(stored) => (stored, LoadSource::Stored),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config is malformed, replacing with defaults");
                    (T::defaults(current_version), LoadSource::Recovered)
                }
            },
        };

        self.save(name, &config)?;
        Ok((config, source))
    }

    #[instrument(skip(self, config))]
    pub fn save<T: Serialize>(&self, name: &str, config: &T) -> Result<(), ConfigError> {
        write_json(&self.config_path(name), config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn upgrade<T: VersionedConfig>(stored: T, current_version: &str) -> T {
    warn!("Config changes detected! Updating...");
    let from = stored.version().to_string();
    let mut config = stored.migrate(current_version);
    warn!(
        "Config update complete! Updated from version {} to {}",
        from, current_version
    );
    config.set_version(current_version);
    config
}

pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        }),
    }
}

pub(crate) fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), ConfigError> {
    let io_err = |e| ConfigError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let body =
        serde_json::to_string_pretty(value).map_err(|e| ConfigError::Serialize { source: e })?;
    fs::write(path, body).map_err(io_err)
}
