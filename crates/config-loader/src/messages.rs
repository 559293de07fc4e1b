use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use crate::{read_optional, write_json, ConfigError, ConfigManager};

/// Message key -> text for one language.
pub type MessageMap = BTreeMap<String, String>;

impl ConfigManager {
    /// Merge `defaults` into the stored message file for `language`.
    ///
    /// Keys already on disk keep their text so operator translations survive;
    /// missing keys are added. The file is only written when something changed.
    #[instrument(skip(self, defaults))]
    pub fn register_messages(
        &self,
        name: &str,
        language: &str,
        defaults: &MessageMap,
    ) -> Result<MessageMap, ConfigError> {
        let path = self.lang_path(language, name);

        let (mut stored, mut dirty) = match read_optional(&path)? {
            None => (MessageMap::new(), true),
            Some(content) => match serde_json::from_str::<MessageMap>(&content) {
                Ok(map) => (map, false),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "message file is malformed, rewriting");
                    (MessageMap::new(), true)
                }
            },
        };

        for (key, text) in defaults {
            if !stored.contains_key(key) {
                stored.insert(key.clone(), text.clone());
                dirty = true;
            }
        }

        if dirty {
            debug!("Writing {} messages to {:?}", stored.len(), path);
            write_json(&path, &stored)?;
        }
        Ok(stored)
    }

    /// Read every language directory that holds a message file for `name`.
    #[instrument(skip(self))]
    pub fn load_messages(&self, name: &str) -> Result<BTreeMap<String, MessageMap>, ConfigError> {
        let mut out = BTreeMap::new();
        let entries = match std::fs::read_dir(self.lang_dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(out),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: self.lang_dir().to_string_lossy().to_string(),
                    source: e,
                })
            }
        };

        for entry in entries.flatten() {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let language = entry.file_name().to_string_lossy().to_string();
            let path = self.lang_path(&language, name);
            let Some(content) = read_optional(&path)? else {
                continue;
            };
            match serde_json::from_str::<MessageMap>(&content) {
                Ok(map) => {
                    out.insert(language, map);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping malformed message file"),
            }
        }
        Ok(out)
    }
}
