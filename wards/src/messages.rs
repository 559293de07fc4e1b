use std::collections::HashMap;

use config_loader::MessageMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const CANNOT_PLACE_BARRICADE: &str = "CannotPlaceBarricade";
pub const DEFAULT_LANGUAGE: &str = "en";

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

/// Built-in English texts.
pub fn default_messages() -> MessageMap {
    MessageMap::from([(
        CANNOT_PLACE_BARRICADE.to_string(),
        "You cannot place barricades in this monument.".to_string(),
    )])
}

/// Per-language message texts with fallback to [`DEFAULT_LANGUAGE`].
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    languages: HashMap<String, MessageMap>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self {
            languages: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register(DEFAULT_LANGUAGE, default_messages());
        catalog
    }

    /// Add texts for a language. Keys already registered for that language win.
    pub fn register(&mut self, language: &str, messages: MessageMap) {
        let entry = self.languages.entry(language.to_string()).or_default();
        for (key, text) in messages {
            entry.entry(key).or_insert(text);
        }
    }

    /// Replace every text for a language, e.g. after reading operator edits.
    pub fn replace(&mut self, language: &str, messages: MessageMap) {
        self.languages.insert(language.to_string(), messages);
    }

    /// Look up `key` in `language`, then in the default language, then fall
    /// back to the key itself.
    pub fn get(&self, key: &str, language: Option<&str>) -> String {
        language
            .and_then(|lang| self.languages.get(lang))
            .and_then(|m| m.get(key))
            .or_else(|| {
                self.languages
                    .get(DEFAULT_LANGUAGE)
                    .and_then(|m| m.get(key))
            })
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// [`MessageCatalog::get`] with `{0}`, `{1}`... replaced from `args`.
    /// Placeholders without a matching argument are left as written.
    pub fn format(&self, key: &str, language: Option<&str>, args: &[&str]) -> String {
        let text = self.get(key, language);
        if args.is_empty() {
            return text;
        }
        PLACEHOLDER
            .replace_all(&text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
