//! Keeps barricades out of blacklisted monuments.

pub mod config;
pub mod hook;
pub mod messages;
pub mod policy;
pub mod prefabs;
pub mod zones;

use std::sync::Arc;

use config_loader::{ConfigManager, LoadSource};
use tracing::{error, info};

use crate::config::{GuardConfig, CURRENT_VERSION};
use crate::messages::{default_messages, MessageCatalog, DEFAULT_LANGUAGE};
use crate::policy::{Actor, Notifier, PlacementGuard};
use crate::zones::{Vec3, ZoneRegistry};

/// Name used for the config and message files.
pub const PLUGIN_NAME: &str = "NoMonumentBarricades";

/// Plugin lifecycle around a [`PlacementGuard`]: load, reload, unload.
pub struct Wards<R, N> {
    store: ConfigManager,
    guard: Option<PlacementGuard<R, N>>,
}

impl<R: ZoneRegistry, N: Notifier> Wards<R, N> {
    /// Read (or create) config and message files and arm the guard.
    /// Persistence failures are logged and the built-in defaults are used.
    pub fn load(store: ConfigManager, zones: R, notifier: N) -> Self {
        let config = load_config(&store);
        let messages = load_messages(&store);
        let guard = PlacementGuard::new(config, zones, notifier).with_messages(messages);
        Self {
            store,
            guard: Some(guard),
        }
    }

    /// Re-read the config and message files and swap both into the guard.
    /// Returns `None` once unloaded.
    pub fn reload(&self) -> Option<Arc<GuardConfig>> {
        let guard = self.guard.as_ref()?;
        guard.reload_messages(load_messages(&self.store));
        Some(guard.reload(load_config(&self.store)))
    }

    pub fn unload(&mut self) {
        self.guard = None;
        info!("{} unloaded", PLUGIN_NAME);
    }

    pub fn guard(&self) -> Option<&PlacementGuard<R, N>> {
        self.guard.as_ref()
    }

    /// Host `CanBuild` hook; an unloaded plugin never vetoes.
    pub fn can_build(
        &self,
        actor: Option<&Actor>,
        prefab: Option<&str>,
        position: Vec3,
    ) -> Option<bool> {
        let guard = self.guard.as_ref()?;
        hook::can_build(guard, actor, prefab, position)
    }
}

fn load_config(store: &ConfigManager) -> GuardConfig {
    match store.load::<GuardConfig>(PLUGIN_NAME, CURRENT_VERSION) {
        Ok((config, source)) => {
            if source != LoadSource::Stored {
                info!(?source, "config initialised");
            }
            config
        }
        Err(e) => {
            error!(error = %e, "failed to load config, using defaults");
            GuardConfig::default()
        }
    }
}

fn load_messages(store: &ConfigManager) -> MessageCatalog {
    let mut catalog = MessageCatalog::with_defaults();
    if let Err(e) = store.register_messages(PLUGIN_NAME, DEFAULT_LANGUAGE, &default_messages()) {
        error!(error = %e, "failed to register default messages");
    }
    match store.load_messages(PLUGIN_NAME) {
        Ok(languages) => {
            for (language, messages) in languages {
                catalog.replace(&language, messages);
            }
        }
        Err(e) => error!(error = %e, "failed to read message files"),
    }
    // operator files may have dropped keys
    catalog.register(DEFAULT_LANGUAGE, default_messages());
    catalog
}
