use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::config::GuardConfig;
use crate::messages::{MessageCatalog, CANNOT_PLACE_BARRICADE};
use crate::prefabs::RestrictedPrefabSet;
use crate::zones::{Vec3, ZoneRegistry};

/// The player asking to place something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    /// Preferred message language; `None` uses the server default.
    pub language: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// The host's reply channel back to a player.
pub trait Notifier {
    fn reply(&self, actor: &Actor, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn reply(&self, actor: &Actor, message: &str) {
        (**self).reply(actor, message)
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn reply(&self, actor: &Actor, message: &str) {
        (**self).reply(actor, message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub actor: Option<Actor>,
    pub prefab: Option<String>,
    pub position: Vec3,
}

impl PlacementRequest {
    pub fn new(actor: Actor, prefab: impl Into<String>, position: Vec3) -> Self {
        Self {
            actor: Some(actor),
            prefab: Some(prefab.into()),
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyReason {
    pub zone: String,
    pub fragment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

pub struct PlacementGuard<R, N> {
    prefabs: RestrictedPrefabSet,
    config: RwLock<Arc<GuardConfig>>,
    messages: RwLock<Arc<MessageCatalog>>,
    zones: R,
    notifier: N,
}

impl<R: ZoneRegistry, N: Notifier> PlacementGuard<R, N> {
    pub fn new(config: GuardConfig, zones: R, notifier: N) -> Self {
        Self {
            prefabs: RestrictedPrefabSet::barricades(),
            config: RwLock::new(Arc::new(config)),
            messages: RwLock::new(Arc::new(MessageCatalog::with_defaults())),
            zones,
            notifier,
        }
    }

    pub fn with_prefabs(mut self, prefabs: RestrictedPrefabSet) -> Self {
        self.prefabs = prefabs;
        self
    }

    pub fn with_messages(self, messages: MessageCatalog) -> Self {
        self.reload_messages(messages);
        self
    }

    pub fn prefabs(&self) -> &RestrictedPrefabSet {
        &self.prefabs
    }

    /// Message texts in effect right now.
    pub fn messages(&self) -> Arc<MessageCatalog> {
        let guard = self.messages.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in freshly loaded message texts.
    pub fn reload_messages(&self, messages: MessageCatalog) -> Arc<MessageCatalog> {
        let next = Arc::new(messages);
        let mut guard = self.messages.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&next);
        next
    }

    /// Config in effect right now. Later reloads do not affect the returned copy.
    pub fn snapshot(&self) -> Arc<GuardConfig> {
        let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Swap in a new config wholesale and hand back the installed snapshot.
    pub fn reload(&self, config: GuardConfig) -> Arc<GuardConfig> {
        let next = Arc::new(config);
        let mut guard = self.config.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&next);
        next
    }

    /// Decide a placement. Never fails: anything the policy cannot judge is allowed.
    pub fn evaluate(&self, request: &PlacementRequest) -> Decision {
        let Some(prefab) = request.prefab.as_deref() else {
            return Decision::Allow;
        };
        if !self.prefabs.contains(prefab) {
            return Decision::Allow;
        }
        let Some(actor) = request.actor.as_ref() else {
            return Decision::Allow;
        };

        let config = self.snapshot();
        if config.monument_blacklist.is_empty() {
            return Decision::Allow;
        }

        for zone in self.zones.zones() {
            for fragment in &config.monument_blacklist {
                if zone.name().contains(fragment.as_str()) && zone.contains(request.position) {
                    debug!(actor = %actor.id, %prefab, zone = zone.name(), %fragment, "placement denied");
                    let text = self.messages().format(
                        CANNOT_PLACE_BARRICADE,
                        actor.language.as_deref(),
                        &[],
                    );
                    self.notifier.reply(actor, &text);
                    return Decision::Deny(DenyReason {
                        zone: zone.name().to_string(),
                        fragment: fragment.clone(),
                    });
                }
            }
        }

        Decision::Allow
    }
}
