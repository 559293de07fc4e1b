use config_loader::VersionedConfig;
use serde::{Deserialize, Serialize};

/// Version this build stamps onto the config file.
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Oldest layout that is migrated in place rather than replaced.
const FIRST_STABLE_VERSION: &str = "1.0.0";

pub const DEFAULT_MONUMENT_BLACKLIST: [&str; 6] = [
    "sphere_tank",
    "airfield_1",
    "launch_site_1",
    "trainyard_1",
    "water_treatment_plant_1",
    "ferry_terminal_1",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(rename = "Version", default)]
    pub version: String,
    /// Zone name fragments; a zone whose name contains any of them is restricted.
    #[serde(rename = "Monument Blacklist", default)]
    pub monument_blacklist: Vec<String>,
}

impl GuardConfig {
    pub fn new(version: impl Into<String>, monument_blacklist: Vec<String>) -> Self {
        Self {
            version: version.into(),
            monument_blacklist,
        }
    }

    /// First blacklisted fragment contained in `zone_name`, case-sensitive.
    pub fn matching_fragment(&self, zone_name: &str) -> Option<&str> {
        self.monument_blacklist
            .iter()
            .map(String::as_str)
            .find(|fragment| zone_name.contains(fragment))
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        <Self as VersionedConfig>::defaults(CURRENT_VERSION)
    }
}

impl VersionedConfig for GuardConfig {
    fn version(&self) -> &str {
        &self.version
    }

    fn set_version(&mut self, version: &str) {
        self.version = version.to_string();
    }

    fn defaults(current_version: &str) -> Self {
        Self::new(
            current_version,
            DEFAULT_MONUMENT_BLACKLIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    fn migrate(self, current_version: &str) -> Self {
        if self.version.as_str() < FIRST_STABLE_VERSION {
            return Self::defaults(current_version);
        }
        self
    }
}
