use std::collections::HashSet;

/// Barricade pieces governed by the monument policy.
pub const BARRICADE_PREFABS: [&str; 4] = [
    "assets/prefabs/deployable/barricades/barricade.stone.prefab",
    "assets/prefabs/deployable/barricades/barricade.concrete.prefab",
    "assets/prefabs/deployable/barricades/barricade.cover.wood_double.prefab",
    "assets/prefabs/deployable/barricades/barricade.sandbags.prefab",
];

/// Immutable set of prefab identifiers.
///
/// Each entry is also reachable by its file name (`barricade.stone.prefab`)
/// and by its short name (`barricade.stone`), since host descriptors are not
/// consistent about which form they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictedPrefabSet {
    aliases: HashSet<String>,
    len: usize,
}

impl RestrictedPrefabSet {
    pub fn barricades() -> Self {
        BARRICADE_PREFABS.iter().copied().collect()
    }

    pub fn contains(&self, prefab: &str) -> bool {
        self.aliases.contains(prefab)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for RestrictedPrefabSet {
    fn default() -> Self {
        Self::barricades()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RestrictedPrefabSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut aliases = HashSet::new();
        let mut full = HashSet::new();
        for prefab in iter {
            let prefab = prefab.as_ref();
            if !full.insert(prefab.to_string()) {
                continue;
            }
            aliases.extend(aliases_of(prefab));
        }
        Self {
            aliases,
            len: full.len(),
        }
    }
}

fn aliases_of(prefab: &str) -> Vec<String> {
    let file = prefab.rsplit('/').next().unwrap_or(prefab);
    let mut out = vec![prefab.to_string(), file.to_string()];
    if let Some(short) = file.strip_suffix(".prefab") {
        out.push(short.to_string());
    }
    out
}
