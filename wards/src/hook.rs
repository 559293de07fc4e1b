//! Adapter for the host's `CanBuild` interception point.
//!
//! The host treats any non-null return as a veto and `null` as "carry on",
//! so the guard's decision is folded into an `Option<bool>`.

use crate::policy::{Actor, Notifier, PlacementGuard, PlacementRequest};
use crate::zones::{Vec3, ZoneRegistry};

pub fn can_build<R: ZoneRegistry, N: Notifier>(
    guard: &PlacementGuard<R, N>,
    actor: Option<&Actor>,
    prefab: Option<&str>,
    position: Vec3,
) -> Option<bool> {
    let request = PlacementRequest {
        actor: actor.cloned(),
        prefab: prefab.map(str::to_string),
        position,
    };
    if guard.evaluate(&request).is_allowed() {
        None
    } else {
        Some(true)
    }
}
