use glam::Quat;
use serde::{Deserialize, Serialize};

/// World-space position, same coordinate space as zone bounds.
pub use glam::Vec3;

/// A named region owned by the host world.
pub trait Zone {
    fn name(&self) -> &str;

    fn contains(&self, position: Vec3) -> bool;
}

/// Enumerates the host's zones in its natural order.
pub trait ZoneRegistry {
    fn zones(&self) -> Box<dyn Iterator<Item = &dyn Zone> + '_>;
}

/// Monument bounds: a box around `center`, turned `yaw_degrees` about the
/// vertical axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonumentZone {
    pub name: String,
    pub center: Vec3,
    /// Half-size along each local axis.
    pub extents: Vec3,
    #[serde(default)]
    pub yaw_degrees: f32,
}

impl MonumentZone {
    pub fn new(name: impl Into<String>, center: Vec3, extents: Vec3) -> Self {
        Self {
            name: name.into(),
            center,
            extents,
            yaw_degrees: 0.0,
        }
    }

    pub fn with_yaw(mut self, yaw_degrees: f32) -> Self {
        self.yaw_degrees = yaw_degrees;
        self
    }
}

impl Zone for MonumentZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn contains(&self, position: Vec3) -> bool {
        let yaw = Quat::from_rotation_y(self.yaw_degrees.to_radians());
        let local = yaw.inverse() * (position - self.center);
        local.abs().cmple(self.extents).all()
    }
}

impl ZoneRegistry for [MonumentZone] {
    fn zones(&self) -> Box<dyn Iterator<Item = &dyn Zone> + '_> {
        Box::new(self.iter().map(|z| z as &dyn Zone))
    }
}

impl ZoneRegistry for Vec<MonumentZone> {
    fn zones(&self) -> Box<dyn Iterator<Item = &dyn Zone> + '_> {
        self.as_slice().zones()
    }
}

impl ZoneRegistry for Vec<Box<dyn Zone + Send + Sync>> {
    fn zones(&self) -> Box<dyn Iterator<Item = &dyn Zone> + '_> {
        Box::new(self.iter().map(|z| z.as_ref() as &dyn Zone))
    }
}

impl<R: ZoneRegistry + ?Sized> ZoneRegistry for std::sync::Arc<R> {
    fn zones(&self) -> Box<dyn Iterator<Item = &dyn Zone> + '_> {
        (**self).zones()
    }
}
