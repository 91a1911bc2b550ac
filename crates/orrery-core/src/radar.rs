//! World-to-radar 2D projection
//!
//! Maps tracked entities into a fixed-radius HUD disk relative to the
//! camera: straight ahead projects toward the top of the disk and the
//! whole mapping rotates rigidly with camera yaw. Out-of-range entities
//! clamp to the disk edge so distant bodies keep a directional blip.

use crate::config::RadarConfig;
use glam::{Quat, Vec2, Vec3};

/// One radar blip: offset from the disk center in HUD units, +y toward
/// the top of the disk, plus whether the true position overflowed the
/// representable range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarPoint {
    pub offset: Vec2,
    pub clamped: bool,
}

/// Project one entity's world position into the radar disk.
///
/// Pure and stateless; an entity coinciding with the camera yields the
/// disk center, which is degenerate but valid.
pub fn project(
    camera_position: Vec3,
    camera_rotation: Quat,
    world_position: Vec3,
    cfg: &RadarConfig,
) -> RadarPoint {
    // Express the entity in camera-local space; local -Z is ahead
    let local = camera_rotation.inverse() * (world_position - camera_position);
    let scale = cfg.radius / cfg.detection_range;
    let mut offset = Vec2::new(local.x, -local.z) * scale;

    let limit = cfg.radius - cfg.edge_margin;
    let magnitude = offset.length();
    let clamped = magnitude > limit;
    if clamped {
        // magnitude > limit >= 0, so the division is safe
        offset *= limit / magnitude;
    }
    RadarPoint { offset, clamped }
}
