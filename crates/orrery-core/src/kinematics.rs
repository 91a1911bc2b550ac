//! Closed-form orbital kinematics
//!
//! Orbits are not simulated by force integration; each body's position
//! is a pure function of elapsed time and its fixed orbital elements.
//! Moons call the same functions with their own elements and are
//! composed through the scene graph relative to their parent.

use crate::body::OrbitalElements;
use glam::{Vec2, Vec3};

/// Current orbit angle for a body: `phase + time * speed * scale`.
///
/// `speed_scale` is the single global constant that normalizes all
/// configured angular speeds to a visually pleasant rate.
pub fn orbit_angle(phase: f32, time: f32, angular_speed: f32, speed_scale: f32) -> f32 {
    phase + time * angular_speed * speed_scale
}

/// Planar orbit position as an (x, z) pair on the circle of `radius`.
pub fn orbit_position(
    phase: f32,
    time: f32,
    angular_speed: f32,
    speed_scale: f32,
    radius: f32,
) -> Vec2 {
    let theta = orbit_angle(phase, time, angular_speed, speed_scale);
    Vec2::new(radius * theta.cos(), radius * theta.sin())
}

/// Vertical offset for inclined orbits, composed additively with the
/// planar position.
pub fn inclination_offset(
    phase: f32,
    time: f32,
    angular_speed: f32,
    speed_scale: f32,
    amplitude: f32,
) -> f32 {
    amplitude * orbit_angle(phase, time, angular_speed, speed_scale).sin()
}

/// Full 3D translation of a body relative to its parent at `time`.
pub fn body_translation(elements: &OrbitalElements, time: f32, speed_scale: f32) -> Vec3 {
    let planar = orbit_position(
        elements.phase,
        time,
        elements.angular_speed,
        speed_scale,
        elements.radius,
    );
    let y = if elements.inclination != 0.0 {
        inclination_offset(
            elements.phase,
            time,
            elements.angular_speed,
            speed_scale,
            elements.inclination,
        )
    } else {
        0.0
    };
    Vec3::new(planar.x, y, planar.y)
}
