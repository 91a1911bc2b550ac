//! Body types for the tracked planetary system

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Unique identifier for an orbiting body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub String);

impl BodyId {
    /// Create a new BodyId from a name string
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orbital elements for one body, fixed after creation.
///
/// The phase is randomized once when the body is created so that bodies
/// sharing an orbital radius do not start in conjunction. Speed, radius
/// and inclination come from configuration and are never mutated at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Starting angle in radians
    pub phase: f32,
    /// Angular speed in radians per simulated time unit
    pub angular_speed: f32,
    /// Orbital radius in scene units
    pub radius: f32,
    /// Vertical oscillation amplitude for inclined orbits (0 = planar)
    #[serde(default)]
    pub inclination: f32,
}

impl OrbitalElements {
    /// Create elements with a phase seeded uniformly in [0, 2π)
    pub fn seeded(angular_speed: f32, radius: f32, inclination: f32) -> Self {
        let phase = rand::rng().random_range(0.0..TAU);
        Self {
            phase,
            angular_speed,
            radius,
            inclination,
        }
    }
}

/// Declarative description of one body, as it appears in the viewer's
/// TOML configuration. Scene assembly turns each spec into a mesh
/// entity plus an [`OrbitalElements`] with a freshly seeded phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    /// Body identifier, unique within the system
    pub id: String,
    /// Physical radius of the body in scene units (drives the lock-on
    /// minimum distance and the rendered sphere size)
    pub body_radius: f32,
    /// Orbital radius around the parent (0 for the central star)
    #[serde(default)]
    pub orbit_radius: f32,
    /// Angular speed in radians per simulated time unit
    #[serde(default)]
    pub angular_speed: f32,
    /// Vertical oscillation amplitude for inclined orbits
    #[serde(default)]
    pub inclination: f32,
    /// Parent body id for satellites; None orbits the system origin
    #[serde(default)]
    pub parent: Option<String>,
    /// Emissive bodies (the star) are self-lit
    #[serde(default)]
    pub emissive: bool,
    /// Base color as linear RGB
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

fn default_color() -> [f32; 3] {
    [0.7, 0.7, 0.7]
}

impl BodySpec {
    /// Produce runtime orbital elements with a randomized phase
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements::seeded(self.angular_speed, self.orbit_radius, self.inclination)
    }

    pub fn body_id(&self) -> BodyId {
        BodyId::new(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_id_roundtrip() {
        let id = BodyId::new("rocky-1");
        assert_eq!(id.as_str(), "rocky-1");
        assert_eq!(id.to_string(), "rocky-1");
    }

    #[test]
    fn test_seeded_phase_in_range() {
        for _ in 0..100 {
            let elements = OrbitalElements::seeded(0.5, 60.0, 0.0);
            assert!(elements.phase >= 0.0);
            assert!(elements.phase < TAU);
        }
    }

    #[test]
    fn test_spec_elements_carry_config_values() {
        let spec = BodySpec {
            id: "gassy".to_string(),
            body_radius: 4.0,
            orbit_radius: 120.0,
            angular_speed: 0.25,
            inclination: 3.0,
            parent: None,
            emissive: false,
            color: default_color(),
        };
        let elements = spec.elements();
        assert_eq!(elements.angular_speed, 0.25);
        assert_eq!(elements.radius, 120.0);
        assert_eq!(elements.inclination, 3.0);
    }
}
