//! Orrery Scene - bevy layer over the navigation core
//!
//! Wires the engine-free `orrery-core` logic into bevy: spawns the
//! planetary system, fuses device input into the per-frame intent,
//! drives the camera transform from the rig, and draws the radar HUD.
//!
//! The frame runs in a strict order - kinematics, then input, then
//! camera, then radar - expressed as chained system sets so every
//! component sees a consistent view of the frame.

use bevy::prelude::*;
use orrery_core::{NavConfig, RadarConfig};

pub mod bodies;
pub mod camera;
pub mod input;
pub mod radar;

pub use bodies::{Body, BodiesPlugin, Orbit, SystemSpec};
pub use camera::{CameraPlugin, MainCamera, Rig};
pub use input::{FrameIntent, InputPlugin, NavCommand, PadState};
pub use radar::{HudVisible, RadarHudPlugin};

/// Per-frame phases, executed strictly in this order
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavSet {
    /// Recompute all body positions from elapsed time
    Kinematics,
    /// Sample devices into the frame's control intent
    Input,
    /// Consume intent and body positions, update the camera
    Camera,
    /// Project body positions into the HUD disk
    Radar,
}

/// Navigation constants, shared by the input and camera systems
#[derive(Debug, Clone, Resource, Default)]
pub struct NavSettings(pub NavConfig);

/// Radar projection constants
#[derive(Debug, Clone, Resource, Default)]
pub struct RadarSettings(pub RadarConfig);

/// Umbrella plugin: ordering plus all scene sub-plugins
pub struct OrreryScenePlugin;

impl Plugin for OrreryScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavSettings>()
            .init_resource::<RadarSettings>()
            .configure_sets(
                Update,
                (
                    NavSet::Kinematics,
                    NavSet::Input,
                    NavSet::Camera,
                    NavSet::Radar,
                )
                    .chain(),
            )
            .add_plugins((BodiesPlugin, InputPlugin, CameraPlugin, RadarHudPlugin));
    }
}
