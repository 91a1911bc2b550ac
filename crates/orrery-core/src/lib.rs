//! Orrery Core - Navigation logic for the planetary-system explorer
//!
//! This crate provides the engine-free foundations of the Orrery system:
//! - Closed-form orbital kinematics for bodies and their moons
//! - Per-frame control intent (keyboard / mouse / gamepad fusion)
//! - The camera rig state machine (free flight, lock-on orbit, top view)
//! - World-to-radar 2D projection with edge clamping
//! - Navigation configuration with load-time validation
//!
//! Everything here is plain math over `glam` types so it can be tested
//! without an engine; the `orrery-scene` crate wires it into bevy.

pub mod body;
pub mod config;
pub mod intent;
pub mod kinematics;
pub mod radar;
pub mod rig;

pub use body::{BodyId, BodySpec, OrbitalElements};
pub use config::{ConfigError, NavConfig, RadarConfig};
pub use intent::{deadzone, ControlIntent, IntentFlag, PadSample};
pub use radar::RadarPoint;
pub use rig::{CameraRig, LockState, RigMode};
