//! Navigation and radar configuration
//!
//! Every constant that shapes the navigation algorithms lives here.
//! Degenerate values (zero detection range, smoothing outside (0, 1])
//! are rejected at validation time so the per-frame code never has to
//! guard against non-finite math.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("smoothing must be in (0, 1], got {0}")]
    SmoothingOutOfRange(f32),
    #[error("deadzone must be in [0, 1), got {0}")]
    DeadzoneOutOfRange(f32),
    #[error("zoom_damping must be in (0, 1), got {0}")]
    DampingOutOfRange(f32),
    #[error("radar edge_margin ({margin}) must be smaller than radius ({radius})")]
    MarginTooLarge { margin: f32, radius: f32 },
}

/// Camera and flight-model constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NavConfig {
    /// Base linear speed in free flight, scene units per second
    #[serde(default = "default_fly_speed")]
    pub fly_speed: f32,
    /// Speed multiplier while boosting
    #[serde(default = "default_boost_multiplier")]
    pub boost_multiplier: f32,
    /// Roll angular speed, radians per second
    #[serde(default = "default_roll_speed")]
    pub roll_speed: f32,
    /// Radians of rotation per pixel of mouse motion
    #[serde(default = "default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,
    /// Initial lock distance = target radius x this multiplier
    #[serde(default = "default_lock_distance_multiplier")]
    pub lock_distance_multiplier: f32,
    /// Per-frame position interpolation factor while locked
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    /// Keyboard / gamepad angular rate, radians per second
    #[serde(default = "default_orbit_rate")]
    pub orbit_rate: f32,
    /// Global scale applied to every body's angular speed
    #[serde(default = "default_orbit_speed_scale")]
    pub orbit_speed_scale: f32,
    /// Scene units of travel per unit of zoom velocity per second
    #[serde(default = "default_zoom_scale")]
    pub zoom_scale: f32,
    /// Zoom velocity decay factor applied each frame
    #[serde(default = "default_zoom_damping")]
    pub zoom_damping: f32,
    /// Zoom velocity added per held D-pad frame
    #[serde(default = "default_zoom_increment")]
    pub zoom_increment: f32,
    /// Analog stick deadzone
    #[serde(default = "default_deadzone")]
    pub deadzone: f32,
    /// Height of the absolute overhead pose reachable from free mode
    #[serde(default = "default_top_height")]
    pub top_height: f32,
}

fn default_fly_speed() -> f32 {
    40.0
}

fn default_boost_multiplier() -> f32 {
    3.0
}

fn default_roll_speed() -> f32 {
    1.5
}

fn default_mouse_sensitivity() -> f32 {
    0.003
}

fn default_lock_distance_multiplier() -> f32 {
    3.0
}

fn default_smoothing() -> f32 {
    0.15
}

fn default_orbit_rate() -> f32 {
    1.2
}

fn default_orbit_speed_scale() -> f32 {
    0.1
}

fn default_zoom_scale() -> f32 {
    1.0
}

fn default_zoom_damping() -> f32 {
    0.9
}

fn default_zoom_increment() -> f32 {
    0.5
}

fn default_deadzone() -> f32 {
    0.15
}

fn default_top_height() -> f32 {
    400.0
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            fly_speed: default_fly_speed(),
            boost_multiplier: default_boost_multiplier(),
            roll_speed: default_roll_speed(),
            mouse_sensitivity: default_mouse_sensitivity(),
            lock_distance_multiplier: default_lock_distance_multiplier(),
            smoothing: default_smoothing(),
            orbit_rate: default_orbit_rate(),
            orbit_speed_scale: default_orbit_speed_scale(),
            zoom_scale: default_zoom_scale(),
            zoom_damping: default_zoom_damping(),
            zoom_increment: default_zoom_increment(),
            deadzone: default_deadzone(),
            top_height: default_top_height(),
        }
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("fly_speed", self.fly_speed),
            ("boost_multiplier", self.boost_multiplier),
            ("roll_speed", self.roll_speed),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("lock_distance_multiplier", self.lock_distance_multiplier),
            ("orbit_rate", self.orbit_rate),
            ("orbit_speed_scale", self.orbit_speed_scale),
            ("zoom_scale", self.zoom_scale),
            ("zoom_increment", self.zoom_increment),
            ("top_height", self.top_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 || self.smoothing > 1.0 {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing));
        }
        if !self.deadzone.is_finite() || self.deadzone < 0.0 || self.deadzone >= 1.0 {
            return Err(ConfigError::DeadzoneOutOfRange(self.deadzone));
        }
        if !self.zoom_damping.is_finite() || self.zoom_damping <= 0.0 || self.zoom_damping >= 1.0 {
            return Err(ConfigError::DampingOutOfRange(self.zoom_damping));
        }
        Ok(())
    }
}

/// Radar HUD projection constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RadarConfig {
    /// World distance mapped to the disk radius
    #[serde(default = "default_detection_range")]
    pub detection_range: f32,
    /// Disk radius in HUD pixels
    #[serde(default = "default_radar_radius")]
    pub radius: f32,
    /// Blips clamp to radius - edge_margin
    #[serde(default = "default_edge_margin")]
    pub edge_margin: f32,
}

fn default_detection_range() -> f32 {
    500.0
}

fn default_radar_radius() -> f32 {
    80.0
}

fn default_edge_margin() -> f32 {
    6.0
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            detection_range: default_detection_range(),
            radius: default_radar_radius(),
            edge_margin: default_edge_margin(),
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("detection_range", self.detection_range),
            ("radius", self.radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !self.edge_margin.is_finite() || self.edge_margin < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "edge_margin",
                value: self.edge_margin,
            });
        }
        if self.edge_margin >= self.radius {
            return Err(ConfigError::MarginTooLarge {
                margin: self.edge_margin,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        NavConfig::default().validate().unwrap();
        RadarConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_detection_range_rejected() {
        let cfg = RadarConfig {
            detection_range: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_margin_must_fit_inside_disk() {
        let cfg = RadarConfig {
            radius: 50.0,
            edge_margin: 50.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MarginTooLarge { .. })
        ));
    }

    #[test]
    fn test_smoothing_bounds() {
        let mut cfg = NavConfig {
            smoothing: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        cfg.smoothing = 1.0;
        cfg.validate().unwrap();
        cfg.smoothing = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let cfg = NavConfig {
            fly_speed: f32::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = NavConfig {
            orbit_speed_scale: f32::INFINITY,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_damping_strictly_inside_unit_interval() {
        let cfg = NavConfig {
            zoom_damping: 1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
