//! Configuration loading and validation

use anyhow::{Context, Result};
use orrery_core::{BodySpec, NavConfig, RadarConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavConfig,
    #[serde(default)]
    pub radar: RadarConfig,
    /// The planetary system, one `[[body]]` table per body
    #[serde(default = "default_system", rename = "body")]
    pub bodies: Vec<BodySpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            navigation: NavConfig::default(),
            radar: RadarConfig::default(),
            bodies: default_system(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.navigation.validate()?;
        self.radar.validate()?;
        for body in &self.bodies {
            if !body.body_radius.is_finite() || body.body_radius <= 0.0 {
                anyhow::bail!(
                    "body {:?} has non-positive radius {}",
                    body.id,
                    body.body_radius
                );
            }
        }
        let mut ids: Vec<_> = self.bodies.iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.bodies.len() {
            anyhow::bail!("body ids must be unique");
        }
        Ok(())
    }
}

/// A small sun-planets-moon system used when no configuration exists
fn default_system() -> Vec<BodySpec> {
    let body = |id: &str,
                body_radius: f32,
                orbit_radius: f32,
                angular_speed: f32,
                color: [f32; 3]| BodySpec {
        id: id.to_string(),
        body_radius,
        orbit_radius,
        angular_speed,
        inclination: 0.0,
        parent: None,
        emissive: false,
        color,
    };

    vec![
        BodySpec {
            emissive: true,
            ..body("sol", 16.0, 0.0, 0.0, [1.0, 0.85, 0.4])
        },
        body("ember", 2.0, 40.0, 1.6, [0.8, 0.5, 0.3]),
        body("veil", 3.5, 70.0, 1.1, [0.9, 0.8, 0.6]),
        BodySpec {
            inclination: 2.0,
            ..body("haven", 4.0, 110.0, 0.8, [0.3, 0.5, 0.9])
        },
        BodySpec {
            parent: Some("haven".to_string()),
            ..body("haven-moon", 1.0, 9.0, 4.0, [0.7, 0.7, 0.7])
        },
        body("rust", 3.0, 160.0, 0.6, [0.85, 0.4, 0.25]),
        BodySpec {
            inclination: 6.0,
            ..body("colossus", 9.0, 240.0, 0.35, [0.8, 0.7, 0.5])
        },
        BodySpec {
            parent: Some("colossus".to_string()),
            ..body("colossus-moon", 1.8, 18.0, 2.5, [0.55, 0.6, 0.65])
        },
        body("rimward", 7.0, 330.0, 0.22, [0.6, 0.75, 0.8]),
    ]
}

/// Load configuration from file, falling back to defaults when the
/// file does not exist
pub fn load_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), "Loaded configuration");
        config
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Config::default()
    };
    config.validate()?;
    Ok(config)
}

/// Save default configuration to file
pub fn save_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("nope.toml")).unwrap();
        assert!(!config.bodies.is_empty());
        assert_eq!(config.navigation.fly_speed, NavConfig::default().fly_speed);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.toml");
        std::fs::write(
            &path,
            r#"
[navigation]
fly_speed = 80.0

[[body]]
id = "lonely"
body_radius = 5.0
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.navigation.fly_speed, 80.0);
        // Unspecified fields keep their defaults
        assert_eq!(
            config.navigation.smoothing,
            NavConfig::default().smoothing
        );
        assert_eq!(config.bodies.len(), 1);
        assert_eq!(config.bodies[0].orbit_radius, 0.0);
    }

    #[test]
    fn test_saved_defaults_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.toml");
        save_default_config(&path).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.bodies.len(), Config::default().bodies.len());
    }

    #[test]
    fn test_duplicate_body_ids_rejected() {
        let config = Config {
            bodies: vec![
                BodySpec {
                    id: "twin".to_string(),
                    body_radius: 1.0,
                    orbit_radius: 10.0,
                    angular_speed: 1.0,
                    inclination: 0.0,
                    parent: None,
                    emissive: false,
                    color: [0.5; 3],
                },
                BodySpec {
                    id: "twin".to_string(),
                    body_radius: 2.0,
                    orbit_radius: 20.0,
                    angular_speed: 1.0,
                    inclination: 0.0,
                    parent: None,
                    emissive: false,
                    color: [0.5; 3],
                },
            ],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_navigation_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orrery.toml");
        std::fs::write(&path, "[navigation]\nsmoothing = 0.0\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_default_system_validates() {
        Config::default().validate().unwrap();
    }
}
