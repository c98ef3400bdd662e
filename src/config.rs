//! Host configuration loaded from `config.json`

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Resolution {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub resolution: Resolution,
    /// Fixed simulation rate in updates per second
    pub target_fps: f32,
    pub vsync: bool,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config: Config = serde_json::from_str(&json)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing config to {}", path.display()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Resolution {
                width: 1024,
                height: 768,
            },
            target_fps: 60.0,
            vsync: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let config = Config {
            resolution: Resolution {
                width: 640,
                height: 480,
            },
            target_fps: 30.0,
            vsync: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.resolution.width, 640);
        assert_eq!(back.resolution.height, 480);
        assert_eq!(back.target_fps, 30.0);
        assert!(back.vsync);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolution.width, 1024);
        assert_eq!(config.resolution.height, 768);
        assert_eq!(config.target_fps, 60.0);
    }
}
