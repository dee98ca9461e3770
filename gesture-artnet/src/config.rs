//! Runtime configuration
//!
//! Loaded from a TOML file; every field has a default so a partial file
//! (or none at all) is fine. CLI flags are applied on top by the binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artnet::{DEFAULT_PORT, MAX_UNIVERSE};
use crate::error::{GestureLinkError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Art-Net node (or broadcast) address
    pub ip: String,
    pub port: u16,
    /// 15-bit Art-Net port-address
    pub universe: u16,

    /// Capture frame size; trajectory features are scaled by it
    pub capture_width: u32,
    pub capture_height: u32,

    /// Extent that pointer coordinates are scaled against for DMX output
    pub pointer_width: u32,
    pub pointer_height: u32,

    /// Passed through to the external hand detector
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,

    /// Payloads held while the transport catches up
    pub queue_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: "10.255.255.2".to_string(),
            port: DEFAULT_PORT,
            universe: 0,
            capture_width: 720,
            capture_height: 480,
            pointer_width: 720,
            pointer_height: 550,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            queue_depth: 32,
        }
    }
}

impl Config {
    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("capture_width", self.capture_width),
            ("capture_height", self.capture_height),
            ("pointer_width", self.pointer_width),
            ("pointer_height", self.pointer_height),
        ];
        for (name, value) in dims {
            if value == 0 {
                return Err(GestureLinkError::InvalidConfig(format!("{name} must be > 0")));
            }
        }
        if self.universe > MAX_UNIVERSE {
            return Err(GestureLinkError::InvalidConfig(format!(
                "universe {} exceeds {}",
                self.universe, MAX_UNIVERSE
            )));
        }
        if self.queue_depth == 0 {
            return Err(GestureLinkError::InvalidConfig(
                "queue_depth must be > 0".into(),
            ));
        }
        let confidences = [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ];
        for (name, value) in confidences {
            if !(0.0..=1.0).contains(&value) {
                return Err(GestureLinkError::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.port, 6454);
        assert_eq!((config.pointer_width, config.pointer_height), (720, 550));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("ip = \"192.168.1.50\"\nuniverse = 3\n").unwrap();
        assert_eq!(config.ip, "192.168.1.50");
        assert_eq!(config.universe, 3);
        assert_eq!(config.capture_height, 480);
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let err = Config::from_toml("pointer_height = 0").unwrap_err();
        assert!(matches!(err, GestureLinkError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = Config::from_toml("colour = 1").unwrap_err();
        assert!(matches!(err, GestureLinkError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_confidence() {
        assert!(Config::from_toml("min_tracking_confidence = 1.5").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 6455\nqueue_depth = 4").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.port, 6455);
        assert_eq!(config.queue_depth, 4);
    }
}
