use crate::animation::OPEN_ANGLE;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value outside its allowed range
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub lighting: bool,
    pub debug: bool,
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub animation: AnimationSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f64,
    pub height: f64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    /// Initial translation along the view axis
    pub distance: f64,
    /// Initial X, Y, Z rotation in degrees
    pub orientation: [f64; 3],
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationSettings {
    pub period_ms: u64,
    pub initial_delay_ms: u64,
    /// Degrees the door turns per tick
    pub door_step: f64,
    /// Most ticks run for a single late timer callback
    pub max_catch_up: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            lighting: true,
            debug: false,
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        WindowSettings {
            width: 800.0,
            height: 800.0,
            title: "3D Fire Hydrant Cabinet".to_owned(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            distance: -80.0,
            orientation: [20.0, 0.0, 0.0],
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        AnimationSettings {
            period_ms: 16,
            initial_delay_ms: 5,
            door_step: 2.0,
            max_catch_up: 8,
        }
    }
}

impl AnimationSettings {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }
}

impl Settings {
    /// Load settings from a TOML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let animation = &self.animation;
        if animation.period_ms == 0 {
            return Err(ConfigError::Invalid("animation.period_ms must be positive".into()));
        }
        if animation.max_catch_up == 0 {
            return Err(ConfigError::Invalid("animation.max_catch_up must be positive".into()));
        }
        if !(animation.door_step > 0.0 && animation.door_step <= OPEN_ANGLE) {
            return Err(ConfigError::Invalid(format!(
                "animation.door_step must be in (0, {OPEN_ANGLE}], got {}",
                animation.door_step
            )));
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !self.camera.distance.is_finite() || self.camera.orientation.iter().any(|a| !a.is_finite()) {
            return Err(ConfigError::Invalid("camera values must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        settings.validate().unwrap();
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let settings = Settings::parse(
            r#"
            lighting = false

            [animation]
            door_step = 4.0

            [camera]
            orientation = [0.0, 45.0, 0.0]
            "#,
        )
        .unwrap();
        assert!(!settings.lighting);
        assert_eq!(settings.animation.door_step, 4.0);
        assert_eq!(settings.animation.period(), Duration::from_millis(16));
        assert_eq!(settings.camera.orientation, [0.0, 45.0, 0.0]);
        assert_eq!(settings.camera.distance, -80.0);
        assert_eq!(settings.window.width, 800.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Settings::parse("[animation\nperiod_ms = 16").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut settings = Settings::default();
        settings.animation.door_step = 0.0;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));

        let mut settings = Settings::default();
        settings.animation.door_step = 121.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.animation.period_ms = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.window.height = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Settings::load("/nonexistent/hydrant3d.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
