use crate::animation::Door;
use crate::config::Settings;
use druid::Data;

/// Rotation axis of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Model rotation in degrees, each angle kept in [0, 360)
#[derive(Debug, Clone, Copy, Data, PartialEq)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Orientation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Orientation {
            x: wrap_degrees(x),
            y: wrap_degrees(y),
            z: wrap_degrees(z),
        }
    }

    /// Turns one axis by `delta` degrees, wrapping into [0, 360)
    pub fn rotate(&mut self, axis: Axis, delta: f64) {
        let angle = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        };
        *angle = wrap_degrees(*angle + delta);
    }
}

fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Application state
#[derive(Debug, Clone, Data)]
pub struct AppState {
    /// Model rotation
    pub orientation: Orientation,
    /// Translation of the model along the view axis
    pub camera_distance: f64,
    /// Door hinge animation
    pub door: Door,
    /// Lighting enabled
    pub lighting: bool,
    /// Enable debug overlay
    pub debug: bool,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let [x, y, z] = settings.camera.orientation;
        AppState {
            orientation: Orientation::new(x, y, z),
            camera_distance: settings.camera.distance,
            door: Door::new(settings.animation.door_step),
            lighting: settings.lighting,
            debug: settings.debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::DoorPhase;

    #[test]
    fn increment_wraps_past_360() {
        let mut orientation = Orientation::new(358.0, 0.0, 0.0);
        orientation.rotate(Axis::X, 5.0);
        assert_eq!(orientation.x, 3.0);
    }

    #[test]
    fn decrement_wraps_below_zero() {
        let mut orientation = Orientation::new(0.0, 2.0, 0.0);
        orientation.rotate(Axis::Y, -5.0);
        assert_eq!(orientation.y, 357.0);
        orientation.rotate(Axis::Z, -360.0);
        assert_eq!(orientation.z, 0.0);
    }

    #[test]
    fn full_turn_never_reaches_360() {
        let mut orientation = Orientation::new(0.0, 0.0, 0.0);
        for _ in 0..72 {
            orientation.rotate(Axis::Z, 5.0);
            assert!((0.0..360.0).contains(&orientation.z));
        }
        assert_eq!(orientation.z, 0.0);
    }

    #[test]
    fn initial_state_follows_settings() {
        let state = AppState::new(&Settings::default());
        assert_eq!(state.orientation, Orientation::new(20.0, 0.0, 0.0));
        assert_eq!(state.camera_distance, -80.0);
        assert_eq!(state.door.phase(), DoorPhase::Closed);
        assert_eq!(state.door.angle(), 0.0);
        assert!(state.lighting);
        assert!(!state.debug);
    }
}
