use crate::pipeline::Canvas;
use crate::state::{AppState, Axis};
use druid::KbKey;

/// Degrees turned per key press
pub const ROTATION_STEP: f64 = 5.0;
/// Units moved along the view axis per key press
pub const ZOOM_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Rotate(Axis, f64),
    OpenDoor,
    CloseDoor,
    ToggleLighting,
    Zoom(f64),
    Quit,
}

/// What the caller should do after a command ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Maps a key to its command; unrecognised keys map to nothing
pub fn command_for_key(key: &KbKey) -> Option<Command> {
    let command = match key {
        KbKey::Escape => Command::Quit,
        KbKey::ArrowUp => Command::Rotate(Axis::X, -ROTATION_STEP),
        KbKey::ArrowDown => Command::Rotate(Axis::X, ROTATION_STEP),
        KbKey::ArrowLeft => Command::Rotate(Axis::Y, -ROTATION_STEP),
        KbKey::ArrowRight => Command::Rotate(Axis::Y, ROTATION_STEP),
        KbKey::Character(s) => match s.as_str() {
            "x" => Command::Rotate(Axis::X, ROTATION_STEP),
            "X" => Command::Rotate(Axis::X, -ROTATION_STEP),
            "y" => Command::Rotate(Axis::Y, ROTATION_STEP),
            "Y" => Command::Rotate(Axis::Y, -ROTATION_STEP),
            "z" => Command::Rotate(Axis::Z, ROTATION_STEP),
            "Z" => Command::Rotate(Axis::Z, -ROTATION_STEP),
            "o" | "O" => Command::OpenDoor,
            "c" | "C" => Command::CloseDoor,
            "l" | "L" => Command::ToggleLighting,
            "+" => Command::Zoom(ZOOM_STEP),
            "-" => Command::Zoom(-ZOOM_STEP),
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

/// Applies `command` to the state.
///
/// A lighting toggle reaches the rendering context straight away rather than
/// waiting for the next frame.
pub fn apply<C: Canvas>(command: Command, state: &mut AppState, canvas: &mut C) -> Flow {
    match command {
        Command::Rotate(axis, delta) => state.orientation.rotate(axis, delta),
        Command::OpenDoor => state.door.open(),
        Command::CloseDoor => state.door.close(),
        Command::ToggleLighting => {
            state.lighting = !state.lighting;
            canvas.set_lighting(state.lighting);
            log::info!("lighting {}", if state.lighting { "on" } else { "off" });
        }
        Command::Zoom(delta) => state.camera_distance += delta,
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::DoorPhase;
    use crate::config::Settings;
    use crate::pipeline::Pipeline;

    fn press(key: &str, state: &mut AppState, pipeline: &mut Pipeline) -> Flow {
        let command = command_for_key(&KbKey::Character(key.to_owned())).expect("mapped key");
        apply(command, state, pipeline)
    }

    fn setup() -> (AppState, Pipeline) {
        (AppState::new(&Settings::default()), Pipeline::new(8, 8))
    }

    #[test]
    fn letter_case_picks_direction() {
        assert_eq!(
            command_for_key(&KbKey::Character("x".into())),
            Some(Command::Rotate(Axis::X, 5.0))
        );
        assert_eq!(
            command_for_key(&KbKey::Character("Z".into())),
            Some(Command::Rotate(Axis::Z, -5.0))
        );
        assert_eq!(command_for_key(&KbKey::Character("O".into())), Some(Command::OpenDoor));
        assert_eq!(command_for_key(&KbKey::Escape), Some(Command::Quit));
    }

    #[test]
    fn arrows_turn_x_and_y_only() {
        assert_eq!(command_for_key(&KbKey::ArrowUp), Some(Command::Rotate(Axis::X, -5.0)));
        assert_eq!(command_for_key(&KbKey::ArrowDown), Some(Command::Rotate(Axis::X, 5.0)));
        assert_eq!(command_for_key(&KbKey::ArrowLeft), Some(Command::Rotate(Axis::Y, -5.0)));
        assert_eq!(command_for_key(&KbKey::ArrowRight), Some(Command::Rotate(Axis::Y, 5.0)));
    }

    #[test]
    fn unrecognised_keys_do_nothing() {
        assert_eq!(command_for_key(&KbKey::Character("q".into())), None);
        assert_eq!(command_for_key(&KbKey::Enter), None);
    }

    #[test]
    fn arrow_keys_wrap() {
        let (mut state, mut pipeline) = setup();
        state.orientation.y = 2.0;
        let command = command_for_key(&KbKey::ArrowLeft).unwrap();
        apply(command, &mut state, &mut pipeline);
        assert_eq!(state.orientation.y, 357.0);
    }

    #[test]
    fn zoom_is_uncapped_and_additive() {
        let (mut state, mut pipeline) = setup();
        let baseline = state.camera_distance;
        for _ in 0..3 {
            press("+", &mut state, &mut pipeline);
        }
        press("-", &mut state, &mut pipeline);
        assert_eq!(state.camera_distance - baseline, 10.0);

        for _ in 0..100 {
            press("+", &mut state, &mut pipeline);
        }
        assert_eq!(state.camera_distance, baseline + 510.0);
    }

    #[test]
    fn lighting_toggle_reaches_pipeline_immediately() {
        let (mut state, mut pipeline) = setup();
        let original = pipeline.lighting_enabled();
        press("l", &mut state, &mut pipeline);
        assert_eq!(pipeline.lighting_enabled(), !original);
        assert_eq!(state.lighting, pipeline.lighting_enabled());
        press("L", &mut state, &mut pipeline);
        assert_eq!(pipeline.lighting_enabled(), original);
    }

    #[test]
    fn door_keys_set_direction_only() {
        let (mut state, mut pipeline) = setup();
        press("o", &mut state, &mut pipeline);
        assert_eq!(state.door.phase(), DoorPhase::Opening);
        assert_eq!(state.door.angle(), 0.0);
        press("c", &mut state, &mut pipeline);
        assert_eq!(state.door.phase(), DoorPhase::Closing);
        assert!(!state.door.is_opening());
    }

    #[test]
    fn escape_asks_to_quit() {
        let (mut state, mut pipeline) = setup();
        assert_eq!(apply(Command::Quit, &mut state, &mut pipeline), Flow::Quit);
    }
}
