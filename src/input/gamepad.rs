use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use statum::{machine, state};
use tracing::{debug, error, info, warn};

use super::snapshot::{GamepadSnapshot, StickAxes};

// Gamepad errors
#[derive(Debug, thiserror::Error)]
pub enum GamepadError {
    #[error("Failed to initialize gamepad backend: {0}")]
    InitializationError(String),
}

// Sampler states
#[state]
#[derive(Debug, Clone)]
pub enum SamplerState {
    Initializing,
    Sampling,
}

#[machine]
#[derive(Debug)]
pub struct GamepadSampler<S: SamplerState> {
    // Gilrs context
    gilrs: Gilrs,

    // Gamepad whose axes are read each frame
    active_gamepad: Option<GamepadId>,
}

impl GamepadSampler<Initializing> {
    pub fn create() -> Result<Self, GamepadError> {
        info!("Initializing gilrs gamepad interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(GamepadError::InitializationError(e.to_string()));
            }
        };

        Ok(Self::new(gilrs, None))
    }

    // Pick the first connected gamepad and transition to Sampling
    pub fn initialize(mut self) -> GamepadSampler<Sampling> {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

        if gamepads.is_empty() {
            warn!("No gamepad connected, continuing with keyboard and mouse only");
        } else {
            info!("Found {} gamepads:", gamepads.len());
            for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
                info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
            }
            let (id, gamepad) = &gamepads[0];
            info!("Selected gamepad: {} ({})", gamepad.name(), id);
            self.active_gamepad = Some(*id);
        }

        self.transition()
    }
}

impl GamepadSampler<Sampling> {
    /// Pumps pending gilrs events and reads the active gamepad's axes.
    ///
    /// Returns `None` while no gamepad is connected.
    pub fn sample(&mut self) -> Option<GamepadSnapshot> {
        self.drain_events();

        let id = self.active_gamepad?;
        let gamepad = self.gilrs.connected_gamepad(id)?;
        Some(read_snapshot(&gamepad))
    }

    fn drain_events(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            match event {
                EventType::Connected => {
                    info!("Gamepad connected: {}", id);
                    if self.active_gamepad.is_none() {
                        info!("Selected gamepad: {}", id);
                        self.active_gamepad = Some(id);
                    }
                }
                EventType::Disconnected => {
                    warn!("Gamepad disconnected: {}", id);
                    if self.active_gamepad == Some(id) {
                        self.active_gamepad = self.gilrs.gamepads().map(|(id, _)| id).next();
                        match self.active_gamepad {
                            Some(next) => info!("Switched to gamepad: {}", next),
                            None => warn!("No gamepad left, continuing with keyboard and mouse only"),
                        }
                    }
                }
                _ => debug!("Gamepad event from {}: {:?}", id, event),
            }
        }
    }
}

/// gilrs reports stick Y as positive-up; the trackers move in screen space
pub fn screen_stick(x: f32, y: f32) -> StickAxes {
    StickAxes { x, y: -y }
}

fn read_snapshot(gamepad: &Gamepad<'_>) -> GamepadSnapshot {
    GamepadSnapshot {
        left_stick: screen_stick(
            gamepad.value(Axis::LeftStickX),
            gamepad.value(Axis::LeftStickY),
        ),
        right_stick: screen_stick(
            gamepad.value(Axis::RightStickX),
            gamepad.value(Axis::RightStickY),
        ),
        left_trigger: trigger_value(gamepad, Axis::LeftZ, Button::LeftTrigger2),
        right_trigger: trigger_value(gamepad, Axis::RightZ, Button::RightTrigger2),
    }
}

// Depending on the backend a trigger shows up as an axis or as an analog button
fn trigger_value(gamepad: &Gamepad<'_>, axis: Axis, button: Button) -> f32 {
    let analog_button = gamepad
        .button_data(button)
        .map(|data| data.value())
        .unwrap_or(0.0);
    analog_button.max(gamepad.value(axis))
}
