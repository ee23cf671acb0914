use crate::tracking::Position;

/// Direction and modifier keys held at sampling time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Either shift key
    pub boost: bool,
}

/// Two-axis stick in screen orientation: +x right, +y down
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickAxes {
    pub x: f32,
    pub y: f32,
}

/// Continuous gamepad state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadSnapshot {
    pub left_stick: StickAxes,
    pub right_stick: StickAxes,
    pub left_trigger: f32,
    pub right_trigger: f32,
}

/// Everything the position updater reads for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub keys: HeldKeys,
    /// `None` when no gamepad is connected
    pub gamepad: Option<GamepadSnapshot>,
}

/// Discrete events drained once per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    Quit,
    /// Recenter the first tracker
    Reset,
    /// Pointer position relative to the drawable area
    PointerMoved(Position),
    /// Display name of a newly pressed key
    KeyPressed(String),
}
