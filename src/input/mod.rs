//! Input sampling for the frame loop
//!
//! Keyboard and pointer input arrives through the window's egui event stream,
//! the gamepad is polled through gilrs. Both end up in one [`InputSnapshot`]
//! plus a list of [`FrameEvent`]s per tick.
//!
//! 1. [`keyboard`] - held keys, key presses, pointer moves, quit
//! 2. [`gamepad`] - stick and trigger axes of the first connected gamepad
//! 3. [`snapshot`] - the per-frame types handed to the position updater

pub mod gamepad;
pub mod keyboard;
pub mod snapshot;

pub use gamepad::{GamepadError, GamepadSampler};
pub use keyboard::KeyboardTranslator;
pub use snapshot::{FrameEvent, GamepadSnapshot, HeldKeys, InputSnapshot, StickAxes};
