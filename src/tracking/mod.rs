//! Tracker state and the math applied to it every tick
//!
//! ```text
//! InputSnapshot ──► PositionUpdater ──► TrackerPair ──► CoordinateScaler ──► ScaledPosition
//!                   (speed, dead zone,                  (pixels to console
//!                    clamp)                              units)
//! ```

pub mod position;
pub mod scaler;
pub mod updater;

pub use position::{Bounds, Position, TrackerId, TrackerPair};
pub use scaler::{CoordinateScaler, ScaledPosition};
pub use updater::PositionUpdater;
