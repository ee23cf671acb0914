use super::position::Position;
use crate::config::OutputConfig;

/// Tracker position in console output units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScaledPosition {
    pub x: i32,
    pub y: i32,
}

/// Maps one coordinate from `[0, dimension]` into `[-range / 2, range / 2]`.
///
/// Rounds to the nearest integer with ties to even, which also folds `-0`
/// into `0`.
pub fn scale_axis(position: f64, dimension: f64, range: f64) -> i32 {
    let scaled = (position / dimension) * range - range / 2.0;
    // Integer output on purpose: values in (-0.5, 0) go out as "0", not "-0"
    scaled.round_ties_even() as i32
}

/// Linear mapping from drawable-area pixels to console coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateScaler {
    width: f64,
    height: f64,
    x_range: f64,
    y_range: f64,
}

impl CoordinateScaler {
    pub fn new(width: u32, height: u32, output: &OutputConfig) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            x_range: output.x_range,
            y_range: output.y_range,
        }
    }

    pub fn scale(&self, position: Position) -> ScaledPosition {
        ScaledPosition {
            x: scale_axis(f64::from(position.x), self.width, self.x_range),
            y: scale_axis(f64::from(position.y), self.height, self.y_range),
        }
    }
}
