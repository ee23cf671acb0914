use std::fmt;

/// A point on the drawable area in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Region a tracker is allowed to occupy.
///
/// The low edge keeps a full marker size of margin while the high edge keeps
/// only half of it. This asymmetry is what the console setup was calibrated
/// against, so it is preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn for_area(width: i32, height: i32, marker_size: i32) -> Self {
        // Largest whole pixel not above `dimension - marker_size / 2`
        let high_margin = (marker_size + 1) / 2;
        Self {
            min_x: marker_size,
            max_x: width - high_margin,
            min_y: marker_size,
            max_y: height - high_margin,
        }
    }

    /// Clamps each axis independently.
    ///
    /// The upper bound is applied first, then the lower one, so a degenerate
    /// region (min above max) pins to the minimum instead of panicking.
    pub fn clamp(&self, position: Position) -> Position {
        Position {
            x: position.x.min(self.max_x).max(self.min_x),
            y: position.y.min(self.max_y).max(self.min_y),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        (self.min_x..=self.max_x).contains(&position.x)
            && (self.min_y..=self.max_y).contains(&position.y)
    }
}

/// Identifies one of the two trackers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerId {
    /// Mouse, keyboard and left stick
    First,
    /// Right stick
    Second,
}

impl TrackerId {
    pub const ALL: [TrackerId; 2] = [TrackerId::First, TrackerId::Second];

    pub fn index(self) -> usize {
        match self {
            TrackerId::First => 0,
            TrackerId::Second => 1,
        }
    }
}

/// Positions of both trackers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerPair {
    pub first: Position,
    pub second: Position,
}

impl TrackerPair {
    pub fn centered(center: Position) -> Self {
        Self {
            first: center,
            second: center,
        }
    }

    pub fn get(&self, id: TrackerId) -> Position {
        match id {
            TrackerId::First => self.first,
            TrackerId::Second => self.second,
        }
    }

    pub fn get_mut(&mut self, id: TrackerId) -> &mut Position {
        match id {
            TrackerId::First => &mut self.first,
            TrackerId::Second => &mut self.second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_asymmetric() {
        let bounds = Bounds::for_area(800, 600, 10);
        assert_eq!(bounds.min_x, 10);
        assert_eq!(bounds.max_x, 795);
        assert_eq!(bounds.min_y, 10);
        assert_eq!(bounds.max_y, 595);
    }

    #[test]
    fn test_odd_marker_rounds_high_edge_inward() {
        let bounds = Bounds::for_area(800, 600, 11);
        // 800 - 5.5 = 794.5, largest whole pixel below is 794
        assert_eq!(bounds.max_x, 794);
    }

    #[test]
    fn test_clamp_each_axis_independently() {
        let bounds = Bounds::for_area(800, 600, 10);
        assert_eq!(bounds.clamp(Position::new(-50, 300)), Position::new(10, 300));
        assert_eq!(bounds.clamp(Position::new(400, 9000)), Position::new(400, 595));
        assert_eq!(bounds.clamp(Position::new(900, -1)), Position::new(795, 10));
    }

    #[test]
    fn test_degenerate_region_pins_to_minimum() {
        let bounds = Bounds::for_area(12, 12, 10);
        assert_eq!(bounds.clamp(Position::new(11, 0)), Position::new(10, 10));
    }

    #[test]
    fn test_pair_access_by_id() {
        let mut pair = TrackerPair::centered(Position::new(400, 300));
        *pair.get_mut(TrackerId::Second) = Position::new(1, 2);
        assert_eq!(pair.get(TrackerId::First), Position::new(400, 300));
        assert_eq!(pair.get(TrackerId::Second), Position::new(1, 2));
        assert_eq!(TrackerId::Second.index(), 1);
    }
}
