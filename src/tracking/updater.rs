use tracing::debug;

use super::position::{Bounds, Position, TrackerPair};
use crate::config::MotionConfig;
use crate::input::{InputSnapshot, StickAxes};

/// Pixel delta produced by one stick axis.
///
/// Magnitudes at or below `dead_zone` produce nothing. Otherwise the delta is
/// `axis * speed * 2` truncated toward zero.
pub fn stick_delta(axis: f32, speed: i32, dead_zone: f32) -> i32 {
    if axis.abs() > dead_zone {
        (axis * speed as f32 * 2.0) as i32
    } else {
        0
    }
}

/// Applies one frame of input to both trackers
#[derive(Debug, Clone)]
pub struct PositionUpdater {
    motion: MotionConfig,
    bounds: Bounds,
    center: Position,
}

impl PositionUpdater {
    pub fn new(motion: MotionConfig, width: u32, height: u32) -> Self {
        let (width, height) = (width as i32, height as i32);
        let bounds = Bounds::for_area(width, height, motion.crosshair_size);
        Self {
            motion,
            bounds,
            center: Position::new(width / 2, height / 2),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn center(&self) -> Position {
        self.center
    }

    /// Per-tracker speed for this frame.
    ///
    /// Shift boosts the first tracker, each trigger boosts its own tracker.
    pub fn speeds(&self, snapshot: &InputSnapshot) -> (i32, i32) {
        let mut first = if snapshot.keys.boost {
            self.motion.boost_speed
        } else {
            self.motion.speed
        };
        let mut second = self.motion.speed;

        if let Some(gamepad) = &snapshot.gamepad {
            if gamepad.left_trigger > self.motion.trigger_threshold {
                first = self.motion.boost_speed;
            }
            if gamepad.right_trigger > self.motion.trigger_threshold {
                second = self.motion.boost_speed;
            }
        }
        (first, second)
    }

    /// Moves both trackers by sticks and keys, then clamps them.
    pub fn update(&self, trackers: &mut TrackerPair, snapshot: &InputSnapshot) {
        let (first_speed, second_speed) = self.speeds(snapshot);

        if let Some(gamepad) = &snapshot.gamepad {
            trackers.first = self.apply_stick(trackers.first, gamepad.left_stick, first_speed);
            trackers.second = self.apply_stick(trackers.second, gamepad.right_stick, second_speed);
        }

        let keys = &snapshot.keys;
        let mut first = trackers.first;
        if keys.left {
            first.x -= first_speed;
        }
        if keys.right {
            first.x += first_speed;
        }
        if keys.up {
            first.y -= first_speed;
        }
        if keys.down {
            first.y += first_speed;
        }
        trackers.first = first;

        self.clamp(trackers);
    }

    fn apply_stick(&self, position: Position, stick: StickAxes, speed: i32) -> Position {
        position.offset(
            stick_delta(stick.x, speed, self.motion.dead_zone),
            stick_delta(stick.y, speed, self.motion.dead_zone),
        )
    }

    pub fn clamp(&self, trackers: &mut TrackerPair) {
        trackers.first = self.bounds.clamp(trackers.first);
        trackers.second = self.bounds.clamp(trackers.second);
    }

    /// Moves the first tracker to the pointer.
    ///
    /// The position is left unclamped; [`PositionUpdater::update`] clamps once
    /// after keys and sticks are applied.
    pub fn follow_pointer(&self, trackers: &mut TrackerPair, pointer: Position) {
        trackers.first = pointer;
    }

    /// Recenters the first tracker
    pub fn reset(&self, trackers: &mut TrackerPair) {
        debug!("Resetting first tracker to {}", self.center);
        trackers.first = self.center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{GamepadSnapshot, HeldKeys};
    use proptest::prelude::*;

    fn updater() -> PositionUpdater {
        PositionUpdater::new(MotionConfig::default(), 800, 600)
    }

    fn centered() -> TrackerPair {
        TrackerPair::centered(Position::new(400, 300))
    }

    fn with_gamepad(gamepad: GamepadSnapshot) -> InputSnapshot {
        InputSnapshot {
            keys: HeldKeys::default(),
            gamepad: Some(gamepad),
        }
    }

    #[test]
    fn test_stick_delta_dead_zone() {
        assert_eq!(stick_delta(0.05, 5, 0.1), 0);
        assert_eq!(stick_delta(-0.1, 5, 0.1), 0);
        assert_eq!(stick_delta(0.1, 5, 0.1), 0);
        assert_eq!(stick_delta(0.5, 5, 0.1), 5);
        assert_eq!(stick_delta(-0.5, 5, 0.1), -5);
        assert_eq!(stick_delta(1.0, 10, 0.1), 20);
    }

    #[test]
    fn test_stick_delta_truncates_toward_zero() {
        // 0.15 * 5 * 2 = 1.5
        assert_eq!(stick_delta(0.15, 5, 0.1), 1);
        assert_eq!(stick_delta(-0.15, 5, 0.1), -1);
    }

    #[test]
    fn test_arrow_keys_move_first_tracker_only() {
        let updater = updater();
        let mut trackers = centered();
        let snapshot = InputSnapshot {
            keys: HeldKeys {
                right: true,
                up: true,
                ..Default::default()
            },
            gamepad: None,
        };

        updater.update(&mut trackers, &snapshot);

        assert_eq!(trackers.first, Position::new(405, 295));
        assert_eq!(trackers.second, Position::new(400, 300));
    }

    #[test]
    fn test_boost_increases_displacement() {
        let updater = updater();
        let keys = HeldKeys {
            left: true,
            down: true,
            ..Default::default()
        };

        let mut normal = centered();
        updater.update(&mut normal, &InputSnapshot { keys, gamepad: None });

        let mut boosted = centered();
        let boost_keys = HeldKeys { boost: true, ..keys };
        updater.update(
            &mut boosted,
            &InputSnapshot {
                keys: boost_keys,
                gamepad: None,
            },
        );

        let normal_dx = (normal.first.x - 400).abs();
        let boosted_dx = (boosted.first.x - 400).abs();
        assert!(boosted_dx > normal_dx);
        assert_eq!(boosted.first, Position::new(390, 310));
    }

    #[test]
    fn test_sticks_drive_their_own_tracker() {
        let updater = updater();
        let mut trackers = centered();

        updater.update(
            &mut trackers,
            &with_gamepad(GamepadSnapshot {
                left_stick: StickAxes { x: 0.5, y: 0.05 },
                right_stick: StickAxes { x: 0.0, y: -1.0 },
                ..Default::default()
            }),
        );

        assert_eq!(trackers.first, Position::new(405, 300));
        assert_eq!(trackers.second, Position::new(400, 290));
    }

    #[test]
    fn test_triggers_boost_only_their_tracker() {
        let updater = updater();
        let snapshot = with_gamepad(GamepadSnapshot {
            right_trigger: 0.8,
            ..Default::default()
        });
        assert_eq!(updater.speeds(&snapshot), (5, 10));

        let snapshot = with_gamepad(GamepadSnapshot {
            left_trigger: 0.11,
            right_trigger: 0.1,
            ..Default::default()
        });
        assert_eq!(updater.speeds(&snapshot), (10, 5));
    }

    #[test]
    fn test_resting_trigger_does_not_boost() {
        // Some backends report a released trigger as -1.0
        let updater = updater();
        let snapshot = with_gamepad(GamepadSnapshot {
            left_trigger: -1.0,
            right_trigger: -1.0,
            ..Default::default()
        });
        assert_eq!(updater.speeds(&snapshot), (5, 5));
    }

    #[test]
    fn test_reset_recenters_first_tracker() {
        let updater = updater();
        let mut trackers = TrackerPair {
            first: Position::new(12, 590),
            second: Position::new(700, 20),
        };

        updater.reset(&mut trackers);

        assert_eq!(trackers.first, Position::new(400, 300));
        assert_eq!(trackers.second, Position::new(700, 20));
    }

    #[test]
    fn test_pointer_is_clamped_by_update() {
        let updater = updater();
        let mut trackers = centered();

        // Pointer over the side panel
        updater.follow_pointer(&mut trackers, Position::new(950, 2));
        assert_eq!(trackers.first, Position::new(950, 2));

        updater.update(&mut trackers, &InputSnapshot::default());
        assert_eq!(trackers.first, Position::new(795, 10));
    }

    #[test]
    fn test_keys_apply_to_raw_pointer_before_clamp() {
        let updater = updater();
        let mut trackers = centered();
        let snapshot = InputSnapshot {
            keys: HeldKeys {
                left: true,
                ..Default::default()
            },
            gamepad: None,
        };

        updater.follow_pointer(&mut trackers, Position::new(950, 300));
        updater.update(&mut trackers, &snapshot);

        // 950 - 5 = 945, clamped once to 795
        assert_eq!(trackers.first, Position::new(795, 300));
    }

    fn any_snapshot() -> impl Strategy<Value = InputSnapshot> {
        let keys = (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(left, right, up, down, boost)| HeldKeys {
                left,
                right,
                up,
                down,
                boost,
            });
        let gamepad = prop::option::of(
            (
                -1.0f32..=1.0,
                -1.0f32..=1.0,
                -1.0f32..=1.0,
                -1.0f32..=1.0,
                -1.0f32..=1.0,
                -1.0f32..=1.0,
            )
                .prop_map(|(lx, ly, rx, ry, lt, rt)| GamepadSnapshot {
                    left_stick: StickAxes { x: lx, y: ly },
                    right_stick: StickAxes { x: rx, y: ry },
                    left_trigger: lt,
                    right_trigger: rt,
                }),
        );
        (keys, gamepad).prop_map(|(keys, gamepad)| InputSnapshot { keys, gamepad })
    }

    proptest! {
        #[test]
        fn prop_trackers_stay_in_bounds(
            start_x in -2000i32..2000,
            start_y in -2000i32..2000,
            frames in prop::collection::vec(any_snapshot(), 1..40),
        ) {
            let updater = updater();
            let bounds = updater.bounds();
            let mut trackers = TrackerPair {
                first: Position::new(start_x, start_y),
                second: Position::new(start_y, start_x),
            };

            for snapshot in &frames {
                updater.update(&mut trackers, snapshot);
                prop_assert!(bounds.contains(trackers.first));
                prop_assert!(bounds.contains(trackers.second));
            }
        }

        #[test]
        fn prop_dead_zone_is_neutral(axis in -0.1f32..=0.1, speed in 1i32..50) {
            prop_assert_eq!(stick_delta(axis, speed, 0.1), 0);
        }
    }
}
