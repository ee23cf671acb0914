//! # Frame Loop
//!
//! One synchronous tick: drain frame events, update both trackers, scale
//! them and emit one datagram per tracker. Rendering reads the resulting
//! state separately on every repaint.
//!
//! The loop has two states. `Running` moves to `Stopped` on a quit request;
//! `Stopped` is terminal and every later tick is a no-op.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, TrackerConfig};
use crate::input::{FrameEvent, InputSnapshot};
use crate::network::{MessageSink, OutboundMessage};
use crate::tracking::{CoordinateScaler, PositionUpdater, TrackerId, TrackerPair};

/// Send failures are logged on the first occurrence and then every this many
const SEND_FAILURE_LOG_EVERY: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Decides when the next tick is due
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Returns true and starts a new interval when a tick is due at `now`
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_tick = Some(now);
                true
            }
        }
    }

    /// Time left until the next tick
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

/// Tracker state plus everything needed to advance it by one tick
pub struct FrameLoop<S: MessageSink> {
    state: LoopState,
    trackers: TrackerPair,
    updater: PositionUpdater,
    scaler: CoordinateScaler,
    sink: S,
    tracker_configs: [TrackerConfig; 2],
    last_messages: [Option<OutboundMessage>; 2],
    last_key: String,
    consecutive_send_failures: u64,
    ticks: u64,
}

impl<S: MessageSink> FrameLoop<S> {
    pub fn new(config: &AppConfig, sink: S) -> Self {
        let screen = &config.screen;
        let updater = PositionUpdater::new(config.motion.clone(), screen.width, screen.height);
        let trackers = TrackerPair::centered(updater.center());
        info!("Trackers start at {}", updater.center());

        Self {
            state: LoopState::Running,
            trackers,
            updater,
            scaler: CoordinateScaler::new(screen.width, screen.height, &config.output),
            sink,
            tracker_configs: config.trackers.clone(),
            last_messages: [None, None],
            last_key: "None".to_string(),
            consecutive_send_failures: 0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn trackers(&self) -> &TrackerPair {
        &self.trackers
    }

    pub fn last_key(&self) -> &str {
        &self.last_key
    }

    pub fn last_message(&self, id: TrackerId) -> Option<&OutboundMessage> {
        self.last_messages[id.index()].as_ref()
    }

    pub fn tracker_config(&self, id: TrackerId) -> &TrackerConfig {
        &self.tracker_configs[id.index()]
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            info!("Quit requested after {} ticks, stopping frame loop", self.ticks);
            self.state = LoopState::Stopped;
        }
    }

    /// Advances the loop by one tick.
    ///
    /// A quit event stops the loop before anything else in the same tick is
    /// applied or sent.
    pub fn tick(&mut self, events: &[FrameEvent], snapshot: &InputSnapshot) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }

        for event in events {
            match event {
                FrameEvent::Quit => {
                    self.stop();
                    return self.state;
                }
                FrameEvent::Reset => {
                    info!("Space key pressed, resetting crosshair position");
                    self.updater.reset(&mut self.trackers);
                }
                FrameEvent::PointerMoved(position) => {
                    self.updater.follow_pointer(&mut self.trackers, *position);
                }
                FrameEvent::KeyPressed(name) => {
                    self.last_key = name.clone();
                }
            }
        }

        self.updater.update(&mut self.trackers, snapshot);
        self.emit_positions();
        self.ticks += 1;
        self.state
    }

    fn emit_positions(&mut self) {
        for id in TrackerId::ALL {
            let scaled = self.scaler.scale(self.trackers.get(id));
            let config = &self.tracker_configs[id.index()];
            let message = OutboundMessage::new(scaled, config.channel, config.label.clone());

            match self.sink.emit(&message) {
                Ok(_) => {
                    if self.consecutive_send_failures > 0 {
                        info!(
                            "Sending recovered after {} failed datagrams",
                            self.consecutive_send_failures
                        );
                    }
                    self.consecutive_send_failures = 0;
                }
                Err(e) => {
                    self.consecutive_send_failures += 1;
                    let failures = self.consecutive_send_failures;
                    if failures == 1 || failures % SEND_FAILURE_LOG_EVERY == 0 {
                        warn!("{} ({} consecutive failures)", e, failures);
                    } else {
                        debug!("{}", e);
                    }
                }
            }

            self.last_messages[id.index()] = Some(message);
        }
    }
}
