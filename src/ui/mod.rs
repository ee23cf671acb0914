//! # Crosshair Window
//!
//! eframe application hosting the frame loop. Every repaint collects input
//! from egui, runs a tick when the [`FrameClock`] says one is due and redraws
//! the canvas and side panel from the loop's state.
//!
//! Layout, left to right:
//! - drawable area (`screen.width x screen.height`) with grid, circles and
//!   both crosshairs
//! - side panel (`screen.panel_width`) with the last message per tracker and
//!   the last pressed key

pub mod drawing;
pub mod panel;

use eframe::egui::{self, Color32, Pos2};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::frame_loop::{FrameClock, FrameLoop, LoopState};
use crate::input::gamepad::Sampling;
use crate::input::keyboard::held_keys;
use crate::input::{FrameEvent, GamepadSampler, InputSnapshot, KeyboardTranslator};
use crate::network::MessageSink;
use crate::tracking::TrackerId;

use self::drawing::{CanvasLayout, Palette};

pub struct CrosshairApp<S: MessageSink> {
    frame_loop: FrameLoop<S>,
    keyboard: KeyboardTranslator,
    /// `None` when the gamepad backend could not be started
    gamepad: Option<GamepadSampler<Sampling>>,
    clock: FrameClock,
    /// Events seen since the last tick
    pending_events: Vec<FrameEvent>,
    layout: CanvasLayout,
    palette: Palette,
    tracker_colors: [Color32; 2],
    /// Top-left corner of the drawable area in window points
    canvas_origin: Pos2,
}

impl<S: MessageSink> CrosshairApp<S> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        frame_loop: FrameLoop<S>,
        gamepad: Option<GamepadSampler<Sampling>>,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let tracker_colors = [
            drawing::rgb(config.trackers[0].color),
            drawing::rgb(config.trackers[1].color),
        ];

        Self {
            frame_loop,
            keyboard: KeyboardTranslator::new(),
            gamepad,
            clock: FrameClock::new(Duration::from_millis(config.screen.frame_interval_ms)),
            pending_events: Vec::new(),
            layout: CanvasLayout::from_config(config),
            palette: Palette::from_config(config),
            tracker_colors,
            canvas_origin: Pos2::ZERO,
        }
    }

    /// Reads this frame's egui input into pending events and held keys
    fn collect_input(&mut self, ctx: &egui::Context) -> (InputSnapshot, bool) {
        let (events, modifiers, close_requested, keys) = ctx.input(|i| {
            (
                i.events.clone(),
                i.modifiers,
                i.viewport().close_requested(),
                held_keys(|key| i.key_down(key), i.modifiers),
            )
        });

        let frame_events =
            self.keyboard
                .frame_events(&events, modifiers, close_requested, self.canvas_origin);
        self.pending_events.extend(frame_events);

        let gamepad = self.gamepad.as_mut().and_then(|sampler| sampler.sample());
        (InputSnapshot { keys, gamepad }, close_requested)
    }

    fn panel_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = TrackerId::ALL
            .iter()
            .map(|&id| {
                panel::message_line(
                    &self.frame_loop.tracker_config(id).display_name,
                    self.frame_loop.last_message(id),
                )
            })
            .collect();
        lines.push(panel::last_key_line(self.frame_loop.last_key()));
        lines
    }

    fn paint(&mut self, ctx: &egui::Context) {
        let lines = self.panel_lines();

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.palette.background))
            .show(ctx, |ui| {
                self.canvas_origin = ui.max_rect().min;
                let painter = ui.painter();

                drawing::paint_background(painter, self.canvas_origin, &self.layout, &self.palette);
                for id in TrackerId::ALL {
                    drawing::paint_crosshair(
                        painter,
                        self.canvas_origin,
                        self.frame_loop.trackers().get(id),
                        self.layout.crosshair_size as f32,
                        self.tracker_colors[id.index()],
                    );
                }
                panel::paint_panel(painter, self.canvas_origin, &self.layout, &self.palette, &lines);
            });
    }
}

impl<S: MessageSink> eframe::App for CrosshairApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (snapshot, close_requested) = self.collect_input(ctx);

        let now = Instant::now();
        if close_requested || self.clock.due(now) {
            let events = std::mem::take(&mut self.pending_events);
            debug!("Tick {} with {} events", self.frame_loop.ticks(), events.len());
            if self.frame_loop.tick(&events, &snapshot) == LoopState::Stopped {
                info!("Frame loop stopped, closing window");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
        }

        self.paint(ctx);
        ctx.request_repaint_after(self.clock.until_next(Instant::now()));
    }
}
