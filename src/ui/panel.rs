use eframe::egui::{self, Align2, FontId, Painter, Pos2, Rect, Vec2};

use super::drawing::{CanvasLayout, Palette};
use crate::network::OutboundMessage;

const TEXT_INSET: f32 = 10.0;
const LINE_HEIGHT: f32 = 20.0;
const FONT_SIZE: f32 = 16.0;

/// One tracker's line in the side panel
pub fn message_line(display_name: &str, message: Option<&OutboundMessage>) -> String {
    match message {
        Some(message) => format!("{}: {}", display_name, message),
        None => format!("{}: ", display_name),
    }
}

pub fn last_key_line(last_key: &str) -> String {
    format!("Last Key: {}", last_key)
}

/// Fills the panel to the right of the drawable area and writes `lines` top to bottom
pub fn paint_panel(
    painter: &Painter,
    origin: Pos2,
    layout: &CanvasLayout,
    palette: &Palette,
    lines: &[String],
) {
    let panel = Rect::from_min_size(
        origin + Vec2::new(layout.width as f32, 0.0),
        Vec2::new(layout.panel_width as f32, layout.height as f32),
    );
    painter.rect_filled(panel, 0.0, palette.panel);

    for (row, line) in lines.iter().enumerate() {
        let anchor = panel.min + Vec2::new(TEXT_INSET, TEXT_INSET + row as f32 * LINE_HEIGHT);
        painter.text(
            anchor,
            Align2::LEFT_TOP,
            line,
            FontId::proportional(FONT_SIZE),
            palette.text,
        );
    }
}
