//! Canvas drawing for the crosshair view
//!
//! Geometry is computed by pure functions relative to the canvas origin and
//! only the `paint_*` functions touch the egui painter.

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::config::AppConfig;
use crate::tracking::Position;

/// Sizes of everything drawn on the canvas, in points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    pub panel_width: u32,
    pub grid_spacing: u32,
    pub circle_spacing: u32,
    pub crosshair_size: u32,
}

impl CanvasLayout {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            width: config.screen.width,
            height: config.screen.height,
            panel_width: config.screen.panel_width,
            grid_spacing: config.screen.grid_spacing,
            circle_spacing: config.screen.circle_spacing,
            crosshair_size: config.motion.crosshair_size.max(0) as u32,
        }
    }

    /// Drawable area plus side panel
    pub fn window_size(&self) -> [f32; 2] {
        [(self.width + self.panel_width) as f32, self.height as f32]
    }

    pub fn center(&self) -> Pos2 {
        egui::pos2((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

/// Vertical then horizontal grid lines covering the drawable area
pub fn grid_lines(layout: &CanvasLayout) -> Vec<[Pos2; 2]> {
    let (width, height) = (layout.width as f32, layout.height as f32);
    let step = layout.grid_spacing.max(1) as usize;

    let vertical = (0..layout.width)
        .step_by(step)
        .map(|x| [egui::pos2(x as f32, 0.0), egui::pos2(x as f32, height)]);
    let horizontal = (0..layout.height)
        .step_by(step)
        .map(|y| [egui::pos2(0.0, y as f32), egui::pos2(width, y as f32)]);

    vertical.chain(horizontal).collect()
}

/// Radii of the concentric circles, all strictly below half the smaller side
pub fn circle_radii(layout: &CanvasLayout) -> Vec<f32> {
    let max_radius = layout.width.min(layout.height) / 2;
    let step = layout.circle_spacing.max(1);

    (step..max_radius)
        .step_by(step as usize)
        .map(|radius| radius as f32)
        .collect()
}

/// Horizontal and vertical arm of a crosshair centered on `center`
pub fn crosshair_segments(center: Pos2, size: f32) -> [[Pos2; 2]; 2] {
    [
        [
            egui::pos2(center.x - size, center.y),
            egui::pos2(center.x + size, center.y),
        ],
        [
            egui::pos2(center.x, center.y - size),
            egui::pos2(center.x, center.y + size),
        ],
    ]
}

pub fn to_pos2(position: Position) -> Pos2 {
    egui::pos2(position.x as f32, position.y as f32)
}

/// Background colors of the canvas and panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub grid: Color32,
    pub circle: Color32,
    pub panel: Color32,
    pub text: Color32,
}

impl Palette {
    pub fn from_config(config: &AppConfig) -> Self {
        let colors = &config.colors;
        Self {
            background: rgb(colors.background),
            grid: rgb(colors.grid),
            circle: rgb(colors.circle),
            panel: rgb(colors.panel),
            text: rgb(colors.text),
        }
    }
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Clears the drawable area and draws grid and circles
pub fn paint_background(painter: &Painter, origin: Pos2, layout: &CanvasLayout, palette: &Palette) {
    let offset = origin.to_vec2();
    let area = Rect::from_min_size(
        origin,
        Vec2::new(layout.width as f32, layout.height as f32),
    );
    painter.rect_filled(area, 0.0, palette.background);

    let grid_stroke = Stroke::new(1.0, palette.grid);
    for [from, to] in grid_lines(layout) {
        painter.line_segment([from + offset, to + offset], grid_stroke);
    }

    let circle_stroke = Stroke::new(1.0, palette.circle);
    let center = layout.center() + offset;
    for radius in circle_radii(layout) {
        painter.circle_stroke(center, radius, circle_stroke);
    }
}

/// Draws one tracker marker
pub fn paint_crosshair(
    painter: &Painter,
    origin: Pos2,
    position: Position,
    size: f32,
    color: Color32,
) {
    let center = to_pos2(position) + origin.to_vec2();
    let stroke = Stroke::new(2.0, color);
    for segment in crosshair_segments(center, size) {
        painter.line_segment(segment, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> CanvasLayout {
        CanvasLayout::from_config(&AppConfig::default())
    }

    #[test]
    fn test_grid_covers_area_at_fixed_spacing() {
        let lines = grid_lines(&layout());

        // 800 / 50 vertical, 600 / 50 horizontal
        assert_eq!(lines.len(), 16 + 12);
        assert_eq!(lines[0], [egui::pos2(0.0, 0.0), egui::pos2(0.0, 600.0)]);
        assert_eq!(lines[15], [egui::pos2(750.0, 0.0), egui::pos2(750.0, 600.0)]);
        assert_eq!(lines[16], [egui::pos2(0.0, 0.0), egui::pos2(800.0, 0.0)]);
        assert_eq!(lines[27], [egui::pos2(0.0, 550.0), egui::pos2(800.0, 550.0)]);
    }

    #[test]
    fn test_circles_stay_below_half_of_smaller_side() {
        assert_eq!(circle_radii(&layout()), vec![75.0, 150.0, 225.0]);

        let exact = CanvasLayout {
            width: 600,
            height: 600,
            circle_spacing: 100,
            ..layout()
        };
        // 300 is excluded
        assert_eq!(circle_radii(&exact), vec![100.0, 200.0]);
    }

    #[test]
    fn test_crosshair_arms() {
        let [horizontal, vertical] = crosshair_segments(egui::pos2(400.0, 300.0), 10.0);
        assert_eq!(horizontal, [egui::pos2(390.0, 300.0), egui::pos2(410.0, 300.0)]);
        assert_eq!(vertical, [egui::pos2(400.0, 290.0), egui::pos2(400.0, 310.0)]);
    }

    #[test]
    fn test_window_includes_panel() {
        assert_eq!(layout().window_size(), [1000.0, 600.0]);
        assert_eq!(layout().center(), egui::pos2(400.0, 300.0));
    }

    #[test]
    fn test_palette_from_defaults() {
        let palette = Palette::from_config(&AppConfig::default());
        assert_eq!(palette.grid, Color32::from_rgb(80, 80, 80));
        assert_eq!(palette.background, Color32::BLACK);
    }
}
