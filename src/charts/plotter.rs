//! Chart Plotter Module
//! Paints a [`VisualState`] with the egui painter.

use crate::charts::renderer::{BarShape, VisualState};
use crate::config::HexColor;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

pub const LABEL_COLOR: Color32 = Color32::from_rgb(40, 40, 40);
pub const AXIS_COLOR: Color32 = Color32::from_rgb(90, 90, 90);
const HOVER_STROKE: Color32 = Color32::from_rgb(52, 152, 219);

/// Paints waterfall scenes into an egui surface.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn to_color32(color: HexColor) -> Color32 {
        Color32::from_rgb(color.r, color.g, color.b)
    }

    /// Screen position of an inner-coordinate point, given the surface origin.
    pub fn to_screen(origin: Pos2, state: &VisualState, x: f64, y: f64) -> Pos2 {
        Pos2::new(
            origin.x + (state.margin.left + x) as f32,
            origin.y + (state.margin.top + y) as f32,
        )
    }

    /// Inner coordinates of a screen position.
    pub fn to_inner(origin: Pos2, state: &VisualState, pos: Pos2) -> (f64, f64) {
        (
            (pos.x - origin.x) as f64 - state.margin.left,
            (pos.y - origin.y) as f64 - state.margin.top,
        )
    }

    fn bar_rect(origin: Pos2, state: &VisualState, bar: &BarShape) -> Option<Rect> {
        if ![bar.x, bar.y, bar.width, bar.height].iter().all(|v| v.is_finite()) {
            return None;
        }
        let min = Self::to_screen(origin, state, bar.x, bar.y);
        Some(Rect::from_min_size(
            min,
            Vec2::new(bar.width as f32, bar.height as f32),
        ))
    }

    /// Draw bars, labels and axis ticks. `hovered` gets an outline.
    pub fn paint_scene(
        painter: &egui::Painter,
        origin: Pos2,
        state: &VisualState,
        font_size: f32,
        hovered: Option<&BarShape>,
    ) {
        for bar in &state.bars {
            if let Some(rect) = Self::bar_rect(origin, state, bar) {
                painter.rect_filled(rect, 0.0, Self::to_color32(bar.fill));
            }
        }

        if let Some(rect) = hovered.and_then(|bar| Self::bar_rect(origin, state, bar)) {
            painter.rect_stroke(rect, 0.0, Stroke::new(1.5, HOVER_STROKE));
        }

        for label in &state.labels {
            if label.x.is_finite() && label.y.is_finite() {
                painter.text(
                    Self::to_screen(origin, state, label.x, label.y),
                    Align2::CENTER_BOTTOM,
                    &label.text,
                    FontId::proportional(font_size),
                    LABEL_COLOR,
                );
            }
        }

        for tick in &state.ticks {
            if tick.x.is_finite() {
                painter.text(
                    Self::to_screen(origin, state, tick.x, tick.y),
                    Align2::CENTER_TOP,
                    &tick.label,
                    FontId::proportional(font_size),
                    AXIS_COLOR,
                );
            }
        }
    }
}
