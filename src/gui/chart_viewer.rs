//! Chart Viewer Widget
//! Central panel showing the animated waterfall for the selected category.

use crate::charts::format::format_thousands;
use crate::charts::{ChartPlotter, RenderFrame, SceneAnimator};
use crate::config::ChartConfig;
use egui::{Align2, Color32, FontId, RichText, Sense, Vec2};

pub struct ChartViewer {
    animator: SceneAnimator,
    font_size: f32,
    title: Option<String>,
}

impl ChartViewer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            animator: SceneAnimator::new(config),
            font_size: config.font_size as f32,
            title: None,
        }
    }

    /// Show a new render result, easing from what is on screen at `now`.
    pub fn set_frame(&mut self, category: &str, frame: &RenderFrame, now: f64) {
        self.title = Some(category.to_string());
        self.animator.apply(&frame.state, now);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let now = ui.ctx().input(|i| i.time);
        let state = self.animator.sample(now);

        if let Some(title) = &self.title {
            ui.label(RichText::new(format!("Category: {title}")).size(18.0).strong());
            ui.add_space(8.0);
        }

        let size = Vec2::new(state.width as f32, state.height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let origin = response.rect.min;
        painter.rect_filled(response.rect, 4.0, Color32::WHITE);

        if state.bars.is_empty() {
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                "No Data",
                FontId::proportional(20.0),
                Color32::GRAY,
            );
            return;
        }

        let hovered = response.hover_pos().and_then(|pos| {
            let (x, y) = ChartPlotter::to_inner(origin, &state, pos);
            state.bar_at(x, y).cloned()
        });

        ChartPlotter::paint_scene(&painter, origin, &state, self.font_size, hovered.as_ref());

        if self.animator.is_animating(now) {
            ui.ctx().request_repaint();
        }

        if let Some(bar) = hovered {
            response.on_hover_text(format!(
                "{}\nvalue: {}\nstart: {}\nend: {}",
                bar.key.name,
                format_thousands(bar.value),
                format_thousands(bar.start),
                format_thousands(bar.end)
            ));
        }
    }
}
