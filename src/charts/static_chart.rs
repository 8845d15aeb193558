//! Static Chart Renderer
//! Draws a [`VisualState`] through a plotters backend (SVG text or PNG file).
//!
//! Layout matches the interactive view: the scene's inner coordinates are
//! offset by the top/left margins, bars are filled rectangles, value labels
//! sit centred on their baseline and axis ticks hang below the chart area.

use crate::charts::renderer::VisualState;
use crate::config::HexColor;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Backend(String),
}

const FONT_FAMILY: &str = "sans-serif";

fn rgb(color: HexColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the scene as an SVG document.
    pub fn render_svg(state: &VisualState, font_size: f64) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, Self::surface_size(state))
                .into_drawing_area();
            Self::draw_scene(&root, state, font_size)
                .map_err(|e| RenderError::Backend(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Backend(e.to_string()))?;
        }
        Ok(svg)
    }

    /// Render the scene to a PNG file.
    pub fn render_png(state: &VisualState, font_size: f64, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, Self::surface_size(state)).into_drawing_area();
        Self::draw_scene(&root, state, font_size)
            .map_err(|e| RenderError::Backend(e.to_string()))?;
        root.present()
            .map_err(|e| RenderError::Backend(e.to_string()))?;
        Ok(())
    }

    fn surface_size(state: &VisualState) -> (u32, u32) {
        (state.width.max(1.0) as u32, state.height.max(1.0) as u32)
    }

    fn draw_scene<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        state: &VisualState,
        font_size: f64,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let ox = state.margin.left;
        let oy = state.margin.top;

        for bar in &state.bars {
            if ![bar.x, bar.y, bar.width, bar.height].iter().all(|v| v.is_finite()) {
                continue;
            }
            let x0 = px(ox + bar.x);
            let y0 = px(oy + bar.y);
            let x1 = px(ox + bar.x + bar.width);
            let y1 = px(oy + bar.y + bar.height).max(y0 + 1);
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], rgb(bar.fill).filled()))?;
        }

        let label_style = (FONT_FAMILY, font_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        for label in &state.labels {
            if !(label.x.is_finite() && label.y.is_finite()) {
                continue;
            }
            root.draw(&Text::new(
                label.text.as_str(),
                (px(ox + label.x), px(oy + label.y)),
                label_style.clone(),
            ))?;
        }

        let tick_style = (FONT_FAMILY, font_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for tick in &state.ticks {
            if !tick.x.is_finite() {
                continue;
            }
            root.draw(&Text::new(
                tick.label.as_str(),
                (px(ox + tick.x), px(oy + tick.y)),
                tick_style.clone(),
            ))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::renderer::ChartRenderer;
    use crate::config::ChartConfig;
    use crate::data::{prepare, Record};

    fn example_state() -> VisualState {
        let records = vec![
            Record::new("A", "Open", 100.0),
            Record::new("A", "Delta1", -30.0),
            Record::new("A", "Close", 70.0),
        ];
        ChartRenderer::new(ChartConfig::default())
            .render(&prepare(&records))
            .state
    }

    #[test]
    fn svg_has_surface_size_and_bars() {
        let svg = StaticChartRenderer::render_svg(&example_state(), 12.0).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("800"));
        assert!(svg.contains("450"));

        let lower = svg.to_lowercase();
        assert!(lower.contains("#e1e1e1"));
        assert!(lower.contains("#fc5c9c"));
        assert!(!lower.contains("#b2e672"));
    }

    #[test]
    fn svg_contains_labels_and_ticks() {
        let svg = StaticChartRenderer::render_svg(&example_state(), 12.0).unwrap();
        for text in ["Open", "Delta1", "Close", "100", "-30", "70"] {
            assert!(svg.contains(text), "missing {text}");
        }
    }

    #[test]
    fn empty_scene_still_renders() {
        let state = VisualState::empty(&ChartConfig::default());
        let svg = StaticChartRenderer::render_svg(&state, 12.0).unwrap();
        assert!(svg.contains("<svg"));
    }
}
