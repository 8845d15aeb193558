//! Waterfall Chart Renderer
//! Turns prepared bars into a pixel-level scene description.
//!
//! The renderer never draws anything itself. Each [`ChartRenderer::render`]
//! call re-domains both scales, lays out the axis, bars and labels in inner
//! (margin-translated) coordinates, and reconciles the result against the
//! previous call so adapters know which elements entered, moved or left.
//!
//! Elements are matched by [`BarKey`] (name plus occurrence) rather than by
//! position, so filtering or reordering never animates one bar into another.

use crate::charts::format::format_thousands;
use crate::charts::scale::{BandScale, LinearScale};
use crate::config::{ChartConfig, HexColor, Margin, Palette};
use crate::data::{Bar, BarColor};
use std::collections::{HashMap, HashSet};

/// Gap between the axis line and the top of tick labels, before the label shift.
const AXIS_TICK_PADDING: f64 = 3.0;

/// Identity of a bar across renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BarKey {
    pub name: String,
    /// How many earlier bars in the same set share this name.
    pub occurrence: usize,
}

impl BarKey {
    /// Keys for a bar sequence, numbering repeated names.
    pub fn for_bars(bars: &[Bar]) -> Vec<BarKey> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        bars.iter()
            .map(|bar| {
                let seen = counts.entry(bar.name.as_str()).or_insert(0);
                let key = BarKey {
                    name: bar.name.clone(),
                    occurrence: *seen,
                };
                *seen += 1;
                key
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    pub key: BarKey,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: HexColor,
    pub color: BarColor,
    pub value: f64,
    pub start: f64,
    pub end: f64,
}

impl BarShape {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Value label; `(x, y)` is the horizontal centre on the text baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelShape {
    pub key: BarKey,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Category tick; `(x, y)` is the horizontal centre on the top edge of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Everything an adapter needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    /// Outer surface size.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub ticks: Vec<AxisTick>,
    pub bars: Vec<BarShape>,
    pub labels: Vec<LabelShape>,
}

impl VisualState {
    pub fn empty(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
            ticks: Vec::new(),
            bars: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Topmost bar under an inner-coordinate point.
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&BarShape> {
        self.bars.iter().rev().find(|bar| bar.contains(x, y))
    }

    pub fn bar(&self, key: &BarKey) -> Option<&BarShape> {
        self.bars.iter().find(|bar| &bar.key == key)
    }

    pub fn label(&self, key: &BarKey) -> Option<&LabelShape> {
        self.labels.iter().find(|label| &label.key == key)
    }

    pub fn keys(&self) -> Vec<BarKey> {
        self.bars.iter().map(|bar| bar.key.clone()).collect()
    }
}

/// How the new scene relates to the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDiff {
    /// New elements, drawn at final geometry.
    pub entered: Vec<BarKey>,
    /// Elements whose geometry, fill or text changed.
    pub updated: Vec<BarKey>,
    pub unchanged: Vec<BarKey>,
    /// Elements to erase.
    pub exited: Vec<BarKey>,
}

impl SceneDiff {
    pub fn is_noop(&self) -> bool {
        self.entered.is_empty() && self.updated.is_empty() && self.exited.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub state: VisualState,
    pub diff: SceneDiff,
}

pub fn fill_for(palette: &Palette, color: BarColor) -> HexColor {
    match color {
        BarColor::Base => palette.base,
        BarColor::Positive => palette.positive,
        BarColor::Negative => palette.negative,
    }
}

/// Keeps the chart scales and the last rendered scene.
pub struct ChartRenderer {
    config: ChartConfig,
    x: BandScale,
    y: LinearScale,
    previous: Option<VisualState>,
}

impl ChartRenderer {
    pub fn new(config: ChartConfig) -> Self {
        let x = BandScale::new((0.0, config.inner_width()), config.band_padding);
        let y = LinearScale::new((0.0, 0.0), (config.inner_height(), 0.0));
        Self {
            config,
            x,
            y,
            previous: None,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Lay out `bars` and reconcile with the previous scene.
    pub fn render(&mut self, bars: &[Bar]) -> RenderFrame {
        let state = self.layout(bars);
        let diff = match &self.previous {
            Some(previous) => reconcile(previous, &state),
            None => SceneDiff {
                entered: state.keys(),
                ..SceneDiff::default()
            },
        };

        log::debug!(
            "render: {} entered, {} updated, {} unchanged, {} exited",
            diff.entered.len(),
            diff.updated.len(),
            diff.unchanged.len(),
            diff.exited.len()
        );

        self.previous = Some(state.clone());
        RenderFrame { state, diff }
    }

    /// Re-domain the scales and compute the scene for `bars`.
    pub fn layout(&mut self, bars: &[Bar]) -> VisualState {
        self.x.set_domain(bars.iter().map(|b| b.name.as_str()));
        let max = bars
            .iter()
            .map(|b| b.start.max(b.end))
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(0.0);
        self.y.set_domain((0.0, max));

        let bandwidth = self.x.bandwidth();
        let zero = self.y.scale(0.0);
        let keys = BarKey::for_bars(bars);

        let mut state = VisualState::empty(&self.config);

        state.ticks = self
            .x
            .domain()
            .iter()
            .map(|name| AxisTick {
                label: name.clone(),
                x: self.x.position(name).unwrap_or(f64::NAN) + bandwidth / 2.0,
                y: self.config.inner_height() + AXIS_TICK_PADDING + self.config.label_offset,
            })
            .collect();

        for (bar, key) in bars.iter().zip(keys) {
            let x = self.x.position(&bar.name).unwrap_or(f64::NAN);
            let top = self.y.scale(bar.start).min(self.y.scale(bar.end));
            let height = (zero - self.y.scale(bar.value))
                .abs()
                .max(self.config.min_bar_height);

            state.labels.push(LabelShape {
                key: key.clone(),
                text: format_thousands(bar.value),
                x: x + bandwidth / 2.0,
                y: top - self.config.label_offset,
            });
            state.bars.push(BarShape {
                key,
                x,
                y: top,
                width: bandwidth,
                height,
                fill: fill_for(&self.config.palette, bar.color),
                color: bar.color,
                value: bar.value,
                start: bar.start,
                end: bar.end,
            });
        }

        state
    }
}

/// Classify every key of `next` against `previous`.
pub fn reconcile(previous: &VisualState, next: &VisualState) -> SceneDiff {
    let mut diff = SceneDiff::default();
    let next_keys: HashSet<&BarKey> = next.bars.iter().map(|b| &b.key).collect();

    for bar in &next.bars {
        match previous.bar(&bar.key) {
            None => diff.entered.push(bar.key.clone()),
            Some(old) => {
                let same_label = previous.label(&bar.key) == next.label(&bar.key);
                if old == bar && same_label {
                    diff.unchanged.push(bar.key.clone());
                } else {
                    diff.updated.push(bar.key.clone());
                }
            }
        }
    }

    diff.exited = previous
        .bars
        .iter()
        .filter(|b| !next_keys.contains(&b.key))
        .map(|b| b.key.clone())
        .collect();
    diff
}
