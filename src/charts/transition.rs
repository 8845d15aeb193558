//! Timed transitions between rendered scenes.

use crate::charts::renderer::{BarShape, LabelShape, VisualState};
use crate::config::ChartConfig;

/// Cubic ease-in-out over `t` in `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[derive(Debug, Clone)]
struct Tween<T> {
    from: T,
    to: T,
    /// Start time in seconds; `None` when the element is already at rest.
    started: Option<f64>,
}

impl<T: Clone> Tween<T> {
    fn at_rest(to: T) -> Self {
        Self {
            from: to.clone(),
            to,
            started: None,
        }
    }
}

/// Interpolates between successive [`VisualState`]s.
///
/// Bars keep `x` and `width` immediately and ease `y`, `height` and fill from
/// whatever is on screen; labels swap text immediately and ease their
/// position. New elements appear at final geometry and removed ones vanish.
pub struct SceneAnimator {
    duration: f64,
    target: VisualState,
    bars: Vec<Tween<BarShape>>,
    labels: Vec<Tween<LabelShape>>,
}

impl SceneAnimator {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            duration: config.transition_secs(),
            target: VisualState::empty(config),
            bars: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Retarget to `next`, starting from what is displayed at `now`.
    pub fn apply(&mut self, next: &VisualState, now: f64) {
        let shown = self.sample(now);

        self.bars = next
            .bars
            .iter()
            .map(|to| match shown.bar(&to.key) {
                None => Tween::at_rest(to.clone()),
                Some(on_screen) => {
                    let mut from = on_screen.clone();
                    from.x = to.x;
                    from.width = to.width;
                    let settled = from.y == to.y && from.height == to.height && from.fill == to.fill;
                    if settled {
                        Tween::at_rest(to.clone())
                    } else {
                        Tween {
                            from,
                            to: to.clone(),
                            started: Some(now),
                        }
                    }
                }
            })
            .collect();

        self.labels = next
            .labels
            .iter()
            .map(|to| match shown.label(&to.key) {
                Some(on_screen) if on_screen.x != to.x || on_screen.y != to.y => Tween {
                    from: on_screen.clone(),
                    to: to.clone(),
                    started: Some(now),
                },
                _ => Tween::at_rest(to.clone()),
            })
            .collect();

        self.target = next.clone();
    }

    fn progress(&self, started: Option<f64>, now: f64) -> f64 {
        match started {
            None => 1.0,
            Some(_) if self.duration <= 0.0 => 1.0,
            Some(start) => ease_cubic_in_out((now - start) / self.duration),
        }
    }

    /// The scene as displayed at `now`.
    pub fn sample(&self, now: f64) -> VisualState {
        let mut state = self.target.clone();

        state.bars = self
            .bars
            .iter()
            .map(|tween| {
                let t = self.progress(tween.started, now);
                let mut bar = tween.to.clone();
                if t < 1.0 {
                    bar.y = lerp(tween.from.y, tween.to.y, t);
                    bar.height = lerp(tween.from.height, tween.to.height, t);
                    bar.fill = tween.from.fill.lerp(tween.to.fill, t);
                }
                bar
            })
            .collect();

        state.labels = self
            .labels
            .iter()
            .map(|tween| {
                let t = self.progress(tween.started, now);
                let mut label = tween.to.clone();
                if t < 1.0 {
                    label.x = lerp(tween.from.x, tween.to.x, t);
                    label.y = lerp(tween.from.y, tween.to.y, t);
                }
                label
            })
            .collect();

        state
    }

    /// Whether any element is still moving at `now`.
    pub fn is_animating(&self, now: f64) -> bool {
        let running = |started: Option<f64>| {
            started.is_some_and(|start| self.duration > 0.0 && now - start < self.duration)
        };
        self.bars.iter().any(|t| running(t.started)) || self.labels.iter().any(|t| running(t.started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::renderer::ChartRenderer;
    use crate::data::{prepare, Record};
    use approx::assert_relative_eq;

    fn scene(renderer: &mut ChartRenderer, values: &[(&str, f64)]) -> VisualState {
        let records: Vec<Record> = values
            .iter()
            .map(|&(name, value)| Record::new("A", name, value))
            .collect();
        renderer.render(&prepare(&records)).state
    }

    #[test]
    fn easing_endpoints() {
        assert_relative_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_relative_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_relative_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_relative_eq!(ease_cubic_in_out(2.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
    }

    #[test]
    fn first_scene_appears_immediately() {
        let config = ChartConfig::default();
        let mut renderer = ChartRenderer::new(config.clone());
        let mut animator = SceneAnimator::new(&config);

        let first = scene(&mut renderer, &[("Open", 100.0), ("D", -30.0), ("Close", 70.0)]);
        animator.apply(&first, 0.0);
        assert!(!animator.is_animating(0.0));
        assert_eq!(animator.sample(0.0), first);
    }

    #[test]
    fn same_scene_twice_starts_no_transition() {
        let config = ChartConfig::default();
        let mut renderer = ChartRenderer::new(config.clone());
        let mut animator = SceneAnimator::new(&config);

        let values = [("Open", 100.0), ("D", -30.0), ("Close", 70.0)];
        let first = scene(&mut renderer, &values);
        animator.apply(&first, 0.0);
        let second = scene(&mut renderer, &values);
        animator.apply(&second, 0.2);

        assert!(!animator.is_animating(0.2));
        assert_eq!(animator.sample(0.2), second);
    }

    #[test]
    fn changed_bar_eases_over_duration() {
        let config = ChartConfig::default();
        let mut renderer = ChartRenderer::new(config.clone());
        let mut animator = SceneAnimator::new(&config);

        let first = scene(&mut renderer, &[("Open", 100.0), ("D", -30.0), ("Close", 70.0)]);
        animator.apply(&first, 0.0);
        let second = scene(&mut renderer, &[("Open", 100.0), ("D", -60.0), ("Close", 40.0)]);
        animator.apply(&second, 10.0);

        assert!(animator.is_animating(10.0));
        let start = animator.sample(10.0);
        assert_relative_eq!(start.bars[1].height, first.bars[1].height);
        assert_eq!(start.labels[1].text, "-60");

        let mid = animator.sample(10.75);
        assert_relative_eq!(
            mid.bars[1].height,
            (first.bars[1].height + second.bars[1].height) / 2.0,
            epsilon = 1e-9
        );

        assert!(!animator.is_animating(11.5));
        assert_eq!(animator.sample(11.5), second);
    }

    #[test]
    fn exited_bars_vanish_and_new_bars_land() {
        let config = ChartConfig::default();
        let mut renderer = ChartRenderer::new(config.clone());
        let mut animator = SceneAnimator::new(&config);

        let first = scene(&mut renderer, &[("Open", 100.0), ("D", -30.0), ("Close", 70.0)]);
        animator.apply(&first, 0.0);
        let second = scene(&mut renderer, &[("Start", 5.0), ("Up", 5.0), ("End", 10.0)]);
        animator.apply(&second, 1.0);

        let shown = animator.sample(1.0);
        assert_eq!(shown, second);
        assert!(shown.bars.iter().all(|b| b.key.name != "Open"));
    }

    #[test]
    fn zero_duration_snaps() {
        let config = ChartConfig {
            transition_ms: 0,
            ..ChartConfig::default()
        };
        let mut renderer = ChartRenderer::new(config.clone());
        let mut animator = SceneAnimator::new(&config);

        animator.apply(&scene(&mut renderer, &[("Open", 1.0), ("Close", 2.0)]), 0.0);
        let second = scene(&mut renderer, &[("Open", 4.0), ("Close", 2.0)]);
        animator.apply(&second, 0.0);
        assert!(!animator.is_animating(0.0));
        assert_eq!(animator.sample(0.0), second);
    }
}
