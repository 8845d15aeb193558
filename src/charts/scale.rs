//! Scale functions for data-to-pixel mappings.

/// Discrete domain to evenly spaced bands across a pixel range.
///
/// Padding is expressed as a fraction of the step between band starts and is
/// applied both between bands and at the outer edges; leftover space is split
/// evenly on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding: f64,
    step: f64,
    start: f64,
}

impl BandScale {
    pub fn new(range: (f64, f64), padding: f64) -> Self {
        let mut scale = Self {
            domain: Vec::new(),
            range,
            padding: padding.clamp(0.0, 1.0),
            step: 0.0,
            start: range.0,
        };
        scale.rescale();
        scale
    }

    /// Replace the domain. Duplicate keys share the band of their first
    /// occurrence.
    pub fn set_domain<I, S>(&mut self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain.clear();
        for key in keys {
            let key = key.into();
            if !self.domain.contains(&key) {
                self.domain.push(key);
            }
        }
        self.rescale();
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f64;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        self.step = span / (n - self.padding + self.padding * 2.0).max(1.0);
        self.start = r0 + (span - self.step * (n - self.padding)) * 0.5;
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step * (1.0 - self.padding)
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Continuous linear mapping, unclamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain = domain;
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a domain value to the range. A zero-width domain maps everything to
    /// the middle of the range.
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let width = d1 - d0;
        let t = if width.is_nan() {
            f64::NAN
        } else if width == 0.0 {
            0.5
        } else {
            (value - d0) / width
        };
        r0 + (r1 - r0) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn band_positions_with_padding() {
        let mut x = BandScale::new((0.0, 700.0), 0.3);
        x.set_domain(["Open", "Delta1", "Close"]);

        // step = 700 / (3 - 0.3 + 0.6)
        let step = 700.0 / 3.3;
        assert_relative_eq!(x.step(), step);
        assert_relative_eq!(x.bandwidth(), step * 0.7);
        assert_relative_eq!(x.position("Open").unwrap(), step * 0.3);
        assert_relative_eq!(x.position("Delta1").unwrap(), step * 1.3);
        assert_relative_eq!(
            x.position("Close").unwrap() + x.bandwidth() + step * 0.3,
            700.0,
            epsilon = 1e-9
        );
        assert!(x.position("Missing").is_none());
    }

    #[test]
    fn band_duplicates_share_first_band() {
        let mut x = BandScale::new((0.0, 100.0), 0.0);
        x.set_domain(["a", "b", "a"]);
        assert_eq!(x.domain(), ["a", "b"]);
        assert_relative_eq!(x.position("a").unwrap(), 0.0);
        assert_relative_eq!(x.bandwidth(), 50.0);
    }

    #[test]
    fn band_empty_domain() {
        let x = BandScale::new((0.0, 700.0), 0.3);
        assert!(x.domain().is_empty());
        assert_relative_eq!(x.step(), 700.0);
    }

    #[test]
    fn linear_inverted_range() {
        let y = LinearScale::new((0.0, 100.0), (350.0, 0.0));
        assert_relative_eq!(y.scale(0.0), 350.0);
        assert_relative_eq!(y.scale(100.0), 0.0);
        assert_relative_eq!(y.scale(70.0), 105.0, epsilon = 1e-9);
        assert_relative_eq!(y.scale(-10.0), 385.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_degenerate_domain_uses_midpoint() {
        let y = LinearScale::new((0.0, 0.0), (350.0, 0.0));
        assert_relative_eq!(y.scale(0.0), 175.0);
        assert_relative_eq!(y.scale(5.0), 175.0);
        assert!(LinearScale::new((0.0, f64::NAN), (350.0, 0.0)).scale(1.0).is_nan());
    }
}
