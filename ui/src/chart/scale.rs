//! Axis math: nice tick selection, linear value mapping and categorical bands.

/// Linear mapping from a value domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Equal-width category slots across `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub start: f64,
    pub end: f64,
}

impl BandScale {
    pub fn new(count: usize, start: f64, end: f64) -> Self {
        Self { count, start, end }
    }

    pub fn bandwidth(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.end - self.start) / self.count as f64
        }
    }

    pub fn center(&self, index: usize) -> f64 {
        self.start + self.bandwidth() * (index as f64 + 0.5)
    }

    pub fn band_start(&self, index: usize) -> f64 {
        self.start + self.bandwidth() * index as f64
    }
}

/// Roughly `count` evenly spaced round ticks covering the finite values plus zero.
pub fn nice_ticks(values: impl IntoIterator<Item = f64>, count: usize) -> Vec<f64> {
    let mut lo = 0.0_f64;
    let mut hi = 0.0_f64;
    for value in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if lo == hi {
        hi = lo + 4.0;
    }

    let step = nice_step((hi - lo) / count.max(1) as f64);
    let first = (lo / step).floor() * step;
    let last = (hi / step).ceil() * step;

    let steps = ((last - first) / step).round() as usize;
    (0..=steps)
        .map(|i| clean(first + step * i as f64))
        .collect()
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual > 5.0 {
        10.0
    } else if residual > 2.0 {
        5.0
    } else if residual > 1.0 {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

/// Drop float noise such as `0.30000000000000004`.
fn clean(value: f64) -> f64 {
    let rounded = (value * 1e9).round() / 1e9;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
