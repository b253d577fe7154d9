/// Continuous linear mapping from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
    clamp: bool,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
            clamp: false,
        }
    }
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn set_domain(&mut self, domain: [f64; 2]) {
        self.domain = domain;
    }

    pub fn set_range(&mut self, range: [f64; 2]) {
        self.range = range;
    }

    /// Map a domain value to the range.
    pub fn scale(&self, value: f64) -> f64 {
        let t = self.normalize(value, self.domain);
        lerp(self.range, t)
    }

    /// Map a range value back to the domain. Clamps like [`scale`](Self::scale).
    pub fn invert(&self, px: f64) -> f64 {
        let t = self.normalize(px, self.range);
        lerp(self.domain, t)
    }

    fn normalize(&self, value: f64, [a, b]: [f64; 2]) -> f64 {
        let span = b - a;
        // A degenerate interval sends everything to its start.
        if span == 0.0 {
            return 0.0;
        }
        let t = (value - a) / span;
        if self.clamp { t.clamp(0.0, 1.0) } else { t }
    }

    /// Round tick values covering the domain, about `count` of them.
    ///
    /// Steps are 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [lo, hi] = if self.domain[0] <= self.domain[1] {
            self.domain
        } else {
            [self.domain[1], self.domain[0]]
        };
        let span = hi - lo;
        if count == 0 || !span.is_finite() || span <= 0.0 {
            return if span == 0.0 && lo.is_finite() { vec![lo] } else { Vec::new() };
        }

        let step = tick_step(span, count);
        let first = (lo / step).ceil();
        let last = (hi / step).floor();

        let mut ticks = Vec::new();
        let mut i = first;
        while i <= last {
            ticks.push(i * step);
            i += 1.0;
        }
        ticks
    }
}

fn tick_step(span: f64, count: usize) -> f64 {
    let m = count as f64;
    let mut step = 10f64.powi((span / m).log10().floor() as i32);
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    step
}

fn lerp([a, b]: [f64; 2], t: f64) -> f64 {
    a + (b - a) * t
}
