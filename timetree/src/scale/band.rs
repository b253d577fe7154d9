/// Discrete mapping from row index to a pixel band, with pixel-rounded steps.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BandScale {
    count: usize,
    offset: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Split `[start, stop]` into `count` bands.
    ///
    /// `padding` is the fraction of each step left empty between bands and
    /// `outer_padding` the fraction of a step added before the first and after
    /// the last band. Steps are floored to whole pixels and the leftover is
    /// split evenly on both ends.
    pub fn round_bands(count: usize, [start, stop]: [f64; 2], padding: f64, outer_padding: f64) -> Self {
        let n = count as f64;
        let denom = n - padding + 2.0 * outer_padding;
        let step = if denom > 0.0 {
            ((stop - start) / denom).floor()
        } else {
            0.0
        };
        let error = stop - start - (n - padding) * step;

        Self {
            count,
            offset: start + round_half_up(error / 2.0),
            step,
            bandwidth: round_half_up(step * (1.0 - padding)),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Top edge of band `index`.
    pub fn position(&self, index: usize) -> f64 {
        self.offset + self.step * index as f64
    }

    /// Center of band `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.bandwidth / 2.0
    }

    /// Index of the band whose `[top, top + bandwidth)` contains `y`.
    pub fn index_at(&self, y: f64) -> Option<usize> {
        (0..self.count).find(|&i| {
            let top = self.position(i);
            top <= y && y < top + self.bandwidth
        })
    }
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
