use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TransformError;

// Coordinates may be separated by a comma, whitespace, or both.
static TRANSLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*translate\(\s*(-?[\d.]+(?:[eE][-+]?\d+)?)\s*(?:,\s*|\s+)(-?[\d.]+(?:[eE][-+]?\d+)?)\s*\)\s*$")
        .expect("translate pattern is valid")
});

/// A `translate(x, y)` transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn then(self, other: Translate) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl fmt::Display for Translate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{})", self.x, self.y)
    }
}

impl FromStr for Translate {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TransformError(s.to_string());
        let caps = TRANSLATE_RE.captures(s).ok_or_else(malformed)?;
        let x = caps[1].parse().map_err(|_| malformed())?;
        let y = caps[2].parse().map_err(|_| malformed())?;
        Ok(Self { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_omits_trailing_zeros() {
        assert_eq!(Translate::new(30.0, 7.5).to_string(), "translate(30,7.5)");
    }

    #[test]
    fn test_rejects_missing_coordinate() {
        assert!("translate(30)".parse::<Translate>().is_err());
        assert!("scale(2, 2)".parse::<Translate>().is_err());
        assert!("translate(1..2, 3)".parse::<Translate>().is_err());
    }
}
