//! Planar coordinates in lot units (the same units the layout uses for slot
//! sizes and margins).

/// A position on the lot plane.  `y` grows downwards from the entrance.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Move from `self` towards `target` by exactly `step` units.
    ///
    /// The caller guarantees `step <= self.distance(target)`; beyond
    /// that distance it should snap to `target` instead.
    #[inline]
    pub fn step_towards(self, target: Point, step: f64) -> Point {
        let d = self.distance(target);
        if d == 0.0 {
            return target;
        }
        let k = step / d;
        Point {
            x: self.x + (target.x - self.x) * k,
            y: self.y + (target.y - self.y) * k,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
