use std::fmt::Display;
use std::fmt::Formatter;

use super::Time;
use crate::np_assert_simple;

/// A closed interval `[min, max]` of points in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    min: Time,
    max: Time,
}

impl Interval {
    pub fn new(min: Time, max: Time) -> Interval {
        np_assert_simple!(min <= max, "The interval [{min}, {max}] is empty");
        Interval { min, max }
    }

    /// The interval containing only `value`.
    pub fn point(value: Time) -> Interval {
        Interval {
            min: value,
            max: value,
        }
    }

    pub fn min(&self) -> Time {
        self.min
    }

    pub fn max(&self) -> Time {
        self.max
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    pub fn contains(&self, value: Time) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// The smallest interval containing both `self` and `other`.
    pub fn hull(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Adds the bounds of `offset` to the respective bounds of `self`.
    pub fn shifted_by(&self, offset: &Interval) -> Interval {
        Interval {
            min: self.min + offset.min,
            max: self.max + offset.max,
        }
    }

    /// Raises both bounds of `self` to at least the respective bounds of `other`.
    pub fn lower_bounded_by(&self, other: &Interval) -> Interval {
        Interval {
            min: self.min.max(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_intervals_intersect() {
        assert!(Interval::new(0, 5).intersects(&Interval::new(5, 9)));
        assert!(!Interval::new(0, 4).intersects(&Interval::new(5, 9)));
    }

    #[test]
    fn hull_spans_both_intervals() {
        let hull = Interval::new(3, 4).hull(&Interval::new(8, 10));
        assert_eq!(hull, Interval::new(3, 10));
    }

    #[test]
    fn shifting_adds_bounds_pairwise() {
        let shifted = Interval::new(10, 12).shifted_by(&Interval::new(1, 3));
        assert_eq!(shifted, Interval::new(11, 15));
    }
}
