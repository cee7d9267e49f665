use num_traits::{Bounded, Num};
use std::fmt::{self, Debug, Display};
use std::ops::Add;

/// Numeric types usable as edge costs.
///
/// Covers the primitive integers and floats. Reduction only ever subtracts a
/// line minimum from values at least as large, so unsigned types are fine.
pub trait CostValue: Num + Bounded + Copy + PartialOrd + Debug + Display {}

impl<T> CostValue for T where T: Num + Bounded + Copy + PartialOrd + Debug + Display {}

/// The cost of a directed edge: either a finite value or `Forbidden`.
///
/// The derived ordering places every `Finite` value below `Forbidden`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Cost<T> {
    Finite(T),
    Forbidden,
}

impl<T: CostValue> Cost<T> {
    pub fn zero() -> Self {
        Cost::Finite(T::zero())
    }

    /// Maps `sentinel` to `Forbidden` and anything else to `Finite`.
    pub fn from_sentinel(value: T, sentinel: T) -> Self {
        if value == sentinel {
            Cost::Forbidden
        } else {
            Cost::Finite(value)
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Cost::Forbidden)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Cost::Finite(v) => v.is_zero(),
            Cost::Forbidden => false,
        }
    }

    pub fn finite(self) -> Option<T> {
        match self {
            Cost::Finite(v) => Some(v),
            Cost::Forbidden => None,
        }
    }

    /// Subtracts a line minimum. `Forbidden` stays `Forbidden`, and a value
    /// equal to `min` becomes an exact zero.
    pub fn reduced_by(self, min: T) -> Self {
        match self {
            Cost::Finite(v) if v == min => Cost::zero(),
            Cost::Finite(v) => Cost::Finite(v - min),
            Cost::Forbidden => Cost::Forbidden,
        }
    }

    /// Like `+`, but clamps a finite sum to the bounds of `T` instead of
    /// overflowing.
    pub fn saturating_add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(saturating_sum(a, b)),
            _ => Cost::Forbidden,
        }
    }
}

fn saturating_sum<T: CostValue>(a: T, b: T) -> T {
    let zero = T::zero();
    if b > zero && a > T::max_value() - b {
        T::max_value()
    } else if b < zero && a < T::min_value() - b {
        T::min_value()
    } else {
        a + b
    }
}

impl<T: CostValue> Add for Cost<T> {
    type Output = Cost<T>;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Forbidden,
        }
    }
}

impl<T: CostValue> From<T> for Cost<T> {
    fn from(value: T) -> Self {
        Cost::Finite(value)
    }
}

impl<T: CostValue> Display for Cost<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(v) => Display::fmt(v, f),
            Cost::Forbidden => f.pad("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_orders_above_finite() {
        assert!(Cost::Finite(i64::MAX) < Cost::Forbidden);
        assert!(Cost::Finite(f64::MAX) < Cost::Forbidden);
        assert!(Cost::Finite(1) < Cost::Finite(2));
    }

    #[test]
    fn test_reduction_skips_forbidden() {
        assert_eq!(Cost::Finite(7).reduced_by(3), Cost::Finite(4));
        assert_eq!(Cost::<i32>::Forbidden.reduced_by(3), Cost::Forbidden);
        assert!(Cost::Finite(0.1 + 0.2).reduced_by(0.1 + 0.2).is_zero());
    }

    #[test]
    fn test_addition_absorbs_forbidden() {
        assert_eq!(Cost::Finite(2) + Cost::Finite(3), Cost::Finite(5));
        assert_eq!(Cost::Finite(2) + Cost::Forbidden, Cost::Forbidden);
    }

    #[test]
    fn test_saturating_add_clamps_to_bounds() {
        let big = Cost::Finite(3_000_000_000u32);
        assert_eq!(big.saturating_add(big), Cost::Finite(u32::MAX));
        assert_eq!(
            Cost::Finite(u32::MAX).saturating_add(Cost::Finite(0)),
            Cost::Finite(u32::MAX)
        );
        assert_eq!(
            Cost::Finite(i32::MIN + 1).saturating_add(Cost::Finite(-5)),
            Cost::Finite(i32::MIN)
        );
        assert_eq!(
            Cost::Finite(-7i32).saturating_add(Cost::Finite(3)),
            Cost::Finite(-4)
        );
        assert_eq!(Cost::Finite(1.5f64).saturating_add(Cost::Finite(2.0)), Cost::Finite(3.5));
        assert_eq!(big.saturating_add(Cost::Forbidden), Cost::Forbidden);
    }

    #[test]
    fn test_sentinel_and_display() {
        assert_eq!(Cost::from_sentinel(i32::MAX, i32::MAX), Cost::Forbidden);
        assert_eq!(Cost::from_sentinel(5, i32::MAX), Cost::Finite(5));
        assert_eq!(format!("{:>3}", Cost::<u32>::Forbidden), "  -");
        assert_eq!(format!("{:>3}", Cost::Finite(42u32)), " 42");
    }
}
