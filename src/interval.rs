//! The `Interval` stored in `IntervalIndex`.
//!
//! Intervals are ordered by `low` first and then by `high`. For instance, with
//! intervals of type `Interval<u32>`:
//! - [1,4] < [2,5], because 1 < 2
//! - [1,4] < [1,5], because 4 < 5
//!
//! Both endpoints take part in overlap checks, so intervals that only touch
//! (`[1,3]` and `[3,5]`) overlap. A degenerate interval (`low == high`) is a
//! single point.

use std::fmt;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An interval with inclusive endpoints, `low <= high`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<T> {
    /// Low value
    pub(crate) low: T,
    /// High value
    pub(crate) high: T,
}

impl<T: Ord> Interval<T> {
    /// Create a new `Interval`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] when `high < low`.
    ///
    /// # Example
    /// ```rust
    /// use rb_index::{Error, Interval};
    ///
    /// assert!(Interval::new(1, 2).is_ok());
    /// assert!(Interval::new(2, 2).is_ok());
    /// assert_eq!(Interval::new(3, 1), Err(Error::InvalidInterval));
    /// ```
    #[inline]
    pub fn new(low: T, high: T) -> Result<Self> {
        if high < low {
            return Err(Error::InvalidInterval);
        }
        Ok(Self { low, high })
    }

    /// Checks if self overlaps with other interval
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// Checks if `point` lies within the interval.
    #[inline]
    pub fn contains_point(&self, point: &T) -> bool {
        &self.low <= point && point <= &self.high
    }
}

impl<T> Interval<T> {
    /// Low endpoint.
    #[inline]
    pub fn low(&self) -> &T {
        &self.low
    }

    /// High endpoint.
    #[inline]
    pub fn high(&self) -> &T {
        &self.high
    }

    /// Consumes the interval, returning `(low, high)`.
    #[inline]
    pub fn into_inner(self) -> (T, T) {
        (self.low, self.high)
    }
}

impl<T: Ord> TryFrom<(T, T)> for Interval<T> {
    type Error = Error;

    fn try_from((low, high): (T, T)) -> Result<Self> {
        Interval::new(low, high)
    }
}

impl<T> From<Interval<T>> for (T, T) {
    fn from(interval: Interval<T>) -> Self {
        interval.into_inner()
    }
}

/// Serialized as a `(low, high)` pair.
#[cfg(feature = "serde")]
impl<T: Serialize> Serialize for Interval<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.low, &self.high).serialize(serializer)
    }
}

/// Deserialization goes through [`Interval::new`], so reversed pairs are rejected.
#[cfg(feature = "serde")]
impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for Interval<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (low, high) = <(T, T)>::deserialize(deserializer)?;
        Interval::new(low, high).map_err(serde::de::Error::custom)
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}
