//! Ordering of candidate matches according to the querying owner's
//! preference.

use std::cmp::Ordering;

use crate::types::{Location, PreferredMatch, Ride};

/// Comparator over the opposite rides of a query's candidate matches.
///
/// | Preference | Key | Order |
/// |------------|-----|-------|
/// | `Cheaper` | opposite ride cost | ascending |
/// | `Closer` | distance from the querying ride | ascending |
/// | `Better` | opposite owner's average in their role | descending |
///
/// Equal keys compare `Equal`, so a stable sort keeps the input order.
#[derive(Debug, Clone, Copy)]
pub struct RideSorter {
    preference: PreferredMatch,
    origin: Location,
}

impl RideSorter {
    pub fn new(preference: PreferredMatch, origin: Location) -> Self {
        Self { preference, origin }
    }

    /// Sorter for candidates of `ride`, using its owner's preference and its
    /// current position
    pub fn for_ride(ride: &Ride) -> Self {
        Self::new(ride.owner().preference(), ride.current())
    }

    #[inline]
    pub fn preference(&self) -> PreferredMatch {
        self.preference
    }

    /// Compare two opposite rides; `Less` ranks first
    pub fn compare(&self, left: &Ride, right: &Ride) -> Ordering {
        match self.preference {
            PreferredMatch::Cheaper => left.cost().cmp(&right.cost()),
            PreferredMatch::Closer => {
                let left_distance = self.origin.distance(&left.current());
                let right_distance = self.origin.distance(&right.current());
                left_distance.total_cmp(&right_distance)
            }
            PreferredMatch::Better => right.owner_average().total_cmp(&left.owner_average()),
        }
    }

    /// Stable sort in ranking order
    pub fn sort(&self, rides: &mut [&Ride]) {
        rides.sort_by(|left, right| self.compare(left, right));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
