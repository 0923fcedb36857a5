//! Ride match type: a proposed pairing of a driver ride and a passenger ride.
//!
//! ## SSZ Serialization
//!
//! Ride matches derive `SimpleSerialize` so every matcher encodes its pending
//! matches to identical bytes, which makes the matcher state root
//! reproducible across runs.

use ssz_rs::prelude::*;

use crate::types::{MatchId, Ride, RideId, RideRole};

/// A pairing between a driver ride and a passenger ride.
///
/// The pairing is unordered but role-addressable: whichever ride triggered
/// the proposal, the driver side is always stored in `driver_ride`.
///
/// ## Example
///
/// ```
/// use ride_matcher::types::{RideMatch, RideRole};
///
/// let m = RideMatch::new(1, 10, 20);
/// assert_eq!(m.ride_of(RideRole::Driver), 10);
/// assert_eq!(m.opposite_of(20), Some(10));
/// assert!(!m.is_accepted_by(RideRole::Passenger));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RideMatch {
    /// Unique match identifier (assigned by the matcher)
    pub id: u64,

    /// Ride offered by the driver
    pub driver_ride: u64,

    /// Ride requested by the passenger
    pub passenger_ride: u64,

    /// Driver side bound this match
    pub driver_accepted: bool,

    /// Passenger side bound this match
    pub passenger_accepted: bool,
}

impl RideMatch {
    /// Create an unaccepted match
    pub fn new(id: MatchId, driver_ride: RideId, passenger_ride: RideId) -> Self {
        Self {
            id,
            driver_ride,
            passenger_ride,
            driver_accepted: false,
            passenger_accepted: false,
        }
    }

    /// Pair two rides, whatever their order. Returns `None` if the roles
    /// are not complementary.
    pub fn between(id: MatchId, left: &Ride, right: &Ride) -> Option<Self> {
        match (left.role(), right.role()) {
            (RideRole::Driver, RideRole::Passenger) => Some(Self::new(id, left.id(), right.id())),
            (RideRole::Passenger, RideRole::Driver) => Some(Self::new(id, right.id(), left.id())),
            _ => None,
        }
    }

    /// Ride filling the given role
    pub fn ride_of(&self, role: RideRole) -> RideId {
        match role {
            RideRole::Driver => self.driver_ride,
            RideRole::Passenger => self.passenger_ride,
        }
    }

    /// Role played by `ride` in this match, if it is part of it
    pub fn role_of(&self, ride: RideId) -> Option<RideRole> {
        if ride == self.driver_ride {
            Some(RideRole::Driver)
        } else if ride == self.passenger_ride {
            Some(RideRole::Passenger)
        } else {
            None
        }
    }

    /// The other ride in this match
    pub fn opposite_of(&self, ride: RideId) -> Option<RideId> {
        self.role_of(ride).map(|role| self.ride_of(role.opposite()))
    }

    pub fn involves(&self, ride: RideId) -> bool {
        self.role_of(ride).is_some()
    }

    pub fn is_accepted_by(&self, role: RideRole) -> bool {
        match role {
            RideRole::Driver => self.driver_accepted,
            RideRole::Passenger => self.passenger_accepted,
        }
    }

    /// Both sides bound the match
    pub fn is_fully_accepted(&self) -> bool {
        self.driver_accepted && self.passenger_accepted
    }

    pub(crate) fn accept(&mut self, role: RideRole) {
        match role {
            RideRole::Driver => self.driver_accepted = true,
            RideRole::Passenger => self.passenger_accepted = true,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
