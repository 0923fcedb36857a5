//! Rides: a participant's intention to travel between two locations.
//!
//! A ride with a registered car plate is offered by a driver; a ride without
//! one is requested by a passenger. The matcher pairs rides of opposite roles.

use crate::participant::Owner;
use crate::types::Location;

/// Ride identifier, assigned by the matcher starting at 1
pub type RideId = u64;

/// Match identifier, assigned by the matcher starting at 1
pub type MatchId = u64;

// ============================================================================
// RideRole enum
// ============================================================================

/// Role of the owner in a ride
///
/// Represented as u8 for deterministic encoding:
/// - Driver = 0
/// - Passenger = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RideRole {
    /// Provides the car
    Driver,
    /// Rides along
    Passenger,
}

impl RideRole {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            RideRole::Driver => 0,
            RideRole::Passenger => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RideRole::Driver),
            1 => Some(RideRole::Passenger),
            _ => None,
        }
    }

    /// Returns the complementary role
    pub fn opposite(self) -> Self {
        match self {
            RideRole::Driver => RideRole::Passenger,
            RideRole::Passenger => RideRole::Driver,
        }
    }

    /// Role implied by the presence of a car plate
    pub fn from_plate(plate: Option<&str>) -> Self {
        if plate.is_some() {
            RideRole::Driver
        } else {
            RideRole::Passenger
        }
    }
}

// ============================================================================
// Ride struct
// ============================================================================

/// A ride tracked by the matcher.
///
/// `current` starts at `from` and is moved by [`Matcher::update_ride`]
/// while the ride is unmatched. Once a match is bound the ride is frozen.
///
/// [`Matcher::update_ride`]: crate::engine::Matcher::update_ride
#[derive(Debug, Clone)]
pub struct Ride {
    id: RideId,
    owner: Owner,
    role: RideRole,
    from: Location,
    current: Location,
    to: Location,
    plate: Option<String>,
    /// Cost per unit in fixed-point (scaled by 10^8)
    cost: u64,
    match_id: Option<MatchId>,
}

impl Ride {
    /// Create an unmatched ride positioned at its origin.
    ///
    /// The role is derived from `plate`: `Some` makes a driver ride,
    /// `None` a passenger ride.
    pub fn new(
        id: RideId,
        owner: Owner,
        from: Location,
        to: Location,
        plate: Option<String>,
        cost: u64,
    ) -> Self {
        Self {
            id,
            owner,
            role: RideRole::from_plate(plate.as_deref()),
            from,
            current: from,
            to,
            plate,
            cost,
            match_id: None,
        }
    }

    #[inline]
    pub fn id(&self) -> RideId {
        self.id
    }

    #[inline]
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    #[inline]
    pub fn role(&self) -> RideRole {
        self.role
    }

    #[inline]
    pub fn from(&self) -> Location {
        self.from
    }

    #[inline]
    pub fn current(&self) -> Location {
        self.current
    }

    #[inline]
    pub fn to(&self) -> Location {
        self.to
    }

    /// Car plate (only for drivers)
    pub fn plate(&self) -> Option<&str> {
        self.plate.as_deref()
    }

    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Match bound to this ride, if any
    #[inline]
    pub fn match_id(&self) -> Option<MatchId> {
        self.match_id
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        self.match_id.is_some()
    }

    #[inline]
    pub fn is_driver(&self) -> bool {
        self.role == RideRole::Driver
    }

    #[inline]
    pub fn is_passenger(&self) -> bool {
        self.role == RideRole::Passenger
    }

    /// Average stars of the owner in this ride's role
    pub fn owner_average(&self) -> f64 {
        self.owner.average(self.role)
    }

    pub(crate) fn set_current(&mut self, current: Location) {
        self.current = current;
    }

    pub(crate) fn bind_match(&mut self, match_id: MatchId) {
        self.match_id = Some(match_id);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
