//! Core data types for the ride matcher
//!
//! ## Types
//!
//! - [`Location`]: A point on the flat matching plane
//! - [`Ride`]: A driver's offer or a passenger's request to travel
//! - [`RideRole`]: Driver or Passenger
//! - [`RideMatch`]: A proposed pairing of opposite-role rides
//! - [`PreferredMatch`]: How a participant wants candidates ordered
//! - [`UserStars`]: Rating given to the other party after a ride
//!
//! ## Fixed-Point Costs
//!
//! Ride costs are stored as `u64` scaled by 10^8; see [`cost`].

mod location;
mod preference;
mod ride;
mod ride_match;
pub mod cost;

pub use location::{distance, Location};
pub use preference::{PreferredMatch, UserStars};
pub use ride::{MatchId, Ride, RideId, RideRole};
pub use ride_match::RideMatch;
