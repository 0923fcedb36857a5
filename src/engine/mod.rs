//! Matching engine for rides.
//!
//! ## Matching Rules
//!
//! Two rides are matchable when:
//!
//! 1. One is offered by a driver and the other requested by a passenger
//! 2. Neither is bound to a match yet
//! 3. Their current positions are within the configured radius
//! 4. Their destinations are within that same radius
//!
//! Each position update of an unmatched ride proposes a match with every
//! matchable ride around it. Proposals are ordered by the updating owner's
//! [`PreferredMatch`](crate::types::PreferredMatch); equal keys keep ride-id
//! order.
//!
//! ## Components
//!
//! - [`Matcher`]: ride registry, spatial index and match lifecycle
//! - [`RideSorter`]: preference-driven comparator
//! - [`SyncMatcher`]: thread-safe handle
//!
//! ## Example
//!
//! ```
//! use ride_matcher::config::MatcherConfig;
//! use ride_matcher::engine::Matcher;
//! use ride_matcher::participant::User;
//! use ride_matcher::types::{Location, UserStars};
//!
//! let mut matcher = Matcher::new(MatcherConfig::default()).unwrap();
//! let home = Location::new(0.0, 0.0);
//! let work = Location::new(400.0, 300.0);
//!
//! let driver_user = User::shared("dan", "Dan");
//! let driver = matcher
//!     .add_ride(driver_user.clone(), home, work, Some("AB-12-CD".into()), 0)
//!     .unwrap();
//! let passenger = matcher
//!     .add_ride(User::shared("pat", "Pat"), home, work, None, 0)
//!     .unwrap();
//!
//! let proposal = matcher.update_ride(passenger, home).unwrap().remove(0);
//! matcher.accept_match(passenger, proposal.id).unwrap();
//! matcher.accept_match(driver, proposal.id).unwrap();
//! matcher.conclude_ride(passenger, UserStars::FiveStars).unwrap();
//!
//! assert_eq!(matcher.average(driver).unwrap(), 5.0);
//! ```

pub mod matcher;
pub mod sorter;
pub mod sync;

pub use matcher::{matchable, Matcher};
pub use sorter::RideSorter;
pub use sync::SyncMatcher;
