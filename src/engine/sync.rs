//! Thread-safe handle to a [`Matcher`].
//!
//! `SyncMatcher` wraps the matcher in `Arc<RwLock<Matcher>>`. Every call
//! takes the lock for the whole operation, so concurrent callers observe
//! operations one at a time. Queries share a read lock; registration,
//! updates and lifecycle calls take the write lock.
//!
//! ```
//! use ride_matcher::config::MatcherConfig;
//! use ride_matcher::engine::SyncMatcher;
//! use ride_matcher::participant::User;
//! use ride_matcher::types::Location;
//! use std::thread;
//!
//! let matcher = SyncMatcher::new(MatcherConfig::default()).unwrap();
//! let handle = matcher.clone();
//!
//! let worker = thread::spawn(move || {
//!     handle
//!         .add_ride(User::shared("a", "A"), Location::new(1.0, 1.0), Location::default(), None, 0)
//!         .unwrap()
//! });
//!
//! let id = worker.join().unwrap();
//! assert!(matcher.ride(id).is_some());
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::MatcherConfig;
use crate::engine::Matcher;
use crate::error::Result;
use crate::participant::Owner;
use crate::types::{Location, MatchId, Ride, RideId, RideMatch, RideRole, UserStars};

/// Cloneable, thread-safe matcher handle
#[derive(Debug, Clone)]
pub struct SyncMatcher {
    inner: Arc<RwLock<Matcher>>,
}

impl SyncMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self> {
        Ok(Self::from_matcher(Matcher::new(config)?))
    }

    pub fn from_matcher(matcher: Matcher) -> Self {
        Self {
            inner: Arc::new(RwLock::new(matcher)),
        }
    }

    // ===== Registration and movement =====

    /// See [`Matcher::add_ride`]
    pub fn add_ride(
        &self,
        owner: Owner,
        from: Location,
        to: Location,
        plate: Option<String>,
        cost: u64,
    ) -> Result<RideId> {
        self.inner.write().add_ride(owner, from, to, plate, cost)
    }

    /// See [`Matcher::update_ride`]
    pub fn update_ride(&self, ride_id: RideId, location: Location) -> Result<Vec<RideMatch>> {
        self.inner.write().update_ride(ride_id, location)
    }

    // ===== Lifecycle =====

    pub fn accept_match(&self, ride_id: RideId, match_id: MatchId) -> Result<()> {
        self.inner.write().accept_match(ride_id, match_id)
    }

    pub fn conclude_ride(&self, ride_id: RideId, stars: UserStars) -> Result<()> {
        self.inner.write().conclude_ride(ride_id, stars)
    }

    // ===== Queries =====

    /// Snapshot of a ride
    pub fn ride(&self, ride_id: RideId) -> Option<Ride> {
        self.inner.read().ride(ride_id).cloned()
    }

    /// Snapshot of a pending match
    pub fn ride_match(&self, match_id: MatchId) -> Option<RideMatch> {
        self.inner.read().ride_match(match_id).cloned()
    }

    pub fn ride_count(&self) -> usize {
        self.inner.read().ride_count()
    }

    pub fn pending_match_count(&self) -> usize {
        self.inner.read().pending_match_count()
    }

    pub fn indexed_ride_count(&self) -> usize {
        self.inner.read().indexed_ride_count()
    }

    pub fn average(&self, ride_id: RideId) -> Result<f64> {
        self.inner.read().average(ride_id)
    }

    pub fn match_cost(&self, match_id: MatchId) -> Result<u64> {
        self.inner.read().match_cost(match_id)
    }

    pub fn match_plate(&self, match_id: MatchId) -> Result<Option<String>> {
        Ok(self.inner.read().match_plate(match_id)?.map(str::to_owned))
    }

    pub fn match_where(&self, match_id: MatchId, role: RideRole) -> Result<Location> {
        self.inner.read().match_where(match_id, role)
    }

    pub fn match_stars(&self, match_id: MatchId, role: RideRole) -> Result<f64> {
        self.inner.read().match_stars(match_id, role)
    }

    pub fn compute_state_root(&self) -> Result<[u8; 32]> {
        self.inner.read().compute_state_root()
    }

    pub fn state_root_hex(&self) -> Result<String> {
        self.inner.read().state_root_hex()
    }

    /// Run `f` against the matcher under the read lock
    pub fn with_matcher<R>(&self, f: impl FnOnce(&Matcher) -> R) -> R {
        f(&self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::User;
    use std::thread;

    #[test]
    fn test_sync_lifecycle() {
        let matcher = SyncMatcher::new(MatcherConfig::default()).unwrap();
        let here = Location::new(5.0, 5.0);

        let d = matcher
            .add_ride(User::shared("d", "D"), here, here, Some("ZZ".into()), 0)
            .unwrap();
        let p = matcher.add_ride(User::shared("p", "P"), here, here, None, 0).unwrap();

        let proposal = matcher.update_ride(p, here).unwrap().remove(0);
        matcher.accept_match(p, proposal.id).unwrap();
        matcher.accept_match(d, proposal.id).unwrap();

        assert!(matcher.ride_match(proposal.id).unwrap().is_fully_accepted());
        assert_eq!(matcher.match_plate(proposal.id).unwrap().as_deref(), Some("ZZ"));
        assert_eq!(matcher.match_where(proposal.id, RideRole::Passenger).unwrap(), here);
        assert_eq!(matcher.indexed_ride_count(), 0);

        matcher.conclude_ride(d, UserStars::ThreeStars).unwrap();
        assert_eq!(matcher.average(p).unwrap(), 3.0);
        assert_eq!(matcher.pending_match_count(), 0);
    }

    #[test]
    fn test_concurrent_registration() {
        let matcher = SyncMatcher::new(MatcherConfig::default()).unwrap();

        let workers: Vec<_> = (0..4)
            .map(|t| {
                let handle = matcher.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let at = Location::new(t as f64 * 100.0, i as f64);
                        handle
                            .add_ride(User::shared("u", "U"), at, at, None, 0)
                            .unwrap();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(matcher.ride_count(), 400);
        assert_eq!(matcher.with_matcher(|m| m.indexed_ride_count()), 400);
        for id in 1..=400 {
            assert!(matcher.ride(id).is_some());
        }
    }
}
