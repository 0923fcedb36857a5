//! The ride matcher: ride registry, candidate generation and match
//! lifecycle.
//!
//! ## Storage
//!
//! Rides and pending matches live in slabs, with id to key maps beside
//! them. Unmatched rides are also present in a point quadtree keyed by
//! their current position:
//!
//! - **Slab<Ride>** + `HashMap<RideId, usize>`: every ride ever registered
//! - **Slab<RideMatch>** + `HashMap<MatchId, usize>`: proposed or accepted
//!   pairings not yet concluded
//! - **PointQuadtree<RidePoint>**: positions of rides still looking for a
//!   match
//!
//! ## Lifecycle
//!
//! ```text
//! add_ride ──► update_ride* ──► accept_match ──► conclude_ride
//!  (indexed)   (re-indexed,      (bound, leaves    (pairing removed,
//!               proposals)        the index)        rating reported)
//! ```

use std::collections::HashMap;

use log::{debug, trace};
use sha2::{Digest, Sha256};
use slab::Slab;

use crate::config::MatcherConfig;
use crate::engine::sorter::RideSorter;
use crate::error::{MatchError, QuadError, Result};
use crate::participant::Owner;
use crate::quad::{HasPoint, PointQuadtree};
use crate::types::{Location, MatchId, Ride, RideId, RideMatch, RideRole, UserStars};

/// Quadtree entry of an unmatched ride
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RidePoint {
    ride: RideId,
    x: f64,
    y: f64,
}

impl RidePoint {
    fn of(ride: &Ride) -> Self {
        let at = ride.current();
        Self {
            ride: ride.id(),
            x: at.x,
            y: at.y,
        }
    }
}

impl HasPoint for RidePoint {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

/// Can `left` and `right` be paired?
///
/// They must have opposite roles, both be unbound, and be within `radius`
/// of each other both where they are now and where they are going.
pub fn matchable(left: &Ride, right: &Ride, radius: f64) -> bool {
    left.role() != right.role()
        && !left.is_matched()
        && !right.is_matched()
        && left.current().is_within(&right.current(), radius)
        && left.to().is_within(&right.to(), radius)
}

/// Ride registry and matching engine.
///
/// ## Example
///
/// ```
/// use ride_matcher::config::MatcherConfig;
/// use ride_matcher::engine::Matcher;
/// use ride_matcher::participant::User;
/// use ride_matcher::types::{cost, Location};
///
/// let mut matcher = Matcher::new(MatcherConfig::default()).unwrap();
///
/// let driver = matcher.add_ride(
///     User::shared("dan", "Dan"),
///     Location::new(0.0, 0.0),
///     Location::new(50.0, 50.0),
///     Some("AA-11-BB".to_string()),
///     cost::to_fixed("12.5").unwrap(),
/// ).unwrap();
///
/// let passenger = matcher.add_ride(
///     User::shared("pat", "Pat"),
///     Location::new(3.0, 4.0),
///     Location::new(52.0, 50.0),
///     None,
///     0,
/// ).unwrap();
///
/// let proposals = matcher.update_ride(passenger, Location::new(2.0, 2.0)).unwrap();
/// assert_eq!(proposals.len(), 1);
/// assert_eq!(proposals[0].driver_ride, driver);
/// ```
#[derive(Debug)]
pub struct Matcher {
    config: MatcherConfig,

    /// Every registered ride
    rides: Slab<Ride>,

    /// Ride id to slab key
    ride_index: HashMap<RideId, usize>,

    /// Proposed and accepted matches not yet concluded
    matches: Slab<RideMatch>,

    /// Match id to slab key
    match_index: HashMap<MatchId, usize>,

    /// Current positions of unmatched rides
    index: PointQuadtree<RidePoint>,

    next_ride_id: RideId,
    next_match_id: MatchId,
}

impl Matcher {
    /// Create an empty matcher
    ///
    /// # Errors
    ///
    /// [`MatchError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: MatcherConfig) -> Result<Self> {
        Self::with_capacity(config, 0)
    }

    /// Create an empty matcher with room for `ride_capacity` rides
    pub fn with_capacity(config: MatcherConfig, ride_capacity: usize) -> Result<Self> {
        config.validate().map_err(MatchError::InvalidConfig)?;

        let index = PointQuadtree::with_capacity(
            config.top_left,
            config.bottom_right,
            config.bucket_capacity,
            config.max_depth,
        )?;

        Ok(Self {
            config,
            rides: Slab::with_capacity(ride_capacity),
            ride_index: HashMap::with_capacity(ride_capacity),
            matches: Slab::new(),
            match_index: HashMap::new(),
            index,
            next_ride_id: 1,
            next_match_id: 1,
        })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Look up a ride by id, matched or not
    pub fn ride(&self, ride_id: RideId) -> Option<&Ride> {
        self.ride_index.get(&ride_id).map(|&key| &self.rides[key])
    }

    /// Look up a pending (not yet concluded) match
    pub fn ride_match(&self, match_id: MatchId) -> Option<&RideMatch> {
        self.match_index.get(&match_id).map(|&key| &self.matches[key])
    }

    /// Number of registered rides
    #[inline]
    pub fn ride_count(&self) -> usize {
        self.rides.len()
    }

    /// Number of matches not yet concluded
    #[inline]
    pub fn pending_match_count(&self) -> usize {
        self.matches.len()
    }

    /// Number of rides currently in the spatial index
    #[inline]
    pub fn indexed_ride_count(&self) -> usize {
        self.index.len()
    }

    /// True if the ride is in the spatial index at its current position
    pub fn is_indexed(&self, ride_id: RideId) -> bool {
        self.ride(ride_id)
            .map(|ride| self.index.find_near(ride.current().x, ride.current().y, 0.0))
            .map_or(false, |points| points.iter().any(|p| p.ride == ride_id))
    }

    /// Average stars of the ride's owner in the ride's role
    pub fn average(&self, ride_id: RideId) -> Result<f64> {
        Ok(self.ride(ride_id).ok_or(MatchError::UnknownRide(ride_id))?.owner_average())
    }

    /// The ride on the `role` side of a pending match
    pub fn match_ride(&self, match_id: MatchId, role: RideRole) -> Result<&Ride> {
        let ride_id = self.matches[self.match_key(match_id)?].ride_of(role);
        self.ride(ride_id).ok_or(MatchError::UnknownRide(ride_id))
    }

    /// Fare of a pending match, set by its driver ride
    pub fn match_cost(&self, match_id: MatchId) -> Result<u64> {
        Ok(self.match_ride(match_id, RideRole::Driver)?.cost())
    }

    /// Car plate of a pending match
    pub fn match_plate(&self, match_id: MatchId) -> Result<Option<&str>> {
        Ok(self.match_ride(match_id, RideRole::Driver)?.plate())
    }

    /// Current position of the `role` side of a pending match
    pub fn match_where(&self, match_id: MatchId, role: RideRole) -> Result<Location> {
        Ok(self.match_ride(match_id, role)?.current())
    }

    /// Average stars of the `role` side's owner, in that role
    pub fn match_stars(&self, match_id: MatchId, role: RideRole) -> Result<f64> {
        Ok(self.match_ride(match_id, role)?.owner_average())
    }

    fn ride_key(&self, ride_id: RideId) -> Result<usize> {
        self.ride_index
            .get(&ride_id)
            .copied()
            .ok_or(MatchError::UnknownRide(ride_id))
    }

    fn match_key(&self, match_id: MatchId) -> Result<usize> {
        self.match_index
            .get(&match_id)
            .copied()
            .ok_or(MatchError::UnknownMatch(match_id))
    }

    // ========================================================================
    // Registration and movement
    // ========================================================================

    /// Register a ride positioned at `from`
    ///
    /// # Arguments
    ///
    /// * `owner` - Participant offering or requesting the ride
    /// * `from` - Origin, also the initial position
    /// * `to` - Destination
    /// * `plate` - Car plate for a driver ride, `None` for a passenger ride
    /// * `cost` - Fixed-point cost (scaled by 10^8)
    ///
    /// # Errors
    ///
    /// [`QuadError::PointOutOfBounds`] (wrapped) if `from` is outside the
    /// universe. Nothing is recorded in that case.
    pub fn add_ride(
        &mut self,
        owner: Owner,
        from: Location,
        to: Location,
        plate: Option<String>,
        cost: u64,
    ) -> Result<RideId> {
        let ride_id = self.next_ride_id;
        let ride = Ride::new(ride_id, owner, from, to, plate, cost);

        self.index.insert(RidePoint::of(&ride))?;
        self.next_ride_id += 1;

        debug!(
            "registered {:?} ride {} at ({}, {}) heading to ({}, {})",
            ride.role(),
            ride_id,
            from.x,
            from.y,
            to.x,
            to.y
        );

        let key = self.rides.insert(ride);
        self.ride_index.insert(ride_id, key);

        Ok(ride_id)
    }

    /// Move an unmatched ride and propose matches with the rides around it.
    ///
    /// Returns the new proposals ordered by the owner's preference. Unknown
    /// rides and rides already bound to a match yield an empty list.
    ///
    /// # Errors
    ///
    /// [`QuadError::PointOutOfBounds`] (wrapped) if `location` is outside the
    /// universe. The ride keeps its previous position in that case.
    pub fn update_ride(&mut self, ride_id: RideId, location: Location) -> Result<Vec<RideMatch>> {
        let Some(&key) = self.ride_index.get(&ride_id) else {
            debug!("ignoring update of unknown ride {}", ride_id);
            return Ok(Vec::new());
        };

        if let Some(match_id) = self.rides[key].match_id() {
            debug!("ignoring update of ride {} bound to match {}", ride_id, match_id);
            return Ok(Vec::new());
        }

        if !self.index.contains(location.x, location.y) {
            return Err(QuadError::PointOutOfBounds {
                x: location.x,
                y: location.y,
            }
            .into());
        }

        self.index.delete(&RidePoint::of(&self.rides[key]));
        self.rides[key].set_current(location);
        self.index.insert(RidePoint::of(&self.rides[key]))?;

        let candidates = self.candidates(key);
        trace!("ride {} has {} matchable neighbours", ride_id, candidates.len());

        let mut proposals = Vec::with_capacity(candidates.len());
        for other in candidates {
            if let Some(proposal) = self.propose(ride_id, other) {
                proposals.push(proposal);
            }
        }

        Ok(self.rank(key, proposals))
    }

    /// Matchable rides around the ride at `key`, in id order
    fn candidates(&self, key: usize) -> Vec<RideId> {
        let ride = &self.rides[key];
        let at = ride.current();
        let radius = self.config.radius;

        let mut neighbours: Vec<RideId> = self
            .index
            .find_near(at.x, at.y, radius)
            .into_iter()
            .map(|point| point.ride)
            .filter(|&other| other != ride.id())
            .collect();
        neighbours.sort_unstable();

        neighbours
            .into_iter()
            .filter(|&other| {
                self.ride(other)
                    .map_or(false, |other| matchable(ride, other, radius))
            })
            .collect()
    }

    /// Record a fresh pairing between two rides
    fn propose(&mut self, ride_id: RideId, other: RideId) -> Option<RideMatch> {
        let proposal = RideMatch::between(self.next_match_id, self.ride(ride_id)?, self.ride(other)?)?;
        self.next_match_id += 1;

        let key = self.matches.insert(proposal.clone());
        self.match_index.insert(proposal.id, key);

        Some(proposal)
    }

    /// Order proposals with the preference of the ride at `key`
    fn rank(&self, key: usize, proposals: Vec<RideMatch>) -> Vec<RideMatch> {
        let ride = &self.rides[key];
        let sorter = RideSorter::for_ride(ride);

        let mut ranked: Vec<(&Ride, RideMatch)> = proposals
            .into_iter()
            .filter_map(|proposal| {
                let other = self.ride(proposal.opposite_of(ride.id())?)?;
                Some((other, proposal))
            })
            .collect();
        ranked.sort_by(|(left, _), (right, _)| sorter.compare(left, right));

        ranked.into_iter().map(|(_, proposal)| proposal).collect()
    }

    // ========================================================================
    // Match lifecycle
    // ========================================================================

    /// Bind `match_id` to the ride and take the ride out of the spatial
    /// index. Each side accepts on its own; accepting the same match again
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// - [`MatchError::UnknownRide`] / [`MatchError::UnknownMatch`]
    /// - [`MatchError::RideNotInMatch`] if the ride is not a side of the match
    /// - [`MatchError::AlreadyMatched`] if the ride, or the opposite ride of
    ///   the match, is bound to another match
    pub fn accept_match(&mut self, ride_id: RideId, match_id: MatchId) -> Result<()> {
        let key = self.ride_key(ride_id)?;
        let match_key = self.match_key(match_id)?;

        let role = self.matches[match_key]
            .role_of(ride_id)
            .ok_or(MatchError::RideNotInMatch {
                ride: ride_id,
                match_id,
            })?;

        match self.rides[key].match_id() {
            Some(bound) if bound == match_id => return Ok(()),
            Some(bound) => {
                return Err(MatchError::AlreadyMatched {
                    ride: ride_id,
                    match_id: bound,
                })
            }
            None => {}
        }

        // the other side may have committed to a different match meanwhile
        let opposite = self.matches[match_key].ride_of(role.opposite());
        if let Some(bound) = self
            .ride(opposite)
            .and_then(Ride::match_id)
            .filter(|&bound| bound != match_id)
        {
            return Err(MatchError::AlreadyMatched {
                ride: opposite,
                match_id: bound,
            });
        }

        self.index.delete(&RidePoint::of(&self.rides[key]));
        self.rides[key].bind_match(match_id);
        self.matches[match_key].accept(role);

        debug!("{:?} ride {} accepted match {}", role, ride_id, match_id);
        Ok(())
    }

    /// Finish the ride's match: report `stars` to the owner of the opposite
    /// ride (in that ride's role) and drop the pairing.
    ///
    /// # Errors
    ///
    /// - [`MatchError::UnknownRide`] if the ride does not exist
    /// - [`MatchError::RideNotMatched`] if it never accepted a match
    /// - [`MatchError::UnknownMatch`] if the match was already concluded
    pub fn conclude_ride(&mut self, ride_id: RideId, stars: UserStars) -> Result<()> {
        let key = self.ride_key(ride_id)?;
        let match_id = self.rides[key]
            .match_id()
            .ok_or(MatchError::RideNotMatched(ride_id))?;
        let match_key = self.match_key(match_id)?;

        let opposite_id = self.matches[match_key]
            .opposite_of(ride_id)
            .ok_or(MatchError::RideNotInMatch {
                ride: ride_id,
                match_id,
            })?;
        let opposite = self
            .ride(opposite_id)
            .ok_or(MatchError::UnknownRide(opposite_id))?;

        opposite.owner().add_rating(opposite.role(), stars);

        self.match_index.remove(&match_id);
        self.matches.remove(match_key);

        debug!(
            "ride {} concluded match {} rating ride {} with {} stars",
            ride_id,
            match_id,
            opposite_id,
            stars.stars()
        );
        Ok(())
    }

    // ========================================================================
    // State root
    // ========================================================================

    /// SHA-256 digest of the matcher state.
    ///
    /// Covers the SSZ encoding of every pending match in id order, then for
    /// every ride in id order its id, role, bound match id (0 when unbound)
    /// and cost, little-endian. Matchers fed the same operations produce the
    /// same root.
    pub fn compute_state_root(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();

        let mut matches: Vec<(MatchId, usize)> =
            self.match_index.iter().map(|(&id, &key)| (id, key)).collect();
        matches.sort_unstable();

        for (_, key) in matches {
            let bytes = ssz_rs::serialize(&self.matches[key])
                .map_err(|e| MatchError::Encoding(format!("{:?}", e)))?;
            hasher.update(&bytes);
        }

        let mut rides: Vec<(RideId, usize)> =
            self.ride_index.iter().map(|(&id, &key)| (id, key)).collect();
        rides.sort_unstable();

        for (_, key) in rides {
            let ride = &self.rides[key];
            hasher.update(ride.id().to_le_bytes());
            hasher.update([ride.role().to_u8()]);
            hasher.update(ride.match_id().unwrap_or(0).to_le_bytes());
            hasher.update(ride.cost().to_le_bytes());
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    /// The state root as a hex string
    pub fn state_root_hex(&self) -> Result<String> {
        Ok(hex::encode(self.compute_state_root()?))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
