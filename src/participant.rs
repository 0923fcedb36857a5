//! The participant collaborator owning each ride.
//!
//! The matcher only ever asks an owner for its average stars in a role and
//! its ranking preference, and reports one rating per concluded ride to the
//! opposite party. Anything else about users (registration, keys,
//! persistence) lives outside this crate.
//!
//! [`User`] is a plain in-memory implementation, enough for tests, benches
//! and the demo binary.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::{PreferredMatch, RideRole, UserStars};

/// Owner of a ride, as seen by the matcher.
pub trait Participant: fmt::Debug + Send + Sync {
    /// Average stars received in `role`; 0 when there are none yet
    fn average(&self, role: RideRole) -> f64;

    /// Ordering applied to this participant's candidate matches
    fn preference(&self) -> PreferredMatch;

    /// Record a rating received in `role`
    fn add_rating(&self, role: RideRole, stars: UserStars);
}

/// Shared handle to a ride owner
pub type Owner = Arc<dyn Participant>;

/// Per-role star history
#[derive(Debug, Default)]
struct Reputation {
    driver: Vec<UserStars>,
    passenger: Vec<UserStars>,
}

impl Reputation {
    fn stars(&self, role: RideRole) -> &[UserStars] {
        match role {
            RideRole::Driver => &self.driver,
            RideRole::Passenger => &self.passenger,
        }
    }

    fn stars_mut(&mut self, role: RideRole) -> &mut Vec<UserStars> {
        match role {
            RideRole::Driver => &mut self.driver,
            RideRole::Passenger => &mut self.passenger,
        }
    }
}

/// In-memory participant with a nick, a display name, a preference and
/// per-role star history.
///
/// ```
/// use ride_matcher::participant::{Participant, User};
/// use ride_matcher::types::{RideRole, UserStars};
///
/// let user = User::new("ana", "Ana");
/// user.add_rating(RideRole::Driver, UserStars::FiveStars);
/// user.add_rating(RideRole::Driver, UserStars::ThreeStars);
/// assert_eq!(user.average(RideRole::Driver), 4.0);
/// assert_eq!(user.average(RideRole::Passenger), 0.0);
/// ```
#[derive(Debug)]
pub struct User {
    nick: String,
    name: String,
    preference: RwLock<PreferredMatch>,
    reputation: RwLock<Reputation>,
}

impl User {
    pub fn new(nick: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            name: name.into(),
            preference: RwLock::new(PreferredMatch::default()),
            reputation: RwLock::new(Reputation::default()),
        }
    }

    /// Convenience constructor returning a shared handle
    pub fn shared(nick: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(nick, name))
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the ranking preference
    pub fn set_preference(&self, preference: PreferredMatch) {
        *self.preference.write() = preference;
    }

    /// Number of ratings received in `role`
    pub fn rating_count(&self, role: RideRole) -> usize {
        self.reputation.read().stars(role).len()
    }
}

impl Participant for User {
    fn average(&self, role: RideRole) -> f64 {
        let reputation = self.reputation.read();
        let stars = reputation.stars(role);
        if stars.is_empty() {
            return 0.0;
        }
        let total: u32 = stars.iter().map(|s| u32::from(s.stars())).sum();
        f64::from(total) / stars.len() as f64
    }

    fn preference(&self) -> PreferredMatch {
        *self.preference.read()
    }

    fn add_rating(&self, role: RideRole, stars: UserStars) {
        self.reputation.write().stars_mut(role).push(stars);
    }
}
