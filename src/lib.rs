//! # Ride Matcher
//!
//! Spatial ride matching for car-pooling: drivers offering rides and
//! passengers requesting them are paired when they are close to each other
//! and heading to the same place.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Core data structures (Location, Ride, RideMatch, preferences)
//! - **Quad**: Adaptive point quadtree indexing ride positions
//! - **Engine**: Ride registry, candidate generation, ranking and match lifecycle
//! - **Participant**: Interface to the owners of rides
//!
//! ## Design Principles
//!
//! 1. **Determinism**: The same operation sequence yields the same proposals and state root
//! 2. **Fixed-Point Costs**: Ride costs use fixed-point arithmetic (10^8 scaling)
//! 3. **Slab Storage**: Rides and matches live in slabs indexed by id
//! 4. **Synchronous Execution**: No async, no background work
//!
//! ## Logging
//!
//! The library logs through the `log` facade and never installs a logger.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Location, Ride, RideMatch
pub mod types;

/// Spatial index: point quadtree
pub mod quad;

/// Matching engine: registry, ranking and lifecycle
pub mod engine;

/// Ride owners as seen by the engine
pub mod participant;

/// Matcher tunables
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::MatcherConfig;
pub use engine::{Matcher, RideSorter, SyncMatcher};
pub use error::{MatchError, QuadError, Result};
pub use participant::{Owner, Participant, User};
pub use quad::{HasPoint, PointQuadtree};
pub use types::{Location, MatchId, PreferredMatch, Ride, RideId, RideMatch, RideRole, UserStars};
