//! Error types for the quadtree and the matcher.

use thiserror::Error;

use crate::types::{MatchId, RideId};

/// Errors raised by [`PointQuadtree`](crate::quad::PointQuadtree).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadError {
    /// A point lies outside the rectangle covered by the tree
    #[error("point ({x}, {y}) is outside the quadtree boundaries")]
    PointOutOfBounds { x: f64, y: f64 },

    /// The corners do not describe a non-empty rectangle
    #[error("invalid quadtree bounds: top-left ({top_left_x}, {top_left_y}), bottom-right ({bottom_right_x}, {bottom_right_y})")]
    InvalidBounds {
        top_left_x: f64,
        top_left_y: f64,
        bottom_right_x: f64,
        bottom_right_y: f64,
    },

    /// Buckets must hold at least one point
    #[error("bucket capacity must be greater than zero")]
    ZeroCapacity,
}

/// Errors raised by the [`Matcher`](crate::engine::Matcher).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error(transparent)]
    Quad(#[from] QuadError),

    #[error("unknown ride {0}")]
    UnknownRide(RideId),

    #[error("unknown ride match {0}")]
    UnknownMatch(MatchId),

    #[error("ride {0} has no accepted match")]
    RideNotMatched(RideId),

    #[error("ride {ride} is not part of match {match_id}")]
    RideNotInMatch { ride: RideId, match_id: MatchId },

    #[error("ride {ride} is already bound to match {match_id}")]
    AlreadyMatched { ride: RideId, match_id: MatchId },

    #[error("invalid matcher configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to encode matcher state: {0}")]
    Encoding(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
