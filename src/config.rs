//! Matcher configuration.
//!
//! All tunables are read once when a [`Matcher`](crate::engine::Matcher) is
//! built and stay fixed for its lifetime.

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::quad::Rect;
use crate::types::Location;

/// Deepest bucket level accepted; f64 coordinates cannot separate points
/// beyond it
pub const MAX_DEPTH_LIMIT: usize = 64;

/// Tunables of the spatial index and the matching rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherConfig {
    /// Maximum distance between two rides' positions, and between their
    /// destinations, for them to be matched
    #[serde(default = "MatcherConfig::default_radius")]
    pub radius: f64,

    /// Points a quadtree bucket holds before splitting
    #[serde(default = "MatcherConfig::default_bucket_capacity")]
    pub bucket_capacity: usize,

    /// Depth at which quadtree buckets stop splitting
    #[serde(default = "MatcherConfig::default_max_depth")]
    pub max_depth: usize,

    /// North-west corner of the universe
    #[serde(default = "MatcherConfig::default_top_left")]
    pub top_left: Location,

    /// South-east corner of the universe
    #[serde(default = "MatcherConfig::default_bottom_right")]
    pub bottom_right: Location,
}

impl MatcherConfig {
    const fn default_radius() -> f64 {
        10.0
    }

    const fn default_bucket_capacity() -> usize {
        10
    }

    const fn default_max_depth() -> usize {
        24
    }

    const fn default_top_left() -> Location {
        Location::new(-1000.0, 1000.0)
    }

    const fn default_bottom_right() -> Location {
        Location::new(1000.0, -1000.0)
    }

    pub fn with_bounds(mut self, top_left: Location, bottom_right: Location) -> Self {
        self.top_left = top_left;
        self.bottom_right = bottom_right;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_bucket_capacity(mut self, capacity: usize) -> Self {
        self.bucket_capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(format!(
                "Radius must be a finite non-negative number, got {}",
                self.radius
            ));
        }

        if self.bucket_capacity == 0 {
            return Err("Bucket capacity must be greater than zero".to_string());
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(format!(
                "Max depth must be at most {}, got {}",
                MAX_DEPTH_LIMIT, self.max_depth
            ));
        }

        Rect::new(
            self.top_left.x,
            self.top_left.y,
            self.bottom_right.x,
            self.bottom_right.y,
        )
        .map_err(|e| e.to_string())?;

        Ok(())
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: MatcherConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            radius: Self::default_radius(),
            bucket_capacity: Self::default_bucket_capacity(),
            max_depth: Self::default_max_depth(),
            top_left: Self::default_top_left(),
            bottom_right: Self::default_bottom_right(),
        }
    }
}
