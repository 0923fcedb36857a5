//! Ranking preferences and star ratings.

use serde::{Deserialize, Serialize};

/// How a participant wants candidate matches to be ordered.
///
/// The preference only affects presentation order; it never changes which
/// rides are matchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredMatch {
    /// Higher average stars of the other party first
    #[default]
    Better,
    /// Lower cost of the other party first
    Cheaper,
    /// Other party closer to the current location first
    Closer,
}

/// Classification given to the other party when a ride concludes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserStars {
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
}

impl UserStars {
    /// Number of stars, from 1 to 5
    pub fn stars(self) -> u8 {
        match self {
            UserStars::OneStar => 1,
            UserStars::TwoStars => 2,
            UserStars::ThreeStars => 3,
            UserStars::FourStars => 4,
            UserStars::FiveStars => 5,
        }
    }

    /// Convert a star count back into a classification
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(UserStars::OneStar),
            2 => Some(UserStars::TwoStars),
            3 => Some(UserStars::ThreeStars),
            4 => Some(UserStars::FourStars),
            5 => Some(UserStars::FiveStars),
            _ => None,
        }
    }
}
