//! Fixed-point ride cost utilities.
//!
//! Ride costs are stored as `u64` scaled by 10^8 so that ranking by cost is
//! an exact integer comparison and the matcher state root does not depend on
//! floating-point formatting.
//!
//! ```
//! use ride_matcher::types::cost::{to_fixed, from_fixed_trimmed};
//!
//! let cost = to_fixed("12.5").unwrap();
//! assert_eq!(cost, 1_250_000_000);
//! assert_eq!(from_fixed_trimmed(cost), "12.5");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point costs: 10^8
pub const SCALE: u64 = 100_000_000;

/// Convert a decimal string to a fixed-point cost
///
/// Returns `None` for unparsable, negative or out-of-range input.
///
/// ```
/// use ride_matcher::types::cost::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-3"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a `Decimal` to a fixed-point cost, rounding to 8 places
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert an `f64` cost (as typed by a caller) to fixed-point
///
/// Non-finite and negative values are rejected.
pub fn f64_to_fixed(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    decimal_to_fixed(Decimal::from_f64(value)?)
}

/// Convert a fixed-point cost back to a `Decimal`
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render a fixed-point cost with 8 decimal places
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Render a fixed-point cost without trailing zeros
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================
