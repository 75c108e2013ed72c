//! Validated volumetric ethanol fractions.

use crate::error::{BlendError, BlendResult};
use serde::Serialize;
use std::fmt;

/// Volumetric ethanol content of a fuel, in [0, 1].
///
/// 0 = pure gasoline, 1 = pure ethanol. Percent-denominated input (0-100)
/// goes through [`EthanolFraction::from_percent`], which rejects
/// out-of-range values instead of clamping them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct EthanolFraction(f64);

impl EthanolFraction {
    /// Pure gasoline (E0).
    pub const GASOLINE: Self = Self(0.0);
    /// Pure ethanol (E100).
    pub const PURE_ETHANOL: Self = Self(1.0);

    /// Create a fraction, validating finiteness and [0, 1] range.
    pub fn new(fraction: f64) -> BlendResult<Self> {
        if !fraction.is_finite() {
            return Err(BlendError::NonFinite {
                what: "ethanol fraction",
            });
        }
        if !(0.0..=1.0).contains(&fraction) {
            return Err(BlendError::FractionOutOfRange { value: fraction });
        }
        Ok(Self(fraction))
    }

    /// Create a fraction from a percentage (0-100). Rejects out-of-range.
    pub fn from_percent(percent: f64) -> BlendResult<Self> {
        if !percent.is_finite() {
            return Err(BlendError::NonFinite {
                what: "ethanol percentage",
            });
        }
        if !(0.0..=100.0).contains(&percent) {
            return Err(BlendError::PercentOutOfRange { value: percent });
        }
        Ok(Self(percent / 100.0))
    }

    /// Construct from a value already known to be in range.
    ///
    /// Only for fractions *computed* by conservation arithmetic, where
    /// floating point may land a hair outside [0, 1].
    pub(crate) fn new_unchecked(fraction: f64) -> Self {
        debug_assert!(fraction.is_finite());
        Self(fraction)
    }

    /// The fraction as a plain number in [0, 1].
    pub const fn value(self) -> f64 {
        self.0
    }

    /// The fraction as a percentage (0-100).
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl fmt::Display for EthanolFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:.0}", self.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_conversion() {
        let frac = EthanolFraction::from_percent(27.0).unwrap();
        assert!((frac.value() - 0.27).abs() < 1e-12);
        assert!((frac.as_percent() - 27.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_out_of_range_percent() {
        assert!(matches!(
            EthanolFraction::from_percent(100.5),
            Err(BlendError::PercentOutOfRange { .. })
        ));
        assert!(matches!(
            EthanolFraction::from_percent(-0.1),
            Err(BlendError::PercentOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(EthanolFraction::new(f64::NAN).is_err());
        assert!(EthanolFraction::from_percent(f64::INFINITY).is_err());
    }

    #[test]
    fn boundaries_are_valid() {
        assert_eq!(EthanolFraction::new(0.0).unwrap(), EthanolFraction::GASOLINE);
        assert_eq!(
            EthanolFraction::new(1.0).unwrap(),
            EthanolFraction::PURE_ETHANOL
        );
        assert!(EthanolFraction::from_percent(0.0).is_ok());
        assert!(EthanolFraction::from_percent(100.0).is_ok());
    }

    #[test]
    fn display_as_e_notation() {
        let frac = EthanolFraction::from_percent(85.0).unwrap();
        assert_eq!(frac.to_string(), "E85");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn percent_round_trips(percent in 0.0_f64..=100.0_f64) {
            let frac = EthanolFraction::from_percent(percent).unwrap();
            prop_assert!((frac.as_percent() - percent).abs() < 1e-9);
            prop_assert!((0.0..=1.0).contains(&frac.value()));
        }

        #[test]
        fn out_of_range_always_rejected(percent in 100.0_f64..1e6_f64) {
            if percent > 100.0 {
                prop_assert!(EthanolFraction::from_percent(percent).is_err());
            }
        }
    }
}
