//! Mixture state: a volume of fuel and its ethanol content.

use crate::error::{BlendError, BlendResult};
use crate::fraction::EthanolFraction;
use serde::Serialize;

/// A `(volume, ethanol fraction)` pair describing tank contents or a
/// final/target result. Immutable value type; all conservation arithmetic
/// goes through [`Mixture::with_added`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mixture {
    volume_l: f64,
    ethanol_fraction: EthanolFraction,
}

impl Mixture {
    /// Create a mixture, validating the volume (finite, non-negative).
    pub fn new(volume_l: f64, ethanol_fraction: EthanolFraction) -> BlendResult<Self> {
        if !volume_l.is_finite() {
            return Err(BlendError::NonFinite { what: "volume" });
        }
        if volume_l < 0.0 {
            return Err(BlendError::Negative { what: "volume" });
        }
        Ok(Self {
            volume_l,
            ethanol_fraction,
        })
    }

    /// An empty tank at the given nominal fraction.
    pub fn empty(ethanol_fraction: EthanolFraction) -> Self {
        Self {
            volume_l: 0.0,
            ethanol_fraction,
        }
    }

    pub(crate) fn new_unchecked(volume_l: f64, ethanol_fraction: EthanolFraction) -> Self {
        debug_assert!(volume_l.is_finite() && volume_l >= 0.0);
        Self {
            volume_l,
            ethanol_fraction,
        }
    }

    pub fn volume_l(&self) -> f64 {
        self.volume_l
    }

    pub fn ethanol_fraction(&self) -> EthanolFraction {
        self.ethanol_fraction
    }

    /// Volume of ethanol contained in this mixture, in liters.
    pub fn ethanol_volume_l(&self) -> f64 {
        self.volume_l * self.ethanol_fraction.value()
    }

    /// Result of pouring `volume_l` of fuel at `fraction` into this mixture.
    ///
    /// Volume and ethanol mass are both conserved:
    /// `V' = V + x`, `E' = (V·E + x·Ea) / V'`.
    pub fn with_added(&self, volume_l: f64, fraction: EthanolFraction) -> Self {
        let new_volume = self.volume_l + volume_l;
        if new_volume <= 0.0 {
            return *self;
        }
        let ethanol = self.ethanol_volume_l() + volume_l * fraction.value();
        Self::new_unchecked(new_volume, EthanolFraction::new_unchecked(ethanol / new_volume))
    }
}
