//! Volume units and numeric input parsing.
//!
//! The solver computes in liters; gallons are converted on the way in and
//! back out for display. The conversion factor is fixed (US gallon).
//!
//! Parsing follows the same value+unit split used for every other numeric
//! input in the workspace: `"40 L"`, `"10.5gal"`, `"50%"`.

use thiserror::Error;

/// Liters per US gallon. Fixed factor, applied at the input/display
/// boundary only.
pub const LITERS_PER_GALLON: f64 = 3.78541;

/// Volume unit for input and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VolumeUnit {
    #[default]
    Liters,
    Gallons,
}

impl VolumeUnit {
    /// Convert a value in this unit to liters.
    pub fn to_liters(self, value: f64) -> f64 {
        match self {
            Self::Liters => value,
            Self::Gallons => value * LITERS_PER_GALLON,
        }
    }

    /// Convert a value in liters to this unit.
    pub fn from_liters(self, liters: f64) -> f64 {
        match self {
            Self::Liters => liters,
            Self::Gallons => liters / LITERS_PER_GALLON,
        }
    }

    /// Short label for display ("L" / "gal").
    pub fn label(self) -> &'static str {
        match self {
            Self::Liters => "L",
            Self::Gallons => "gal",
        }
    }

    /// Parse a unit tag. Accepts the usual spellings, case-insensitive.
    pub fn parse(tag: &str) -> Result<Self, UnitError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "l" | "liter" | "liters" | "litre" | "litres" => Ok(Self::Liters),
            "gal" | "gallon" | "gallons" => Ok(Self::Gallons),
            other => Err(UnitError::UnknownUnit {
                unit: other.to_string(),
                quantity: "Volume".to_string(),
            }),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: String },

    /// Value out of physical range (e.g., negative volume)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: String },
}

/// Parse a volume from user text, return liters.
///
/// A unit tag in the text (`"40 L"`, `"10.5 gal"`) wins; a bare number
/// (`"40"`) is read in `default_unit`.
pub fn parse_volume(input: &str, default_unit: VolumeUnit) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let unit = if unit.is_empty() {
        default_unit
    } else {
        VolumeUnit::parse(&unit)?
    };

    let liters = unit.to_liters(value);
    if !liters.is_finite() || liters < 0.0 {
        return Err(UnitError::OutOfRange {
            value: liters,
            reason: "Volume must be finite and non-negative".to_string(),
        });
    }

    Ok(liters)
}

/// Parse a percentage (0-100) from user text, accepting an optional `%`.
///
/// Out-of-range values are rejected, not clamped.
pub fn parse_percent(input: &str) -> Result<f64, UnitError> {
    let trimmed = input.trim();
    let num_str = trimmed.trim_end_matches('%').trim();
    let percent: f64 = num_str.parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse percentage from '{}'", input))
    })?;

    if !(0.0..=100.0).contains(&percent) {
        return Err(UnitError::OutOfRange {
            value: percent,
            reason: "Percentage must be between 0 and 100".to_string(),
        });
    }

    Ok(percent)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "40L" -> (40.0, "L")
/// - "10.5 gal" -> (10.5, "gal")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // Find where the numeric part ends
    let split_idx = trimmed
        .find(|c: char| !c.is_numeric() && c != '.' && c != '-' && c != '+' && c != 'e' && c != 'E')
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let num_part = num_part.trim();
    let unit_part = unit_part.trim();

    let value: f64 = num_part.parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.to_string()))
}
