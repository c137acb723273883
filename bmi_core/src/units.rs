//! Height and weight units and their conversion to canonical SI units.
//!
//! All classification math is done in meters and kilograms. Values are not
//! validated here; a non-positive magnitude converts like any other number.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Centimeters per meter
pub const CM_PER_M: f64 = 100.0;

/// Meters per international foot
pub const M_PER_FOOT: f64 = 0.3048;

/// Kilograms per avoirdupois pound
pub const KG_PER_POUND: f64 = 0.453592;

// ============================================================================
// Height
// ============================================================================

/// Unit a height magnitude is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "feet")]
    Feet,
}

impl HeightUnit {
    /// Every height unit, in the order the form offers them
    pub const ALL: [HeightUnit; 3] = [HeightUnit::Meters, HeightUnit::Centimeters, HeightUnit::Feet];

    /// Tag shown in unit selectors and accepted by `FromStr`
    pub fn tag(&self) -> &'static str {
        match self {
            HeightUnit::Meters => "m",
            HeightUnit::Centimeters => "cm",
            HeightUnit::Feet => "feet",
        }
    }

    /// Convert a magnitude in this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Meters => value,
            HeightUnit::Centimeters => value / CM_PER_M,
            HeightUnit::Feet => value * M_PER_FOOT,
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for HeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        HeightUnit::ALL
            .into_iter()
            .find(|unit| unit.tag() == s)
            .ok_or_else(|| Error::UnknownUnit(s.to_string()))
    }
}

// ============================================================================
// Weight
// ============================================================================

/// Unit a weight magnitude is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "pounds")]
    Pounds,
}

impl WeightUnit {
    /// Every weight unit, in the order the form offers them
    pub const ALL: [WeightUnit; 2] = [WeightUnit::Kilograms, WeightUnit::Pounds];

    /// Tag shown in unit selectors and accepted by `FromStr`
    pub fn tag(&self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "kg",
            WeightUnit::Pounds => "pounds",
        }
    }

    /// Convert a magnitude in this unit to kilograms
    pub fn to_kilograms(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kilograms => value,
            WeightUnit::Pounds => value * KG_PER_POUND,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        WeightUnit::ALL
            .into_iter()
            .find(|unit| unit.tag() == s)
            .ok_or_else(|| Error::UnknownUnit(s.to_string()))
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Normalize a height/weight pair into (meters, kilograms)
pub fn convert(
    height: f64,
    weight: f64,
    height_unit: HeightUnit,
    weight_unit: WeightUnit,
) -> (f64, f64) {
    (height_unit.to_meters(height), weight_unit.to_kilograms(weight))
}

/// Normalize a height/weight pair given raw unit tags.
///
/// An unrecognized tag leaves its value unchanged, i.e. it is treated as
/// meters or kilograms. Use the `FromStr` impls to reject unknown tags instead.
pub fn convert_tagged(height: f64, weight: f64, height_unit: &str, weight_unit: &str) -> (f64, f64) {
    let height_unit = height_unit.parse::<HeightUnit>().unwrap_or_else(|_| {
        tracing::warn!("Unrecognized height unit {:?}, leaving value unchanged", height_unit);
        HeightUnit::Meters
    });
    let weight_unit = weight_unit.parse::<WeightUnit>().unwrap_or_else(|_| {
        tracing::warn!("Unrecognized weight unit {:?}, leaving value unchanged", weight_unit);
        WeightUnit::Kilograms
    });

    convert(height, weight, height_unit, weight_unit)
}
