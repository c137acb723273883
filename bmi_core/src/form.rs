//! Form controller shared by the front ends.
//!
//! A front end reads its input fields into a [`FormInput`], hands it to a
//! [`Calculator`] and renders whatever comes back. The calculator only keeps
//! the last successful result, which is what a save action persists.

use crate::{classify, convert, report, BmiResult, Error, HeightUnit, Result, WeightUnit};
use std::path::Path;

/// Text shown by the About action
pub const ABOUT_TEXT: &str = "BMI Calculator\nVersion 1.0\nCalculate your Body Mass Index (BMI) easily with different units of measurement.";

/// Raw values collected from the input form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormInput {
    pub height: String,
    pub weight: String,
    pub height_unit: HeightUnit,
    pub weight_unit: WeightUnit,
}

impl FormInput {
    pub fn new(
        height: impl Into<String>,
        weight: impl Into<String>,
        height_unit: HeightUnit,
        weight_unit: WeightUnit,
    ) -> Self {
        Self {
            height: height.into(),
            weight: weight.into(),
            height_unit,
            weight_unit,
        }
    }

    /// Parse the height and weight fields as numbers
    pub fn parse(&self) -> Result<(f64, f64)> {
        Ok((parse_number(&self.height)?, parse_number(&self.weight)?))
    }

    /// Parse, convert to canonical units and classify
    pub fn evaluate(&self) -> Result<BmiResult> {
        let (height, weight) = self.parse()?;
        let (height_m, weight_kg) = convert(height, weight, self.height_unit, self.weight_unit);
        classify(height_m, weight_kg)
    }
}

fn parse_number(field: &str) -> Result<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => {
            tracing::warn!("Rejected non-numeric input {:?}", field);
            Err(Error::MalformedInput)
        }
    }
}

/// Holds the most recent successful calculation
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    last: Option<BmiResult>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate the form; on success the result replaces the previous one.
    ///
    /// A failed evaluation leaves the previous result in place.
    pub fn calculate(&mut self, input: &FormInput) -> Result<BmiResult> {
        let result = input.evaluate()?;
        self.last = Some(result);
        Ok(result)
    }

    pub fn last(&self) -> Option<&BmiResult> {
        self.last.as_ref()
    }

    /// Write the last result to `path` under the given name.
    ///
    /// With `overwrite` unset an existing file is left alone and
    /// `Error::FileExists` is returned.
    pub fn save(&self, name: &str, path: &Path, overwrite: bool) -> Result<()> {
        let result = self.last.as_ref().ok_or(Error::NoResultToSave)?;
        if overwrite {
            report::write_report(path, name, result)
        } else {
            report::write_report_new(path, name, result)
        }
    }
}
