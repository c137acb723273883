#![forbid(unsafe_code)]

//! Core domain logic for the BMI calculator.
//!
//! This crate provides:
//! - Unit conversion into canonical SI units
//! - BMI computation and category classification
//! - The form controller shared by the CLI and desktop front ends
//! - Plain-text result reports
//! - Configuration and logging setup

pub mod error;
pub mod units;
pub mod classify;
pub mod form;
pub mod report;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use units::{convert, convert_tagged, HeightUnit, WeightUnit};
pub use classify::{classify, BmiResult, Category};
pub use form::{Calculator, FormInput, ABOUT_TEXT};
pub use config::Config;
