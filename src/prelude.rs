//! small collection of widely used core types
//!
//! The goal in using the prelude is to reduce the number of imports needed
//! to drive the mutant factory down to a single one.
//!
//! # Structs & Enums
//!
//! - [`DataContainer`] - ordered key to value-list mapping backing each injectable data source
//! - [`FuzzableRequest`] - the base request mutants are derived from
//! - [`RenderedRequest`] - the concrete request a mutant renders to
//! - [`Mutant`] - one payload at one injectable position
//! - [`MutantType`] - position kinds / stable reporting tags
//! - [`FuzzerConfig`] - options consumed by [`create_mutants`]
//! - [`MutantKitError`] - the library's error type
//!
//! # Functions
//!
//! - [`create_mutants`] - the factory entry point
//! - [`quote_plus`] - the percent-encoding primitive used by the renderers
pub use crate::containers::DataContainer;
pub use crate::error::MutantKitError;
pub use crate::mutants::{create_mutants, FuzzerConfig, Mutant, MutantType};
pub use crate::requests::encoders::quote_plus;
pub use crate::requests::{FuzzableRequest, RenderedRequest};
