//! mutantkit: derive payload-carrying request mutants from a captured base
//! http request
//!
//! The engine takes one [`FuzzableRequest`], a list of payload strings, and
//! a set of eligible positions, and enumerates every (position x payload)
//! combination into independent [`Mutant`] values. Each mutant renders into
//! a concrete, correctly-encoded request on demand and remembers what was
//! modified, from what original value, to what replacement value.
//!
//! [`FuzzableRequest`]: crate::requests::FuzzableRequest
//! [`Mutant`]: crate::mutants::Mutant
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    rustdoc::broken_intra_doc_links,
    missing_docs,
    clippy::missing_const_for_fn
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::module_name_repetitions)]

pub mod containers;
pub mod error;
pub mod mutants;
pub mod prelude;
pub mod requests;

// the factory is the single entry point plugins call; re-exported here so
// callers don't need to know the module layout
pub use mutants::{create_mutants, FuzzerConfig};
