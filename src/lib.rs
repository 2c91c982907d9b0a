//! Index planning engine
//!
//! Computes the indexable set of files for a collection of checkouts:
//! compiles layered ignore rules ([`rules`]), walks each tree ([`scan`]),
//! aggregates and classifies the result ([`plan`]), and diffs it against a
//! stored snapshot ([`baseline`]).

pub mod baseline;
pub mod config;
pub mod domain;
pub mod error;
pub mod plan;
pub mod render;
pub mod rules;
pub mod scan;
pub mod utils;

pub use error::{PlanError, Result};
