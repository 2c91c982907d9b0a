//! Plan aggregation, threshold classification and multi-collection planning

pub mod aggregate;
pub mod planner;

pub use aggregate::{
    aggregate, classify, extension_histogram, extension_key, summarize, top_largest,
};
pub use planner::{not_cloned, Planner};
