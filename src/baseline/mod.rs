//! Baseline snapshots and change detection across planning runs

pub mod changes;
pub mod diff;
pub mod snapshot;

pub use changes::{write_changes, ChangesRecord};
pub use diff::{diff, DiffResult};
pub use snapshot::{load_baseline, save_baseline, Baseline};
