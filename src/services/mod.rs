//! Service layer for the coverage engine.
//!
//! This module contains the statistics core: the scene filter, the gap
//! statistics calculator, the vegetation index calculator, and the per-site
//! report assembly. Everything here is pure computation over already-resolved
//! scene records; blocking I/O lives in the repository layer.

pub mod coverage;

pub mod gap_stats;

pub mod scene_filter;

pub mod vegetation_index;

pub use coverage::{evaluate_site, evaluate_sites};
pub use gap_stats::compute_gap_statistics;
pub use scene_filter::{partition_scenes, SceneSubsets};
pub use vegetation_index::compute_index_summary;
