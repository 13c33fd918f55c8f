//! Benchmark support crate for knows.
//!
//! Provides parameter grids and seeded graph fixtures used by the Criterion
//! benchmarks for generation and export.

pub mod error;
pub mod params;
