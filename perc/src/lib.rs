#![forbid(unsafe_code)]

mod error;
mod grid;
mod percolation;
mod stats;
mod union_find;

pub use error::{Error, Result};
pub use grid::{Site, SiteGrid};
pub use percolation::{Percolation, PercolationGrid};
pub use stats::{
    run_trial, ExperimentConfig, GridFactory, PercolationStats, RngSource, SeededSources,
    SourceFactory, UniformSource,
};
pub use union_find::DisjointSet;
