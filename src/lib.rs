//! Synthetic fan-flow visualizer: an inverse-distance radial velocity field
//! sampled on a square grid, rendered as side-by-side quiver panels.

pub mod config;
pub mod flow;
pub mod grid;
pub mod visualisation;
