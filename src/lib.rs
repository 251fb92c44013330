//! pie-layout: pie and donut trace layout engine.
//!
//! Turns loosely typed pie trace attributes into slice records, radii shared
//! across scale groups, projected slice geometry for flat and tilted pies,
//! and collision-free label placements, then into backend-agnostic drawables.

pub mod api;
pub mod core;
pub mod error;
pub mod layout;
pub mod measure;
pub mod render;
pub mod telemetry;
pub mod trace;

pub use api::{PieFigure, PieFigureConfig};
pub use error::{PieError, PieResult};
