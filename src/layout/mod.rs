//! The pie layout pipeline.
//!
//! Each stage returns a new value built on the previous one:
//! [`reduce_trace`] → [`scale_pies`] → [`set_coords`] → [`place_labels`].
//! [`layout_figure`] composes them over a whole figure.

mod calc;
mod geometry;
mod labels;
mod pass;
mod scale;

pub use calc::{LayoutContext, ReducedTrace, SliceRecord, reduce_trace};
pub use geometry::{PieShape, ProjectedPoint, Projection, SliceGeometry, set_coords};
pub use labels::{
    LabelPlacement, LabelTransform, place_labels, scoot_labels, transform_inside_text,
    transform_outside_text,
};
pub use pass::{FigureLayout, TraceLayout, layout_figure, layout_figure_with_context};
pub use scale::{MIN_TILT_EXTENT, PieGeometry, independent_radius, max_extent, scale_pies};
