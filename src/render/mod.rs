mod assembly;
mod frame;
mod null_renderer;
mod path;
mod primitives;

pub use assembly::{MAX_CONNECTOR_WIDTH, build_render_frame};
pub use frame::{PieRenderFrame, TraceFrame};
pub use null_renderer::NullRenderer;
pub use path::{side_path, slice_path};
pub use primitives::{ConnectorPrimitive, SlicePart, SlicePrimitive, SliceStyle, TextPrimitive};

use crate::error::PieResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `PieRenderFrame` so
/// drawing code stays isolated from data reduction and label placement.
pub trait Renderer {
    fn render(&mut self, frame: &PieRenderFrame) -> PieResult<()>;
}
