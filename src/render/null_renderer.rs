use crate::error::PieResult;
use crate::render::{PieRenderFrame, Renderer};

/// No-op renderer used by tests and headless layout usage.
///
/// It still validates frame content so tests catch invalid geometry before it
/// reaches a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_slice_count: usize,
    pub last_side_count: usize,
    pub last_text_count: usize,
    pub last_connector_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &PieRenderFrame) -> PieResult<()> {
        frame.validate()?;
        self.last_slice_count = frame.traces.iter().map(|t| t.tops.len()).sum();
        self.last_side_count = frame.traces.iter().map(|t| t.sides.len()).sum();
        self.last_text_count = frame.traces.iter().map(|t| t.texts.len()).sum();
        self.last_connector_count = frame.traces.iter().map(|t| t.connectors.len()).sum();
        Ok(())
    }
}
