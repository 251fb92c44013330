use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::error::{PieError, PieResult};
use crate::render::{ConnectorPrimitive, SlicePrimitive, TextPrimitive};

/// Drawables for one pie, in paint order: sides, tops, connectors, texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    pub trace_index: usize,
    pub opacity: f64,
    /// Extruded walls of a tilted pie, back to front.
    pub sides: Vec<SlicePrimitive>,
    pub tops: Vec<SlicePrimitive>,
    pub connectors: Vec<ConnectorPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl TraceFrame {
    #[must_use]
    pub fn new(trace_index: usize, opacity: f64) -> Self {
        Self {
            trace_index,
            opacity,
            sides: Vec::new(),
            tops: Vec::new(),
            connectors: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn validate(&self) -> PieResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(PieError::InvalidData(
                "trace opacity must be finite and in [0, 1]".to_owned(),
            ));
        }
        for slice in self.sides.iter().chain(&self.tops) {
            slice.validate()?;
        }
        for connector in &self.connectors {
            connector.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.sides.len() + self.tops.len() + self.connectors.len() + self.texts.len()
    }
}

/// Backend-agnostic scene for one figure draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieRenderFrame {
    pub plot_area: PlotArea,
    pub traces: Vec<TraceFrame>,
}

impl PieRenderFrame {
    #[must_use]
    pub fn new(plot_area: PlotArea) -> Self {
        Self {
            plot_area,
            traces: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: TraceFrame) -> Self {
        self.traces.push(trace);
        self
    }

    pub fn validate(&self) -> PieResult<()> {
        if !self.plot_area.is_valid() {
            return Err(PieError::InvalidPlotArea {
                width: self.plot_area.width,
                height: self.plot_area.height,
            });
        }
        for trace in &self.traces {
            trace.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|trace| trace.primitive_count() == 0)
    }
}
