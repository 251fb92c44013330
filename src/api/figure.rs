use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Color, PlotArea, base_palette};
use crate::error::{PieError, PieResult};
use crate::layout::{FigureLayout, LayoutContext, layout_figure_with_context};
use crate::measure::TextMeasurer;
use crate::render::{PieRenderFrame, Renderer, build_render_frame};
use crate::trace::{FigureDefaults, FontSpec, PieTrace, PieTraceSpec};

/// Figure-level settings shared by every trace.
#[derive(Debug, Clone, PartialEq)]
pub struct PieFigureConfig {
    pub plot_area: PlotArea,
    pub defaults: FigureDefaults,
    /// Base palette; the slice palette adds lighter and darker variants.
    pub palette: Vec<Color>,
}

impl PieFigureConfig {
    #[must_use]
    pub fn new(plot_area: PlotArea) -> Self {
        Self {
            plot_area,
            defaults: FigureDefaults::default(),
            palette: base_palette(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: FigureDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }
}

/// JSON figure description: a list of pie traces plus optional figure font
/// and palette.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PieFigureSpec {
    #[serde(default)]
    pub data: Vec<PieTraceSpec>,
    #[serde(default)]
    pub font: Option<FontSpec>,
    /// Base palette as color strings.
    #[serde(default)]
    pub colorway: Option<Vec<String>>,
}

/// A figure of pie traces sharing one plot area.
///
/// Traces are resolved once when added. Every layout pass starts from a fresh
/// color context, so repeated passes over unchanged input give identical
/// results.
#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    config: PieFigureConfig,
    traces: Vec<PieTrace>,
}

impl PieFigure {
    pub fn new(config: PieFigureConfig) -> PieResult<Self> {
        config.plot_area.validate()?;
        Ok(Self {
            config,
            traces: Vec::new(),
        })
    }

    /// Builds a figure from a [`PieFigureSpec`] JSON document.
    pub fn from_json_str(input: &str, plot_area: PlotArea) -> PieResult<Self> {
        let spec: PieFigureSpec = serde_json::from_str(input)
            .map_err(|e| PieError::InvalidData(format!("failed to parse pie figure json: {e}")))?;
        Self::from_spec(&spec, plot_area)
    }

    pub fn from_spec(spec: &PieFigureSpec, plot_area: PlotArea) -> PieResult<Self> {
        let mut config = PieFigureConfig::new(plot_area);
        if let Some(font) = &spec.font {
            config.defaults.font = font.resolve(&config.defaults.font);
        }
        if let Some(colorway) = &spec.colorway {
            let palette: Vec<Color> = colorway
                .iter()
                .filter_map(|raw| {
                    let parsed = Color::parse(raw);
                    if parsed.is_none() {
                        warn!(color = %raw, "ignoring unparsable colorway entry");
                    }
                    parsed
                })
                .collect();
            if !palette.is_empty() {
                config.palette = palette;
            }
        }

        let mut figure = Self::new(config)?;
        for trace in &spec.data {
            figure.add_trace(trace);
        }
        Ok(figure)
    }

    #[must_use]
    pub fn config(&self) -> &PieFigureConfig {
        &self.config
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.config.plot_area
    }

    pub fn set_plot_area(&mut self, plot_area: PlotArea) -> PieResult<()> {
        plot_area.validate()?;
        self.config.plot_area = plot_area;
        Ok(())
    }

    /// Resolves `spec` against the figure defaults and appends it. Returns the
    /// trace index.
    pub fn add_trace(&mut self, spec: &PieTraceSpec) -> usize {
        self.push_trace(spec.resolve(&self.config.defaults))
    }

    pub fn push_trace(&mut self, trace: PieTrace) -> usize {
        self.traces.push(trace);
        self.traces.len() - 1
    }

    #[must_use]
    pub fn traces(&self) -> &[PieTrace] {
        &self.traces
    }

    #[must_use]
    pub fn trace(&self, index: usize) -> Option<&PieTrace> {
        self.traces.get(index)
    }

    pub fn clear_traces(&mut self) {
        self.traces.clear();
    }

    /// Runs one layout pass over every trace.
    #[must_use]
    pub fn layout<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> FigureLayout {
        let mut ctx = LayoutContext::with_base_palette(&self.config.palette);
        layout_figure_with_context(&self.traces, self.config.plot_area, &mut ctx, measurer)
    }

    /// Lays the figure out and converts the result into drawables.
    #[must_use]
    pub fn build_render_frame<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> PieRenderFrame {
        build_render_frame(&self.traces, &self.layout(measurer))
    }

    /// Lays the figure out, validates the resulting frame and hands it to
    /// `renderer`.
    pub fn render<R: Renderer + ?Sized, M: TextMeasurer + ?Sized>(
        &self,
        renderer: &mut R,
        measurer: &M,
    ) -> PieResult<()> {
        let frame = self.build_render_frame(measurer);
        frame.validate()?;
        debug!(trace_count = frame.traces.len(), "rendering pie figure");
        renderer.render(&frame)
    }
}
