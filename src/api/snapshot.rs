use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::error::{PieError, PieResult};
use crate::layout::FigureLayout;
use crate::measure::TextMeasurer;
use crate::trace::PieTrace;

use super::PieFigure;

pub const FIGURE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic figure state used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSnapshot {
    pub plot_area: PlotArea,
    pub traces: Vec<PieTrace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: FigureSnapshot,
}

impl FigureSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> PieResult<String> {
        let payload = FigureSnapshotJsonContractV1 {
            schema_version: FIGURE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            PieError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> PieResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<FigureSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: FigureSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            PieError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != FIGURE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(PieError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl PieFigure {
    #[must_use]
    pub fn snapshot<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> FigureSnapshot {
        FigureSnapshot {
            plot_area: self.plot_area(),
            traces: self.traces().to_vec(),
            layout: self.layout(measurer),
        }
    }

    pub fn to_json_contract_v1_pretty<M: TextMeasurer + ?Sized>(
        &self,
        measurer: &M,
    ) -> PieResult<String> {
        self.snapshot(measurer).to_json_contract_v1_pretty()
    }
}
