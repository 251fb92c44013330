mod figure;
mod snapshot;

pub use figure::{PieFigure, PieFigureConfig, PieFigureSpec};
pub use snapshot::{FIGURE_SNAPSHOT_JSON_SCHEMA_V1, FigureSnapshot, FigureSnapshotJsonContractV1};
