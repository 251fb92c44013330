pub mod color;
pub mod format;
pub mod palette;
pub mod types;
pub mod value;

pub use color::Color;
pub use format::{format_percent, format_value, svg_number};
pub use palette::{DEFAULT_LINE_COLOR, base_palette, default_color, slice_palette};
pub use types::{Domain, PlotArea, Point};
pub use value::DataValue;
