use serde::{Deserialize, Serialize};

use crate::error::{PieError, PieResult};

/// Pixel box of the plotting area inside the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> PieResult<Self> {
        let area = Self {
            left,
            top,
            width,
            height,
        };
        area.validate()?;
        Ok(area)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn validate(self) -> PieResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PieError::InvalidPlotArea {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Normalized `[0, 1]` sub-rectangle of the plot area a trace occupies.
///
/// `y` grows upward: `y = [0, 0.5]` is the bottom half of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Domain {
    pub const FULL: Self = Self {
        x: [0.0, 1.0],
        y: [0.0, 1.0],
    };

    #[must_use]
    pub const fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn width_fraction(self) -> f64 {
        self.x[1] - self.x[0]
    }

    #[must_use]
    pub fn height_fraction(self) -> f64 {
        self.y[1] - self.y[0]
    }

    /// Center of the domain box in pixel space, with the y axis flipped.
    #[must_use]
    pub fn pixel_center(self, area: PlotArea) -> Point {
        Point::new(
            area.left + area.width * (self.x[0] + self.x[1]) / 2.0,
            area.top + area.height * (2.0 - self.y[0] - self.y[1]) / 2.0,
        )
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::FULL
    }
}

/// 2-D point or offset in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}
