use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::trace::{Direction, PieTrace};

use super::{PieGeometry, ReducedTrace};

/// Flattening projection of the pie plane tilted back about an in-plane axis.
///
/// Angles are measured clockwise from 12 o'clock in screen space (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    tilt: Option<Tilt>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tilt {
    in_plane: f64,
    cross: f64,
    axis_sin: f64,
    axis_cos: f64,
    tilt_sin: f64,
}

/// A projected point relative to the pie center, plus its depth toward the
/// viewer (zero when untilted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl ProjectedPoint {
    #[must_use]
    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Projection {
    /// `tilt` and `tilt_axis` in degrees.
    #[must_use]
    pub fn new(tilt: f64, tilt_axis: f64) -> Self {
        if tilt == 0.0 {
            return Self { tilt: None };
        }
        let tilt = tilt.to_radians();
        let axis = tilt_axis.to_radians();
        Self {
            tilt: Some(Tilt {
                in_plane: 1.0 - tilt.cos(),
                cross: axis.sin() * axis.cos(),
                axis_sin: axis.sin(),
                axis_cos: axis.cos(),
                tilt_sin: tilt.sin(),
            }),
        }
    }

    #[must_use]
    pub fn project(self, radius: f64, angle: f64) -> ProjectedPoint {
        let x_flat = radius * angle.sin();
        let y_flat = -radius * angle.cos();
        let Some(t) = self.tilt else {
            return ProjectedPoint {
                x: x_flat,
                y: y_flat,
                depth: 0.0,
            };
        };
        ProjectedPoint {
            x: x_flat * (1.0 - t.in_plane * t.axis_sin * t.axis_sin)
                + y_flat * t.cross * t.in_plane,
            y: x_flat * t.cross * t.in_plane
                + y_flat * (1.0 - t.in_plane * t.axis_cos * t.axis_cos),
            depth: t.tilt_sin * (y_flat * t.axis_cos - x_flat * t.axis_sin),
        }
    }
}

/// Angular extent and projected boundary points of one slice.
///
/// `start`/`end` are the boundaries a clockwise arc runs between, whatever the
/// trace direction, and `start_angle <= end_angle`. Points are relative to the
/// pie center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceGeometry {
    pub start: Point,
    pub end: Point,
    pub mid: Point,
    /// Depth of the projected mid point, used to order extruded sides.
    pub mid_depth: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub large_arc: bool,
}

impl SliceGeometry {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Angular geometry of a whole pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieShape {
    pub geometry: PieGeometry,
    pub slices: Vec<SliceGeometry>,
    /// Offset from the pie center to the top surface of a tilted pie.
    pub depth_vector: Point,
    /// Radius of the projected ellipse along the tilt direction.
    pub minor_radius: f64,
    /// Degrees; the x-axis rotation used for elliptical arcs.
    pub tilt_axis: f64,
}

impl PieShape {
    /// Center of the drawn top surface.
    #[must_use]
    pub fn top_center(&self) -> Point {
        self.geometry.center + self.depth_vector
    }

    /// Top-surface center of `slice` once pulled out by `pull` (a fraction of
    /// the radius along the slice's mid ray).
    #[must_use]
    pub fn slice_center(&self, slice: &SliceGeometry, pull: f64) -> Point {
        let center = self.top_center();
        if pull > 0.0 {
            center + slice.mid.scaled(pull)
        } else {
            center
        }
    }
}

/// Walks the slices once, assigning boundary and mid angles and their
/// projected coordinates.
///
/// Both directions put the first slice against the rotation angle; `cw` then
/// proceeds clockwise and `ccw` counter-clockwise. A zero total collapses
/// every slice onto the rotation angle.
#[must_use]
pub fn set_coords(trace: &PieTrace, reduced: &ReducedTrace, geometry: PieGeometry) -> PieShape {
    let projection = Projection::new(trace.tilt, trace.tilt_axis);
    let radius = geometry.radius;

    let mut angle_factor = if reduced.total > 0.0 {
        TAU / reduced.total
    } else {
        0.0
    };
    let mut current_angle = trace.rotation.to_radians();
    let counter_clockwise = trace.direction == Direction::Ccw;
    if counter_clockwise {
        if let Some(first) = reduced.slices.first() {
            current_angle += angle_factor * first.value;
        }
        angle_factor = -angle_factor;
    }

    let mut current = projection.project(radius, current_angle);
    let mut slices = Vec::with_capacity(reduced.slices.len());
    for slice in &reduced.slices {
        let first_angle = current_angle;
        let first = current;

        current_angle += angle_factor * slice.value / 2.0;
        let mid = projection.project(radius, current_angle);
        let mid_angle = current_angle;

        current_angle += angle_factor * slice.value / 2.0;
        current = projection.project(radius, current_angle);

        let (start, end, start_angle, end_angle) = if counter_clockwise {
            (current, first, current_angle, first_angle)
        } else {
            (first, current, first_angle, current_angle)
        };

        slices.push(SliceGeometry {
            start: start.point(),
            end: end.point(),
            mid: mid.point(),
            mid_depth: mid.depth,
            start_angle,
            end_angle,
            mid_angle,
            large_arc: slice.value > reduced.total / 2.0,
        });
    }

    let tilt = trace.tilt.to_radians();
    let tilt_axis = trace.tilt_axis.to_radians();
    let depth_length = trace.depth * radius * tilt.sin() / 2.0;

    PieShape {
        geometry,
        slices,
        depth_vector: Point::new(depth_length * tilt_axis.sin(), depth_length * tilt_axis.cos()),
        minor_radius: radius * tilt.cos(),
        tilt_axis: trace.tilt_axis,
    }
}

#[cfg(test)]
mod tests {
    use super::Projection;

    #[test]
    fn untilted_projection_starts_at_twelve_oclock() {
        let top = Projection::new(0.0, 0.0).project(10.0, 0.0);
        assert!(top.x.abs() < 1e-12);
        assert!((top.y + 10.0).abs() < 1e-12);
        let right = Projection::new(0.0, 0.0).project(10.0, std::f64::consts::FRAC_PI_2);
        assert!((right.x - 10.0).abs() < 1e-12);
    }

    #[test]
    fn tilt_about_vertical_axis_squashes_y_only() {
        let projection = Projection::new(60.0, 0.0);
        let top = projection.project(10.0, 0.0);
        let right = projection.project(10.0, std::f64::consts::FRAC_PI_2);
        assert!((top.y + 5.0).abs() < 1e-9);
        assert!((right.x - 10.0).abs() < 1e-9);
        assert!(top.depth < 0.0);
    }
}
