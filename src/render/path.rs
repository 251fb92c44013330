use crate::core::{Point, svg_number};
use crate::layout::{PieShape, SliceGeometry};

/// One relative elliptical arc command.
fn arc_command(rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, delta: Point) -> String {
    format!(
        "a{},{} {} {} {} {},{}",
        svg_number(rx),
        svg_number(ry),
        svg_number(rotation),
        u8::from(large_arc),
        u8::from(sweep),
        svg_number(delta.x),
        svg_number(delta.y)
    )
}

/// Relative arc segments along a slice boundary from `from` to `to`, scaled by
/// `factor`.
///
/// A slice covering the whole pie starts and ends on the same point, which a
/// single arc command cannot express, so it goes through the mid point in two
/// halves.
fn arc_segments(
    shape: &PieShape,
    slice: &SliceGeometry,
    factor: f64,
    clockwise: bool,
) -> String {
    let rx = shape.geometry.radius * factor;
    let ry = shape.minor_radius * factor;
    let (from, to) = if clockwise {
        (slice.start, slice.end)
    } else {
        (slice.end, slice.start)
    };

    if is_full_circle(shape, slice) {
        let first = (slice.mid - from).scaled(factor);
        let second = (to - slice.mid).scaled(factor);
        let mut out = arc_command(rx, ry, shape.tilt_axis, false, clockwise, first);
        out.push_str(&arc_command(rx, ry, shape.tilt_axis, false, clockwise, second));
        return out;
    }

    arc_command(
        rx,
        ry,
        shape.tilt_axis,
        slice.large_arc,
        clockwise,
        (to - from).scaled(factor),
    )
}

fn is_full_circle(shape: &PieShape, slice: &SliceGeometry) -> bool {
    let gap = slice.end - slice.start;
    slice.large_arc && gap.x.hypot(gap.y) <= shape.geometry.radius * 1e-9
}

/// Closed outline of a slice's top surface around `center`.
///
/// Pies draw as center → start edge → outer arc; donuts start on the inner
/// boundary, run the inner arc backwards, then the outer arc forwards.
#[must_use]
pub fn slice_path(shape: &PieShape, slice: &SliceGeometry, center: Point, hole: f64) -> String {
    let outer_arc = arc_segments(shape, slice, 1.0, true);
    if hole > 0.0 {
        let rim = 1.0 - hole;
        let inner_start = center + slice.end.scaled(hole);
        let inner_arc = arc_segments(shape, slice, hole, false);
        format!(
            "M{},{}{}l{},{}{}Z",
            svg_number(inner_start.x),
            svg_number(inner_start.y),
            inner_arc,
            svg_number(rim * slice.start.x),
            svg_number(rim * slice.start.y),
            outer_arc
        )
    } else {
        format!(
            "M{},{}l{},{}{}Z",
            svg_number(center.x),
            svg_number(center.y),
            svg_number(slice.start.x),
            svg_number(slice.start.y),
            outer_arc
        )
    }
}

/// Closed outline of the extruded outer wall below a tilted slice.
///
/// Runs the outer arc on the top surface, drops by twice the depth vector to
/// the bottom surface, and runs the same arc back.
#[must_use]
pub fn side_path(shape: &PieShape, slice: &SliceGeometry, center: Point) -> String {
    let start = center + slice.start;
    let drop = shape.depth_vector.scaled(-2.0);
    format!(
        "M{},{}{}l{},{}{}Z",
        svg_number(start.x),
        svg_number(start.y),
        arc_segments(shape, slice, 1.0, true),
        svg_number(drop.x),
        svg_number(drop.y),
        arc_segments(shape, slice, 1.0, false)
    )
}
