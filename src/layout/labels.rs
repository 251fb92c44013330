use std::f64::consts::PI;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Point, svg_number};
use crate::measure::{TextBox, TextMeasurer};
use crate::trace::{PieTrace, TextFont, TextPosition};

use super::{PieShape, ReducedTrace, SliceGeometry};

/// Scale, rotation and radial position of a label relative to its slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelTransform {
    /// Text scale factor, at most 1.
    pub scale: f64,
    /// Anchor position along the mid-angle ray, as a fraction of the radius.
    pub r_center: f64,
    /// Degrees.
    pub rotate: f64,
    /// Extra pixel offset after the radial position (outside labels only).
    pub offset: Point,
    pub outside: bool,
}

impl LabelTransform {
    fn inside(scale: f64, r_center: f64, rotate: f64) -> Self {
        Self {
            scale,
            r_center,
            rotate,
            offset: Point::ORIGIN,
            outside: false,
        }
    }
}

/// A placed slice label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    /// Position of the slice in display order.
    pub slice: usize,
    pub text: String,
    pub font: TextFont,
    pub text_box: TextBox,
    pub transform: LabelTransform,
    /// Where the center of the text box lands before any collision offset.
    pub anchor: Point,
    /// Projected mid point of the slice relative to the pie center.
    pub slice_mid: Point,
    /// Pulled center of the slice the label belongs to.
    pub slice_center: Point,
    /// Collision offset applied after the initial placement.
    pub scoot: Point,
}

impl LabelPlacement {
    #[must_use]
    pub fn y_min(&self) -> f64 {
        self.anchor.y - self.text_box.height / 2.0
    }

    #[must_use]
    pub fn y_max(&self) -> f64 {
        self.anchor.y + self.text_box.height / 2.0
    }

    #[must_use]
    pub fn is_scooted(&self) -> bool {
        self.scoot != Point::ORIGIN
    }

    /// SVG transform list that positions the text node, which is drawn with
    /// `text-anchor: middle` at the origin.
    #[must_use]
    pub fn svg_transform(&self) -> String {
        let mut out = String::new();
        if self.is_scooted() {
            out.push_str(&format!(
                "translate({},{})",
                svg_number(self.scoot.x),
                svg_number(self.scoot.y)
            ));
        }
        out.push_str(&format!(
            "translate({},{})",
            svg_number(self.anchor.x),
            svg_number(self.anchor.y)
        ));
        if self.transform.scale < 1.0 {
            out.push_str(&format!("scale({})", svg_number(self.transform.scale)));
        }
        if self.transform.rotate != 0.0 {
            out.push_str(&format!("rotate({})", svg_number(self.transform.rotate)));
        }
        out.push_str(&format!(
            "translate({},{})",
            svg_number(-self.text_box.center_x()),
            svg_number(-self.text_box.center_y())
        ));
        out
    }

    /// Leader line from the slice edge to a label that was moved to avoid a
    /// collision; `None` when the label kept its initial spot.
    #[must_use]
    pub fn connector_path(&self) -> Option<String> {
        if !self.is_scooted() {
            return None;
        }
        let start = self.slice_center + self.slice_mid;
        let side = if self.slice_mid.x < 0.0 { -1.0 } else { 1.0 };
        let tail = (self.y_max() - self.y_min()) * side / 4.0;
        Some(format!(
            "M{},{}V{}h{}",
            svg_number(start.x),
            svg_number(start.y),
            svg_number(self.anchor.y + self.scoot.y),
            svg_number(tail)
        ))
    }
}

/// Largest transform that keeps the label inside its slice.
///
/// Tries the label upright first, inscribing its bounding circle in the
/// slice's inscribed circle. When that needs shrinking, radial and tangential
/// rotations are evaluated and the larger of the two wins if it beats upright.
#[must_use]
pub fn transform_inside_text(
    text_box: TextBox,
    slice: &SliceGeometry,
    fraction: f64,
    radius: f64,
    hole: f64,
) -> LabelTransform {
    if text_box.is_empty() || radius <= 0.0 {
        return LabelTransform::inside(if text_box.is_empty() { 1.0 } else { 0.0 }, 0.5, 0.0);
    }

    let text_diameter = text_box.width.hypot(text_box.height);
    let text_aspect = text_box.width / text_box.height;
    let half_angle = PI * fraction.clamp(0.0, 0.5);
    let ring = 1.0 - hole;
    let r_inscribed = (1.0 / (1.0 + 1.0 / half_angle.sin())).min(ring / 2.0);

    let upright = LabelTransform::inside(
        r_inscribed * radius * 2.0 / text_diameter,
        1.0 - r_inscribed,
        0.0,
    );
    if upright.scale >= 1.0 {
        return LabelTransform {
            scale: 1.0,
            ..upright
        };
    }

    let mid_degrees = slice.mid_angle.to_degrees();
    let cot_term = 1.0 / (2.0 * half_angle.tan());

    let q_radial = text_aspect + cot_term;
    let max_half_height_radial = radius
        * (1.0 / ((q_radial * q_radial + 0.5).sqrt() + q_radial))
            .min(ring / ((text_aspect * text_aspect + ring / 2.0).sqrt() + text_aspect));
    let radial = LabelTransform::inside(
        max_half_height_radial * 2.0 / text_box.height,
        (max_half_height_radial / radius).cos() - max_half_height_radial * text_aspect / radius,
        (mid_degrees + 720.0).rem_euclid(180.0) - 90.0,
    );

    let aspect_inv = 1.0 / text_aspect;
    let q_tangential = aspect_inv + cot_term;
    let max_half_width_tangential = radius
        * (1.0 / ((q_tangential * q_tangential + 0.5).sqrt() + q_tangential))
            .min(ring / ((aspect_inv * aspect_inv + ring / 2.0).sqrt() + aspect_inv));
    let tangential = LabelTransform::inside(
        max_half_width_tangential * 2.0 / text_box.width,
        (max_half_width_tangential / radius).cos()
            - max_half_width_tangential / text_aspect / radius,
        (mid_degrees + 810.0).rem_euclid(180.0) - 90.0,
    );

    let rotated = if tangential.scale > radial.scale {
        tangential
    } else {
        radial
    };
    let best = if rotated.scale > upright.scale {
        rotated
    } else {
        upright
    };
    LabelTransform {
        scale: best.scale.min(1.0),
        ..best
    }
}

/// Anchors a label just past the slice's outer mid point, pushed away from
/// the center on both axes.
#[must_use]
pub fn transform_outside_text(text_box: TextBox, slice: &SliceGeometry) -> LabelTransform {
    let x = slice.mid.x;
    let y = slice.mid.y;
    let mut dx = text_box.width / 2.0;
    let mut dy = text_box.height / 2.0;
    if x < 0.0 {
        dx = -dx;
    }
    if y < 0.0 {
        dy = -dy;
    }

    let offset_x = dx + dy.abs() * dx.signum() / 2.0;
    let offset_y = if y == 0.0 {
        0.0
    } else {
        dy / (1.0 + x * x / (y * y))
    };

    LabelTransform {
        scale: 1.0,
        r_center: 1.0,
        rotate: 0.0,
        offset: Point::new(offset_x, offset_y),
        outside: true,
    }
}

/// Measures and places every slice label of one pie, then resolves
/// collisions between outside labels.
///
/// The result is parallel to the slices in display order; slices without text
/// or with text position `none` get `None`.
pub fn place_labels<M: TextMeasurer + ?Sized>(
    trace: &PieTrace,
    reduced: &ReducedTrace,
    shape: &PieShape,
    measurer: &M,
) -> Vec<Option<LabelPlacement>> {
    let mut placements: Vec<Option<LabelPlacement>> = reduced
        .slices
        .iter()
        .zip(&shape.slices)
        .enumerate()
        .map(|(position, (record, slice))| {
            let text = record.text.as_deref()?;
            let text_position = trace.text_position_for(record.index);
            if text_position == TextPosition::None || text.is_empty() {
                return None;
            }

            let slice_center = shape.slice_center(slice, trace.pull_for(record.index));
            let mut font = if !text_position.allows_inside() {
                &trace.outside_font
            } else {
                &trace.inside_font
            };
            let mut text_box = measurer.measure(text, font);

            let transform = if !text_position.allows_inside() {
                transform_outside_text(text_box, slice)
            } else {
                let inside = transform_inside_text(
                    text_box,
                    slice,
                    reduced.fraction(record.value),
                    shape.geometry.radius,
                    trace.hole,
                );
                if text_position == TextPosition::Auto && inside.scale < 1.0 {
                    if !trace.outside_font.same_metrics(font) {
                        text_box = measurer.measure(text, &trace.outside_font);
                    }
                    font = &trace.outside_font;
                    trace!(slice = position, scale = inside.scale, "label moved outside");
                    transform_outside_text(text_box, slice)
                } else {
                    inside
                }
            };

            let anchor = slice_center + slice.mid.scaled(transform.r_center) + transform.offset;
            Some(LabelPlacement {
                slice: position,
                text: text.to_owned(),
                font: font.clone(),
                text_box,
                transform,
                anchor,
                slice_mid: slice.mid,
                slice_center,
                scoot: Point::ORIGIN,
            })
        })
        .collect();

    scoot_labels(&mut placements);
    placements
}

/// Pushes outside labels apart vertically so none overlap within a quadrant.
///
/// Labels are split into four quadrants by the sign of their outside offset.
/// Each quadrant is walked outward from the horizontal midline and every
/// label that overlaps its predecessor moves away from the midline by exactly
/// the overlap. The first label of each bottom quadrant also clears the
/// innermost label of the top quadrant on the same side.
pub fn scoot_labels(placements: &mut [Option<LabelPlacement>]) {
    // [top, bottom][left, right]
    let mut quadrants: [[Vec<usize>; 2]; 2] = Default::default();
    for (position, placement) in placements.iter().enumerate() {
        let Some(placement) = placement else {
            continue;
        };
        if !placement.transform.outside {
            continue;
        }
        let half = usize::from(placement.transform.offset.y >= 0.0);
        let side = usize::from(placement.transform.offset.x >= 0.0);
        quadrants[half][side].push(position);
    }

    let mid_y = |placements: &[Option<LabelPlacement>], position: usize| {
        OrderedFloat(placements[position].as_ref().map_or(0.0, |p| p.slice_mid.y))
    };
    for side in 0..2 {
        quadrants[0][side].sort_by_key(|&position| std::cmp::Reverse(mid_y(placements, position)));
        quadrants[1][side].sort_by_key(|&position| mid_y(placements, position));
    }

    for half in 0..2 {
        for side in 0..2 {
            let quadrant = &quadrants[half][side];
            if half == 1 {
                if let (Some(&first), Some(&top_first)) =
                    (quadrant.first(), quadrants[0][side].first())
                {
                    scoot_one_label(placements, first, top_first, true);
                }
            }
            for pair in quadrant.windows(2) {
                scoot_one_label(placements, pair[1], pair[0], half == 1);
            }
        }
    }
}

fn scoot_one_label(
    placements: &mut [Option<LabelPlacement>],
    this: usize,
    prev: usize,
    bottom_half: bool,
) {
    let Some(prev) = placements[prev].as_ref() else {
        return;
    };
    let (prev_top, prev_bottom) = (prev.y_min() + prev.scoot.y, prev.y_max() + prev.scoot.y);
    let Some(this) = placements[this].as_mut() else {
        return;
    };

    if bottom_half {
        let this_top = this.y_min();
        if this_top < prev_bottom {
            this.scoot.y = prev_bottom - this_top;
        }
    } else {
        let this_bottom = this.y_max();
        if this_bottom > prev_top {
            this.scoot.y = prev_top - this_bottom;
        }
    }
    if this.scoot.y != 0.0 {
        trace!(slice = this.slice, scoot_y = this.scoot.y, "scooted outside label");
    }
}
