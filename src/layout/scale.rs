use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PlotArea, Point};
use crate::trace::PieTrace;

use super::ReducedTrace;

/// Smallest extent factor a fully tilted pie may shrink to.
pub const MIN_TILT_EXTENT: f64 = 0.01;

/// Center, radius and total for one laid out pie.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieGeometry {
    /// Pie center in device pixels, before any depth offset.
    pub center: Point,
    pub radius: f64,
    pub total: f64,
}

/// Size factor needed along one axis once the pie is tilted by `tilt` degrees
/// and extruded by `depth`.
///
/// `tilt_axis_fraction` is the sine (horizontal axis) or cosine (vertical axis)
/// of the tilt-axis angle. An untilted pie has extent 1; any tilt switches to
/// `depth * sin(tilt) * |f| + 2 * sqrt(1 - sin²(tilt) * f²)`, floored at
/// [`MIN_TILT_EXTENT`].
#[must_use]
pub fn max_extent(tilt: f64, tilt_axis_fraction: f64, depth: f64) -> f64 {
    if tilt == 0.0 {
        return 1.0;
    }
    let sin_tilt = tilt.to_radians().sin();
    let squeezed = 1.0 - sin_tilt * sin_tilt * tilt_axis_fraction * tilt_axis_fraction;
    (depth * sin_tilt * tilt_axis_fraction.abs() + 2.0 * squeezed.max(0.0).sqrt())
        .max(MIN_TILT_EXTENT)
}

/// Radius the pie may take inside its own domain box, ignoring scale groups.
#[must_use]
pub fn independent_radius(trace: &PieTrace, area: PlotArea) -> f64 {
    let box_width = area.width * trace.domain.width_fraction();
    let box_height = area.height * trace.domain.height_fraction();
    let tilt_axis = trace.tilt_axis.to_radians();

    let radius = (box_width / max_extent(trace.tilt, tilt_axis.sin(), trace.depth))
        .min(box_height / max_extent(trace.tilt, tilt_axis.cos(), trace.depth))
        / (2.0 + 2.0 * trace.max_pull());
    radius.max(0.0)
}

/// Computes every pie's center and radius, then equalizes area per unit value
/// inside each scale group.
///
/// Within a group every radius becomes `sqrt(min(r² / total) * total)`, so the
/// most constrained pie sets the scale and no pie outgrows its own box. Pies
/// with a zero total keep their independent radius and do not take part.
#[must_use]
pub fn scale_pies(pies: &[(&PieTrace, &ReducedTrace)], area: PlotArea) -> Vec<PieGeometry> {
    let mut geometries: Vec<PieGeometry> = pies
        .iter()
        .map(|(trace, reduced)| PieGeometry {
            center: trace.domain.pixel_center(area),
            radius: independent_radius(trace, area),
            total: reduced.total,
        })
        .collect();

    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (position, (trace, _)) in pies.iter().enumerate() {
        if let Some(group) = trace.scale_group.as_deref() {
            groups.entry(group).or_default().push(position);
        }
    }

    for (group, members) in &groups {
        let min_px_per_value = members
            .iter()
            .map(|&position| &geometries[position])
            .filter(|geometry| geometry.total > 0.0)
            .map(|geometry| OrderedFloat(geometry.radius * geometry.radius / geometry.total))
            .min();
        let Some(OrderedFloat(min_px_per_value)) = min_px_per_value else {
            continue;
        };

        for &position in members {
            let geometry = &mut geometries[position];
            if geometry.total > 0.0 {
                geometry.radius = (min_px_per_value * geometry.total).sqrt();
            }
        }
        debug!(
            group = *group,
            members = members.len(),
            min_px_per_value,
            "normalized pie scale group"
        );
    }

    geometries
}
