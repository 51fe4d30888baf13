use std::collections::HashMap;

use egui::{Pos2, Vec2};
use uuid::Uuid;

use super::position::PhasePosition;
use crate::model::Dependency;

const MIN_CURVE_REACH: f32 = 20.0;
const ARROW_LENGTH: f32 = 6.0;
const ARROW_HALF_WIDTH: f32 = 4.0;

/// A directed curve from an upstream bar's right edge to a downstream bar's left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub from_phase: Uuid,
    pub to_phase: Uuid,
    /// Cubic Bézier control points: start, two handles, end.
    pub curve: [Pos2; 4],
    /// Arrowhead triangle, tip first.
    pub arrow: [Pos2; 3],
    pub lag_days: Option<i32>,
}

impl Connector {
    pub fn start(&self) -> Pos2 {
        self.curve[0]
    }

    pub fn end(&self) -> Pos2 {
        self.curve[3]
    }
}

/// Vertical center of a row, relative to the top of the first row.
pub fn row_center_y(row: usize, row_pitch: f32) -> f32 {
    row as f32 * row_pitch + row_pitch / 2.0
}

/// Build connectors for every dependency whose endpoints are both placed and dated.
///
/// Dependencies pointing at a missing or undated phase are skipped.
pub fn connectors(
    dependencies: &[Dependency],
    positions: &[PhasePosition],
    row_pitch: f32,
) -> Vec<Connector> {
    let by_id: HashMap<Uuid, &PhasePosition> = positions
        .iter()
        .filter(|p| p.resolved.is_some())
        .map(|p| (p.phase_id, p))
        .collect();

    dependencies
        .iter()
        .filter_map(|dep| {
            let upstream = by_id.get(&dep.depends_on_phase_id)?;
            let downstream = by_id.get(&dep.phase_id)?;
            Some(connector_between(dep, upstream, downstream, row_pitch))
        })
        .collect()
}

fn connector_between(
    dep: &Dependency,
    upstream: &PhasePosition,
    downstream: &PhasePosition,
    row_pitch: f32,
) -> Connector {
    let from = Pos2::new(upstream.right(), row_center_y(upstream.row, row_pitch));
    let to = Pos2::new(downstream.left, row_center_y(downstream.row, row_pitch));

    let reach = ((to.x - from.x).abs() / 2.0).max(MIN_CURVE_REACH);
    let curve = [
        from,
        from + Vec2::new(reach, 0.0),
        to - Vec2::new(reach, 0.0),
        to,
    ];
    let arrow = [
        to,
        to + Vec2::new(-ARROW_LENGTH, -ARROW_HALF_WIDTH),
        to + Vec2::new(-ARROW_LENGTH, ARROW_HALF_WIDTH),
    ];

    Connector {
        from_phase: dep.depends_on_phase_id,
        to_phase: dep.phase_id,
        curve,
        arrow,
        lag_days: dep.lag_days,
    }
}
