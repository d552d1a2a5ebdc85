use eframe::egui::{Pos2, pos2};

use crate::lineage::EdgeKind;

pub(in crate::app) const NODE_WIDTH: f32 = 160.0;
pub(in crate::app) const NODE_HEIGHT: f32 = 70.0;

const VERTICAL_ANCHOR: f32 = 25.0;
const SIDE_ANCHOR: f32 = 70.0;
const CURVE_SEGMENTS: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct EdgeCurve {
    pub(in crate::app) points: [Pos2; 4],
}

impl EdgeCurve {
    pub(in crate::app) fn sample(&self, t: f32) -> Pos2 {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        pos2(
            a * p0.x + b * p1.x + c * p2.x + d * p3.x,
            a * p0.y + b * p1.y + c * p2.y + d * p3.y,
        )
    }

    pub(in crate::app) fn polyline(&self) -> Vec<Pos2> {
        (0..=CURVE_SEGMENTS)
            .map(|step| self.sample(step as f32 / CURVE_SEGMENTS as f32))
            .collect()
    }

    pub(in crate::app) fn distance_to(&self, point: Pos2) -> f32 {
        self.polyline()
            .windows(2)
            .map(|segment| segment_distance(point, segment[0], segment[1]))
            .fold(f32::INFINITY, f32::min)
    }
}

fn segment_distance(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return point.distance(a);
    }

    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

pub(in crate::app) fn edge_curve(
    kind: EdgeKind,
    source: Pos2,
    source_generation: u32,
    target: Pos2,
    target_generation: u32,
) -> EdgeCurve {
    let (start, end) = if kind == EdgeKind::Rival && source_generation == target_generation {
        if source.x < target.x {
            (
                pos2(source.x + SIDE_ANCHOR, source.y),
                pos2(target.x - SIDE_ANCHOR, target.y),
            )
        } else {
            (
                pos2(source.x - SIDE_ANCHOR, source.y),
                pos2(target.x + SIDE_ANCHOR, target.y),
            )
        }
    } else {
        (
            pos2(source.x, source.y + VERTICAL_ANCHOR),
            pos2(target.x, target.y - VERTICAL_ANCHOR),
        )
    };

    let mid_y = (start.y + end.y) / 2.0;
    EdgeCurve {
        points: [start, pos2(start.x, mid_y), pos2(end.x, mid_y), end],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_edges_run_bottom_to_top() {
        let curve = edge_curve(EdgeKind::Student, pos2(600.0, 100.0), 0, pos2(200.0, 280.0), 1);
        assert_eq!(
            curve.points,
            [
                pos2(600.0, 125.0),
                pos2(600.0, 190.0),
                pos2(200.0, 190.0),
                pos2(200.0, 255.0)
            ]
        );
    }

    #[test]
    fn same_generation_rivals_face_each_other() {
        let rightwards = edge_curve(EdgeKind::Rival, pos2(0.0, 280.0), 1, pos2(500.0, 280.0), 1);
        assert_eq!(rightwards.points[0], pos2(70.0, 280.0));
        assert_eq!(rightwards.points[3], pos2(430.0, 280.0));

        let leftwards = edge_curve(EdgeKind::Rival, pos2(500.0, 280.0), 1, pos2(0.0, 280.0), 1);
        assert_eq!(leftwards.points[0], pos2(430.0, 280.0));
        assert_eq!(leftwards.points[3], pos2(70.0, 280.0));
    }

    #[test]
    fn rivals_across_generations_run_vertically() {
        let curve = edge_curve(EdgeKind::Rival, pos2(0.0, 100.0), 0, pos2(0.0, 280.0), 1);
        assert_eq!(curve.points[0], pos2(0.0, 125.0));
        assert_eq!(curve.points[3], pos2(0.0, 255.0));
    }

    #[test]
    fn distance_is_measured_along_the_curve() {
        let curve = edge_curve(EdgeKind::Student, pos2(0.0, 100.0), 0, pos2(0.0, 280.0), 1);
        assert!(curve.distance_to(pos2(0.0, 190.0)) < 1e-3);
        assert!((curve.distance_to(pos2(8.0, 190.0)) - 8.0).abs() < 1e-3);
        assert!(curve.distance_to(pos2(100.0, 190.0)) > 10.0);
        assert_eq!(curve.sample(0.0), curve.points[0]);
        assert_eq!(curve.sample(1.0), curve.points[3]);
    }
}
