use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, pos2};

use crate::lineage::NodeKind;

use super::viewport::ViewportController;

pub(super) const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(248, 250, 252);
pub(super) const SELECTION_RING: Color32 = Color32::from_rgb(59, 130, 246);
pub(super) const SEARCH_RING: Color32 = Color32::from_rgb(14, 165, 233);
pub(super) const EDGE_LABEL: Color32 = Color32::from_rgb(30, 41, 59);
pub(super) const PLACEHOLDER_FILL: Color32 = Color32::from_rgb(243, 244, 246);
pub(super) const PLACEHOLDER_STROKE: Color32 = Color32::from_rgb(209, 213, 219);
pub(super) const PLACEHOLDER_TEXT: Color32 = Color32::from_rgb(156, 163, 175);

const DOT_SPACING: f32 = 20.0;
const DOT_COLOR: Color32 = Color32::from_rgb(203, 213, 225);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct NodePalette {
    pub(super) fill: Color32,
    pub(super) stroke: Color32,
    pub(super) text: Color32,
    pub(super) subtext: Color32,
}

pub(super) fn node_palette(kind: NodeKind) -> NodePalette {
    let dark = Color32::from_rgb(15, 23, 42);
    let muted = Color32::from_rgb(107, 114, 128);
    let (fill, stroke) = match kind {
        NodeKind::Root => (Color32::from_rgb(229, 231, 235), Color32::from_rgb(156, 163, 175)),
        NodeKind::Cynic => (Color32::from_rgb(231, 229, 228), Color32::from_rgb(168, 162, 158)),
        NodeKind::Academy => (Color32::from_rgb(254, 252, 232), Color32::from_rgb(253, 224, 71)),
        NodeKind::Stoic => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(96, 165, 250)),
        NodeKind::Rival => (Color32::from_rgb(254, 242, 242), Color32::from_rgb(252, 165, 165)),
        NodeKind::Roman => (Color32::from_rgb(243, 232, 255), Color32::from_rgb(192, 132, 252)),
        NodeKind::Modern => (Color32::from_rgb(209, 250, 229), Color32::from_rgb(52, 211, 153)),
        NodeKind::Renegade => {
            return NodePalette {
                fill: Color32::from_rgb(55, 65, 81),
                stroke: Color32::from_rgb(17, 24, 39),
                text: Color32::WHITE,
                subtext: Color32::from_rgb(209, 213, 219),
            };
        }
        NodeKind::Other => (Color32::WHITE, Color32::from_rgb(209, 213, 219)),
    };

    NodePalette {
        fill,
        stroke,
        text: dark,
        subtext: muted,
    }
}

impl NodePalette {
    pub(super) fn faded(self, opacity: f32) -> Self {
        Self {
            fill: self.fill.gamma_multiply(opacity),
            stroke: self.stroke.gamma_multiply(opacity),
            text: self.text.gamma_multiply(opacity),
            subtext: self.subtext.gamma_multiply(opacity),
        }
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, viewport: &ViewportController) {
    painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);

    let step = DOT_SPACING * viewport.scale();
    if step < 6.0 {
        return;
    }

    let origin = rect.min + viewport.pan();
    let radius = (viewport.scale()).clamp(0.6, 1.4);
    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
        while x < rect.right() {
            painter.circle_filled(pos2(x, y), radius, DOT_COLOR);
            x += step;
        }
        y += step;
    }
}

pub(super) fn polyline_visible(rect: Rect, points: &[Pos2]) -> bool {
    let bounds = Rect::from_points(points);
    rect.expand(4.0).intersects(bounds)
}

pub(super) fn draw_polyline(painter: &Painter, points: Vec<Pos2>, stroke: Stroke, dashed: bool, scale: f32) {
    if dashed {
        let dash = (5.0 * scale).max(1.0);
        painter.extend(Shape::dashed_line(&points, stroke, dash, dash));
    } else {
        painter.add(Shape::line(points, stroke));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renegades_invert_the_text_colour() {
        assert_eq!(node_palette(NodeKind::Renegade).text, Color32::WHITE);
        assert_ne!(node_palette(NodeKind::Stoic).text, Color32::WHITE);
    }

    #[test]
    fn offscreen_polylines_are_culled() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(polyline_visible(rect, &[pos2(-50.0, 50.0), pos2(150.0, 50.0)]));
        assert!(!polyline_visible(rect, &[pos2(200.0, 200.0), pos2(300.0, 250.0)]));
    }
}
