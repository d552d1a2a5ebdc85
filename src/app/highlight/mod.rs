use eframe::egui::Color32;

use crate::lineage::{EdgeKind, ResolvedEdge};

use super::interaction::FocusState;

mod geometry;

pub(super) use self::geometry::{NODE_HEIGHT, NODE_WIDTH, edge_curve};

const RIVAL_EDGE: Color32 = Color32::from_rgb(252, 165, 165);
const RIVAL_EDGE_HIGHLIGHT: Color32 = Color32::from_rgb(239, 68, 68);
const EDGE: Color32 = Color32::from_rgb(203, 213, 225);
const EDGE_HIGHLIGHT: Color32 = Color32::from_rgb(59, 130, 246);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct EdgeFocus {
    pub(super) highlighted: bool,
    pub(super) clickable: bool,
    pub(super) dimmed: bool,
}

pub(super) fn edge_focus(focus: &FocusState, edge: &ResolvedEdge) -> EdgeFocus {
    let touches = |node: Option<usize>| node.is_some_and(|node| edge.touches(node));

    let clickable = touches(focus.selected);
    let highlighted = clickable || touches(focus.hovered);

    EdgeFocus {
        highlighted,
        clickable,
        dimmed: focus.is_active() && !highlighted,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct EdgeStyle {
    pub(super) color: Color32,
    pub(super) width: f32,
    pub(super) opacity: f32,
    pub(super) dashed: bool,
}

pub(super) fn edge_style(kind: EdgeKind, focus: EdgeFocus) -> EdgeStyle {
    let rival = kind == EdgeKind::Rival;
    let color = match (rival, focus.highlighted) {
        (true, true) => RIVAL_EDGE_HIGHLIGHT,
        (true, false) => RIVAL_EDGE,
        (false, true) => EDGE_HIGHLIGHT,
        (false, false) => EDGE,
    };

    let width = if focus.highlighted {
        3.0
    } else if rival {
        1.5
    } else {
        2.0
    };

    EdgeStyle {
        color,
        width,
        opacity: if focus.highlighted && !focus.dimmed { 1.0 } else { 0.6 },
        dashed: kind.is_dashed(),
    }
}

pub(super) fn node_dimmed(focus: &FocusState, node: usize) -> bool {
    focus
        .hovered
        .is_some_and(|hovered| hovered != node && focus.selected != Some(node))
}
