use eframe::egui::{self, CursorIcon, Pos2, Rect, Ui, vec2};

use crate::lineage::{LineageGraph, ResolvedEdge};

use super::super::highlight::{NODE_HEIGHT, NODE_WIDTH, edge_curve};
use super::super::interaction::{PointerMode, PressTarget};
use super::super::{RenderGraph, ViewModel};

const EDGE_HIT_TOLERANCE: f32 = 10.0;

fn card_contains(center: Pos2, world: Pos2) -> bool {
    Rect::from_center_size(center, vec2(NODE_WIDTH, NODE_HEIGHT)).contains(world)
}

pub(in crate::app) fn node_at(positions: &[Pos2], selected: Option<usize>, world: Pos2) -> Option<usize> {
    if let Some(selected) = selected
        && positions
            .get(selected)
            .is_some_and(|&center| card_contains(center, world))
    {
        return Some(selected);
    }

    positions
        .iter()
        .rposition(|&center| card_contains(center, world))
}

pub(in crate::app) fn clickable_edge_at(
    graph: &LineageGraph,
    cache: &RenderGraph,
    selected: Option<usize>,
    world: Pos2,
) -> Option<ResolvedEdge> {
    let selected = selected?;

    cache
        .edges
        .iter()
        .filter(|edge| edge.touches(selected))
        .map(|edge| {
            let curve = edge_curve(
                graph.edges[edge.edge].kind,
                cache.positions[edge.source],
                graph.nodes[edge.source].generation,
                cache.positions[edge.target],
                graph.nodes[edge.target].generation,
            );
            (*edge, curve.distance_to(world))
        })
        .filter(|(_, distance)| *distance <= EDGE_HIT_TOLERANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(edge, _)| edge)
}

fn press_target(graph: &LineageGraph, cache: &RenderGraph, selected: Option<usize>, world: Pos2) -> PressTarget {
    if let Some(node) = node_at(&cache.positions, selected, world) {
        PressTarget::Node(node)
    } else if let Some(edge) = clickable_edge_at(graph, cache, selected, world) {
        PressTarget::Edge(edge)
    } else {
        PressTarget::Canvas
    }
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.contains_pointer() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let cursor = (pointer - rect.min).to_pos2();

        self.viewport.wheel_zoom(cursor, -scroll);
    }

    pub(in crate::app) fn handle_graph_pointer(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        let (pressed, released, primary_down, latest) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.primary_down(),
                input.pointer.latest_pos(),
            )
        });
        let local = latest.map(|pos| (pos - rect.min).to_pos2());

        let Some(cache) = self.graph_cache.as_mut() else {
            return;
        };
        let selected = self.router.focus().selected;

        if pressed
            && response.contains_pointer()
            && let Some(screen) = local
        {
            let world = self.viewport.screen_to_world(screen);
            let target = press_target(&self.graph, cache, selected, world);
            self.router
                .pointer_down(screen, target, &self.viewport, &cache.positions);
        }

        if !self.router.is_idle()
            && let Some(screen) = local
        {
            self.router
                .pointer_move(screen, &mut self.viewport, &mut cache.positions);
        }

        if released || (!self.router.is_idle() && !primary_down) {
            self.router.pointer_up();
        }

        let hover_world = local
            .filter(|_| response.contains_pointer())
            .map(|screen| self.viewport.screen_to_world(screen));
        let hovered = match self.router.mode() {
            PointerMode::DraggingNode { node, .. } => Some(node),
            PointerMode::PanningCanvas { .. } => self.router.focus().hovered,
            PointerMode::Idle => {
                hover_world.and_then(|world| node_at(&cache.positions, selected, world))
            }
        };
        self.router.set_hovered(hovered);

        let cursor = match self.router.mode() {
            PointerMode::DraggingNode { .. } | PointerMode::PanningCanvas { .. } => {
                Some(CursorIcon::Grabbing)
            }
            PointerMode::Idle => hover_world.map(|world| {
                let selected = self.router.focus().selected;
                match press_target(&self.graph, cache, selected, world) {
                    PressTarget::Node(_) | PressTarget::Edge(_) => CursorIcon::PointingHand,
                    PressTarget::Canvas => CursorIcon::Grab,
                }
            }),
        };
        if let Some(cursor) = cursor {
            ui.output_mut(|output| output.cursor_icon = cursor);
        }
    }
}
