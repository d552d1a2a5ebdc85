use eframe::egui::{Pos2, Vec2};

use crate::lineage::ResolvedEdge;

use super::viewport::ViewportController;

const CLICK_SLOP: f32 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(in crate::app) struct FocusState {
    pub(in crate::app) selected: Option<usize>,
    pub(in crate::app) hovered: Option<usize>,
}

impl FocusState {
    pub(in crate::app) fn is_active(&self) -> bool {
        self.selected.is_some() || self.hovered.is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) enum PointerMode {
    Idle,
    DraggingNode { node: usize, grab_offset: Vec2 },
    PanningCanvas { anchor: Pos2 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum PressTarget {
    Node(usize),
    Edge(ResolvedEdge),
    Canvas,
}

#[derive(Clone, Copy, Debug)]
struct Press {
    target: PressTarget,
    origin: Pos2,
    moved: bool,
}

#[derive(Clone, Debug)]
pub(in crate::app) struct InteractionRouter {
    mode: PointerMode,
    press: Option<Press>,
    focus: FocusState,
}

impl Default for InteractionRouter {
    fn default() -> Self {
        Self {
            mode: PointerMode::Idle,
            press: None,
            focus: FocusState::default(),
        }
    }
}

impl InteractionRouter {
    pub(in crate::app) fn mode(&self) -> PointerMode {
        self.mode
    }

    pub(in crate::app) fn focus(&self) -> FocusState {
        self.focus
    }

    pub(in crate::app) fn is_idle(&self) -> bool {
        self.mode == PointerMode::Idle
    }

    pub(in crate::app) fn pointer_down(
        &mut self,
        screen: Pos2,
        target: PressTarget,
        viewport: &ViewportController,
        positions: &[Pos2],
    ) {
        self.mode = match target {
            PressTarget::Node(node) if node < positions.len() => PointerMode::DraggingNode {
                node,
                grab_offset: positions[node] - viewport.screen_to_world(screen),
            },
            _ => PointerMode::PanningCanvas { anchor: screen },
        };
        self.press = Some(Press {
            target,
            origin: screen,
            moved: false,
        });
    }

    pub(in crate::app) fn pointer_move(
        &mut self,
        screen: Pos2,
        viewport: &mut ViewportController,
        positions: &mut [Pos2],
    ) {
        if let Some(press) = self.press.as_mut()
            && press.origin.distance(screen) > CLICK_SLOP
        {
            press.moved = true;
        }

        match &mut self.mode {
            PointerMode::Idle => {}
            PointerMode::DraggingNode { node, grab_offset } => {
                if let Some(position) = positions.get_mut(*node) {
                    *position = viewport.screen_to_world(screen) + *grab_offset;
                }
            }
            PointerMode::PanningCanvas { anchor } => {
                viewport.pan_by(screen - *anchor);
                *anchor = screen;
            }
        }
    }

    pub(in crate::app) fn pointer_up(&mut self) {
        self.mode = PointerMode::Idle;

        let Some(press) = self.press.take() else {
            return;
        };
        if press.moved {
            return;
        }

        match press.target {
            PressTarget::Node(node) => self.select(Some(node)),
            PressTarget::Edge(edge) => {
                self.follow_edge(edge);
            }
            PressTarget::Canvas => {}
        }
    }

    pub(in crate::app) fn set_hovered(&mut self, hovered: Option<usize>) {
        self.focus.hovered = hovered;
    }

    pub(in crate::app) fn select(&mut self, selected: Option<usize>) {
        self.focus.selected = selected;
    }

    pub(in crate::app) fn follow_edge(&mut self, edge: ResolvedEdge) -> bool {
        let Some(next) = self
            .focus
            .selected
            .and_then(|selected| edge.other_end(selected))
        else {
            return false;
        };

        self.select(Some(next));
        true
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    fn edge(source: usize, target: usize) -> ResolvedEdge {
        ResolvedEdge {
            edge: 0,
            source,
            target,
        }
    }

    #[test]
    fn click_on_node_selects_without_moving_it() {
        let viewport = ViewportController::new(0.6, vec2(200.0, 0.0));
        let mut positions = vec![pos2(600.0, 100.0), pos2(1200.0, 280.0)];
        let before = positions.clone();
        let mut router = InteractionRouter::default();

        let press = viewport.world_to_screen(positions[1]) + vec2(10.0, 5.0);
        router.pointer_down(press, PressTarget::Node(1), &viewport, &positions);
        assert!(matches!(router.mode(), PointerMode::DraggingNode { node: 1, .. }));
        router.pointer_up();

        assert_eq!(positions, before);
        assert_eq!(router.focus().selected, Some(1));
        assert!(router.is_idle());

        let mut viewport = viewport;
        router.pointer_down(press, PressTarget::Node(1), &viewport, &positions);
        router.pointer_move(press, &mut viewport, &mut positions);
        router.pointer_up();
        assert!((positions[1] - before[1]).length() < 1e-3);
    }

    #[test]
    fn dragging_keeps_the_grab_offset_while_panned() {
        let mut viewport = ViewportController::new(2.0, vec2(300.0, -150.0));
        let mut positions = vec![pos2(100.0, 100.0)];
        let mut router = InteractionRouter::default();

        let start = viewport.world_to_screen(pos2(110.0, 90.0));
        router.pointer_down(start, PressTarget::Node(0), &viewport, &positions);
        router.pointer_move(start + vec2(40.0, 20.0), &mut viewport, &mut positions);

        assert!((positions[0] - pos2(120.0, 110.0)).length() < 1e-3);
        assert_eq!(viewport.pan(), vec2(300.0, -150.0));

        router.pointer_up();
        assert_eq!(router.focus().selected, None);
        assert!(router.is_idle());
    }

    #[test]
    fn panning_follows_the_pointer() {
        let mut viewport = ViewportController::new(1.0, Vec2::ZERO);
        let mut positions = vec![pos2(0.0, 0.0)];
        let mut router = InteractionRouter::default();

        router.pointer_down(pos2(50.0, 50.0), PressTarget::Canvas, &viewport, &positions);
        router.pointer_move(pos2(70.0, 40.0), &mut viewport, &mut positions);
        router.pointer_move(pos2(75.0, 45.0), &mut viewport, &mut positions);

        assert_eq!(viewport.pan(), vec2(25.0, -5.0));
        assert_eq!(router.mode(), PointerMode::PanningCanvas { anchor: pos2(75.0, 45.0) });
        assert_eq!(positions[0], pos2(0.0, 0.0));

        router.pointer_up();
        assert!(router.is_idle());
    }

    #[test]
    fn canvas_click_keeps_selection() {
        let viewport = ViewportController::default();
        let mut router = InteractionRouter::default();
        router.select(Some(3));

        router.pointer_down(pos2(5.0, 5.0), PressTarget::Canvas, &viewport, &[]);
        router.pointer_up();
        assert_eq!(router.focus().selected, Some(3));
    }

    #[test]
    fn following_an_edge_toggles_between_its_ends() {
        let mut router = InteractionRouter::default();
        router.select(Some(0));

        assert!(router.follow_edge(edge(0, 1)));
        assert_eq!(router.focus().selected, Some(1));
        assert!(router.follow_edge(edge(0, 1)));
        assert_eq!(router.focus().selected, Some(0));
    }

    #[test]
    fn edges_away_from_the_selection_do_nothing() {
        let mut router = InteractionRouter::default();
        assert!(!router.follow_edge(edge(0, 1)));

        router.select(Some(2));
        assert!(!router.follow_edge(edge(0, 1)));
        assert_eq!(router.focus().selected, Some(2));
    }

    #[test]
    fn edge_click_follows_but_edge_drag_pans() {
        let mut viewport = ViewportController::new(1.0, Vec2::ZERO);
        let mut router = InteractionRouter::default();
        router.select(Some(4));

        router.pointer_down(pos2(10.0, 10.0), PressTarget::Edge(edge(4, 7)), &viewport, &[]);
        router.pointer_up();
        assert_eq!(router.focus().selected, Some(7));

        router.pointer_down(pos2(10.0, 10.0), PressTarget::Edge(edge(4, 7)), &viewport, &[]);
        router.pointer_move(pos2(60.0, 10.0), &mut viewport, &mut []);
        router.pointer_up();
        assert_eq!(router.focus().selected, Some(7));
        assert_eq!(viewport.pan(), vec2(50.0, 0.0));
    }

    #[test]
    fn hover_is_independent_of_selection() {
        let mut router = InteractionRouter::default();
        router.select(Some(1));
        router.set_hovered(Some(2));
        router.set_hovered(None);

        assert_eq!(router.focus(), FocusState { selected: Some(1), hovered: None });
        assert!(router.focus().is_active());
    }
}
