use eframe::egui::{Pos2, Vec2, vec2};

pub(in crate::app) const MIN_SCALE: f32 = 0.1;
pub(in crate::app) const MAX_SCALE: f32 = 4.0;
pub(in crate::app) const INITIAL_SCALE: f32 = 0.6;
pub(in crate::app) const INITIAL_PAN_INSET: f32 = 600.0;
pub(in crate::app) const WHEEL_SENSITIVITY: f32 = 0.001;
pub(in crate::app) const BUTTON_ZOOM_STEP: f32 = 0.1;

/// Scale and pan of the canvas. Screen positions are canvas-local:
/// `screen = world * scale + pan`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ViewportController {
    scale: f32,
    pan: Vec2,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            scale: INITIAL_SCALE,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewportController {
    pub(in crate::app) fn new(scale: f32, pan: Vec2) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            pan,
        }
    }

    pub(in crate::app) fn centered_for(width: f32) -> Self {
        Self::new(INITIAL_SCALE, vec2(width / 2.0 - INITIAL_PAN_INSET, 0.0))
    }

    pub(in crate::app) fn scale(&self) -> f32 {
        self.scale
    }

    pub(in crate::app) fn pan(&self) -> Vec2 {
        self.pan
    }

    pub(in crate::app) fn world_to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.scale + self.pan).to_pos2()
    }

    pub(in crate::app) fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.pan) / self.scale).to_pos2()
    }

    pub(in crate::app) fn zoom_at(&mut self, cursor: Pos2, delta: f32) {
        let world = self.screen_to_world(cursor);
        let scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);

        self.scale = scale;
        self.pan = cursor.to_vec2() - world.to_vec2() * scale;
    }

    pub(in crate::app) fn wheel_zoom(&mut self, cursor: Pos2, wheel_dy: f32) {
        self.zoom_at(cursor, -wheel_dy * WHEEL_SENSITIVITY);
    }

    pub(in crate::app) fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub(in crate::app) fn step_scale(&mut self, delta: f32) {
        self.scale = (self.scale + delta).clamp(MIN_SCALE, MAX_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;
    use proptest::prelude::*;

    use super::*;

    fn close(a: Pos2, b: Pos2) -> bool {
        let tolerance = 1e-3 * (1.0 + a.x.abs().max(a.y.abs()));
        (a - b).length() <= tolerance
    }

    #[test]
    fn initial_centering_matches_container() {
        let viewport = ViewportController::centered_for(1600.0);
        assert_eq!(viewport.scale(), 0.6);
        assert_eq!(viewport.pan(), vec2(200.0, 0.0));
    }

    #[test]
    fn transforms_invert_each_other() {
        let viewport = ViewportController::new(1.5, vec2(-40.0, 25.0));
        let world = pos2(123.0, -456.0);
        let screen = viewport.world_to_screen(world);

        assert_eq!(screen, pos2(123.0 * 1.5 - 40.0, -456.0 * 1.5 + 25.0));
        assert!(close(viewport.screen_to_world(screen), world));
    }

    #[test]
    fn panning_is_unbounded() {
        let mut viewport = ViewportController::default();
        for _ in 0..1000 {
            viewport.pan_by(vec2(1e4, -1e4));
        }
        assert_eq!(viewport.pan(), vec2(1e7, -1e7));
    }

    #[test]
    fn toolbar_steps_share_the_clamp() {
        let mut viewport = ViewportController::default();
        for _ in 0..20 {
            viewport.step_scale(-BUTTON_ZOOM_STEP);
        }
        assert_eq!(viewport.scale(), MIN_SCALE);

        for _ in 0..100 {
            viewport.step_scale(BUTTON_ZOOM_STEP);
        }
        assert_eq!(viewport.scale(), MAX_SCALE);
    }

    #[test]
    fn wheel_down_zooms_out() {
        let mut viewport = ViewportController::new(1.0, Vec2::ZERO);
        viewport.wheel_zoom(pos2(100.0, 100.0), 100.0);
        assert!((viewport.scale() - 0.9).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn zoom_keeps_cursor_anchored(
            scale in MIN_SCALE..MAX_SCALE,
            pan_x in -5000.0f32..5000.0,
            pan_y in -5000.0f32..5000.0,
            cursor_x in 0.0f32..2000.0,
            cursor_y in 0.0f32..1200.0,
            delta in -5.0f32..5.0,
        ) {
            let mut viewport = ViewportController::new(scale, vec2(pan_x, pan_y));
            let cursor = pos2(cursor_x, cursor_y);
            let before = viewport.screen_to_world(cursor);

            viewport.zoom_at(cursor, delta);

            let after = viewport.screen_to_world(cursor);
            prop_assert!(close(before, after), "before {:?} after {:?}", before, after);
        }

        #[test]
        fn wheel_never_leaves_clamp(deltas in prop::collection::vec(-3000.0f32..3000.0, 1..60)) {
            let mut viewport = ViewportController::default();
            for wheel_dy in deltas {
                viewport.wheel_zoom(pos2(320.0, 240.0), wheel_dy);
                prop_assert!(viewport.scale() >= MIN_SCALE);
                prop_assert!(viewport.scale() <= MAX_SCALE);
            }
        }
    }
}
