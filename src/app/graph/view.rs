use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::util::{initial, truncate_label};

use super::super::highlight::{NODE_HEIGHT, NODE_WIDTH, edge_curve, edge_focus, edge_style, node_dimmed};
use super::super::render_utils::{
    EDGE_LABEL, PLACEHOLDER_FILL, PLACEHOLDER_STROKE, PLACEHOLDER_TEXT, SEARCH_RING, SELECTION_RING,
    draw_background, draw_polyline, node_palette, polyline_visible,
};
use super::super::viewport::ViewportController;
use super::super::{SearchMatchCache, ViewModel};

const LABEL_CHARS: usize = 18;
const SELECTED_GROWTH: f32 = 1.1;
const DIMMED_OPACITY: f32 = 0.4;
const AVATAR_RADIUS: f32 = 20.0;
const AVATAR_INSET: f32 = 10.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

#[derive(Clone, Copy)]
struct CardState {
    selected: bool,
    dimmed: bool,
    search_match: bool,
}

impl ViewModel {
    fn cached_pseudo_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        if self.router.focus().selected.is_some() {
            return None;
        }

        let search_query = self.search.trim();
        if search_query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == search_query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| fuzzy_match_score(&matcher, &node.label, search_query).is_some())
            .map(|(index, _)| index)
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: search_query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        if !self.viewport_initialized {
            self.viewport = ViewportController::centered_for(rect.width());
            self.viewport_initialized = true;
        }
        if self.router.is_idle() && self.needs_layout(rect.width()) {
            self.rebuild_layout(rect.width());
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pointer(ui, rect, &response);

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, &self.viewport);

        let pseudo_matches = self.cached_pseudo_matches();
        let Some(cache) = self.graph_cache.as_ref() else {
            return;
        };

        let viewport = self.viewport;
        let scale = viewport.scale();
        let focus = self.router.focus();
        let to_screen = |world: Pos2| rect.min + viewport.world_to_screen(world).to_vec2();

        for edge in &cache.edges {
            let record = &self.graph.edges[edge.edge];
            let curve = edge_curve(
                record.kind,
                cache.positions[edge.source],
                self.graph.nodes[edge.source].generation,
                cache.positions[edge.target],
                self.graph.nodes[edge.target].generation,
            );
            let points = curve.polyline().into_iter().map(to_screen).collect::<Vec<_>>();
            if !polyline_visible(rect, &points) {
                continue;
            }

            let state = edge_focus(&focus, edge);
            let style = edge_style(record.kind, state);
            let stroke = Stroke::new(style.width * scale, style.color.gamma_multiply(style.opacity));
            draw_polyline(&painter, points, stroke, style.dashed, scale);

            if state.highlighted
                && let Some(label) = record.label.as_deref()
            {
                painter.text(
                    to_screen(curve.sample(0.5)),
                    Align2::CENTER_CENTER,
                    label,
                    FontId::proportional(12.0 * scale),
                    EDGE_LABEL,
                );
            }
        }

        let draw_order = (0..cache.positions.len())
            .filter(|&index| Some(index) != focus.selected)
            .chain(focus.selected.filter(|&index| index < cache.positions.len()));
        for index in draw_order {
            let state = CardState {
                selected: focus.selected == Some(index),
                dimmed: node_dimmed(&focus, index),
                search_match: pseudo_matches
                    .as_ref()
                    .is_some_and(|matches| matches.contains(&index)),
            };
            self.draw_card(ui, &painter, index, to_screen(cache.positions[index]), scale, state);
        }
    }

    fn draw_card(&self, ui: &Ui, painter: &Painter, index: usize, center: Pos2, scale: f32, state: CardState) {
        let growth = if state.selected { SELECTED_GROWTH } else { 1.0 };
        let card = Rect::from_center_size(center, vec2(NODE_WIDTH, NODE_HEIGHT) * scale * growth);
        if !painter.clip_rect().intersects(card.expand(6.0 * scale)) {
            return;
        }

        let node = &self.graph.nodes[index];
        let mut palette = node_palette(node.kind);
        if state.dimmed {
            palette = palette.faded(DIMMED_OPACITY);
        }

        let radius = 8.0 * scale;
        painter.rect(
            card,
            radius,
            palette.fill,
            Stroke::new(2.0 * scale, palette.stroke),
            StrokeKind::Inside,
        );

        if state.search_match {
            painter.rect_stroke(
                card.expand(3.0 * scale),
                radius + 3.0 * scale,
                Stroke::new(2.0 * scale, SEARCH_RING),
                StrokeKind::Outside,
            );
        }

        let avatar_radius = AVATAR_RADIUS * scale * growth;
        let avatar_center = card.left_center() + vec2(AVATAR_INSET * scale + avatar_radius, 0.0);
        match self.thumbnails.get(&index) {
            Some(url) => {
                let avatar = Rect::from_center_size(avatar_center, Vec2::splat(avatar_radius * 2.0));
                let tint = if state.dimmed {
                    egui::Color32::WHITE.gamma_multiply(DIMMED_OPACITY)
                } else {
                    egui::Color32::WHITE
                };
                egui::Image::new(url.as_str())
                    .corner_radius(avatar_radius)
                    .tint(tint)
                    .paint_at(ui, avatar);
            }
            None => {
                painter.circle(
                    avatar_center,
                    avatar_radius,
                    PLACEHOLDER_FILL,
                    Stroke::new(1.0 * scale, PLACEHOLDER_STROKE),
                );
                painter.text(
                    avatar_center,
                    Align2::CENTER_CENTER,
                    initial(&node.label),
                    FontId::proportional(16.0 * scale),
                    PLACEHOLDER_TEXT,
                );
            }
        }

        let text_left = avatar_center.x + avatar_radius + 8.0 * scale;
        painter.text(
            Pos2::new(text_left, center.y - 8.0 * scale),
            Align2::LEFT_CENTER,
            truncate_label(&node.label, LABEL_CHARS),
            FontId::proportional(13.0 * scale * growth),
            palette.text,
        );
        if !node.date.is_empty() {
            painter.text(
                Pos2::new(text_left, center.y + 10.0 * scale),
                Align2::LEFT_CENTER,
                node.date.as_str(),
                FontId::proportional(10.0 * scale * growth),
                palette.subtext,
            );
        }

        if state.selected {
            painter.rect_stroke(
                card.expand(4.0 * scale),
                radius + 4.0 * scale,
                Stroke::new(3.0 * scale, SELECTION_RING),
                StrokeKind::Outside,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzzy_matching_ignores_case() {
        let matcher = SkimMatcherV2::default();
        assert!(fuzzy_match_score(&matcher, "Marcus Aurelius", "aurel").is_some());
        assert!(fuzzy_match_score(&matcher, "Marcus Aurelius", "MRCS").is_some());
        assert!(fuzzy_match_score(&matcher, "Zeno of Citium", "seneca").is_none());
    }
}
