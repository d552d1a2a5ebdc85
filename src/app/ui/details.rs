use eframe::egui::{self, Align, Align2, Context, Layout, Rect, RichText, Ui, vec2};

use crate::lineage::ResolvedEdge;

use super::super::ViewModel;

const PANEL_WIDTH: f32 = 340.0;
const PORTRAIT_MAX_HEIGHT: f32 = 260.0;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ctx: &Context, canvas: Rect) {
        let Some(selected) = self.router.focus().selected else {
            return;
        };
        if selected >= self.graph.node_count() {
            return;
        }

        egui::Window::new("details")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .fixed_size(vec2(PANEL_WIDTH, 0.0))
            .anchor(Align2::RIGHT_TOP, vec2(-12.0, canvas.top() + 12.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height((canvas.height() - 48.0).max(120.0))
                    .show(ui, |ui| self.draw_details_body(ui, selected));
            });
    }

    fn draw_details_body(&mut self, ui: &mut Ui, selected: usize) {
        let node = &self.graph.nodes[selected];

        ui.horizontal(|ui| {
            ui.heading(node.label.as_str());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("✕").on_hover_text("Close").clicked() {
                    self.router.select(None);
                }
            });
        });
        ui.horizontal(|ui| {
            ui.label(RichText::new(node.kind.label().to_uppercase()).small().strong());
            if !node.date.is_empty() {
                ui.label(RichText::new(node.date.as_str()).weak());
            }
        });
        if let Some(wiki) = node.wiki.as_deref() {
            ui.hyperlink_to("Read on Wikipedia", wiki);
        }

        if let Some(url) = self
            .portrait
            .as_ref()
            .filter(|portrait| portrait.node == selected)
            .and_then(|portrait| portrait.url.as_deref())
        {
            ui.add_space(6.0);
            ui.add(
                egui::Image::new(url)
                    .max_width(PANEL_WIDTH)
                    .max_height(PORTRAIT_MAX_HEIGHT)
                    .corner_radius(6.0),
            );
        } else if self.portrait_rx.is_some() {
            ui.spinner();
        }

        ui.separator();
        if node.sections.is_empty() {
            match node.description.as_deref() {
                Some(description) => {
                    ui.label(description);
                }
                None => {
                    ui.label(RichText::new("No notes for this entry.").weak());
                }
            }
        } else {
            for section in &node.sections {
                ui.label(RichText::new(section.title.as_str()).strong());
                ui.label(section.content.as_str());
                ui.add_space(6.0);
            }
        }

        let connections = self
            .graph
            .resolved_edges()
            .into_iter()
            .filter(|edge| edge.touches(selected))
            .collect::<Vec<_>>();
        if connections.is_empty() {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Connections").strong());
        let mut follow: Option<ResolvedEdge> = None;
        for edge in connections {
            let Some(other) = edge.other_end(selected) else {
                continue;
            };
            let record = &self.graph.edges[edge.edge];
            let direction = if edge.source == selected { "to" } else { "from" };
            let text = format!(
                "{} {direction} {}",
                record.kind.label(),
                self.graph.nodes[other].label
            );
            if ui.link(text).clicked() {
                follow = Some(edge);
            }
        }

        if let Some(edge) = follow {
            self.router.follow_edge(edge);
        }
    }
}
