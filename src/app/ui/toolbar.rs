use eframe::egui::{self, Align, Key, Layout, RichText, Ui};

use super::super::ViewModel;
use super::super::viewport::BUTTON_ZOOM_STEP;

impl ViewModel {
    pub(in crate::app) fn draw_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Stoic lineage");
            ui.separator();
            ui.label(RichText::new("Drag to pan, scroll to zoom, click a card for details").weak());

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(format!(
                    "nodes: {}  edges: {}",
                    self.graph.node_count(),
                    self.graph.edge_count()
                ));
                ui.separator();
                if ui.button("+").on_hover_text("Zoom in").clicked() {
                    self.viewport.step_scale(BUTTON_ZOOM_STEP);
                }
                ui.label(format!("{:.0}%", self.viewport.scale() * 100.0));
                if ui.button("-").on_hover_text("Zoom out").clicked() {
                    self.viewport.step_scale(-BUTTON_ZOOM_STEP);
                }
                ui.separator();

                let find_clicked = ui.button("Find").clicked();
                let search = ui.add(
                    egui::TextEdit::singleline(&mut self.search)
                        .hint_text("Search philosophers")
                        .desired_width(220.0),
                );
                let submitted =
                    search.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));
                if find_clicked || submitted {
                    self.submit_search();
                }
            });
        });
    }
}
