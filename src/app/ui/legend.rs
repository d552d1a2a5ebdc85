use eframe::egui::{self, Align2, Color32, Context, RichText, Sense, Stroke, Ui, vec2};

use crate::lineage::{EdgeKind, NodeKind};

use super::super::ViewModel;
use super::super::highlight::{EdgeFocus, edge_style};
use super::super::render_utils::{draw_polyline, node_palette};

const LEGEND_NODES: [NodeKind; 8] = [
    NodeKind::Root,
    NodeKind::Cynic,
    NodeKind::Academy,
    NodeKind::Stoic,
    NodeKind::Rival,
    NodeKind::Roman,
    NodeKind::Modern,
    NodeKind::Renegade,
];

const LEGEND_EDGES: [EdgeKind; 4] = [
    EdgeKind::Student,
    EdgeKind::Rival,
    EdgeKind::Influence,
    EdgeKind::Dotted,
];

fn node_swatch(ui: &mut Ui, kind: NodeKind) {
    let palette = node_palette(kind);
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(18.0, 12.0), Sense::hover());
        ui.painter().rect(
            rect,
            3.0,
            palette.fill,
            Stroke::new(1.5, palette.stroke),
            egui::StrokeKind::Inside,
        );
        ui.label(kind.label());
    });
}

fn edge_swatch(ui: &mut Ui, kind: EdgeKind) {
    let style = edge_style(kind, EdgeFocus::default());
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(28.0, 12.0), Sense::hover());
        let stroke = Stroke::new(style.width, style.color);
        draw_polyline(
            ui.painter(),
            vec![rect.left_center(), rect.right_center()],
            stroke,
            style.dashed,
            1.0,
        );
        ui.label(kind.label());
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_legend(&self, ctx: &Context) {
        egui::Area::new(egui::Id::new("legend"))
            .anchor(Align2::LEFT_BOTTOM, vec2(12.0, -12.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(Color32::from_white_alpha(235))
                    .show(ui, |ui| {
                        ui.label(RichText::new("Schools").strong());
                        for kind in LEGEND_NODES {
                            node_swatch(ui, kind);
                        }
                        ui.add_space(4.0);
                        ui.label(RichText::new("Connections").strong());
                        for kind in LEGEND_EDGES {
                            edge_swatch(ui, kind);
                        }
                    });
            });
    }
}
