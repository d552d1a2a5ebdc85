use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

use eframe::egui::{self, Context};
use log::debug;

use crate::enrich::{ImageLookup, spawn_portrait_fetch, spawn_thumbnail_fetch, wiki_title};
use crate::layout::LayoutConfig;
use crate::lineage::LineageGraph;

use super::super::ViewModel;
use super::super::interaction::InteractionRouter;
use super::super::viewport::ViewportController;

const ENRICHMENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl ViewModel {
    pub(in crate::app) fn new(
        graph: LineageGraph,
        layout_config: LayoutConfig,
        lookup: Option<Arc<dyn ImageLookup>>,
    ) -> Self {
        let thumbnail_rx = lookup
            .as_ref()
            .and_then(|lookup| spawn_thumbnail_fetch(Arc::clone(lookup), &graph));

        Self {
            graph,
            layout_config,
            viewport: ViewportController::default(),
            viewport_initialized: false,
            router: InteractionRouter::default(),
            graph_cache: None,
            search: String::new(),
            search_match_cache: None,
            lookup,
            thumbnails: HashMap::new(),
            thumbnail_rx,
            portrait: None,
            portrait_rx: None,
            last_selected: None,
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.poll_enrichment();

        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| self.draw_toolbar(ui));

        let canvas = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui))
            .response
            .rect;

        self.draw_legend(ctx);
        self.draw_details(ctx, canvas);
        self.sync_selection();

        if self.thumbnail_rx.is_some() || self.portrait_rx.is_some() {
            ctx.request_repaint_after(ENRICHMENT_POLL_INTERVAL);
        }
    }

    fn poll_enrichment(&mut self) {
        if let Some(rx) = &self.thumbnail_rx {
            match rx.try_recv() {
                Ok(thumbnails) => {
                    debug!("received {} thumbnails", thumbnails.len());
                    self.thumbnails = thumbnails;
                    self.thumbnail_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => self.thumbnail_rx = None,
            }
        }

        if let Some(rx) = &self.portrait_rx {
            match rx.try_recv() {
                Ok(portrait) => {
                    if Some(portrait.node) == self.router.focus().selected {
                        self.portrait = Some(portrait);
                    } else {
                        debug!("discarding portrait for node {}", portrait.node);
                    }
                    self.portrait_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => self.portrait_rx = None,
            }
        }
    }

    fn sync_selection(&mut self) {
        let selected = self.router.focus().selected;
        if selected == self.last_selected {
            return;
        }

        self.last_selected = selected;
        self.portrait = None;
        self.portrait_rx = None;

        let Some(node) = selected else {
            return;
        };
        let Some(lookup) = self.lookup.as_ref() else {
            return;
        };
        let Some(title) = self.graph.nodes[node].wiki.as_deref().and_then(wiki_title) else {
            return;
        };

        self.portrait_rx = Some(spawn_portrait_fetch(Arc::clone(lookup), node, title));
    }

    pub(in crate::app) fn submit_search(&mut self) {
        if let Some(node) = self.graph.find_by_label(&self.search) {
            self.router.select(Some(node));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crate::enrich::Portrait;
    use crate::lineage::{EdgeKind, test_edge, test_node};

    use super::*;

    fn model() -> ViewModel {
        let mut zeno = test_node("zeno", 0);
        zeno.label = "Zeno of Citium".to_owned();
        let mut cleanthes = test_node("cleanthes", 1);
        cleanthes.label = "Cleanthes".to_owned();
        let graph = LineageGraph::new(
            vec![zeno, cleanthes],
            vec![test_edge("zeno", "cleanthes", EdgeKind::Student)],
        )
        .unwrap();
        ViewModel::new(graph, LayoutConfig::default(), None)
    }

    #[test]
    fn search_selects_the_first_match_only_on_submit() {
        let mut model = model();
        model.search = "  citium ".to_owned();
        assert_eq!(model.router.focus().selected, None);

        model.submit_search();
        assert_eq!(model.router.focus().selected, Some(0));

        model.search = "plato".to_owned();
        model.submit_search();
        assert_eq!(model.router.focus().selected, Some(0));

        model.search.clear();
        model.submit_search();
        assert_eq!(model.router.focus().selected, Some(0));
    }

    #[test]
    fn stale_portraits_are_discarded() {
        let mut model = model();
        model.router.select(Some(1));
        model.sync_selection();

        let (tx, rx) = mpsc::channel();
        model.portrait_rx = Some(rx);
        tx.send(Portrait {
            node: 0,
            url: Some("https://example.org/zeno.jpg".to_owned()),
        })
        .unwrap();
        model.poll_enrichment();

        assert_eq!(model.portrait, None);
        assert!(model.portrait_rx.is_none());
    }

    #[test]
    fn changing_selection_resets_the_portrait() {
        let mut model = model();
        model.router.select(Some(0));
        model.sync_selection();
        model.portrait = Some(Portrait { node: 0, url: None });

        model.router.select(Some(1));
        model.sync_selection();
        assert_eq!(model.portrait, None);
        assert_eq!(model.last_selected, Some(1));
    }
}
