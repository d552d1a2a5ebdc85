use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use eframe::egui::{self, Context, Pos2};
use log::error;

use crate::enrich::{ImageLookup, Portrait};
use crate::layout::LayoutConfig;
use crate::lineage::{DatasetSource, LineageGraph, ResolvedEdge, load_dataset};

mod graph;
mod highlight;
mod interaction;
mod render_utils;
mod ui;
mod viewport;

use self::interaction::InteractionRouter;
use self::viewport::ViewportController;

pub struct LineageApp {
    source: DatasetSource,
    layout_config: LayoutConfig,
    lookup: Option<Arc<dyn ImageLookup>>,
    state: AppState,
}

enum AppState {
    Loading {
        rx: Receiver<Result<LineageGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: LineageGraph,
    layout_config: LayoutConfig,
    viewport: ViewportController,
    viewport_initialized: bool,
    router: InteractionRouter,
    graph_cache: Option<RenderGraph>,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    lookup: Option<Arc<dyn ImageLookup>>,
    thumbnails: HashMap<usize, String>,
    thumbnail_rx: Option<Receiver<HashMap<usize, String>>>,
    portrait: Option<Portrait>,
    portrait_rx: Option<Receiver<Portrait>>,
    last_selected: Option<usize>,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<usize>>,
}

struct RenderGraph {
    positions: Vec<Pos2>,
    edges: Vec<ResolvedEdge>,
    layout_width: f32,
}

impl LineageApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        source: DatasetSource,
        layout_config: LayoutConfig,
        lookup: Option<Arc<dyn ImageLookup>>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let state = Self::start_load(source.clone());
        Self {
            source,
            layout_config,
            lookup,
            state,
        }
    }

    fn spawn_load(source: DatasetSource) -> Receiver<Result<LineageGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_dataset(&source).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: DatasetSource) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }
}

impl eframe::App for LineageApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => {
                        transition = Some(match result {
                            Ok(graph) => AppState::Ready(Box::new(ViewModel::new(
                                graph,
                                self.layout_config,
                                self.lookup.clone(),
                            ))),
                            Err(error) => {
                                error!("failed to load {}: {error}", self.source.describe());
                                AppState::Error(error)
                            }
                        });
                    }
                    Err(mpsc::TryRecvError::Empty) => ctx.request_repaint(),
                    Err(mpsc::TryRecvError::Disconnected) => {
                        transition = Some(AppState::Error(
                            "Background load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading lineage...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the lineage dataset");
                    ui.add_space(6.0);
                    ui.label(format!("source: {}", self.source.describe()));
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.source.clone()));
                    }
                });
            }
            AppState::Ready(model) => model.show(ctx),
        }

        if let Some(next_state) = transition {
            self.state = next_state;
        }
    }
}
