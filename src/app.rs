use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{cards, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PrelimsApp {
    pub state: AppState,
}

impl PrelimsApp {
    /// Create the app and kick off the startup load.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut state = AppState::default();
        let ctx = cc.egui_ctx.clone();
        state.begin_load(config.data_path, move || ctx.request_repaint());
        Self { state }
    }
}

impl eframe::App for PrelimsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: question cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            cards::question_list(ui, &self.state);
        });
    }
}
