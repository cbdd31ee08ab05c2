use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, sections};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct JobAnalyzerApp {
    pub state: AppState,
}

impl JobAnalyzerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for JobAnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: section navigation ----
        egui::SidePanel::left("section_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: current section ----
        egui::CentralPanel::default().show(ctx, |ui| {
            sections::central_panel(ui, &mut self.state);
        });
    }
}
