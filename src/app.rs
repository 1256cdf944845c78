use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SapreApp {
    pub state: AppState,
}

impl SapreApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SapreApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: record counts and messages ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation, filters, actions ----
        egui::SidePanel::left("side_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active page ----
        let page = self.state.page;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match page {
                    Page::Dashboard => pages::dashboard(ui, &self.state),
                    Page::Analytics => pages::analytics(ui, &self.state),
                    Page::Reports => pages::reports(ui, &self.state),
                    Page::Settings => pages::settings(ui, &mut self.state),
                });
        });

        // Export after drawing so it sees this frame's filters.
        self.state.run_pending_export();
    }
}
