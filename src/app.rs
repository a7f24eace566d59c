use eframe::egui;

use drug_ratio_viewer::state::AppState;

use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DrugRatioApp {
    pub state: AppState,
}

impl eframe::App for DrugRatioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drop the cached texture of a histogram that was replaced.
        if let Some(uri) = self.state.take_retired_image() {
            ctx.forget_image(&uri);
        }

        // ---- Bottom panel: status line ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Central panel: buttons, analysis, chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::controls(ui, &mut self.state);
            panels::results(ui, &self.state);
        });

        panels::notice_window(ctx, &mut self.state);
    }
}
