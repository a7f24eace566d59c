use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use drug_ratio_viewer::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – action buttons
// ---------------------------------------------------------------------------

/// Render the greeting and the three action buttons.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(12.0);
        ui.label(RichText::new("Welcome to the Drug Ratio Viewer!").size(18.0));
        ui.add_space(12.0);

        if ui.button("Gather Data").clicked() {
            state.gather_data();
        }
        if ui.button("Analyze Data").clicked() {
            state.analyze();
        }
        if ui.button("Visualize Data").clicked() {
            state.visualize();
        }
        if ui.small_button("Collaboration").clicked() {
            state.remind_collaboration();
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – analysis text and histogram
// ---------------------------------------------------------------------------

pub fn results(ui: &mut Ui, state: &AppState) {
    ui.add_space(8.0);

    if let Some(msg) = &state.status_message {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(msg).color(Color32::RED));
        });
    }

    if let Some(text) = &state.analysis {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(text).size(15.0));
        });
    }

    let Some(hist) = &state.histogram else {
        return;
    };

    ui.separator();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add(
                egui::Image::from_bytes(hist.uri.clone(), hist.png.clone())
                    .max_width(ui.available_width())
                    .shrink_to_fit(),
            );
        });
}

// ---------------------------------------------------------------------------
// Bottom bar
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if state.dataset.is_empty() {
            ui.label(format!("No data loaded ({})", state.data_path.display()));
        } else {
            ui.label(format!(
                "{} rows loaded, {} distinct drugs",
                state.dataset.len(),
                state.dataset.distinct_keys()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Notice window
// ---------------------------------------------------------------------------

/// Show the pending notice, if any, until the user presses OK.
pub fn notice_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice else {
        return;
    };

    egui::Window::new(notice.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(notice.body());
            ui.add_space(6.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    state.dismiss_notice();
                }
            });
        });
}
