use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{analytics, compare, detail, panels, rankings};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AdmitLensApp {
    pub state: AppState,
}

impl Default for AdmitLensApp {
    fn default() -> Self {
        let mut state = AppState::default();
        state.load_initial();
        Self { state }
    }
}

impl eframe::App for AdmitLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu + tab strip ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                panels::no_dataset_screen(ui, &mut self.state);
                return;
            }
            match self.state.tab {
                Tab::Rankings => rankings::show(ui, &mut self.state),
                Tab::Detail => detail::show(ui, &mut self.state),
                Tab::Compare => compare::show(ui, &mut self.state),
                Tab::Analytics => analytics::show(ui, &mut self.state),
            }
        });
    }
}
