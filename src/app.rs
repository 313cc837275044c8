use std::path::Path;

use eframe::egui;

use crate::data::loader;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchBoardApp {
    pub state: AppState,
}

impl Default for LaunchBoardApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl LaunchBoardApp {
    /// Load the startup dataset.  A missing or malformed file leaves the app
    /// empty with a status message so the user can pick one via File → Open.
    pub fn with_dataset(path: &Path) -> Self {
        let mut state = AppState::default();
        match loader::load_file(path) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("{} contains no launch records", path.display());
                }
                log::info!(
                    "Loaded {} launch records across {} sites from {}",
                    dataset.len(),
                    dataset.sites.len(),
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::warn!("Could not load {}: {e:#}", path.display());
                state.status_message =
                    Some(format!("No dataset loaded ({e:#}). Use File → Open…"));
            }
        }
        Self { state }
    }
}

impl eframe::App for LaunchBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection controls ----
        egui::SidePanel::left("controls_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie + scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::charts_panel(ui, &self.state);
        });
    }
}
