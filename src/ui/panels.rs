use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::query::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the site and payload-range controls.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No launch data loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let sites = dataset.sites.clone();
    let (min_bound, max_bound) = dataset.payload_bounds;

    ui.strong("Launch site");
    let current = state.selection.site.clone();
    egui::ComboBox::from_id_salt("site_select")
        .selected_text(current.label().to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, "All")
                .clicked()
            {
                state.set_site(SiteSelection::All);
            }
            for site in &sites {
                let selected = matches!(&current, SiteSelection::Site(s) if s == site);
                if ui.selectable_label(selected, site).clicked() {
                    state.set_site(SiteSelection::Site(site.clone()));
                }
            }
        });

    ui.separator();

    ui.strong("Payload range (kg)");
    let mut lo = state.selection.payload.min;
    let mut hi = state.selection.payload.max;
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, min_bound..=max_bound).text("min"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, min_bound..=max_bound).text("max"))
        .changed();
    if lo_changed || hi_changed {
        // The pair is normalized to ascending before it reaches the queries.
        state.set_payload_range(lo, hi);
    }
    if ui.small_button("Reset range").clicked() {
        state.set_payload_range(min_bound, max_bound);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} in view",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records across {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}
