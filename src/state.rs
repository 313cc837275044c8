use crate::color::SiteColors;
use crate::data::model::LaunchDataset;
use crate::data::query::{PayloadRange, Selection, SiteSelection};
use crate::view::{self, RenderInstruction};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current site + payload-range selection.
    pub selection: Selection,

    /// Chart inputs derived from the current selection (cached until the
    /// selection or dataset changes).
    pub render: Option<RenderInstruction>,

    /// Per-site colours shared by the pie and the scatter legend.
    pub site_colors: SiteColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: Selection {
                site: SiteSelection::All,
                payload: PayloadRange::new(0.0, 0.0),
            },
            render: None,
            site_colors: SiteColors::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: select all sites, open the payload
    /// range to the observed bounds, rebuild colours, recompute charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        let (lo, hi) = dataset.payload_bounds;
        self.selection = Selection {
            site: SiteSelection::All,
            payload: PayloadRange::new(lo, hi),
        };
        self.site_colors = SiteColors::new(&dataset.sites);
        self.render = Some(view::on_selection_changed(&dataset, &self.selection));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Switch the site selection and recompute.
    pub fn set_site(&mut self, site: SiteSelection) {
        self.selection.site = site;
        self.recompute();
    }

    /// Set the payload range (normalized to ascending) and recompute.
    pub fn set_payload_range(&mut self, a: f64, b: f64) {
        self.selection.payload = PayloadRange::new(a, b);
        self.recompute();
    }

    /// Number of launches in the current scatter view.
    pub fn visible_count(&self) -> usize {
        self.render
            .as_ref()
            .map(|r| r.scatter.points.len())
            .unwrap_or(0)
    }

    fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let next = view::on_selection_changed(dataset, &self.selection);
        if let Some(current) = &mut self.render {
            // A `pie: None` recompute (unrecognized selection) leaves the
            // previous pie in place; the scatter always follows.
            if next.pie.is_some() {
                current.pie = next.pie;
            }
            current.scatter = next.scatter;
        } else {
            self.render = Some(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new(1, "CCAFS LC-40", 500.0, 1).unwrap(),
            LaunchRecord::new(2, "KSC LC-39A", 2000.0, 0).unwrap(),
            LaunchRecord::new(3, "KSC LC-39A", 2500.0, 1).unwrap(),
        ])
    }

    #[test]
    fn set_dataset_opens_the_full_payload_range() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.selection.site, SiteSelection::All);
        assert_eq!(state.selection.payload, PayloadRange::new(500.0, 2500.0));
        assert_eq!(state.visible_count(), 3);
        assert!(state.render.as_ref().unwrap().pie.is_some());
    }

    #[test]
    fn narrowing_the_payload_range_shrinks_the_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_payload_range(0.0, 2200.0);
        assert_eq!(state.visible_count(), 2);
        // Unordered input is normalized.
        state.set_payload_range(2200.0, 0.0);
        assert_eq!(state.visible_count(), 2);
    }

    #[test]
    fn unrecognized_site_keeps_the_previous_pie() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let before = state.render.as_ref().unwrap().pie.clone();
        state.set_site(SiteSelection::Site("Boca Chica".to_string()));
        let render = state.render.as_ref().unwrap();
        assert_eq!(render.pie, before);
        assert_eq!(render.scatter.points.len(), 0);
    }

    #[test]
    fn selection_changes_without_a_dataset_are_inert() {
        let mut state = AppState::default();
        state.set_site(SiteSelection::Site("KSC LC-39A".to_string()));
        state.set_payload_range(0.0, 100.0);
        assert!(state.render.is_none());
        assert_eq!(state.visible_count(), 0);
    }
}
