use crate::data::model::{LaunchDataset, Outcome};
use crate::data::query::{self, Selection, SiteSelection, SuccessDistribution};

// ---------------------------------------------------------------------------
// Chart specs – plain data handed to the renderer
// ---------------------------------------------------------------------------

/// What a pie slice represents: a site's share of successes ("All" mode) or
/// one side of the success/failure split (single-site mode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceKey {
    Site(String),
    Outcome(Outcome),
}

impl SliceKey {
    pub fn label(&self) -> String {
        match self {
            SliceKey::Site(name) => name.clone(),
            SliceKey::Outcome(outcome) => outcome.to_string(),
        }
    }
}

/// One slice of the success pie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub key: SliceKey,
    pub count: usize,
}

/// Everything the pie region needs: ordered slices plus a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// One scatter marker: payload on x, outcome class on y, site for colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_kg: f64,
    pub outcome: Outcome,
    pub site: String,
}

/// Everything the scatter region needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

/// Derived chart inputs for one selection.  `pie: None` means the pie region
/// keeps whatever it showed before (an unrecognized site changes nothing).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    pub pie: Option<PieSpec>,
    pub scatter: ScatterSpec,
}

// ---------------------------------------------------------------------------
// Selection → RenderInstruction
// ---------------------------------------------------------------------------

/// Recompute both chart inputs for the current selection.  Pure: the hosting
/// layer invokes this on every widget change and forwards the result to the
/// renderer.
pub fn on_selection_changed(dataset: &LaunchDataset, selection: &Selection) -> RenderInstruction {
    RenderInstruction {
        pie: pie_spec(dataset, &selection.site),
        scatter: scatter_spec(dataset, selection),
    }
}

fn pie_spec(dataset: &LaunchDataset, site: &SiteSelection) -> Option<PieSpec> {
    let distribution = query::success_distribution(dataset, site)?;
    Some(match distribution {
        SuccessDistribution::BySite(counts) => PieSpec {
            title: "% of success launches by Launch Site".to_string(),
            slices: counts
                .into_iter()
                .map(|(name, count)| PieSlice {
                    key: SliceKey::Site(name),
                    count,
                })
                .collect(),
        },
        SuccessDistribution::ByOutcome(counts) => PieSpec {
            title: format!("% of successful launches for {}", site.label()),
            slices: counts
                .into_iter()
                .map(|(outcome, count)| PieSlice {
                    key: SliceKey::Outcome(outcome),
                    count,
                })
                .collect(),
        },
    })
}

fn scatter_spec(dataset: &LaunchDataset, selection: &Selection) -> ScatterSpec {
    let indices = query::payload_sample(dataset, &selection.site, &selection.payload);
    let points = indices
        .into_iter()
        .map(|i| {
            let rec = &dataset.records[i];
            ScatterPoint {
                payload_kg: rec.payload_mass_kg,
                outcome: rec.outcome,
                site: rec.site.clone(),
            }
        })
        .collect();

    let title = match &selection.site {
        SiteSelection::All => "Success vs. payload mass for all launch sites".to_string(),
        SiteSelection::Site(name) => format!("Success vs. payload mass for {name}"),
    };

    ScatterSpec { title, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;
    use crate::data::query::PayloadRange;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new(1, "CCAFS LC-40", 500.0, 1).unwrap(),
            LaunchRecord::new(2, "KSC LC-39A", 2000.0, 0).unwrap(),
            LaunchRecord::new(3, "KSC LC-39A", 2500.0, 1).unwrap(),
        ])
    }

    fn selection(site: SiteSelection, min: f64, max: f64) -> Selection {
        Selection {
            site,
            payload: PayloadRange::new(min, max),
        }
    }

    #[test]
    fn all_mode_produces_site_slices_and_title() {
        let ds = dataset();
        let render = on_selection_changed(&ds, &selection(SiteSelection::All, 0.0, 3000.0));
        let pie = render.pie.unwrap();
        assert_eq!(pie.title, "% of success launches by Launch Site");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice {
                    key: SliceKey::Site("CCAFS LC-40".to_string()),
                    count: 1
                },
                PieSlice {
                    key: SliceKey::Site("KSC LC-39A".to_string()),
                    count: 1
                },
            ]
        );
        assert_eq!(render.scatter.title, "Success vs. payload mass for all launch sites");
        assert_eq!(render.scatter.points.len(), 3);
    }

    #[test]
    fn single_site_mode_produces_outcome_slices_and_title() {
        let ds = dataset();
        let site = SiteSelection::Site("KSC LC-39A".to_string());
        let render = on_selection_changed(&ds, &selection(site, 0.0, 3000.0));
        let pie = render.pie.unwrap();
        assert_eq!(pie.title, "% of successful launches for KSC LC-39A");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice {
                    key: SliceKey::Outcome(Outcome::Failure),
                    count: 1
                },
                PieSlice {
                    key: SliceKey::Outcome(Outcome::Success),
                    count: 1
                },
            ]
        );
        assert_eq!(render.scatter.title, "Success vs. payload mass for KSC LC-39A");
        assert_eq!(render.scatter.points.len(), 2);
    }

    #[test]
    fn scatter_points_keep_site_identity_for_colour_coding() {
        let ds = dataset();
        let render = on_selection_changed(&ds, &selection(SiteSelection::All, 0.0, 2200.0));
        let sites: Vec<&str> = render.scatter.points.iter().map(|p| p.site.as_str()).collect();
        assert_eq!(sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
    }

    #[test]
    fn unknown_site_skips_the_pie_but_still_recomputes_the_scatter() {
        let ds = dataset();
        let site = SiteSelection::Site("Boca Chica".to_string());
        let render = on_selection_changed(&ds, &selection(site, 0.0, 3000.0));
        assert!(render.pie.is_none());
        assert!(render.scatter.points.is_empty());
    }
}
