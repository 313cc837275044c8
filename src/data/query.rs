use std::collections::BTreeMap;

use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Selection – what the user is currently looking at
// ---------------------------------------------------------------------------

/// Which launch sites the user wants to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    /// Every site in the dataset.
    All,
    /// A single named site.
    Site(String),
}

impl SiteSelection {
    /// Display label, matching the dropdown entries.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All",
            SiteSelection::Site(name) => name,
        }
    }
}

/// Closed payload-mass interval in kilograms; both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub min: f64,
    pub max: f64,
}

impl PayloadRange {
    /// Build a range from a possibly unordered pair.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            PayloadRange { min: a, max: b }
        } else {
            PayloadRange { min: b, max: a }
        }
    }

    pub fn contains(&self, mass_kg: f64) -> bool {
        self.min <= mass_kg && mass_kg <= self.max
    }
}

/// The complete UI selection driving both charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

// ---------------------------------------------------------------------------
// Success distribution (pie chart input)
// ---------------------------------------------------------------------------

/// Counts backing the pie chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessDistribution {
    /// "All" mode: number of successful launches contributed by each site.
    /// Values sum to the dataset-wide success count, so slices read as each
    /// site's share of total successes, not as per-site success rates.
    BySite(BTreeMap<String, usize>),
    /// Single-site mode: success vs. failure split for that site.
    ByOutcome(BTreeMap<Outcome, usize>),
}

/// Compute the pie-chart distribution for the current site selection.
///
/// A site name not present in the dataset yields `None` — the "no selection"
/// outcome, which leaves the previous chart in place. It is not an error.
pub fn success_distribution(
    dataset: &LaunchDataset,
    site: &SiteSelection,
) -> Option<SuccessDistribution> {
    match site {
        SiteSelection::All => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for rec in &dataset.records {
                if rec.outcome == Outcome::Success {
                    *counts.entry(rec.site.clone()).or_insert(0) += 1;
                }
            }
            Some(SuccessDistribution::BySite(counts))
        }
        SiteSelection::Site(name) => {
            if !dataset.has_site(name) {
                return None;
            }
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for rec in dataset.records.iter().filter(|r| r.site == *name) {
                *counts.entry(rec.outcome).or_insert(0) += 1;
            }
            Some(SuccessDistribution::ByOutcome(counts))
        }
    }
}

// ---------------------------------------------------------------------------
// Payload sample (scatter input)
// ---------------------------------------------------------------------------

/// Indices of records whose payload mass falls inside `range`, optionally
/// narrowed to one site. Preserves source order. An unknown site matches
/// nothing and yields an empty sample.
pub fn payload_sample(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .filter(|(_, rec)| match site {
            SiteSelection::All => true,
            SiteSelection::Site(name) => rec.site == *name,
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn site(name: &str) -> SiteSelection {
        SiteSelection::Site(name.to_string())
    }

    /// The three-launch fixture: one success at CCAFS, one failure and one
    /// success at KSC.
    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new(1, "CCAFS LC-40", 500.0, 1).unwrap(),
            LaunchRecord::new(2, "KSC LC-39A", 2000.0, 0).unwrap(),
            LaunchRecord::new(3, "KSC LC-39A", 2500.0, 1).unwrap(),
        ])
    }

    #[test]
    fn all_mode_counts_successes_per_site() {
        let ds = dataset();
        let dist = success_distribution(&ds, &SiteSelection::All).unwrap();
        let expected: BTreeMap<String, usize> = [
            ("CCAFS LC-40".to_string(), 1),
            ("KSC LC-39A".to_string(), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(dist, SuccessDistribution::BySite(expected));
    }

    #[test]
    fn all_mode_values_sum_to_total_successes() {
        let ds = dataset();
        let total_successes = ds
            .records
            .iter()
            .filter(|r| r.outcome == Outcome::Success)
            .count();
        let Some(SuccessDistribution::BySite(counts)) =
            success_distribution(&ds, &SiteSelection::All)
        else {
            panic!("expected a by-site distribution");
        };
        assert_eq!(counts.values().sum::<usize>(), total_successes);
    }

    #[test]
    fn single_site_mode_splits_by_outcome() {
        let ds = dataset();
        let dist = success_distribution(&ds, &site("KSC LC-39A")).unwrap();
        let expected: BTreeMap<Outcome, usize> =
            [(Outcome::Failure, 1), (Outcome::Success, 1)].into_iter().collect();
        assert_eq!(dist, SuccessDistribution::ByOutcome(expected));
    }

    #[test]
    fn single_site_values_sum_to_site_total() {
        let ds = dataset();
        for name in ds.sites.clone() {
            let site_total = ds.records.iter().filter(|r| r.site == name).count();
            let Some(SuccessDistribution::ByOutcome(counts)) =
                success_distribution(&ds, &site(&name))
            else {
                panic!("expected an outcome split for {name}");
            };
            assert_eq!(counts.values().sum::<usize>(), site_total);
        }
    }

    #[test]
    fn unknown_site_is_no_selection() {
        let ds = dataset();
        assert_eq!(success_distribution(&ds, &site("Boca Chica")), None);
        assert!(payload_sample(&ds, &site("Boca Chica"), &PayloadRange::new(0.0, 1e6)).is_empty());
    }

    #[test]
    fn payload_sample_is_sound_and_complete() {
        let ds = dataset();
        let range = PayloadRange::new(0.0, 2200.0);
        let indices = payload_sample(&ds, &SiteSelection::All, &range);
        assert_eq!(indices, vec![0, 1]);
        for &i in &indices {
            assert!(range.contains(ds.records[i].payload_mass_kg));
        }
        // Nothing in range was left out.
        for (i, rec) in ds.records.iter().enumerate() {
            assert_eq!(indices.contains(&i), range.contains(rec.payload_mass_kg));
        }
    }

    #[test]
    fn payload_sample_narrows_to_selected_site() {
        let ds = dataset();
        let indices = payload_sample(&ds, &site("KSC LC-39A"), &PayloadRange::new(0.0, 2200.0));
        assert_eq!(indices, vec![1]);
        assert_eq!(ds.records[1].payload_mass_kg, 2000.0);
    }

    #[test]
    fn payload_bounds_are_inclusive() {
        let ds = dataset();
        let (lo, hi) = ds.payload_bounds;
        // Records sitting exactly on the observed bounds stay in.
        let indices = payload_sample(&ds, &SiteSelection::All, &PayloadRange::new(lo, hi));
        assert_eq!(indices, vec![0, 1, 2]);

        let exact = payload_sample(&ds, &SiteSelection::All, &PayloadRange::new(500.0, 500.0));
        assert_eq!(exact, vec![0]);
    }

    #[test]
    fn full_observed_range_keeps_every_site_record() {
        let ds = dataset();
        let (lo, hi) = ds.payload_bounds;
        let indices = payload_sample(&ds, &site("KSC LC-39A"), &PayloadRange::new(lo, hi));
        let site_total = ds.records.iter().filter(|r| r.site == "KSC LC-39A").count();
        assert_eq!(indices.len(), site_total);
    }

    #[test]
    fn out_of_range_bounds_produce_empty_results() {
        let ds = dataset();
        let below = payload_sample(&ds, &SiteSelection::All, &PayloadRange::new(0.0, 100.0));
        assert!(below.is_empty());
        let above = payload_sample(&ds, &SiteSelection::All, &PayloadRange::new(1e5, 1e6));
        assert!(above.is_empty());
    }

    #[test]
    fn range_constructor_normalizes_to_ascending() {
        let range = PayloadRange::new(2200.0, 0.0);
        assert_eq!(range, PayloadRange::new(0.0, 2200.0));
        assert!(range.contains(0.0));
        assert!(range.contains(2200.0));
        assert!(!range.contains(2200.1));
    }

    #[test]
    fn queries_are_referentially_transparent() {
        let ds = dataset();
        let selection = site("KSC LC-39A");
        let range = PayloadRange::new(0.0, 3000.0);
        assert_eq!(
            success_distribution(&ds, &selection),
            success_distribution(&ds, &selection)
        );
        assert_eq!(
            payload_sample(&ds, &selection, &range),
            payload_sample(&ds, &selection, &range)
        );
    }
}
