use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Chart kind
// ---------------------------------------------------------------------------

/// Which chart the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Scatter,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Pie, ChartKind::Scatter, ChartKind::Bar];

    /// Label shown in the chart-type dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Pie => "Pie Chart",
            ChartKind::Scatter => "Scatter Chart",
            ChartKind::Bar => "Bar Chart",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("unknown chart kind '{0}' (expected pie, scatter or bar)")]
    UnknownKind(String),
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s {
            "pie" => Ok(ChartKind::Pie),
            "scatter" => Ok(ChartKind::Scatter),
            "bar" => Ok(ChartKind::Bar),
            other => Err(ChartError::UnknownKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart data – backend-independent chart contents
// ---------------------------------------------------------------------------

/// One pie slice: total payload mass for a mission outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub outcome: String,
    pub total_payload_kg: f64,
}

/// One scatter point: payload mass against the site axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    /// Index into [`LaunchDataset::sites`].
    pub site_index: usize,
    pub booster_category: String,
}

/// Per-site payload totals for one booster version category.
///
/// `site_totals_kg` is indexed like [`LaunchDataset::sites`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub booster_category: String,
    pub site_totals_kg: Vec<f64>,
}

/// Chart-ready data, independent of any rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Pie { slices: Vec<PieSlice> },
    Scatter { points: Vec<ScatterPoint> },
    Bar { series: Vec<BarSeries> },
}

impl ChartData {
    /// Whether there is nothing to draw (empty filtered set).
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Pie { slices } => slices.is_empty(),
            ChartData::Scatter { points } => points.is_empty(),
            ChartData::Bar { series } => series.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart assembly
// ---------------------------------------------------------------------------

/// Assemble chart data from the filtered row indices.
///
/// Categories aggregate through `BTreeMap`, so identical inputs always
/// produce identical output regardless of row order within a category.
pub fn build_chart(dataset: &LaunchDataset, indices: &[usize], kind: ChartKind) -> ChartData {
    match kind {
        ChartKind::Pie => {
            let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
            for &i in indices {
                let rec = &dataset.records[i];
                *totals.entry(rec.outcome.as_str()).or_insert(0.0) += rec.payload_mass_kg;
            }
            ChartData::Pie {
                slices: totals
                    .into_iter()
                    .map(|(outcome, total_payload_kg)| PieSlice {
                        outcome: outcome.to_string(),
                        total_payload_kg,
                    })
                    .collect(),
            }
        }
        ChartKind::Scatter => {
            let mut points = Vec::with_capacity(indices.len());
            for &i in indices {
                let rec = &dataset.records[i];
                if let Some(site_index) = dataset.site_index(&rec.site) {
                    points.push(ScatterPoint {
                        payload_mass_kg: rec.payload_mass_kg,
                        site_index,
                        booster_category: rec.booster_category.clone(),
                    });
                }
            }
            ChartData::Scatter { points }
        }
        ChartKind::Bar => {
            let mut per_category: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
            for &i in indices {
                let rec = &dataset.records[i];
                let Some(site_index) = dataset.site_index(&rec.site) else {
                    continue;
                };
                per_category
                    .entry(rec.booster_category.as_str())
                    .or_insert_with(|| vec![0.0; dataset.sites.len()])
                    [site_index] += rec.payload_mass_kg;
            }
            ChartData::Bar {
                series: per_category
                    .into_iter()
                    .map(|(booster_category, site_totals_kg)| BarSeries {
                        booster_category: booster_category.to_string(),
                        site_totals_kg,
                    })
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, PayloadRange, SiteSelection};
    use crate::data::model::LaunchRecord;

    fn rec(site: &str, payload: f64, outcome: &str, booster: &str, success: bool) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: outcome.to_string(),
            booster_category: booster.to_string(),
            success,
        }
    }

    fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 2500.0, "Success", "FT", true),
            rec("CCAFS LC-40", 500.0, "Failure (in flight)", "v1.0", false),
            rec("CCAFS LC-40", 6000.0, "Success", "B4", true),
            rec("KSC LC-39A", 5300.0, "Success", "FT", true),
            rec("KSC LC-39A", 3100.0, "Success (payload status unclear)", "FT", true),
            rec("VAFB SLC-4E", 9600.0, "Success", "B4", true),
        ])
    }

    #[test]
    fn chart_kind_parses_wire_labels() {
        assert_eq!("pie".parse::<ChartKind>(), Ok(ChartKind::Pie));
        assert_eq!("scatter".parse::<ChartKind>(), Ok(ChartKind::Scatter));
        assert_eq!("bar".parse::<ChartKind>(), Ok(ChartKind::Bar));
    }

    #[test]
    fn unknown_chart_kind_is_an_error() {
        let err = "donut".parse::<ChartKind>().unwrap_err();
        assert_eq!(err, ChartError::UnknownKind("donut".to_string()));
        assert!(err.to_string().contains("donut"));
    }

    #[test]
    fn pie_totals_sum_to_filtered_payload() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &SiteSelection::AllSites, PayloadRange::new(0.0, 10_000.0));
        let chart = build_chart(&ds, &idx, ChartKind::Pie);

        let ChartData::Pie { slices } = &chart else {
            panic!("expected pie data");
        };
        let expected: f64 = idx.iter().map(|&i| ds.records[i].payload_mass_kg).sum();
        let total: f64 = slices.iter().map(|s| s.total_payload_kg).sum();
        assert!((total - expected).abs() < 1e-9);

        // One slice per outcome present among the filtered rows.
        let outcomes: Vec<&str> = slices.iter().map(|s| s.outcome.as_str()).collect();
        assert_eq!(outcomes, vec!["Success", "Success (payload status unclear)"]);
    }

    #[test]
    fn scatter_restricted_to_site_and_range() {
        // site="CCAFS LC-40", chart="scatter", range=[2000, 6000]
        let ds = sample_dataset();
        let selection = SiteSelection::Site("CCAFS LC-40".to_string());
        let idx = filtered_indices(&ds, &selection, PayloadRange::new(2000.0, 6000.0));
        let chart = build_chart(&ds, &idx, ChartKind::Scatter);

        let ChartData::Scatter { points } = &chart else {
            panic!("expected scatter data");
        };
        assert_eq!(points.len(), 2);
        let site_axis = ds.site_index("CCAFS LC-40").unwrap();
        for p in points {
            assert_eq!(p.site_index, site_axis);
            assert!(p.payload_mass_kg >= 2000.0 && p.payload_mass_kg <= 6000.0);
        }
    }

    #[test]
    fn bar_covers_successful_launches_per_site() {
        // site="All Sites", chart="bar", range=[0, 10000]
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &SiteSelection::AllSites, PayloadRange::new(0.0, 10_000.0));
        let chart = build_chart(&ds, &idx, ChartKind::Bar);

        let ChartData::Bar { series } = &chart else {
            panic!("expected bar data");
        };
        // Categories in sorted order; the failed v1.0 flight is excluded.
        let categories: Vec<&str> = series.iter().map(|s| s.booster_category.as_str()).collect();
        assert_eq!(categories, vec!["B4", "FT"]);

        // Per-site totals; sites axis is [CCAFS LC-40, KSC LC-39A, VAFB SLC-4E].
        let b4 = &series[0].site_totals_kg;
        let ft = &series[1].site_totals_kg;
        assert_eq!(b4, &vec![6000.0, 0.0, 9600.0]);
        assert_eq!(ft, &vec![2500.0, 8400.0, 0.0]);
    }

    #[test]
    fn identical_inputs_build_identical_charts() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &SiteSelection::AllSites, PayloadRange::new(0.0, 10_000.0));
        for kind in ChartKind::ALL {
            let a = build_chart(&ds, &idx, kind);
            let b = build_chart(&ds, &idx, kind);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn empty_selection_builds_empty_charts() {
        let ds = sample_dataset();
        for kind in ChartKind::ALL {
            let chart = build_chart(&ds, &[], kind);
            assert!(chart.is_empty());
        }
    }
}
