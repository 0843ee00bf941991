use crate::color::ColorMap;
use crate::data::chart::{ChartData, ChartKind, build_chart};
use crate::data::filter::{PayloadRange, SiteSelection, filtered_indices};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Fixed bounds of the payload range control.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
/// Tick mark / snap step of the payload range control.
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded launch record table; read-only after startup.
    pub dataset: LaunchDataset,

    /// Current site selection.
    pub site: SiteSelection,

    /// Current chart type.
    pub chart_kind: ChartKind,

    /// Current payload interval from the range slider.
    pub payload_range: PayloadRange,

    /// Indices of records passing the current filters (cached).
    pub filtered: Vec<usize>,

    /// Chart data for the current selection (cached).
    pub chart: ChartData,

    /// Colour per booster version category (scatter / bar).
    pub booster_colors: ColorMap,

    /// Colour per mission outcome (pie).
    pub outcome_colors: ColorMap,

    /// Control values the caches were built from.
    last_selection: (SiteSelection, ChartKind, PayloadRange),
}

impl AppState {
    /// Initial state: all sites, pie chart, payload range seeded from the
    /// table's min/max payload mass.
    pub fn new(dataset: LaunchDataset) -> Self {
        let site = SiteSelection::AllSites;
        let chart_kind = ChartKind::Pie;
        let payload_range = PayloadRange::new(dataset.payload_min, dataset.payload_max);

        let filtered = filtered_indices(&dataset, &site, payload_range);
        let chart = build_chart(&dataset, &filtered, chart_kind);
        let booster_colors = ColorMap::new(&dataset.booster_categories);
        let outcome_colors = ColorMap::new(&dataset.outcomes);

        AppState {
            last_selection: (site.clone(), chart_kind, payload_range),
            dataset,
            site,
            chart_kind,
            payload_range,
            filtered,
            chart,
            booster_colors,
            outcome_colors,
        }
    }

    /// Recompute the filtered rows and chart after a control change.
    ///
    /// No-op when nothing changed, so a repeated call with identical
    /// control values keeps the exact same chart data.
    pub fn refresh(&mut self) {
        let selection = (self.site.clone(), self.chart_kind, self.payload_range);
        if selection == self.last_selection {
            return;
        }

        self.filtered = filtered_indices(&self.dataset, &self.site, self.payload_range);
        self.chart = build_chart(&self.dataset, &self.filtered, self.chart_kind);
        log::debug!(
            "{} of {} launches match {} / {:.0}-{:.0} kg",
            self.filtered.len(),
            self.dataset.len(),
            self.site,
            self.payload_range.lo,
            self.payload_range.hi,
        );
        self.last_selection = selection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchRecord;

    fn rec(site: &str, payload: f64, success: bool) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if success { "Success" } else { "Failure (in flight)" }.to_string(),
            booster_category: "FT".to_string(),
            success,
        }
    }

    fn sample_state() -> AppState {
        AppState::new(LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 2500.0, true),
            rec("CCAFS LC-40", 500.0, false),
            rec("KSC LC-39A", 5300.0, true),
        ]))
    }

    #[test]
    fn initial_state_mirrors_the_source_dashboard() {
        let state = sample_state();
        assert_eq!(state.site, SiteSelection::AllSites);
        assert_eq!(state.chart_kind, ChartKind::Pie);
        assert_eq!(state.payload_range, PayloadRange::new(500.0, 5300.0));
        // All Sites → successes only.
        assert_eq!(state.filtered, vec![0, 2]);
    }

    #[test]
    fn refresh_tracks_control_changes() {
        let mut state = sample_state();
        state.site = SiteSelection::Site("CCAFS LC-40".to_string());
        state.refresh();
        assert_eq!(state.filtered, vec![0, 1]);

        state.chart_kind = ChartKind::Scatter;
        state.refresh();
        let ChartData::Scatter { points } = &state.chart else {
            panic!("expected scatter data");
        };
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn refresh_without_changes_keeps_chart_identical() {
        let mut state = sample_state();
        let before = state.chart.clone();
        state.refresh();
        state.refresh();
        assert_eq!(state.chart, before);
    }
}
