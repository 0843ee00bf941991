use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name, e.g. "CCAFS LC-40".
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    /// Mission outcome label, e.g. "Success" or "Failure (in flight)".
    pub outcome: String,
    /// Booster version category, used as the colour dimension.
    pub booster_category: String,
    /// Success indicator (the `class` column, 1 = success).
    pub success: bool,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with pre-computed category indices.
///
/// Built once at startup and read-only afterwards; every chart is derived
/// from it without mutation.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records (rows).
    pub records: Vec<LaunchRecord>,
    /// Sorted unique launch site names.
    pub sites: Vec<String>,
    /// Sorted unique mission outcome labels.
    pub outcomes: Vec<String>,
    /// Sorted unique booster version categories.
    pub booster_categories: Vec<String>,
    /// Smallest payload mass in the table.
    pub payload_min: f64,
    /// Largest payload mass in the table.
    pub payload_max: f64,
}

impl LaunchDataset {
    /// Build the category indices and payload bounds from the loaded rows.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<String> = BTreeSet::new();
        let mut outcomes: BTreeSet<String> = BTreeSet::new();
        let mut booster_categories: BTreeSet<String> = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.site.clone());
            outcomes.insert(rec.outcome.clone());
            booster_categories.insert(rec.booster_category.clone());
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
        }

        if records.is_empty() {
            payload_min = 0.0;
            payload_max = 0.0;
        }

        LaunchDataset {
            records,
            sites: sites.into_iter().collect(),
            outcomes: outcomes.into_iter().collect(),
            booster_categories: booster_categories.into_iter().collect(),
            payload_min,
            payload_max,
        }
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of a site on the sorted site axis.
    pub fn site_index(&self, site: &str) -> Option<usize> {
        self.sites.iter().position(|s| s == site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, payload: f64, outcome: &str, booster: &str, success: bool) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: outcome.to_string(),
            booster_category: booster.to_string(),
            success,
        }
    }

    #[test]
    fn indices_are_sorted_and_unique() {
        let ds = LaunchDataset::from_records(vec![
            rec("KSC LC-39A", 5300.0, "Success", "FT", true),
            rec("CCAFS LC-40", 2500.0, "Success", "FT", true),
            rec("CCAFS LC-40", 500.0, "Failure (in flight)", "v1.0", false),
        ]);

        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.outcomes, vec!["Failure (in flight)", "Success"]);
        assert_eq!(ds.booster_categories, vec!["FT", "v1.0"]);
        assert_eq!(ds.site_index("KSC LC-39A"), Some(1));
        assert_eq!(ds.site_index("VAFB SLC-4E"), None);
    }

    #[test]
    fn payload_bounds_cover_all_rows() {
        let ds = LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 2500.0, "Success", "FT", true),
            rec("CCAFS LC-40", 9600.0, "Success", "B4", true),
            rec("VAFB SLC-4E", 500.0, "Success", "v1.1", true),
        ]);

        assert_eq!(ds.payload_min, 500.0);
        assert_eq!(ds.payload_max, 9600.0);
    }

    #[test]
    fn empty_table_has_zero_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_min, 0.0);
        assert_eq!(ds.payload_max, 0.0);
    }
}
