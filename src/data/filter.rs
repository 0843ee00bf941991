use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Site dropdown state: either every site or one specific site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSelection {
    /// All sites, restricted to successful launches.
    AllSites,
    /// One site, successful and failed launches alike.
    Site(String),
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::AllSites => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(lo: f64, hi: f64) -> Self {
        if lo <= hi {
            PayloadRange { lo, hi }
        } else {
            PayloadRange { lo: hi, hi: lo }
        }
    }

    /// Whether a payload mass lies within the interval, bounds included.
    pub fn contains(&self, mass_kg: f64) -> bool {
        self.lo <= mass_kg && mass_kg <= self.hi
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Return indices of records passing the site and payload filters.
///
/// "All Sites" keeps successful launches only; a specific site keeps both
/// successful and failed launches at that site. The payload interval is
/// inclusive on both ends. Indices come back in table order.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| match selection {
            SiteSelection::AllSites => rec.success,
            SiteSelection::Site(site) => rec.site == *site,
        })
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg))
        .map(|(i, _)| i)
        .collect()
}
