//! Crop-health ("farmer data") models
//!
//! The provider keys every series by observation date. Dates live in
//! `BTreeMap`s so "latest" is always the maximum key, not whatever order
//! the JSON payload happened to arrive in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Remote-sensing vegetation indices reported by the crop-health provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthIndex {
    /// Normalized difference vegetation index
    Ndvi,
    /// Enhanced vegetation index
    Evi,
    /// Leaf area index
    Lai,
    /// Normalized difference moisture index
    Ndmi,
    /// Soil organic carbon
    Soc,
}

impl HealthIndex {
    pub const ALL: [HealthIndex; 5] = [
        HealthIndex::Ndvi,
        HealthIndex::Evi,
        HealthIndex::Lai,
        HealthIndex::Ndmi,
        HealthIndex::Soc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthIndex::Ndvi => "ndvi",
            HealthIndex::Evi => "evi",
            HealthIndex::Lai => "lai",
            HealthIndex::Ndmi => "ndmi",
            HealthIndex::Soc => "soc",
        }
    }

    /// Uppercase label used in charts and report text
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ndvi" => Some(HealthIndex::Ndvi),
            "evi" => Some(HealthIndex::Evi),
            "lai" => Some(HealthIndex::Lai),
            "ndmi" => Some(HealthIndex::Ndmi),
            "soc" => Some(HealthIndex::Soc),
            _ => None,
        }
    }
}

impl std::fmt::Display for HealthIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date-keyed series of one health index
pub type IndexSeries = BTreeMap<NaiveDate, f64>;

/// Crop-health data for a field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropHealthData {
    pub field_id: String,
    /// Field area in square meters
    pub field_area_sq_m: f64,
    pub crop_code: String,
    /// Per-index, date-keyed values
    pub health: BTreeMap<HealthIndex, IndexSeries>,
    /// Per-date, per-index category-count arrays
    pub index_breakdown: BTreeMap<NaiveDate, BTreeMap<HealthIndex, Vec<f64>>>,
}

impl CropHealthData {
    /// Value of an index at its most recent observation date
    pub fn latest_value(&self, index: HealthIndex) -> Option<(NaiveDate, f64)> {
        self.health
            .get(&index)
            .and_then(|series| series.last_key_value())
            .map(|(date, value)| (*date, *value))
    }

    /// Most recent observation date across all index series
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.health
            .values()
            .filter_map(|series| series.keys().next_back())
            .max()
            .copied()
    }

    /// Category counts for one index at the most recent breakdown date
    pub fn latest_breakdown(&self, index: HealthIndex) -> Option<(NaiveDate, &[f64])> {
        self.index_breakdown
            .last_key_value()
            .and_then(|(date, per_index)| {
                per_index.get(&index).map(|counts| (*date, counts.as_slice()))
            })
    }
}
