//! FILENAME: report-engine/src/databank.rs
//! Data bank - named repository of reusable time-series data.
//!
//! The bank is populated by the caller before rendering begins and is
//! only ever read by the engine. A lookup miss is not an error; the
//! requesting series simply resolves to an empty result.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Read-only mapping from series name to stored data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataBank {
    entries: HashMap<String, DataBankEntry>,
}

impl DataBank {
    pub fn new() -> Self {
        DataBank {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: DataBankEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Looks up an entry by name. Missing names return `None`.
    pub fn get(&self, name: &str) -> Option<&DataBankEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, DataBankEntry)> for DataBank {
    fn from_iter<I: IntoIterator<Item = (String, DataBankEntry)>>(iter: I) -> Self {
        DataBank {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One stored time series. Dates are either listed explicitly (aligned
/// with `values`) or reconstructed from a single nominal start date plus
/// a frequency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataBankEntry {
    pub values: Vec<f64>,

    #[serde(default)]
    pub dates: Option<DateSpec>,

    /// Integer period code (365 = daily ... 1 = yearly).
    #[serde(default)]
    pub frequency: Option<i64>,
}

/// The `Dates` field of a bank entry: an explicit per-value list, or a
/// single start date used together with `Frequency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateSpec {
    List(Vec<String>),
    Start(String),
}

// ============================================================================
// FREQUENCY CODES
// ============================================================================

/// Sampling period derived from a frequency code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl PeriodUnit {
    /// Maps a frequency code to its period unit. Unknown codes have no
    /// unit, which makes date reconstruction impossible.
    pub fn from_frequency(freq: i64) -> Option<PeriodUnit> {
        match freq {
            365 => Some(PeriodUnit::Day),
            52 => Some(PeriodUnit::Week),
            12 => Some(PeriodUnit::Month),
            4 => Some(PeriodUnit::Quarter),
            1 => Some(PeriodUnit::Year),
            _ => None,
        }
    }

    /// Advances a date by one period. Month-based units clamp to the
    /// last day of shorter months.
    pub fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            PeriodUnit::Day => date.checked_add_signed(Duration::days(1)),
            PeriodUnit::Week => date.checked_add_signed(Duration::weeks(1)),
            PeriodUnit::Month => date.checked_add_months(chrono::Months::new(1)),
            PeriodUnit::Quarter => date.checked_add_months(chrono::Months::new(3)),
            PeriodUnit::Year => date.checked_add_months(chrono::Months::new(12)),
        }
    }
}
