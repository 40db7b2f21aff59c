//! Farm directory and farm-name matching

use crate::types::Record;
use std::collections::BTreeSet;

/// Sorted distinct farm names of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FarmDirectory {
    farms: Vec<String>,
}

impl FarmDirectory {
    pub fn from_records(records: &[Record]) -> Self {
        let farms: BTreeSet<&str> = records.iter().map(|r| r.farm_name.as_str()).collect();
        Self {
            farms: farms.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn farms(&self) -> &[String] {
        &self.farms
    }

    pub fn len(&self) -> usize {
        self.farms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.farms.is_empty()
    }

    /// Default selection
    pub fn first(&self) -> Option<&str> {
        self.farms.first().map(String::as_str)
    }

    pub fn contains(&self, farm: &str) -> bool {
        self.farms.binary_search_by(|f| f.as_str().cmp(farm)).is_ok()
    }

    pub fn position(&self, farm: &str) -> Option<usize> {
        self.farms.binary_search_by(|f| f.as_str().cmp(farm)).ok()
    }

    /// Resolve a user-supplied farm name to its canonical entry
    ///
    /// Both sides are trimmed and lower-cased; only full equality matches.
    pub fn match_farm(&self, query: &str) -> Option<&str> {
        let wanted = normalize_farm_name(query);
        self.farms
            .iter()
            .find(|farm| normalize_farm_name(farm) == wanted)
            .map(String::as_str)
    }
}

pub fn normalize_farm_name(name: &str) -> String {
    name.trim().to_lowercase()
}
