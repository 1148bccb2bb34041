//! Reconciler: what the include list is missing.

use splitsync_core::RouteEntry;
use std::collections::HashSet;

/// Existing entries plus the entries to append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    existing: Vec<RouteEntry>,
    to_add: Vec<RouteEntry>,
}

impl Reconciliation {
    /// Returns true if nothing needs to be written
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty()
    }

    /// Entries already on the remote list
    #[must_use]
    pub fn existing(&self) -> &[RouteEntry] {
        &self.existing
    }

    /// Entries the remote list lacks
    #[must_use]
    pub fn added(&self) -> &[RouteEntry] {
        &self.to_add
    }

    /// Length of the list after the write
    #[must_use]
    pub fn total(&self) -> usize {
        self.existing.len() + self.to_add.len()
    }

    /// The full replacement list: existing entries in their original order,
    /// then the new ones
    #[must_use]
    pub fn into_complete_list(self) -> Vec<RouteEntry> {
        let mut list = self.existing;
        list.extend(self.to_add);
        list
    }
}

/// Compare fetched ranges against the current list.
///
/// Matching is exact string equality on the CIDR text. `10.0.0.0/8` and
/// `10.0.0.1/8` are different keys, as are overlapping ranges.
pub fn reconcile<'r, I>(ranges: I, existing: Vec<RouteEntry>, description: &str) -> Reconciliation
where
    I: IntoIterator<Item = &'r String>,
{
    let to_add = {
        let known: HashSet<&str> = existing.iter().filter_map(RouteEntry::address).collect();
        let mut seen = HashSet::new();

        ranges
            .into_iter()
            .filter(|cidr| !known.contains(cidr.as_str()))
            .filter(|cidr| seen.insert(cidr.as_str()))
            .map(|cidr| RouteEntry::new(cidr.clone(), description))
            .collect()
    };

    Reconciliation { existing, to_add }
}
