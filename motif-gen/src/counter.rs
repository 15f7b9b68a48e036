//! Reference counter
//!
//! Tallies how many citing tracks reference each `track:` identifier. The
//! tally is accumulated by a single writer while songs are built, then
//! frozen into a read-only [`ReferenceCounter`].

use std::collections::BTreeMap;

/// Mutable tally used while the catalog is being walked
#[derive(Debug, Default)]
pub struct ReferenceTally {
    counts: BTreeMap<String, usize>,
}

impl ReferenceTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one citation. Duplicate citations within a track each count.
    pub fn cite(&mut self, reference: &str) {
        *self.counts.entry(reference.to_string()).or_insert(0) += 1;
    }

    /// Freeze the tally
    pub fn finish(self) -> ReferenceCounter {
        ReferenceCounter {
            counts: self.counts,
        }
    }
}

/// Read-only reference identifier → citation count mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCounter {
    counts: BTreeMap<String, usize>,
}

impl ReferenceCounter {
    /// Citation count, if the identifier was ever cited
    pub fn count(&self, reference: &str) -> Option<usize> {
        self.counts.get(reference).copied()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.counts.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Copy holding only identifiers cited at least `threshold` times
    pub fn at_least(&self, threshold: usize) -> ReferenceCounter {
        ReferenceCounter {
            counts: self
                .counts
                .iter()
                .filter(|(_, count)| **count >= threshold)
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
        }
    }

    /// The `n` most cited identifiers, ties in identifier order
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}
