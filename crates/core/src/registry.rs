//! Parking Registry
//!
//! Fixed-capacity table of the sections received in the current
//! allocation cycle. The registry is cleared and repopulated record by
//! record at the start of every cycle.
//!
//! # Ordering
//!
//! [`Registry::sort`] orders sections so that:
//!
//! - sections with `spots > 0` come before sections with `spots == 0`
//! - among sections with spots, the smaller `active_score` comes first
//! - everything else keeps its input order (the sort is stable)
//!
//! The sort is an in-place insertion sort: no recursion and no
//! scratch buffer, which suits a table of [`MAX_SECTIONS`] entries.

use heapless::Vec;

use crate::error::{AllocError, Table};
use crate::section::{active_score, Criterion, Section};

/// Maximum number of sections per allocation cycle
pub const MAX_SECTIONS: usize = 10;

/// Section table for one allocation cycle
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sections: Vec<Section, MAX_SECTIONS>,
}

impl Registry {
    /// Create an empty registry (const fn for static initialization)
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Number of valid entries
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the registry holds no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Check if another section would be rejected
    pub fn is_full(&self) -> bool {
        self.sections.is_full()
    }

    /// Drop every section. Idempotent.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Store a section at the end of the table
    ///
    /// Returns `CapacityExceeded(Registry)` once `MAX_SECTIONS` are stored;
    /// the section is dropped.
    pub fn append(&mut self, section: Section) -> Result<(), AllocError> {
        self.sections
            .push(section)
            .map_err(|_| AllocError::CapacityExceeded(Table::Registry))
    }

    /// Set every section's active score from `criterion`
    ///
    /// `Criterion::None` leaves the current active scores untouched.
    pub fn apply_criterion(&mut self, criterion: Criterion) {
        if criterion == Criterion::None {
            return;
        }
        for section in self.sections.iter_mut() {
            section.active_score = active_score(section, criterion);
        }
    }

    /// Order sections by capacity, then ascending active score (stable)
    pub fn sort(&mut self) {
        let sections = self.sections.as_mut_slice();
        for i in 1..sections.len() {
            let mut j = i;
            while j > 0 && ranks_before(&sections[j], &sections[j - 1]) {
                sections.swap(j, j - 1);
                j -= 1;
            }
        }
    }

    /// All valid sections in table order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section at `index`
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// First section named `name`
    pub fn find(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name.as_str() == name)
    }

    /// Iterate over sections in table order
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

/// Strict ordering used by [`Registry::sort`]
fn ranks_before(a: &Section, b: &Section) -> bool {
    match (a.has_capacity(), b.has_capacity()) {
        (true, false) => true,
        (true, true) => a.active_score < b.active_score,
        _ => false,
    }
}
