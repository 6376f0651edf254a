//! Ranking Criteria
//!
//! The criterion selects which raw score becomes a section's active score
//! for one allocation cycle. It is set by the request that started the
//! cycle and reset to [`Criterion::None`] once the cycle completes.

use core::fmt;

use super::Section;

/// Score used to rank sections
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Criterion {
    /// No explicit criterion; the entrance score is the default
    #[default]
    None,
    /// Rank by entrance score (slot 0)
    Entrance,
    /// Rank by elevator score (slot 1)
    Elevator,
}

impl Criterion {
    /// Raw score slot selected by this criterion, if any
    pub fn score_slot(self) -> Option<usize> {
        match self {
            Criterion::None => None,
            Criterion::Entrance => Some(0),
            Criterion::Elevator => Some(1),
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Criterion::None => "none",
            Criterion::Entrance => "entrance",
            Criterion::Elevator => "elevator",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison key for `section` under `criterion`.
///
/// Falls back to the entrance score when no criterion was recorded. Unused
/// score slots read as zero.
pub fn active_score(section: &Section, criterion: Criterion) -> i32 {
    match criterion.score_slot() {
        Some(slot) => section.scores[slot],
        None => section.entrance_score(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> Section {
        Section::new("A", 3).unwrap().with_scores(&[4, 11])
    }

    #[test]
    fn test_active_score_by_criterion() {
        let s = section();
        assert_eq!(active_score(&s, Criterion::Entrance), 4);
        assert_eq!(active_score(&s, Criterion::Elevator), 11);
    }

    #[test]
    fn test_none_defaults_to_entrance() {
        assert_eq!(active_score(&section(), Criterion::None), 4);
    }

    #[test]
    fn test_does_not_touch_raw_scores() {
        let s = section();
        let _ = active_score(&s, Criterion::Elevator);
        assert_eq!(s.scores, [4, 11]);
    }

    #[test]
    fn test_default_criterion() {
        assert_eq!(Criterion::default(), Criterion::None);
        assert_eq!(Criterion::None.score_slot(), None);
    }
}
