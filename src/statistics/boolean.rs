use crate::statistics::{Accumulator, Majority};

/// Tally of yes/no observations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BooleanData {
    total: u64,
    true_occurrences: u64,
    false_occurrences: u64,
}

impl BooleanData {
    /// Seeds a tally; the counts are stored as given.
    pub const fn new(total: u64, true_occurrences: u64, false_occurrences: u64) -> Self {
        Self {
            total,
            true_occurrences,
            false_occurrences,
        }
    }

    pub fn true_occurrences(&self) -> u64 {
        self.true_occurrences
    }

    pub fn false_occurrences(&self) -> u64 {
        self.false_occurrences
    }
}

impl Accumulator for BooleanData {
    type Occurrence = bool;

    fn total(&self) -> u64 {
        self.total
    }

    fn update(&self, occurrence: bool) -> Self {
        if occurrence {
            Self::new(
                self.total.saturating_add(1),
                self.true_occurrences.saturating_add(1),
                self.false_occurrences,
            )
        } else {
            Self::new(
                self.total.saturating_add(1),
                self.true_occurrences,
                self.false_occurrences.saturating_add(1),
            )
        }
    }

    fn add(&self, other: &Self) -> Self {
        Self::new(
            self.total.saturating_add(other.total),
            self.true_occurrences.saturating_add(other.true_occurrences),
            self.false_occurrences.saturating_add(other.false_occurrences),
        )
    }

    fn majority(&self) -> Option<Majority> {
        if self.total == 0 {
            return None;
        }
        Some(Majority::vote(self.true_occurrences, self.false_occurrences))
    }
}
