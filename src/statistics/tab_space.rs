use crate::statistics::{Accumulator, Majority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TabSpaceOccurrence {
    Tab,
    Space,
}

/// Tally of lines indented with tabs versus spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TabSpaceData {
    total: u64,
    tab_occurrences: u64,
    space_occurrences: u64,
}

impl TabSpaceData {
    pub const fn new(total: u64, tab_occurrences: u64, space_occurrences: u64) -> Self {
        Self {
            total,
            tab_occurrences,
            space_occurrences,
        }
    }

    pub fn tab_occurrences(&self) -> u64 {
        self.tab_occurrences
    }

    pub fn space_occurrences(&self) -> u64 {
        self.space_occurrences
    }
}

impl Accumulator for TabSpaceData {
    type Occurrence = TabSpaceOccurrence;

    fn total(&self) -> u64 {
        self.total
    }

    fn update(&self, occurrence: TabSpaceOccurrence) -> Self {
        let total = self.total.saturating_add(1);
        match occurrence {
            TabSpaceOccurrence::Tab => Self::new(
                total,
                self.tab_occurrences.saturating_add(1),
                self.space_occurrences,
            ),
            TabSpaceOccurrence::Space => Self::new(
                total,
                self.tab_occurrences,
                self.space_occurrences.saturating_add(1),
            ),
        }
    }

    fn add(&self, other: &Self) -> Self {
        Self::new(
            self.total.saturating_add(other.total),
            self.tab_occurrences.saturating_add(other.tab_occurrences),
            self.space_occurrences.saturating_add(other.space_occurrences),
        )
    }

    fn majority(&self) -> Option<Majority> {
        (self.total > 0).then(|| Majority::vote(self.tab_occurrences, self.space_occurrences))
    }
}
