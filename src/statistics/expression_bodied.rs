use crate::statistics::{Accumulator, Majority};

/// Shape of one member body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionBodiedOccurrence {
    ArrowSingleLine,
    ArrowMultiLine,
    BlockSingleLine,
    BlockMultiLine,
}

/// Tally of member bodies written as `=> expr` versus `{ statement }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExpressionBodiedData {
    total: u64,
    arrow_single_line_occurrences: u64,
    arrow_multi_line_occurrences: u64,
    block_single_line_occurrences: u64,
    block_multi_line_occurrences: u64,
}

impl ExpressionBodiedData {
    pub const fn new(
        total: u64,
        arrow_single_line_occurrences: u64,
        arrow_multi_line_occurrences: u64,
        block_single_line_occurrences: u64,
        block_multi_line_occurrences: u64,
    ) -> Self {
        Self {
            total,
            arrow_single_line_occurrences,
            arrow_multi_line_occurrences,
            block_single_line_occurrences,
            block_multi_line_occurrences,
        }
    }

    /// Tallies recorded before blocks were split by line count; every block
    /// counts as single-line.
    pub const fn from_legacy(
        total: u64,
        arrow_single_line_occurrences: u64,
        arrow_multi_line_occurrences: u64,
        block_occurrences: u64,
    ) -> Self {
        Self::new(
            total,
            arrow_single_line_occurrences,
            arrow_multi_line_occurrences,
            block_occurrences,
            0,
        )
    }

    pub fn arrow_single_line_occurrences(&self) -> u64 {
        self.arrow_single_line_occurrences
    }

    pub fn arrow_multi_line_occurrences(&self) -> u64 {
        self.arrow_multi_line_occurrences
    }

    pub fn block_single_line_occurrences(&self) -> u64 {
        self.block_single_line_occurrences
    }

    pub fn block_multi_line_occurrences(&self) -> u64 {
        self.block_multi_line_occurrences
    }

    pub fn arrow_occurrences(&self) -> u64 {
        self.arrow_single_line_occurrences
            .saturating_add(self.arrow_multi_line_occurrences)
    }

    pub fn block_occurrences(&self) -> u64 {
        self.block_single_line_occurrences
            .saturating_add(self.block_multi_line_occurrences)
    }
}

impl Accumulator for ExpressionBodiedData {
    type Occurrence = ExpressionBodiedOccurrence;

    fn total(&self) -> u64 {
        self.total
    }

    fn update(&self, occurrence: ExpressionBodiedOccurrence) -> Self {
        let mut next = *self;
        next.total = next.total.saturating_add(1);
        let count = match occurrence {
            ExpressionBodiedOccurrence::ArrowSingleLine => &mut next.arrow_single_line_occurrences,
            ExpressionBodiedOccurrence::ArrowMultiLine => &mut next.arrow_multi_line_occurrences,
            ExpressionBodiedOccurrence::BlockSingleLine => &mut next.block_single_line_occurrences,
            ExpressionBodiedOccurrence::BlockMultiLine => &mut next.block_multi_line_occurrences,
        };
        *count = count.saturating_add(1);
        next
    }

    fn add(&self, other: &Self) -> Self {
        Self::new(
            self.total.saturating_add(other.total),
            self.arrow_single_line_occurrences
                .saturating_add(other.arrow_single_line_occurrences),
            self.arrow_multi_line_occurrences
                .saturating_add(other.arrow_multi_line_occurrences),
            self.block_single_line_occurrences
                .saturating_add(other.block_single_line_occurrences),
            self.block_multi_line_occurrences
                .saturating_add(other.block_multi_line_occurrences),
        )
    }

    /// Arrows against blocks, regardless of line count.
    fn majority(&self) -> Option<Majority> {
        if self.total == 0 {
            return None;
        }
        Some(Majority::vote(self.arrow_occurrences(), self.block_occurrences()))
    }
}
