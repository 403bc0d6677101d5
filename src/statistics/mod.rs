mod boolean;
mod expression_bodied;
mod tab_space;

pub use boolean::BooleanData;
pub use expression_bodied::{ExpressionBodiedData, ExpressionBodiedOccurrence};
pub use tab_space::{TabSpaceData, TabSpaceOccurrence};

use std::fmt::Debug;

use crate::StyleGenError;

/// Which of the two decision groups won the vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Majority {
    First,
    Second,
}

impl Majority {
    /// Ties go to the first group.
    pub fn vote(first: u64, second: u64) -> Self {
        if first >= second {
            Majority::First
        } else {
            Majority::Second
        }
    }
}

/// An immutable tally of mutually exclusive occurrences.
///
/// Every operation returns a new value; the zero value (`Default`) is the
/// identity of [`Accumulator::add`].
pub trait Accumulator: Copy + Default + PartialEq + Eq + Debug + Send + Sync {
    /// The category one observation falls into.
    type Occurrence: Copy + Debug;

    fn total(&self) -> u64;

    /// Counts one more occurrence of `occurrence`.
    fn update(&self, occurrence: Self::Occurrence) -> Self;

    /// Pointwise sum of both tallies.
    fn add(&self, other: &Self) -> Self;

    /// Majority vote over the tally, `None` while nothing was observed.
    fn majority(&self) -> Option<Majority>;

    fn try_add(&self, other: Option<&Self>) -> Result<Self, StyleGenError> {
        let other = other.ok_or(StyleGenError::InvalidArgument("other"))?;
        Ok(self.add(other))
    }
}
