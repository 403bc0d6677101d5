use std::fmt;
use std::marker::PhantomData;

use log::trace;

use crate::analysis::rule::{Signal, StyleRule};
use crate::analysis::severity::Severity;
use crate::statistics::{Accumulator, Majority};
use crate::StyleGenError;

/// Accumulated evidence for one rule, plus the severity it is reported with.
pub struct Style<R: StyleRule> {
    data: R::Data,
    severity: Severity,
    rule: PhantomData<fn() -> R>,
}

impl<R: StyleRule> Style<R> {
    pub fn new(data: R::Data, severity: Severity) -> Self {
        Self {
            data,
            severity,
            rule: PhantomData,
        }
    }

    pub fn data(&self) -> R::Data {
        self.data
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn key(&self) -> &'static str {
        R::KEY
    }

    /// Classifies `fragment` and counts the observation, if any.
    pub fn update(&self, fragment: &R::Fragment) -> Self {
        match R::classify(fragment) {
            Signal::Observation(occurrence) => Self::new(self.data.update(occurrence), self.severity),
            Signal::NoSignal => {
                trace!("{}: fragment gave no signal", R::KEY);
                *self
            }
        }
    }

    pub fn try_update(&self, fragment: Option<&R::Fragment>) -> Result<Self, StyleGenError> {
        let fragment = fragment.ok_or(StyleGenError::InvalidArgument("fragment"))?;
        Ok(self.update(fragment))
    }

    /// Sums both tallies; the receiver's severity is kept.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.data.add(&other.data), self.severity)
    }

    pub fn try_add(&self, other: Option<&Self>) -> Result<Self, StyleGenError> {
        let other = other.ok_or(StyleGenError::InvalidArgument("style"))?;
        Ok(self.add(other))
    }

    /// Renders the setting line, or an empty string when nothing was observed.
    pub fn setting(&self) -> String {
        let Some(majority) = self.data.majority() else {
            return String::new();
        };

        let value = match majority {
            Majority::First => R::LABELS.0,
            Majority::Second => R::LABELS.1,
        };

        if R::INCLUDE_SEVERITY {
            format!("{} = {}:{}", R::KEY, value, self.severity)
        } else {
            format!("{} = {}", R::KEY, value)
        }
    }
}

impl<R: StyleRule> Clone for Style<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: StyleRule> Copy for Style<R> {}

impl<R: StyleRule> PartialEq for Style<R> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data && self.severity == other.severity
    }
}

impl<R: StyleRule> Eq for Style<R> {}

impl<R: StyleRule> Default for Style<R> {
    fn default() -> Self {
        Self::new(R::Data::default(), Severity::default())
    }
}

impl<R: StyleRule> fmt::Debug for Style<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("key", &R::KEY)
            .field("data", &self.data)
            .field("severity", &self.severity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::{
        BooleanData, ExpressionBodiedData, ExpressionBodiedOccurrence, TabSpaceData,
        TabSpaceOccurrence,
    };
    use proptest::prelude::*;

    // Toy rules over plain strings keep these tests independent of the parser.
    struct Flag;

    impl StyleRule for Flag {
        type Data = BooleanData;
        type Fragment = str;
        const KEY: &'static str = "flag";
        const DESCRIPTION: &'static str = "yes or no";

        fn classify(fragment: &str) -> Signal<bool> {
            match fragment {
                "yes" => Signal::Observation(true),
                "no" => Signal::Observation(false),
                _ => Signal::NoSignal,
            }
        }
    }

    struct Indent;

    impl StyleRule for Indent {
        type Data = TabSpaceData;
        type Fragment = str;
        const KEY: &'static str = "indent";
        const DESCRIPTION: &'static str = "leading character";
        const LABELS: (&'static str, &'static str) = ("tab", "space");
        const INCLUDE_SEVERITY: bool = false;

        fn classify(fragment: &str) -> Signal<TabSpaceOccurrence> {
            match fragment.chars().next() {
                Some('\t') => Signal::Observation(TabSpaceOccurrence::Tab),
                Some(' ') => Signal::Observation(TabSpaceOccurrence::Space),
                _ => Signal::NoSignal,
            }
        }
    }

    struct Bodies;

    impl StyleRule for Bodies {
        type Data = ExpressionBodiedData;
        type Fragment = ExpressionBodiedOccurrence;
        const KEY: &'static str = "bodies";
        const DESCRIPTION: &'static str = "arrow or block";

        fn classify(fragment: &ExpressionBodiedOccurrence) -> Signal<ExpressionBodiedOccurrence> {
            Signal::Observation(*fragment)
        }
    }

    #[test]
    fn test_create_with_custom_severity() {
        let style = Style::<Flag>::new(BooleanData::default(), Severity::Suggestion);
        assert_eq!(style.severity(), Severity::Suggestion);
    }

    #[test]
    fn test_setting_without_data_is_empty() {
        let style = Style::<Flag>::default();
        assert_eq!(style.data(), BooleanData::default());
        assert_eq!(style.setting(), "");
    }

    #[test]
    fn test_setting_follows_majority() {
        let style = Style::<Flag>::new(BooleanData::new(1, 0, 1), Severity::Error);
        assert_eq!(style.setting(), "flag = false:error");
        let style = Style::<Flag>::new(BooleanData::new(1, 1, 0), Severity::Error);
        assert_eq!(style.setting(), "flag = true:error");
        let style = Style::<Flag>::new(BooleanData::new(2, 1, 1), Severity::Warning);
        assert_eq!(style.setting(), "flag = true:warning");
    }

    #[test]
    fn test_setting_without_severity_suffix() {
        let style = Style::<Indent>::new(TabSpaceData::new(1, 0, 1), Severity::Error);
        assert_eq!(style.setting(), "indent = space");
        let style = Style::<Indent>::new(TabSpaceData::new(1, 1, 0), Severity::Error);
        assert_eq!(style.setting(), "indent = tab");
    }

    #[test]
    fn test_expression_bodied_setting() {
        let style = Style::<Bodies>::new(ExpressionBodiedData::new(2, 1, 1, 0, 0), Severity::Error);
        assert_eq!(style.setting(), "bodies = true:error");
        let style = Style::<Bodies>::new(ExpressionBodiedData::new(4, 1, 0, 0, 3), Severity::Error);
        assert_eq!(style.setting(), "bodies = false:error");
        let style = Style::<Bodies>::new(ExpressionBodiedData::from_legacy(1, 1, 0, 0), Severity::Error);
        assert_eq!(style.setting(), "bodies = true:error");
    }

    #[test]
    fn test_add_keeps_receiver_severity() {
        let first = Style::<Flag>::new(BooleanData::new(1, 2, 3), Severity::Warning);
        let second = Style::<Flag>::new(BooleanData::new(10, 20, 30), Severity::Silent);
        let sum = first.add(&second);
        assert_eq!(sum.data(), BooleanData::new(11, 22, 33));
        assert_eq!(sum.severity(), Severity::Warning);
    }

    #[test]
    fn test_missing_operands() {
        let style = Style::<Flag>::default();
        assert_eq!(
            style.try_add(None),
            Err(StyleGenError::InvalidArgument("style"))
        );
        assert_eq!(
            style.try_update(None),
            Err(StyleGenError::InvalidArgument("fragment"))
        );
        assert_eq!(style.try_update(Some("yes")).map(|s| s.data().total()), Ok(1));
    }

    #[test]
    fn test_update_returns_new_value() {
        let style = Style::<Flag>::new(BooleanData::default(), Severity::Suggestion);
        let updated = style.update("yes");
        assert_eq!(style.data(), BooleanData::default());
        assert_eq!(updated.data(), BooleanData::new(1, 1, 0));
        assert_eq!(updated.severity(), Severity::Suggestion);
    }

    #[test]
    fn test_no_signal_keeps_data() {
        let style = Style::<Flag>::new(BooleanData::new(3, 2, 1), Severity::Error);
        assert_eq!(style.update("maybe"), style);
    }

    proptest! {
        #[test]
        fn ignored_fragments_never_change_data(words in prop::collection::vec("[a-z]{0,6}", 0..20)) {
            let style = Style::<Flag>::new(BooleanData::new(4, 3, 1), Severity::Error);
            let after = words
                .iter()
                .filter(|w| *w != "yes" && *w != "no")
                .fold(style, |acc, w| acc.update(w));
            prop_assert_eq!(after, style);
        }

        #[test]
        fn setting_is_deterministic(t in 0u64..50, f in 0u64..50) {
            let style = Style::<Flag>::new(BooleanData::new(t + f, t, f), Severity::Error);
            prop_assert_eq!(style.setting(), style.setting());
        }
    }
}
