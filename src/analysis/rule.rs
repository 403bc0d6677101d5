use crate::statistics::Accumulator;

/// Outcome of classifying one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal<O> {
    /// The fragment carries nothing worth counting.
    NoSignal,
    Observation(O),
}

/// A single inferable setting.
pub trait StyleRule {
    type Data: Accumulator;

    /// What the classifier looks at.
    type Fragment: ?Sized;

    /// Setting key written to the left of `=`.
    const KEY: &'static str;

    const DESCRIPTION: &'static str;

    /// Values rendered for the first and second majority.
    const LABELS: (&'static str, &'static str) = ("true", "false");

    /// Whether the rendered value carries a `:severity` suffix.
    const INCLUDE_SEVERITY: bool = true;

    /// Must be pure, and must return `NoSignal` for fragments carrying
    /// diagnostics.
    fn classify(fragment: &Self::Fragment) -> Signal<<Self::Data as Accumulator>::Occurrence>;
}
