use std::fmt;
use std::str::FromStr;

use crate::StyleGenError;

/// How strongly a tool should enforce an inferred setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    None,
    Silent,
    Suggestion,
    Warning,
    #[default]
    Error,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Silent,
        Severity::Suggestion,
        Severity::Warning,
        Severity::Error,
    ];

    /// The label written after the `:` of a setting.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Silent => "silent",
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Severity {
    type Err = StyleGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StyleGenError::UnknownSeverity(s.to_string()))
    }
}
