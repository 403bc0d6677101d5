use crate::StyleGenError;
use crate::analysis::StyleAnalyzer;
use crate::analysis::rule_registry::RuleRegistry;
use crate::analysis::severity::Severity;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Keys whose settings are left out of the output.
    pub disabled_rules: Vec<String>,
    pub default_severity: Severity,
    /// Per-key severities; a later entry wins over an earlier one.
    pub severity_overrides: Vec<(String, Severity)>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            default_severity: Severity::Error,
            severity_overrides: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Adds an override from a textual severity label such as `"warning"`.
    pub fn with_override(mut self, key: &str, severity: &str) -> Result<Self, StyleGenError> {
        let severity = severity.parse::<Severity>()?;
        self.severity_overrides.push((key.to_string(), severity));
        Ok(self)
    }

    pub fn severity_for(&self, key: &str) -> Severity {
        self.severity_overrides
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, severity)| *severity)
            .unwrap_or(self.default_severity)
    }

    pub fn is_rule_enabled(&self, key: &str) -> bool {
        !self.disabled_rules.iter().any(|k| k == key)
    }

    /// Every key named by the configuration must belong to a rule.
    pub fn validate(&self, registry: &RuleRegistry) -> Result<(), StyleGenError> {
        let keys = self
            .disabled_rules
            .iter()
            .chain(self.severity_overrides.iter().map(|(key, _)| key));
        for key in keys {
            if !registry.contains(key) {
                return Err(StyleGenError::UnknownRule(key.clone()));
            }
        }
        Ok(())
    }
}

impl StyleAnalyzer {
    pub fn with_config(config: AnalyzerConfig) -> Result<Self, StyleGenError> {
        let rule_registry = RuleRegistry::builtin();
        config.validate(&rule_registry)?;
        Ok(Self {
            rule_registry,
            config,
        })
    }

    /// Key, description and configured severity of every rule.
    pub fn list_rules(&self) -> Vec<(&'static str, &'static str, Severity)> {
        self.rule_registry
            .get_all_rules()
            .iter()
            .map(|rule| (rule.key, rule.description, self.config.severity_for(rule.key)))
            .collect()
    }
}
