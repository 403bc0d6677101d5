use crate::analysis::rule::StyleRule;
use crate::analysis::rules::*;

/// What the driver knows about a rule without its types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    pub key: &'static str,
    pub description: &'static str,
    pub include_severity: bool,
}

impl RuleInfo {
    pub fn of<R: StyleRule>() -> Self {
        Self {
            key: R::KEY,
            description: R::DESCRIPTION,
            include_severity: R::INCLUDE_SEVERITY,
        }
    }
}

/// Rules in the order their settings are written.
pub struct RuleRegistry {
    rules: Vec<RuleInfo>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Every built-in rule, in output order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<IndentStyleRule>();
        registry.register::<VarForBuiltInTypesRule>();
        registry.register::<VarWhenTypeIsApparentRule>();
        registry.register::<VarElsewhereRule>();
        registry.register::<NewLineBeforeFinallyRule>();
        registry.register::<NewLineBeforeCatchRule>();
        registry.register::<NewLineBeforeElseRule>();
        registry.register::<ExpressionBodiedConstructorsRule>();
        registry.register::<ExpressionBodiedMethodsRule>();
        registry.register::<MethodDeclarationParenthesesSpacingRule>();
        registry
    }

    pub fn register<R: StyleRule>(&mut self) {
        let info = RuleInfo::of::<R>();
        if !self.contains(info.key) {
            self.rules.push(info);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_rule(key).is_some()
    }

    pub fn get_rule(&self, key: &str) -> Option<&RuleInfo> {
        self.rules.iter().find(|r| r.key == key)
    }

    pub fn get_all_rules(&self) -> &[RuleInfo] {
        &self.rules
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
