use crate::StyleGenError;
use crate::analysis::external_api::AnalyzerConfig;
use crate::analysis::rule::StyleRule;
use crate::analysis::rules::*;
use crate::analysis::style::Style;
use crate::parser::ast::SyntaxNode;
use crate::statistics::Accumulator;

/// One style per built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSet {
    pub indent_style: Style<IndentStyleRule>,
    pub var_for_built_in_types: Style<VarForBuiltInTypesRule>,
    pub var_when_type_is_apparent: Style<VarWhenTypeIsApparentRule>,
    pub var_elsewhere: Style<VarElsewhereRule>,
    pub new_line_before_finally: Style<NewLineBeforeFinallyRule>,
    pub new_line_before_catch: Style<NewLineBeforeCatchRule>,
    pub new_line_before_else: Style<NewLineBeforeElseRule>,
    pub expression_bodied_constructors: Style<ExpressionBodiedConstructorsRule>,
    pub expression_bodied_methods: Style<ExpressionBodiedMethodsRule>,
    pub method_declaration_parentheses_spacing: Style<MethodDeclarationParenthesesSpacingRule>,
}

fn configured<R: StyleRule>(config: &AnalyzerConfig) -> Style<R> {
    Style::new(R::Data::default(), config.severity_for(R::KEY))
}

impl StyleSet {
    /// Empty styles carrying the severities chosen by `config`.
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            indent_style: configured(config),
            var_for_built_in_types: configured(config),
            var_when_type_is_apparent: configured(config),
            var_elsewhere: configured(config),
            new_line_before_finally: configured(config),
            new_line_before_catch: configured(config),
            new_line_before_else: configured(config),
            expression_bodied_constructors: configured(config),
            expression_bodied_methods: configured(config),
            method_declaration_parentheses_spacing: configured(config),
        }
    }

    /// Offers `node` to every rule.
    pub fn update(&self, node: &SyntaxNode) -> Self {
        Self {
            indent_style: self.indent_style.update(node),
            var_for_built_in_types: self.var_for_built_in_types.update(node),
            var_when_type_is_apparent: self.var_when_type_is_apparent.update(node),
            var_elsewhere: self.var_elsewhere.update(node),
            new_line_before_finally: self.new_line_before_finally.update(node),
            new_line_before_catch: self.new_line_before_catch.update(node),
            new_line_before_else: self.new_line_before_else.update(node),
            expression_bodied_constructors: self.expression_bodied_constructors.update(node),
            expression_bodied_methods: self.expression_bodied_methods.update(node),
            method_declaration_parentheses_spacing: self
                .method_declaration_parentheses_spacing
                .update(node),
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        Self {
            indent_style: self.indent_style.add(&other.indent_style),
            var_for_built_in_types: self.var_for_built_in_types.add(&other.var_for_built_in_types),
            var_when_type_is_apparent: self
                .var_when_type_is_apparent
                .add(&other.var_when_type_is_apparent),
            var_elsewhere: self.var_elsewhere.add(&other.var_elsewhere),
            new_line_before_finally: self.new_line_before_finally.add(&other.new_line_before_finally),
            new_line_before_catch: self.new_line_before_catch.add(&other.new_line_before_catch),
            new_line_before_else: self.new_line_before_else.add(&other.new_line_before_else),
            expression_bodied_constructors: self
                .expression_bodied_constructors
                .add(&other.expression_bodied_constructors),
            expression_bodied_methods: self
                .expression_bodied_methods
                .add(&other.expression_bodied_methods),
            method_declaration_parentheses_spacing: self
                .method_declaration_parentheses_spacing
                .add(&other.method_declaration_parentheses_spacing),
        }
    }

    pub fn try_add(&self, other: Option<&Self>) -> Result<Self, StyleGenError> {
        let other = other.ok_or(StyleGenError::InvalidArgument("styles"))?;
        Ok(self.add(other))
    }

    /// Key and rendered line of every style, in registry order.
    pub fn entries(&self) -> [(&'static str, String); 10] {
        [
            (self.indent_style.key(), self.indent_style.setting()),
            (self.var_for_built_in_types.key(), self.var_for_built_in_types.setting()),
            (self.var_when_type_is_apparent.key(), self.var_when_type_is_apparent.setting()),
            (self.var_elsewhere.key(), self.var_elsewhere.setting()),
            (self.new_line_before_finally.key(), self.new_line_before_finally.setting()),
            (self.new_line_before_catch.key(), self.new_line_before_catch.setting()),
            (self.new_line_before_else.key(), self.new_line_before_else.setting()),
            (
                self.expression_bodied_constructors.key(),
                self.expression_bodied_constructors.setting(),
            ),
            (self.expression_bodied_methods.key(), self.expression_bodied_methods.setting()),
            (
                self.method_declaration_parentheses_spacing.key(),
                self.method_declaration_parentheses_spacing.setting(),
            ),
        ]
    }

    /// Non-empty setting lines of the rules `config` leaves enabled.
    pub fn settings(&self, config: &AnalyzerConfig) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(key, line)| !line.is_empty() && config.is_rule_enabled(key))
            .map(|(_, line)| line)
            .collect()
    }

    /// Total number of observations across all rules.
    pub fn observations(&self) -> u64 {
        [
            self.indent_style.data().total(),
            self.var_for_built_in_types.data().total(),
            self.var_when_type_is_apparent.data().total(),
            self.var_elsewhere.data().total(),
            self.new_line_before_finally.data().total(),
            self.new_line_before_catch.data().total(),
            self.new_line_before_else.data().total(),
            self.expression_bodied_constructors.data().total(),
            self.expression_bodied_methods.data().total(),
            self.method_declaration_parentheses_spacing.data().total(),
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }
}
