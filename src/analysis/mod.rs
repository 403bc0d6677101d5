pub mod context;
pub mod external_api;
pub mod rule;
pub mod rule_registry;
pub mod rules;
pub mod settings_printer;
pub mod severity;
pub mod style;
pub mod style_set;

use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::context::AnalysisContext;
use crate::analysis::external_api::AnalyzerConfig;
use crate::analysis::rule_registry::RuleRegistry;
use crate::analysis::style_set::StyleSet;
use crate::parser::ast::SyntaxNode;
use crate::parser::parse_compilation_unit;

pub struct StyleAnalyzer {
    rule_registry: RuleRegistry,
    config: AnalyzerConfig,
}

impl Default for StyleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleAnalyzer {
    pub fn new() -> Self {
        Self {
            rule_registry: RuleRegistry::builtin(),
            config: AnalyzerConfig::default(),
        }
    }

    /// Infers styles from a single source file.
    pub fn analyze(&self, source: &str) -> StyleSet {
        let unit = parse_compilation_unit(source);
        let mut ctx = AnalysisContext::new(&self.config);
        self.visit_node(&mut ctx, &unit);

        debug!(
            "visited {} nodes ({} malformed), {} observations",
            ctx.nodes_visited,
            ctx.malformed_nodes,
            ctx.styles.observations()
        );
        ctx.styles
    }

    /// Infers styles from many sources in parallel and sums them.
    ///
    /// The result does not depend on how the work is split.
    pub fn analyze_sources<S: AsRef<str> + Sync>(&self, sources: &[S]) -> StyleSet {
        let styles = sources
            .par_iter()
            .map(|source| self.analyze(source.as_ref()))
            .reduce(|| StyleSet::new(&self.config), |a, b| a.add(&b));

        info!(
            "inferred styles from {} source(s), {} observations",
            sources.len(),
            styles.observations()
        );
        styles
    }

    /// Rendered lines for the enabled rules with at least one observation.
    pub fn settings(&self, styles: &StyleSet) -> Vec<String> {
        styles.settings(&self.config)
    }

    // Pre-order: every node is offered to every rule.
    fn visit_node(&self, ctx: &mut AnalysisContext, node: &SyntaxNode) {
        ctx.nodes_visited += 1;
        if !node.diagnostics().is_empty() {
            ctx.malformed_nodes += 1;
        }
        ctx.styles = ctx.styles.update(node);

        for child in node.child_nodes() {
            self.visit_node(ctx, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::severity::Severity;
    use crate::statistics::{Accumulator, BooleanData, ExpressionBodiedData, TabSpaceData};
    use proptest::prelude::*;

    const TEST_SOURCE: &str = r#"using System;
using System.Collections.Generic;

namespace Demo
{
    public class Account
    {
        private readonly int id;
        private readonly List<string> log;

        public Account(int id) => this.id = id;

        public Account( int id, string owner )
        {
            this.id = id;
        }

        public int Id => this.id;

        public string Describe()
        {
            var prefix = "account";
            var entries = new List<string>();
            string owner = Lookup(this.id);
            try
            {
                entries.Add(prefix);
            }
            catch (Exception e)
            {
                Console.WriteLine(e);
            }
            finally
            {
                entries.Clear();
            }

            if (owner == null)
            {
                return prefix;
            }
            else
            {
                return owner;
            }
        }

        private static string Lookup(int id) => id.ToString();
    }
}
"#;

    #[test]
    fn test_analyze() {
        let styles = StyleAnalyzer::new().analyze(TEST_SOURCE);

        assert_eq!(styles.indent_style.data().tab_occurrences(), 0);
        assert!(styles.indent_style.data().space_occurrences() > 0);
        assert_eq!(styles.var_for_built_in_types.data(), BooleanData::new(1, 1, 0));
        assert_eq!(styles.var_when_type_is_apparent.data(), BooleanData::new(1, 1, 0));
        assert_eq!(styles.var_elsewhere.data(), BooleanData::new(1, 0, 1));
        assert_eq!(styles.new_line_before_finally.data(), BooleanData::new(1, 1, 0));
        assert_eq!(styles.new_line_before_catch.data(), BooleanData::new(1, 1, 0));
        assert_eq!(styles.new_line_before_else.data(), BooleanData::new(1, 1, 0));
        assert_eq!(
            styles.expression_bodied_constructors.data(),
            ExpressionBodiedData::new(2, 1, 0, 1, 0)
        );
        // Describe has several statements; Lookup is an arrow
        assert_eq!(
            styles.expression_bodied_methods.data(),
            ExpressionBodiedData::new(1, 1, 0, 0, 0)
        );
        assert_eq!(
            styles.method_declaration_parentheses_spacing.data(),
            BooleanData::new(3, 1, 2)
        );
    }

    #[test]
    fn test_settings() {
        let analyzer = StyleAnalyzer::new();
        let settings = analyzer.settings(&analyzer.analyze(TEST_SOURCE));
        assert_eq!(
            settings,
            [
                "indent_style = space",
                "csharp_style_var_for_built_in_types = true:error",
                "csharp_style_var_when_type_is_apparent = true:error",
                "csharp_style_var_elsewhere = false:error",
                "csharp_new_line_before_finally = true:error",
                "csharp_new_line_before_catch = true:error",
                "csharp_new_line_before_else = true:error",
                "csharp_style_expression_bodied_constructors = true:error",
                "csharp_style_expression_bodied_methods = true:error",
                "csharp_space_between_method_declaration_parameter_list_parentheses = false:error",
            ]
        );
    }

    #[test]
    fn test_empty_source_has_no_settings() {
        let analyzer = StyleAnalyzer::new();
        assert!(analyzer.settings(&analyzer.analyze("")).is_empty());
    }

    #[test]
    fn test_configured_analyzer() {
        let config = AnalyzerConfig {
            disabled_rules: vec!["indent_style".to_string()],
            default_severity: Severity::Warning,
            severity_overrides: vec![("csharp_style_var_elsewhere".to_string(), Severity::Silent)],
        };
        let analyzer = StyleAnalyzer::with_config(config).unwrap();
        let settings = analyzer.settings(&analyzer.analyze(TEST_SOURCE));
        assert!(settings.iter().all(|line| !line.starts_with("indent_style")));
        assert!(settings.contains(&"csharp_style_var_elsewhere = false:silent".to_string()));
        assert!(settings.contains(&"csharp_new_line_before_else = true:warning".to_string()));
    }

    #[test]
    fn test_analyze_sources_sums_files() {
        let analyzer = StyleAnalyzer::new();
        let sources = [
            "class A\n{\n\tint x;\n}\n",
            "class B\n{\n    int y;\n}\n",
            "class C\n{\n\tint z;\n}\n",
        ];
        let styles = analyzer.analyze_sources(&sources);
        assert_eq!(styles.indent_style.data(), TabSpaceData::new(3, 2, 1));
        assert_eq!(analyzer.settings(&styles), ["indent_style = tab"]);
    }

    #[test]
    fn test_declaration_after_local_function_is_counted() {
        let source = "class Foo\n{\n    void M()\n    {\n        int Add(int a) { return a; }\n        var y = Compute();\n    }\n}\n";
        let styles = StyleAnalyzer::new().analyze(source);
        assert_eq!(styles.var_elsewhere.data(), BooleanData::new(1, 1, 0));
    }

    #[test]
    fn test_destructor_is_not_counted_as_method() {
        let source = "class Foo\n{\n    ~Foo() => Dispose();\n}\n";
        let styles = StyleAnalyzer::new().analyze(source);
        assert_eq!(styles.expression_bodied_methods.data().total(), 0);
        assert_eq!(styles.method_declaration_parentheses_spacing.data().total(), 0);
    }

    fn source_file() -> impl Strategy<Value = String> {
        let line = prop_oneof![
            Just("var a = 1;"),
            Just("int b = Compute();"),
            Just("var c = new Foo();"),
            Just("Foo d = new Foo();"),
            Just("try { } finally { }"),
            Just("try { }\ncatch { }"),
            Just("if (x) { }\nelse { }"),
            Just("int e = 1"),
        ];
        (
            prop::bool::ANY,
            prop::collection::vec(line, 0..8),
        )
            .prop_map(|(tabs, lines)| {
                let indent = if tabs { "\t\t" } else { "        " };
                let body: String = lines
                    .iter()
                    .map(|line| format!("{}{}\n", indent, line))
                    .collect();
                format!("class Foo\n{{\n    void Bar()\n    {{\n{}    }}\n}}\n", body)
            })
    }

    proptest! {
        #[test]
        fn parallel_analysis_matches_sequential_fold(sources in prop::collection::vec(source_file(), 0..6)) {
            let analyzer = StyleAnalyzer::new();
            let sequential = sources
                .iter()
                .fold(StyleSet::default(), |acc, source| acc.add(&analyzer.analyze(source)));
            prop_assert_eq!(analyzer.analyze_sources(&sources), sequential);
        }

        #[test]
        fn arbitrary_text_is_analyzed_deterministically(source in "[ \\t\\n{}();=a-z0-9\"]{0,80}") {
            let analyzer = StyleAnalyzer::new();
            let styles = analyzer.analyze(&source);
            prop_assert_eq!(analyzer.analyze(&source), styles);
            prop_assert!(analyzer.settings(&styles).len() <= 10);
        }
    }
}
