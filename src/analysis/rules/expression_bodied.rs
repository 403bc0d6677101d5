use crate::analysis::rule::{Signal, StyleRule};
use crate::parser::ast::{SyntaxKind, SyntaxNode};
use crate::statistics::{ExpressionBodiedData, ExpressionBodiedOccurrence};

pub struct ExpressionBodiedConstructorsRule;
pub struct ExpressionBodiedMethodsRule;

impl StyleRule for ExpressionBodiedConstructorsRule {
    type Data = ExpressionBodiedData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_style_expression_bodied_constructors";
    const DESCRIPTION: &'static str = "Writes single-statement constructors as `=> expression`";

    fn classify(node: &SyntaxNode) -> Signal<ExpressionBodiedOccurrence> {
        body_shape(node, SyntaxKind::ConstructorDeclaration)
    }
}

impl StyleRule for ExpressionBodiedMethodsRule {
    type Data = ExpressionBodiedData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_style_expression_bodied_methods";
    const DESCRIPTION: &'static str = "Writes single-statement methods as `=> expression`";

    fn classify(node: &SyntaxNode) -> Signal<ExpressionBodiedOccurrence> {
        body_shape(node, SyntaxKind::MethodDeclaration)
    }
}

fn body_shape(node: &SyntaxNode, kind: SyntaxKind) -> Signal<ExpressionBodiedOccurrence> {
    if node.kind() != kind || node.contains_diagnostics() {
        return Signal::NoSignal;
    }

    if let Some(arrow) = node.find_child(SyntaxKind::ArrowExpressionClause) {
        return Signal::Observation(if arrow.spans_lines() {
            ExpressionBodiedOccurrence::ArrowMultiLine
        } else {
            ExpressionBodiedOccurrence::ArrowSingleLine
        });
    }

    // a block only competes with an arrow when it holds exactly one statement
    let Some(block) = node.find_child(SyntaxKind::Block) else {
        return Signal::NoSignal;
    };
    let statements: Vec<&SyntaxNode> = block
        .descendant_nodes()
        .into_iter()
        .filter(|n| n.kind().is_statement())
        .collect();

    match statements.as_slice() {
        [statement] if statement.spans_lines() => {
            Signal::Observation(ExpressionBodiedOccurrence::BlockMultiLine)
        }
        [_] => Signal::Observation(ExpressionBodiedOccurrence::BlockSingleLine),
        _ => Signal::NoSignal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::severity::Severity;
    use crate::analysis::style::Style;
    use crate::parser::parse_compilation_unit;
    use crate::statistics::Accumulator;

    fn observe<R: StyleRule<Fragment = SyntaxNode, Data = ExpressionBodiedData>>(
        source: &str,
        kind: SyntaxKind,
    ) -> ExpressionBodiedData {
        let unit = parse_compilation_unit(source);
        let node = unit
            .descendant_nodes()
            .into_iter()
            .find(|n| n.kind() == kind)
            .unwrap();
        Style::<R>::new(ExpressionBodiedData::default(), Severity::Error)
            .update(node)
            .data()
    }

    fn constructor(source: &str) -> ExpressionBodiedData {
        observe::<ExpressionBodiedConstructorsRule>(source, SyntaxKind::ConstructorDeclaration)
    }

    fn method(source: &str) -> ExpressionBodiedData {
        observe::<ExpressionBodiedMethodsRule>(source, SyntaxKind::MethodDeclaration)
    }

    #[test]
    fn test_constructor_with_several_statements() {
        let data = constructor(
            "public class Foo { private readonly int x; public Foo() { var y = 22; this.x = 10 + y; } }",
        );
        assert_eq!(data.total(), 0);
    }

    #[test]
    fn test_constructor_with_single_line_arrow() {
        let data = constructor("public class Foo { private readonly int x; public Foo() => this.x = 10; }");
        assert_eq!(data, ExpressionBodiedData::new(1, 1, 0, 0, 0));
    }

    #[test]
    fn test_constructor_with_multi_line_arrow() {
        let data = constructor(
            "public class Foo { private readonly int x; public Foo() => this.x = \n 10; }",
        );
        assert_eq!(data, ExpressionBodiedData::new(1, 0, 1, 0, 0));
    }

    #[test]
    fn test_constructor_with_single_line_block() {
        let data = constructor("public class Foo { private readonly int x; public Foo() { this.x = 10; } }");
        assert_eq!(data, ExpressionBodiedData::new(1, 0, 0, 1, 0));
    }

    #[test]
    fn test_constructor_with_multi_line_block() {
        let data = constructor(
            "public class Foo { private readonly int x; public Foo() { this.x = \n 10; } }",
        );
        assert_eq!(data, ExpressionBodiedData::new(1, 0, 0, 0, 1));
    }

    #[test]
    fn test_constructor_with_diagnostics() {
        let data = constructor("public class Foo { private readonly int x; public Foo() => this.x = 10 }");
        assert_eq!(data.total(), 0);
    }

    #[test]
    fn test_formatted_block_is_single_line() {
        let data = method("class Foo\n{\n\tint Bar()\n\t{\n\t\treturn 1;\n\t}\n}\n");
        assert_eq!(data, ExpressionBodiedData::new(1, 0, 0, 1, 0));
    }

    #[test]
    fn test_nested_statements_count() {
        let data = method("class Foo { void Bar() { if (x) { Baz(); } } }");
        assert_eq!(data.total(), 0);
    }

    #[test]
    fn test_abstract_method_has_no_body() {
        let data = method("abstract class Foo { abstract void Bar(); }");
        assert_eq!(data.total(), 0);
    }

    #[test]
    fn test_constructors_are_not_methods() {
        let unit = parse_compilation_unit("class Foo { Foo() => Init(); }");
        let ctor = unit.descendant_nodes()[1];
        assert_eq!(ctor.kind(), SyntaxKind::ConstructorDeclaration);
        assert_eq!(ExpressionBodiedMethodsRule::classify(ctor), Signal::NoSignal);
    }

    #[test]
    fn test_add() {
        let sum = Style::<ExpressionBodiedConstructorsRule>::new(
            ExpressionBodiedData::new(1, 2, 3, 4, 5),
            Severity::Error,
        )
        .add(&Style::new(ExpressionBodiedData::new(10, 20, 30, 40, 50), Severity::Error));
        assert_eq!(sum.data(), ExpressionBodiedData::new(11, 22, 33, 44, 55));
    }

    #[test]
    fn test_setting() {
        let style = Style::<ExpressionBodiedConstructorsRule>::new(
            ExpressionBodiedData::from_legacy(1, 1, 0, 0),
            Severity::Error,
        );
        assert_eq!(style.setting(), "csharp_style_expression_bodied_constructors = true:error");
    }
}
