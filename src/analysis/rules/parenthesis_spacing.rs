use crate::analysis::rule::{Signal, StyleRule};
use crate::parser::ast::{SyntaxKind, SyntaxNode};
use crate::statistics::BooleanData;

pub struct MethodDeclarationParenthesesSpacingRule;

impl StyleRule for MethodDeclarationParenthesesSpacingRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_space_between_method_declaration_parameter_list_parentheses";
    const DESCRIPTION: &'static str = "Pads parameter lists with a space inside both parentheses";

    fn classify(node: &SyntaxNode) -> Signal<bool> {
        if !matches!(
            node.kind(),
            SyntaxKind::MethodDeclaration | SyntaxKind::ConstructorDeclaration
        ) || node.contains_diagnostics()
        {
            return Signal::NoSignal;
        }

        let Some(parameters) = node.find_child(SyntaxKind::ParameterList) else {
            return Signal::NoSignal;
        };
        let tokens = parameters.descendant_tokens();
        // `()` has nothing to pad
        let [open, .., before_close, _close] = tokens.as_slice() else {
            return Signal::NoSignal;
        };

        Signal::Observation(open.has_trailing_whitespace() && before_close.has_trailing_whitespace())
    }
}
