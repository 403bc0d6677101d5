use crate::analysis::rule::{Signal, StyleRule};
use crate::lexer::Token;
use crate::parser::ast::{SyntaxKind, SyntaxNode};
use crate::statistics::BooleanData;

pub struct NewLineBeforeFinallyRule;
pub struct NewLineBeforeCatchRule;
pub struct NewLineBeforeElseRule;

impl StyleRule for NewLineBeforeFinallyRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_new_line_before_finally";
    const DESCRIPTION: &'static str = "Places `finally` on the line after the closing brace";

    fn classify(node: &SyntaxNode) -> Signal<bool> {
        if node.kind() != SyntaxKind::TryStatement {
            return Signal::NoSignal;
        }
        line_break_before(node, SyntaxKind::FinallyClause)
    }
}

impl StyleRule for NewLineBeforeCatchRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_new_line_before_catch";
    const DESCRIPTION: &'static str = "Places `catch` on the line after the closing brace";

    /// Looks at the first `catch` of the statement only.
    fn classify(node: &SyntaxNode) -> Signal<bool> {
        if node.kind() != SyntaxKind::TryStatement {
            return Signal::NoSignal;
        }
        line_break_before(node, SyntaxKind::CatchClause)
    }
}

impl StyleRule for NewLineBeforeElseRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_new_line_before_else";
    const DESCRIPTION: &'static str = "Places `else` on the line after the closing brace";

    fn classify(node: &SyntaxNode) -> Signal<bool> {
        if node.kind() != SyntaxKind::IfStatement {
            return Signal::NoSignal;
        }
        line_break_before(node, SyntaxKind::ElseClause)
    }
}

/// Whether the `}` right before the first `clause` child ends its line.
///
/// Only the clause's own diagnostics suppress the observation; a clause not
/// preceded by a closing brace gives no signal.
fn line_break_before(statement: &SyntaxNode, clause: SyntaxKind) -> Signal<bool> {
    let children: Vec<&SyntaxNode> = statement.child_nodes().collect();
    let Some(index) = children.iter().position(|n| n.kind() == clause) else {
        return Signal::NoSignal;
    };
    if index == 0 || children[index].contains_diagnostics() {
        return Signal::NoSignal;
    }

    match children[index - 1].last_token() {
        Some(brace) if brace.token == Token::RightBrace => {
            Signal::Observation(brace.has_trailing_end_of_line())
        }
        _ => Signal::NoSignal,
    }
}
