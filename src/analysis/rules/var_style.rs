use crate::analysis::rule::{Signal, StyleRule};
use crate::lexer::{SyntaxToken, Token};
use crate::parser::ast::{SyntaxKind, SyntaxNode};
use crate::statistics::BooleanData;

pub struct VarForBuiltInTypesRule;
pub struct VarWhenTypeIsApparentRule;
pub struct VarElsewhereRule;

impl StyleRule for VarForBuiltInTypesRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_style_var_for_built_in_types";
    const DESCRIPTION: &'static str = "Uses `var` for locals initialised from string or numeric literals";

    fn classify(node: &SyntaxNode) -> Signal<bool> {
        let Some(declaration) = LocalDeclaration::of(node) else {
            return Signal::NoSignal;
        };
        if declaration.has_literal() {
            Signal::Observation(declaration.declares_var())
        } else {
            Signal::NoSignal
        }
    }
}

impl StyleRule for VarWhenTypeIsApparentRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_style_var_when_type_is_apparent";
    const DESCRIPTION: &'static str = "Uses `var` for locals initialised with `new T(...)`";

    fn classify(node: &SyntaxNode) -> Signal<bool> {
        let Some(declaration) = LocalDeclaration::of(node) else {
            return Signal::NoSignal;
        };
        if declaration.has_object_creation() {
            Signal::Observation(declaration.declares_var())
        } else {
            Signal::NoSignal
        }
    }
}

impl StyleRule for VarElsewhereRule {
    type Data = BooleanData;
    type Fragment = SyntaxNode;

    const KEY: &'static str = "csharp_style_var_elsewhere";
    const DESCRIPTION: &'static str = "Uses `var` for any other initialised local";

    fn classify(node: &SyntaxNode) -> Signal<bool> {
        let Some(declaration) = LocalDeclaration::of(node) else {
            return Signal::NoSignal;
        };
        if declaration.has_initializer()
            && !declaration.has_literal()
            && !declaration.has_object_creation()
        {
            Signal::Observation(declaration.declares_var())
        } else {
            Signal::NoSignal
        }
    }
}

/// A well-formed local declaration statement.
struct LocalDeclaration<'a> {
    node: &'a SyntaxNode,
    tokens: Vec<&'a SyntaxToken>,
}

impl<'a> LocalDeclaration<'a> {
    fn of(node: &'a SyntaxNode) -> Option<Self> {
        if node.kind() != SyntaxKind::LocalDeclarationStatement || node.contains_diagnostics() {
            return None;
        }
        Some(Self {
            node,
            tokens: node.descendant_tokens(),
        })
    }

    /// The declared type is exactly the identifier `var`.
    fn declares_var(&self) -> bool {
        self.node
            .find_child(SyntaxKind::Type)
            .map(|type_node| {
                let tokens = type_node.descendant_tokens();
                tokens.len() == 1 && tokens[0].is_identifier("var")
            })
            .unwrap_or(false)
    }

    fn has_initializer(&self) -> bool {
        self.node.child_tokens().any(|t| t.token == Token::Equal)
    }

    fn has_literal(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t.token, Token::StringLiteral(_) | Token::NumericLiteral(_)))
    }

    /// `new T(...)` or `new T { ... }`; array creation and target-typed
    /// `new()` do not count.
    fn has_object_creation(&self) -> bool {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.token == Token::New)
            .any(|(i, _)| self.creates_object_at(i + 1))
    }

    fn creates_object_at(&self, start: usize) -> bool {
        let token_at = |i: usize| self.tokens.get(i).map(|t| &t.token);

        let mut i = start;
        match token_at(i) {
            Some(Token::Identifier(_) | Token::PredefinedType(_)) => i += 1,
            _ => return false,
        }

        loop {
            match token_at(i) {
                // qualified name
                Some(Token::Dot) => i += 2,
                Some(Token::Less) => {
                    let mut depth = 0usize;
                    loop {
                        match token_at(i) {
                            Some(Token::Less) => depth += 1,
                            Some(Token::Greater) => depth -= 1,
                            None => return false,
                            _ => {}
                        }
                        i += 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
                Some(Token::Question) => i += 1,
                Some(Token::LeftParen | Token::LeftBrace) => return true,
                _ => return false,
            }
        }
    }
}
