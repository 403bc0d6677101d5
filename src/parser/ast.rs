use crate::lexer::{SyntaxToken, Token, TriviaKind};

/// Represents a position in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

/// Represents a span in the source code (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    pub fn of_token(token: &SyntaxToken) -> Self {
        Self {
            start: SourcePosition { line: token.start.0, column: token.start.1 },
            end: SourcePosition { line: token.end.0, column: token.end.1 },
        }
    }
}

/// A syntax error found while shaping the token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    UsingDirective,
    NamespaceDeclaration,
    TypeDeclaration,
    ConstructorDeclaration,
    MethodDeclaration,
    DestructorDeclaration,
    MemberDeclaration,
    ParameterList,
    ArrowExpressionClause,
    Block,
    LocalDeclarationStatement,
    LocalFunctionStatement,
    Type,
    ExpressionStatement,
    TryStatement,
    CatchClause,
    FinallyClause,
    IfStatement,
    ElseClause,
    ControlStatement,
    DoStatement,
    SwitchStatement,
    EmptyStatement,
}

impl SyntaxKind {
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::LocalDeclarationStatement
                | SyntaxKind::LocalFunctionStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::TryStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::ControlStatement
                | SyntaxKind::DoStatement
                | SyntaxKind::SwitchStatement
                | SyntaxKind::EmptyStatement
        )
    }

    pub fn is_member(&self) -> bool {
        matches!(
            self,
            SyntaxKind::UsingDirective
                | SyntaxKind::NamespaceDeclaration
                | SyntaxKind::TypeDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::DestructorDeclaration
                | SyntaxKind::MemberDeclaration
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

/// A node of the shape tree: an ordered mix of child nodes and tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: SyntaxKind,
    children: Vec<SyntaxElement>,
    diagnostics: Vec<Diagnostic>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn with_kind(mut self, kind: SyntaxKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn push_token(&mut self, token: SyntaxToken) {
        self.children.push(SyntaxElement::Token(token));
    }

    pub(crate) fn push_node(&mut self, node: SyntaxNode) {
        self.children.push(SyntaxElement::Node(node));
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|c| match c {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        })
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &SyntaxToken> {
        self.children.iter().filter_map(|c| match c {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        })
    }

    pub fn find_child(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    /// All nodes below this one, in source order.
    pub fn descendant_nodes(&self) -> Vec<&SyntaxNode> {
        let mut nodes = Vec::new();
        for child in self.child_nodes() {
            nodes.push(child);
            nodes.extend(child.descendant_nodes());
        }
        nodes
    }

    pub fn descendant_tokens(&self) -> Vec<&SyntaxToken> {
        let mut tokens = Vec::new();
        for child in &self.children {
            match child {
                SyntaxElement::Token(token) => tokens.push(token),
                SyntaxElement::Node(node) => tokens.extend(node.descendant_tokens()),
            }
        }
        tokens
    }

    pub fn first_token(&self) -> Option<&SyntaxToken> {
        self.children.iter().find_map(|c| match c {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&SyntaxToken> {
        self.children.iter().rev().find_map(|c| match c {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.last_token(),
        })
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether this node or anything below it failed to parse.
    pub fn contains_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
            || self.children.iter().any(|c| match c {
                SyntaxElement::Token(token) => token.error.is_some(),
                SyntaxElement::Node(node) => node.contains_diagnostics(),
            })
    }

    /// Every diagnostic in this subtree, token errors included.
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.clone();
        for child in &self.children {
            match child {
                SyntaxElement::Token(token) => {
                    if let Some(message) = &token.error {
                        diagnostics.push(Diagnostic {
                            message: message.clone(),
                            span: SourceSpan::of_token(token),
                        });
                    }
                }
                SyntaxElement::Node(node) => diagnostics.extend(node.all_diagnostics()),
            }
        }
        diagnostics
    }

    /// True when an end-of-line sits between the first and last token.
    pub fn spans_lines(&self) -> bool {
        let tokens = self.descendant_tokens();
        let Some((_, inner)) = tokens.split_last() else {
            return false;
        };
        inner.iter().any(|t| t.has_trailing_end_of_line())
            || tokens.iter().skip(1).any(|t| {
                t.leading
                    .iter()
                    .any(|trivia| trivia.kind == TriviaKind::EndOfLine)
            })
    }

    pub fn contains_token(&self, predicate: impl Fn(&Token) -> bool) -> bool {
        self.descendant_tokens().iter().any(|t| predicate(&t.token))
    }
}
