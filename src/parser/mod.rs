use std::collections::VecDeque;

use log::debug;

use crate::lexer::{Lexer, SyntaxToken, Token};
use crate::parser::ast::*;

pub mod ast;

/// Parses a whole source file.
pub fn parse_compilation_unit(source: &str) -> SyntaxNode {
    let mut parser = Parser::new(source);
    let unit = parser.parse_compilation_unit();
    if unit.contains_diagnostics() {
        debug!(
            "compilation unit parsed with {} diagnostic(s)",
            unit.all_diagnostics().len()
        );
    }
    unit
}

/// Parses the first statement of `source`; anything after it is ignored.
pub fn parse_statement(source: &str) -> SyntaxNode {
    Parser::new(source).parse_statement()
}

/// Shapes a token stream into the nodes the style rules look at.
///
/// Only the outline of the language is recognised: declarations, blocks and
/// the statements that carry style information. Everything else is kept as
/// opaque tokens inside the nearest enclosing node. Missing punctuation is
/// reported on that node and parsing carries on.
pub struct Parser {
    // always ends with the EOF token
    tokens: VecDeque<SyntaxToken>,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        Parser {
            tokens: lexer.tokenize().into(),
        }
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let index = offset.min(self.tokens.len() - 1);
        &self.tokens[index].token
    }

    fn check(&self, token: &Token) -> bool {
        self.peek() == token
    }

    fn at_end(&self) -> bool {
        self.check(&Token::EOF)
    }

    fn advance(&mut self) -> SyntaxToken {
        if self.tokens.len() > 1 {
            if let Some(token) = self.tokens.pop_front() {
                return token;
            }
        }
        self.tokens[0].clone()
    }

    fn bump_into(&mut self, node: &mut SyntaxNode) {
        let token = self.advance();
        node.push_token(token);
    }

    fn report(&self, node: &mut SyntaxNode, message: &str) {
        let span = SourceSpan::of_token(&self.tokens[0]);
        debug!(
            "{}:{}: {} in {:?}",
            span.start.line,
            span.start.column,
            message,
            node.kind()
        );
        node.report(Diagnostic {
            message: message.to_string(),
            span,
        });
    }

    fn expect(&mut self, node: &mut SyntaxNode, token: &Token, message: &str) -> bool {
        if self.check(token) {
            self.bump_into(node);
            true
        } else {
            self.report(node, message);
            false
        }
    }

    pub fn parse_compilation_unit(&mut self) -> SyntaxNode {
        let mut unit = SyntaxNode::new(SyntaxKind::CompilationUnit);
        self.parse_members(&mut unit, None, false);
        // EOF carries the file's trailing trivia
        self.bump_into(&mut unit);
        unit
    }

    fn parse_members(&mut self, parent: &mut SyntaxNode, type_name: Option<&str>, in_braces: bool) {
        loop {
            match self.peek() {
                Token::EOF => break,
                Token::RightBrace if in_braces => break,
                Token::RightBrace => {
                    self.report(parent, "unexpected '}'");
                    self.bump_into(parent);
                }
                _ => {
                    let member = self.parse_member(type_name);
                    parent.push_node(member);
                }
            }
        }
    }

    fn parse_member(&mut self, type_name: Option<&str>) -> SyntaxNode {
        match self.peek() {
            Token::Using => return self.parse_using_directive(),
            Token::Namespace => return self.parse_namespace(),
            _ => {}
        }

        let mut node = SyntaxNode::new(SyntaxKind::MemberDeclaration);
        self.parse_attributes_and_modifiers(&mut node);

        let is_record = self.peek_at(0) == &Token::Identifier("record".to_string())
            && matches!(
                self.peek_at(1),
                Token::Identifier(_) | Token::Class | Token::Struct
            );
        if is_record
            || matches!(
                self.peek(),
                Token::Class | Token::Struct | Token::Interface | Token::Enum
            )
        {
            self.parse_type_declaration(node)
        } else if matches!(self.peek(), Token::Identifier(name) if Some(name.as_str()) == type_name)
            && self.peek_at(1) == &Token::LeftParen
        {
            self.parse_constructor(node)
        } else {
            self.parse_other_member(node)
        }
    }

    fn parse_attributes_and_modifiers(&mut self, node: &mut SyntaxNode) {
        loop {
            let is_modifier = match self.peek() {
                Token::LeftBracket => {
                    if !self.push_balanced(node) {
                        return;
                    }
                    continue;
                }
                Token::Modifier(_) => true,
                Token::New => self.peek_at(1) != &Token::LeftParen,
                Token::Identifier(id) if id == "async" || id == "partial" => matches!(
                    self.peek_at(1),
                    Token::Identifier(_)
                        | Token::PredefinedType(_)
                        | Token::Modifier(_)
                        | Token::Keyword(_)
                        | Token::Class
                        | Token::Struct
                        | Token::Interface
                        | Token::Enum
                ),
                _ => false,
            };

            if !is_modifier {
                return;
            }
            self.bump_into(node);
        }
    }

    fn parse_using_directive(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::UsingDirective);
        self.bump_into(&mut node);
        self.scan_to_semicolon(&mut node);
        node
    }

    fn parse_namespace(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::NamespaceDeclaration);
        self.bump_into(&mut node);
        loop {
            match self.peek() {
                Token::LeftBrace => {
                    self.bump_into(&mut node);
                    self.parse_members(&mut node, None, true);
                    self.expect(&mut node, &Token::RightBrace, "expected '}'");
                    break;
                }
                Token::Semicolon => {
                    self.bump_into(&mut node);
                    break;
                }
                Token::EOF | Token::RightBrace => {
                    self.report(&mut node, "expected '{'");
                    break;
                }
                _ => self.bump_into(&mut node),
            }
        }
        node
    }

    fn parse_type_declaration(&mut self, node: SyntaxNode) -> SyntaxNode {
        let mut node = node.with_kind(SyntaxKind::TypeDeclaration);
        let is_enum = self.check(&Token::Enum);
        self.bump_into(&mut node);
        if matches!(self.peek(), Token::Class | Token::Struct) {
            // record class / record struct
            self.bump_into(&mut node);
        }

        let name = match self.peek() {
            Token::Identifier(name) => name.clone(),
            _ => {
                self.report(&mut node, "expected type name");
                String::new()
            }
        };

        loop {
            match self.peek() {
                Token::LeftBrace => break,
                Token::Semicolon => {
                    self.bump_into(&mut node);
                    return node;
                }
                Token::EOF | Token::RightBrace => {
                    self.report(&mut node, "expected '{'");
                    return node;
                }
                Token::LeftParen | Token::LeftBracket => {
                    if !self.push_balanced(&mut node) {
                        return node;
                    }
                }
                _ => self.bump_into(&mut node),
            }
        }

        if is_enum {
            self.push_balanced(&mut node);
        } else {
            self.bump_into(&mut node);
            self.parse_members(&mut node, Some(name.as_str()), true);
            self.expect(&mut node, &Token::RightBrace, "expected '}'");
        }

        if self.check(&Token::Semicolon) {
            self.bump_into(&mut node);
        }
        node
    }

    fn parse_constructor(&mut self, node: SyntaxNode) -> SyntaxNode {
        let mut node = node.with_kind(SyntaxKind::ConstructorDeclaration);
        self.bump_into(&mut node);
        let parameters = self.parse_parameter_list();
        node.push_node(parameters);

        if self.check(&Token::Colon) {
            // : base(...) / : this(...)
            self.bump_into(&mut node);
            while !matches!(
                self.peek(),
                Token::LeftBrace | Token::Arrow | Token::Semicolon | Token::RightBrace | Token::EOF
            ) {
                if self.check(&Token::LeftParen) {
                    if !self.push_balanced(&mut node) {
                        return node;
                    }
                } else {
                    self.bump_into(&mut node);
                }
            }
        }

        self.parse_body(&mut node);
        node
    }

    fn parse_other_member(&mut self, node: SyntaxNode) -> SyntaxNode {
        let mut node = node;
        loop {
            match self.peek() {
                Token::Semicolon => {
                    self.bump_into(&mut node);
                    break;
                }
                Token::RightBrace | Token::EOF => {
                    self.report(&mut node, "expected ';'");
                    break;
                }
                Token::Equal | Token::Arrow => {
                    // field initializer or expression-bodied property
                    self.bump_into(&mut node);
                    self.scan_to_semicolon(&mut node);
                    break;
                }
                Token::LeftParen
                    if matches!(
                        node.last_token().map(|t| &t.token),
                        Some(Token::Identifier(_) | Token::Greater)
                    ) =>
                {
                    let kind = if node.contains_token(|t| matches!(t, Token::Operator(op) if op == "~")) {
                        SyntaxKind::DestructorDeclaration
                    } else {
                        SyntaxKind::MethodDeclaration
                    };
                    node = node.with_kind(kind);
                    let parameters = self.parse_parameter_list();
                    node.push_node(parameters);
                    self.parse_body(&mut node);
                    break;
                }
                Token::LeftBrace => {
                    // accessor list, optionally followed by an initializer
                    if self.push_balanced(&mut node) && self.check(&Token::Equal) {
                        self.bump_into(&mut node);
                        self.scan_to_semicolon(&mut node);
                    }
                    break;
                }
                Token::LeftParen | Token::LeftBracket => {
                    if !self.push_balanced(&mut node) {
                        break;
                    }
                }
                _ => self.bump_into(&mut node),
            }
        }
        node
    }

    fn parse_parameter_list(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::ParameterList);
        if self.check(&Token::LeftParen) {
            self.push_balanced(&mut node);
        } else {
            self.report(&mut node, "expected '('");
        }
        node
    }

    /// Block body, arrow body or a bare `;`, skipping constraint clauses.
    fn parse_body(&mut self, node: &mut SyntaxNode) {
        loop {
            match self.peek() {
                Token::LeftBrace => {
                    let block = self.parse_block();
                    node.push_node(block);
                    return;
                }
                Token::Arrow => {
                    let mut arrow = SyntaxNode::new(SyntaxKind::ArrowExpressionClause);
                    self.bump_into(&mut arrow);
                    self.scan_expression(&mut arrow);
                    node.push_node(arrow);
                    self.expect(node, &Token::Semicolon, "expected ';'");
                    return;
                }
                Token::Semicolon => {
                    self.bump_into(node);
                    return;
                }
                Token::RightBrace | Token::EOF => {
                    self.report(node, "expected '{'");
                    return;
                }
                Token::LeftParen => {
                    if !self.push_balanced(node) {
                        return;
                    }
                }
                _ => self.bump_into(node),
            }
        }
    }

    fn parse_block(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::Block);
        if !self.expect(&mut node, &Token::LeftBrace, "expected '{'") {
            return node;
        }

        loop {
            match self.peek() {
                Token::RightBrace => {
                    self.bump_into(&mut node);
                    break;
                }
                Token::EOF => {
                    self.report(&mut node, "expected '}'");
                    break;
                }
                _ => {
                    let statement = self.parse_statement();
                    node.push_node(statement);
                }
            }
        }
        node
    }

    pub fn parse_statement(&mut self) -> SyntaxNode {
        match self.peek() {
            Token::LeftBrace => self.parse_block(),
            Token::Semicolon => {
                let mut node = SyntaxNode::new(SyntaxKind::EmptyStatement);
                self.bump_into(&mut node);
                node
            }
            Token::RightBrace | Token::EOF => {
                let mut node = SyntaxNode::new(SyntaxKind::ExpressionStatement);
                self.report(&mut node, "expected statement");
                node
            }
            Token::Try => self.parse_try(),
            Token::If => self.parse_if(),
            Token::Do => self.parse_do(),
            Token::Switch => self.parse_switch(),
            Token::While | Token::For | Token::Foreach | Token::Lock => self.parse_control(),
            Token::Keyword(k) if k == "fixed" => self.parse_control(),
            Token::Using if self.peek_at(1) == &Token::LeftParen => self.parse_control(),
            Token::Keyword(k)
                if (k == "checked" || k == "unchecked") && self.peek_at(1) == &Token::LeftBrace =>
            {
                self.parse_keyword_block()
            }
            Token::Modifier(m) if m == "unsafe" && self.peek_at(1) == &Token::LeftBrace => {
                self.parse_keyword_block()
            }
            _ => {
                if let Some(header_len) = self.local_function_header_length() {
                    return self.parse_local_function(header_len);
                }

                let prefix = self.declaration_prefix_length();
                match self.type_length(prefix) {
                    Some(type_len) if self.is_declarator_start(prefix + type_len) => {
                        self.parse_local_declaration(prefix, type_len)
                    }
                    _ => {
                        let mut node = SyntaxNode::new(SyntaxKind::ExpressionStatement);
                        self.scan_to_semicolon(&mut node);
                        node
                    }
                }
            }
        }
    }

    fn parse_local_declaration(&mut self, prefix: usize, type_len: usize) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::LocalDeclarationStatement);
        for _ in 0..prefix {
            self.bump_into(&mut node);
        }

        let mut type_node = SyntaxNode::new(SyntaxKind::Type);
        for _ in 0..type_len {
            self.bump_into(&mut type_node);
        }
        node.push_node(type_node);

        self.scan_to_semicolon(&mut node);
        node
    }

    /// Tokens before the parameter list of `[modifiers] Type Name[<T>](`, if
    /// the statement starts that way.
    fn local_function_header_length(&self) -> Option<usize> {
        let mut i = 0;
        loop {
            match self.peek_at(i) {
                Token::Modifier(_) => i += 1,
                Token::Identifier(id) if id == "async" => i += 1,
                _ => break,
            }
        }

        if matches!(self.peek_at(i), Token::Identifier(id) if id == "await") {
            return None;
        }
        i += self.type_length(i)?;

        if !matches!(self.peek_at(i), Token::Identifier(_)) {
            return None;
        }
        // name plus optional type parameters
        i += self.type_length(i)?;

        (self.peek_at(i) == &Token::LeftParen).then_some(i)
    }

    fn parse_local_function(&mut self, header_len: usize) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::LocalFunctionStatement);
        for _ in 0..header_len {
            self.bump_into(&mut node);
        }
        let parameters = self.parse_parameter_list();
        node.push_node(parameters);
        self.parse_body(&mut node);
        node
    }

    /// `const`, `using` and `await using` before a declared type.
    fn declaration_prefix_length(&self) -> usize {
        match (self.peek_at(0), self.peek_at(1)) {
            (Token::Const, _) => 1,
            (Token::Using, _) => 1,
            (Token::Identifier(a), Token::Using) if a == "await" => 2,
            _ => 0,
        }
    }

    fn is_declarator_start(&self, offset: usize) -> bool {
        matches!(self.peek_at(offset), Token::Identifier(_))
            && matches!(
                self.peek_at(offset + 1),
                Token::Equal | Token::Semicolon | Token::Comma
            )
    }

    /// Number of tokens forming a type starting at `offset`, if one does.
    fn type_length(&self, offset: usize) -> Option<usize> {
        let mut i = offset;
        match self.peek_at(i) {
            Token::Identifier(_) | Token::PredefinedType(_) => i += 1,
            _ => return None,
        }

        loop {
            match self.peek_at(i) {
                Token::Dot => {
                    if !matches!(self.peek_at(i + 1), Token::Identifier(_)) {
                        return None;
                    }
                    i += 2;
                }
                Token::Operator(op) if op == "::" => {
                    if !matches!(self.peek_at(i + 1), Token::Identifier(_)) {
                        return None;
                    }
                    i += 2;
                }
                Token::Less => {
                    let mut depth = 0usize;
                    loop {
                        match self.peek_at(i) {
                            Token::Less => depth += 1,
                            Token::Greater => depth -= 1,
                            Token::Identifier(_)
                            | Token::PredefinedType(_)
                            | Token::Comma
                            | Token::Dot
                            | Token::Question
                            | Token::LeftBracket
                            | Token::RightBracket => {}
                            _ => return None,
                        }
                        i += 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
                Token::Question => i += 1,
                Token::Operator(op) if op == "*" => i += 1,
                Token::LeftBracket => {
                    i += 1;
                    while self.peek_at(i) == &Token::Comma {
                        i += 1;
                    }
                    if self.peek_at(i) != &Token::RightBracket {
                        return None;
                    }
                    i += 1;
                }
                _ => break,
            }
        }

        Some(i - offset)
    }

    fn parse_try(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::TryStatement);
        self.bump_into(&mut node);
        let block = self.parse_block();
        node.push_node(block);

        let mut has_handler = false;
        while self.check(&Token::Catch) {
            has_handler = true;
            let mut clause = SyntaxNode::new(SyntaxKind::CatchClause);
            self.bump_into(&mut clause);
            if self.check(&Token::LeftParen) {
                self.push_balanced(&mut clause);
            }
            if self.peek() == &Token::Identifier("when".to_string()) {
                self.bump_into(&mut clause);
                self.parse_parenthesized(&mut clause);
            }
            let block = self.parse_block();
            clause.push_node(block);
            node.push_node(clause);
        }

        if self.check(&Token::Finally) {
            has_handler = true;
            let mut clause = SyntaxNode::new(SyntaxKind::FinallyClause);
            self.bump_into(&mut clause);
            let block = self.parse_block();
            clause.push_node(block);
            node.push_node(clause);
        }

        if !has_handler {
            self.report(&mut node, "expected 'catch' or 'finally'");
        }
        node
    }

    fn parse_if(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::IfStatement);
        self.bump_into(&mut node);
        self.parse_parenthesized(&mut node);
        let statement = self.parse_statement();
        node.push_node(statement);

        if self.check(&Token::Else) {
            let mut clause = SyntaxNode::new(SyntaxKind::ElseClause);
            self.bump_into(&mut clause);
            let statement = self.parse_statement();
            clause.push_node(statement);
            node.push_node(clause);
        }
        node
    }

    fn parse_do(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::DoStatement);
        self.bump_into(&mut node);
        let statement = self.parse_statement();
        node.push_node(statement);
        if self.expect(&mut node, &Token::While, "expected 'while'") {
            self.parse_parenthesized(&mut node);
        }
        self.expect(&mut node, &Token::Semicolon, "expected ';'");
        node
    }

    fn parse_switch(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::SwitchStatement);
        self.bump_into(&mut node);
        self.parse_parenthesized(&mut node);
        if self.check(&Token::LeftBrace) {
            self.push_balanced(&mut node);
        } else {
            self.report(&mut node, "expected '{'");
        }
        node
    }

    /// while/for/foreach/lock/using/fixed: keyword, parenthesized head, body.
    fn parse_control(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::ControlStatement);
        self.bump_into(&mut node);
        self.parse_parenthesized(&mut node);
        let statement = self.parse_statement();
        node.push_node(statement);
        node
    }

    fn parse_keyword_block(&mut self) -> SyntaxNode {
        let mut node = SyntaxNode::new(SyntaxKind::ControlStatement);
        self.bump_into(&mut node);
        let block = self.parse_block();
        node.push_node(block);
        node
    }

    fn parse_parenthesized(&mut self, node: &mut SyntaxNode) -> bool {
        if self.check(&Token::LeftParen) {
            self.push_balanced(node)
        } else {
            self.report(node, "expected '('");
            false
        }
    }

    /// Consumes an opening bracket through its matching closer.
    fn push_balanced(&mut self, node: &mut SyntaxNode) -> bool {
        let mut closers = Vec::new();
        loop {
            let closer = match self.peek() {
                Token::LeftParen => Some(Token::RightParen),
                Token::LeftBracket => Some(Token::RightBracket),
                Token::LeftBrace => Some(Token::RightBrace),
                _ => None,
            };

            if let Some(closer) = closer {
                closers.push(closer);
            } else {
                match self.peek() {
                    Token::EOF => {
                        self.report(node, "unexpected end of file");
                        return false;
                    }
                    Token::RightParen | Token::RightBracket | Token::RightBrace => {
                        if closers.last() != Some(self.peek()) {
                            self.report(node, "mismatched closing bracket");
                            return false;
                        }
                        closers.pop();
                    }
                    _ => {}
                }
            }

            self.bump_into(node);
            if closers.is_empty() {
                return true;
            }
        }
    }

    /// Pushes tokens up to and including the `;` ending a statement.
    fn scan_to_semicolon(&mut self, node: &mut SyntaxNode) -> bool {
        if self.scan_expression(node) {
            self.bump_into(node);
            true
        } else {
            self.report(node, "expected ';'");
            false
        }
    }

    /// Pushes tokens up to, not including, a `;` at nesting depth zero.
    fn scan_expression(&mut self, node: &mut SyntaxNode) -> bool {
        loop {
            match self.peek() {
                Token::Semicolon => return true,
                Token::RightBrace | Token::EOF => return false,
                Token::LeftParen | Token::LeftBracket | Token::LeftBrace => {
                    if !self.push_balanced(node) {
                        return false;
                    }
                }
                _ => self.bump_into(node),
            }
        }
    }
}
