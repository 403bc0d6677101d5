use std::string::String;

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    // Keywords the parser looks at
    Using,
    Namespace,
    Class,
    Struct,
    Interface,
    Enum,
    New,
    Const,
    Return,
    If,
    Else,
    For,
    Foreach,
    While,
    Do,
    Switch,
    Try,
    Catch,
    Finally,
    Lock,

    // public, static, readonly, ...
    Modifier(String),
    // int, string, object, ...
    PredefinedType(String),
    // every other reserved word
    Keyword(String),

    // Identifiers and literals
    Identifier(String),
    StringLiteral(String),
    InterpolatedStringLiteral(String),
    CharLiteral(String),
    NumericLiteral(String),
    True,
    False,
    Null,

    // Punctuation
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,
    Equal,
    Arrow,
    Less,
    Greater,
    Operator(String),

    // Unrecognised input
    Bad(String),

    // End of file
    EOF,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    SingleLineComment,
    MultiLineComment,
    Directive,
}

/// Text between tokens that carries no meaning for the grammar.
#[derive(Debug, Clone, PartialEq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
}

/// A token with its position and surrounding trivia.
///
/// Trailing trivia runs up to and including the first end-of-line after the
/// token; everything else before the next token is that token's leading trivia.
#[derive(PartialEq, Debug, Clone)]
pub struct SyntaxToken {
    pub token: Token,
    pub text: String,
    pub start: (usize, usize), // (line, column)
    pub end: (usize, usize),
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
    pub error: Option<String>,
}

impl SyntaxToken {
    pub fn has_trailing_end_of_line(&self) -> bool {
        self.trailing.iter().any(|t| t.kind == TriviaKind::EndOfLine)
    }

    pub fn has_trailing_whitespace(&self) -> bool {
        self.trailing.iter().any(|t| t.kind == TriviaKind::Whitespace)
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(&self.token, Token::Identifier(id) if id == name)
    }
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    line_has_token: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
            line_has_token: false,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            self.column += 1;
            // a lone '\r' ends a line too
            if c == '\n' || (c == '\r' && self.peek() != Some('\n')) {
                self.line += 1;
                self.column = 0;
                self.line_has_token = false;
            }
        }
        ch
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn read_trivia(&mut self, trailing: bool) -> Vec<Trivia> {
        let mut trivia = Vec::new();

        while let Some(c) = self.peek() {
            let start = self.pos;
            let kind = match c {
                ' ' | '\t' | '\u{b}' | '\u{c}' => {
                    while matches!(self.peek(), Some(' ' | '\t' | '\u{b}' | '\u{c}')) {
                        self.advance();
                    }
                    TriviaKind::Whitespace
                }
                '\r' | '\n' => {
                    self.advance();
                    if c == '\r' && self.peek() == Some('\n') {
                        self.advance();
                    }
                    TriviaKind::EndOfLine
                }
                '/' if self.peek_at(1) == Some('/') => {
                    self.skip_to_end_of_line();
                    TriviaKind::SingleLineComment
                }
                '/' if self.peek_at(1) == Some('*') => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.advance() {
                        if c == '*' && self.peek() == Some('/') {
                            self.advance();
                            break;
                        }
                    }
                    TriviaKind::MultiLineComment
                }
                '#' if !trailing && !self.line_has_token => {
                    self.skip_to_end_of_line();
                    TriviaKind::Directive
                }
                _ => break,
            };

            trivia.push(Trivia {
                kind,
                text: self.text_from(start),
            });

            if trailing && kind == TriviaKind::EndOfLine {
                break;
            }
        }

        trivia
    }

    fn skip_to_end_of_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\r' || c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_identifier(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, first_char: char) {
        let is_hex = first_char == '0' && matches!(self.peek(), Some('x' | 'X' | 'b' | 'B'));
        let mut has_decimal = first_char == '.';
        let mut previous = first_char;

        while let Some(c) = self.peek() {
            let accept = if c.is_alphanumeric() || c == '_' {
                true
            } else if c == '.' && !has_decimal && !is_hex {
                let digit_follows = self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
                has_decimal = digit_follows;
                digit_follows
            } else {
                (c == '+' || c == '-') && !is_hex && matches!(previous, 'e' | 'E')
            };

            if !accept {
                break;
            }
            previous = c;
            self.advance();
        }
    }

    fn read_string(&mut self) -> Result<(), String> {
        while let Some(c) = self.peek() {
            match c {
                '\r' | '\n' => break,
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '"' => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }

        Err("Unterminated string literal".to_string())
    }

    fn read_verbatim_string(&mut self) -> Result<(), String> {
        while let Some(c) = self.advance() {
            if c == '"' {
                if self.peek() == Some('"') {
                    self.advance();
                } else {
                    return Ok(());
                }
            }
        }

        Err("Unterminated verbatim string literal".to_string())
    }

    fn read_char(&mut self) -> Result<(), String> {
        while let Some(c) = self.peek() {
            match c {
                '\r' | '\n' => break,
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '\'' => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }

        Err("Unterminated character literal".to_string())
    }

    fn read_interpolated_string(&mut self, verbatim: bool) -> Result<(), String> {
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            if depth == 0 {
                match c {
                    '{' if self.peek_at(1) == Some('{') => {
                        self.advance();
                        self.advance();
                    }
                    '{' => {
                        self.advance();
                        depth = 1;
                    }
                    '"' if verbatim && self.peek_at(1) == Some('"') => {
                        self.advance();
                        self.advance();
                    }
                    '"' => {
                        self.advance();
                        return Ok(());
                    }
                    '\\' if !verbatim => {
                        self.advance();
                        self.advance();
                    }
                    '\r' | '\n' if !verbatim => break,
                    _ => {
                        self.advance();
                    }
                }
            } else {
                self.advance();
                match c {
                    '{' => depth += 1,
                    '}' => depth -= 1,
                    '"' => self.read_string()?,
                    '\'' => self.read_char()?,
                    _ => {}
                }
            }
        }

        Err("Unterminated interpolated string literal".to_string())
    }

    fn read_operator(&mut self, c: char) -> Token {
        let start = self.pos - 1;
        match (c, self.peek()) {
            ('+' | '-' | '&' | '|', Some(n)) if n == c => {
                self.advance();
            }
            ('-', Some('>')) => {
                self.advance();
            }
            _ => {}
        }
        if self.peek() == Some('=') {
            self.advance();
        }
        Token::Operator(self.text_from(start))
    }

    fn keyword_or_identifier(identifier: String) -> Token {
        match identifier.as_str() {
            "using" => Token::Using,
            "namespace" => Token::Namespace,
            "class" => Token::Class,
            "struct" => Token::Struct,
            "interface" => Token::Interface,
            "enum" => Token::Enum,
            "new" => Token::New,
            "const" => Token::Const,
            "return" => Token::Return,
            "if" => Token::If,
            "else" => Token::Else,
            "for" => Token::For,
            "foreach" => Token::Foreach,
            "while" => Token::While,
            "do" => Token::Do,
            "switch" => Token::Switch,
            "try" => Token::Try,
            "catch" => Token::Catch,
            "finally" => Token::Finally,
            "lock" => Token::Lock,
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            "public" | "private" | "protected" | "internal" | "static" | "readonly"
            | "sealed" | "abstract" | "virtual" | "override" | "extern" | "unsafe"
            | "volatile" => Token::Modifier(identifier),
            "bool" | "byte" | "sbyte" | "char" | "decimal" | "double" | "float" | "int"
            | "uint" | "long" | "ulong" | "short" | "ushort" | "object" | "string"
            | "void" => Token::PredefinedType(identifier),
            "as" | "base" | "break" | "case" | "checked" | "continue" | "default"
            | "delegate" | "event" | "explicit" | "fixed" | "goto" | "implicit" | "in"
            | "is" | "operator" | "out" | "params" | "ref" | "sizeof" | "stackalloc"
            | "this" | "throw" | "typeof" | "unchecked" => Token::Keyword(identifier),
            _ => Token::Identifier(identifier),
        }
    }

    fn scan(&mut self, c: char) -> Result<Token, String> {
        let start = self.pos - 1;
        match c {
            '{' => Ok(Token::LeftBrace),
            '}' => Ok(Token::RightBrace),
            '(' => Ok(Token::LeftParen),
            ')' => Ok(Token::RightParen),
            '[' => Ok(Token::LeftBracket),
            ']' => Ok(Token::RightBracket),
            ',' => Ok(Token::Comma),
            ';' => Ok(Token::Semicolon),
            ':' => {
                if self.peek() == Some(':') {
                    self.advance();
                    Ok(Token::Operator("::".to_string()))
                } else {
                    Ok(Token::Colon)
                }
            }
            '.' => {
                if self.peek().is_some_and(|n| n.is_ascii_digit()) {
                    self.read_number(c);
                    Ok(Token::NumericLiteral(self.text_from(start)))
                } else if self.peek() == Some('.') {
                    self.advance();
                    Ok(Token::Operator("..".to_string()))
                } else {
                    Ok(Token::Dot)
                }
            }
            '?' => {
                if self.peek() == Some('?') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                    }
                    Ok(Token::Operator(self.text_from(start)))
                } else {
                    Ok(Token::Question)
                }
            }
            '=' => match self.peek() {
                Some('>') => {
                    self.advance();
                    Ok(Token::Arrow)
                }
                Some('=') => {
                    self.advance();
                    Ok(Token::Operator("==".to_string()))
                }
                _ => Ok(Token::Equal),
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Operator("!=".to_string()))
                } else {
                    Ok(Token::Operator("!".to_string()))
                }
            }
            '<' => Ok(Token::Less),
            '>' => Ok(Token::Greater),
            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '~' => Ok(self.read_operator(c)),
            '"' => self
                .read_string()
                .map(|_| Token::StringLiteral(self.text_from(start))),
            '\'' => self
                .read_char()
                .map(|_| Token::CharLiteral(self.text_from(start))),
            '@' | '$' => {
                let mut verbatim = c == '@';
                let mut interpolated = c == '$';
                if let Some(n @ ('@' | '$')) = self.peek() {
                    if n != c {
                        self.advance();
                        verbatim = true;
                        interpolated = true;
                    }
                }
                match self.peek() {
                    Some('"') => {
                        self.advance();
                        if interpolated {
                            self.read_interpolated_string(verbatim)
                                .map(|_| Token::InterpolatedStringLiteral(self.text_from(start)))
                        } else {
                            self.read_verbatim_string()
                                .map(|_| Token::StringLiteral(self.text_from(start)))
                        }
                    }
                    Some(n) if c == '@' && (n.is_alphabetic() || n == '_') => {
                        self.read_identifier();
                        Ok(Token::Identifier(self.chars[start + 1..self.pos].iter().collect()))
                    }
                    _ => Err(format!("Unexpected character: {}", c)),
                }
            }
            '0'..='9' => {
                self.read_number(c);
                Ok(Token::NumericLiteral(self.text_from(start)))
            }
            c if c.is_alphabetic() || c == '_' => {
                self.read_identifier();
                Ok(Self::keyword_or_identifier(self.text_from(start)))
            }
            _ => Err(format!("Unexpected character: {}", c)),
        }
    }

    pub fn next_token(&mut self) -> SyntaxToken {
        let leading = self.read_trivia(false);
        let start = (self.line, self.column);
        let start_pos = self.pos;

        let (token, error) = match self.advance() {
            None => (Token::EOF, None),
            Some(c) => match self.scan(c) {
                Ok(token) => (token, None),
                Err(e) => (Token::Bad(self.text_from(start_pos)), Some(e)),
            },
        };

        let text = self.text_from(start_pos);
        let end = (self.line, self.column);
        self.line_has_token = true;
        let trailing = if token == Token::EOF {
            Vec::new()
        } else {
            self.read_trivia(true)
        };

        SyntaxToken {
            token,
            text,
            start,
            end,
            leading,
            trailing,
            error,
        }
    }

    pub fn tokenize(&mut self) -> Vec<SyntaxToken> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.token == Token::EOF;
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        tokens
    }
}
