//! The maximal-munch lexer state machine described by the scan / whitespace
//! / newline / comment / literal states.

use bedrock_base::{Interner, Span};
use bedrock_token::{keyword_kind, single_byte_kind, starts_multichar_operator, LiteralValue, Token, TokenKind};

/// Scans `bytes` into a dense token stream terminated by exactly one
/// [`TokenKind::Eof`] token. Never fails: malformed input produces
/// `LexError*` tokens that the parser is responsible for diagnosing.
pub fn lex(bytes: &[u8], interner: &mut Interner) -> Vec<Token> {
    Lexer::new(bytes, interner).run()
}

struct Lexer<'a> {
    bytes: &'a [u8],
    interner: &'a mut Interner,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    fn new(bytes: &'a [u8], interner: &'a mut Interner) -> Self {
        Lexer {
            bytes,
            interner,
            pos: 0,
            line: 0,
            col: 0,
        }
    }

    fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            tokens.push(self.scan_one());
        }
        let lexeme = self.interner.intern("");
        tokens.push(Token::new(
            TokenKind::Eof,
            lexeme,
            Span::new(self.pos, self.pos),
            self.line,
            self.col,
        ));
        tokens
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        *self.bytes.get(self.pos + offset).unwrap_or(&0)
    }

    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        b
    }

    /// Consumes whitespace, newlines, and `//` line comments. A comment
    /// consumes up to and including its terminating newline; the newline
    /// itself is not re-counted once the comment state returns to scan.
    fn skip_trivia(&mut self) {
        loop {
            if self.at_eof() {
                return;
            }
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                b'/' if self.peek_at(1) == b'/' => {
                    while !self.at_eof() && self.peek() != b'\n' {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn scan_one(&mut self) -> Token {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        let b = self.peek();

        if let Some(kind) = single_byte_kind(b) {
            self.advance();
            return self.finish(kind, start, start_line, start_col, LiteralValue::None);
        }

        if b == b'\'' || b == b'"' {
            return self.scan_string_or_char(b, start, start_line, start_col);
        }

        if b.is_ascii_digit() || (b == b'.' && self.peek_at(1).is_ascii_digit()) {
            return self.scan_number(start, start_line, start_col);
        }

        if starts_multichar_operator(b) {
            return self.scan_operator(start, start_line, start_col);
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            return self.scan_identifier_or_keyword(start, start_line, start_col);
        }

        // Not a recognized start byte: consume one byte as an empty/error token.
        self.advance();
        self.finish(
            TokenKind::LexErrorEmptyToken,
            start,
            start_line,
            start_col,
            LiteralValue::None,
        )
    }

    fn finish(
        &mut self,
        kind: TokenKind,
        start: usize,
        line: u32,
        col: u32,
        value: LiteralValue,
    ) -> Token {
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        let lexeme = self.interner.intern(text);
        Token::new(kind, lexeme, Span::new(start, self.pos), line, col).with_value(value)
    }

    /// Maximum-munch disambiguation for `.`, `>`, `<`, `:`, and the
    /// single-char-plus-`=` compound assignment family.
    fn scan_operator(&mut self, start: usize, line: u32, col: u32) -> Token {
        let first = self.advance();
        let kind = match first {
            b'.' => {
                if self.peek() == b'.' && self.peek_at(1) == b'.' && self.peek_at(2) == b'=' {
                    self.advance();
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDotEq
                } else if self.peek() == b'.' && self.peek_at(1) == b'.' {
                    self.advance();
                    self.advance();
                    TokenKind::DotDotDot
                } else if self.peek() == b'.' {
                    self.advance();
                    TokenKind::DotDot
                } else {
                    TokenKind::Dot
                }
            }
            b'>' => {
                if self.peek() == b'>' && self.peek_at(1) == b'>' && self.peek_at(2) == b'=' {
                    self.advance();
                    self.advance();
                    self.advance();
                    TokenKind::ShrAEq
                } else if self.peek() == b'>' && self.peek_at(1) == b'>' {
                    self.advance();
                    self.advance();
                    TokenKind::ShrA
                } else if self.peek() == b'>' && self.peek_at(1) == b'=' {
                    self.advance();
                    self.advance();
                    TokenKind::ShrEq
                } else if self.peek() == b'>' {
                    self.advance();
                    TokenKind::Shr
                } else if self.peek() == b'=' {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            b'<' => {
                if self.peek() == b'<' && self.peek_at(1) == b'=' {
                    self.advance();
                    self.advance();
                    TokenKind::ShlEq
                } else if self.peek() == b'<' && self.peek_at(1) == b'-' {
                    self.advance();
                    self.advance();
                    TokenKind::StreamAssign
                } else if self.peek() == b'<' {
                    self.advance();
                    TokenKind::Shl
                } else if self.peek() == b'=' {
                    self.advance();
                    TokenKind::Le
                } else if self.peek() == b'-' {
                    self.advance();
                    TokenKind::ArrowAssignMove
                } else {
                    TokenKind::Lt
                }
            }
            b':' => {
                if self.peek() == b':' {
                    self.advance();
                    TokenKind::GenericSep
                } else {
                    TokenKind::Colon
                }
            }
            b'+' => self.compound_or_single(b'+', TokenKind::PlusPlus, TokenKind::PlusEq, TokenKind::Plus),
            b'-' => {
                if self.peek() == b'-' {
                    self.advance();
                    TokenKind::MinusMinus
                } else if self.peek() == b'=' {
                    self.advance();
                    TokenKind::MinusEq
                } else if self.peek() == b'>' {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => self.eq_or_single(TokenKind::StarEq, TokenKind::Star),
            b'/' => self.eq_or_single(TokenKind::SlashEq, TokenKind::Slash),
            b'%' => self.eq_or_single(TokenKind::PercentEq, TokenKind::Percent),
            b'~' => self.eq_or_single(TokenKind::TildeEq, TokenKind::Tilde),
            b'^' => self.eq_or_single(TokenKind::CaretEq, TokenKind::Caret),
            b'|' => self.compound_or_single(b'|', TokenKind::OrOr, TokenKind::PipeEq, TokenKind::Pipe),
            b'&' => self.compound_or_single(b'&', TokenKind::AndAnd, TokenKind::AmpEq, TokenKind::Amp),
            b'!' => self.eq_or_single(TokenKind::NotEq, TokenKind::Bang),
            b'=' => {
                if self.peek() == b'=' {
                    self.advance();
                    TokenKind::EqEq
                } else if self.peek() == b'>' {
                    self.advance();
                    TokenKind::FatArrow
                } else {
                    TokenKind::Eq
                }
            }
            _ => unreachable!("starts_multichar_operator admitted an unhandled byte"),
        };
        self.finish(kind, start, line, col, LiteralValue::None)
    }

    /// `x` followed by `same` doubles to `doubled`; followed by `=` forms
    /// `eq_form`; otherwise the single-char `plain` kind.
    fn compound_or_single(
        &mut self,
        same: u8,
        doubled: TokenKind,
        eq_form: TokenKind,
        plain: TokenKind,
    ) -> TokenKind {
        if self.peek() == same {
            self.advance();
            doubled
        } else if self.peek() == b'=' {
            self.advance();
            eq_form
        } else {
            plain
        }
    }

    fn eq_or_single(&mut self, eq_form: TokenKind, plain: TokenKind) -> TokenKind {
        if self.peek() == b'=' {
            self.advance();
            eq_form
        } else {
            plain
        }
    }

    /// Scans a `'...'` or `"..."` literal. A `\` escapes the following byte
    /// so an escaped quote does not terminate the literal; an unescaped
    /// newline terminates the literal early (unterminated).
    fn scan_string_or_char(&mut self, quote: u8, start: usize, line: u32, col: u32) -> Token {
        self.advance(); // opening quote
        let mut terminated = false;
        while !self.at_eof() {
            let b = self.peek();
            if b == b'\n' {
                break;
            }
            if b == b'\\' {
                self.advance();
                if !self.at_eof() {
                    self.advance();
                }
                continue;
            }
            if b == quote {
                self.advance();
                terminated = true;
                break;
            }
            self.advance();
        }

        if !terminated {
            return self.finish(
                TokenKind::LexErrorUnterminatedLiteral,
                start,
                line,
                col,
                LiteralValue::None,
            );
        }

        if quote == b'\'' {
            let inner = &self.bytes[start + 1..self.pos - 1];
            let decoded = decode_char_literal(inner);
            return self.finish(
                TokenKind::CharLiteral,
                start,
                line,
                col,
                decoded.map(LiteralValue::Char).unwrap_or(LiteralValue::None),
            );
        }
        self.finish(TokenKind::StringLiteral, start, line, col, LiteralValue::None)
    }

    fn scan_number(&mut self, start: usize, line: u32, col: u32) -> Token {
        let mut is_float = false;
        if self.peek() == b'0' && (self.peek_at(1) == b'x' || self.peek_at(1) == b'X') {
            self.advance();
            self.advance();
            while self.peek().is_ascii_hexdigit() {
                self.advance();
            }
        } else {
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
                is_float = true;
                self.advance();
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
            }
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        if is_float {
            let value = text.parse::<f64>().ok();
            return self.finish(
                TokenKind::FloatLiteral,
                start,
                line,
                col,
                value.map(LiteralValue::Float).unwrap_or(LiteralValue::None),
            );
        }
        let value = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            i64::from_str_radix(hex, 16).ok()
        } else {
            text.parse::<i64>().ok()
        };
        self.finish(
            TokenKind::IntLiteral,
            start,
            line,
            col,
            value.map(LiteralValue::Int).unwrap_or(LiteralValue::None),
        )
    }

    fn scan_identifier_or_keyword(&mut self, start: usize, line: u32, col: u32) -> Token {
        while self.peek().is_ascii_alphanumeric() || self.peek() == b'_' {
            self.advance();
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
        if let Some(kind) = keyword_kind(text) {
            let value = match kind {
                TokenKind::BoolLiteral => LiteralValue::Bool(text == "true"),
                _ => LiteralValue::None,
            };
            return self.finish(kind, start, line, col, value);
        }
        self.finish(TokenKind::Identifier, start, line, col, LiteralValue::None)
    }
}

fn decode_char_literal(inner: &[u8]) -> Option<char> {
    if inner.is_empty() {
        return None;
    }
    if inner[0] == b'\\' && inner.len() >= 2 {
        return match inner[1] {
            b'n' => Some('\n'),
            b't' => Some('\t'),
            b'\\' => Some('\\'),
            b'\'' => Some('\''),
            b'"' => Some('"'),
            b'0' => Some('\0'),
            _ => None,
        };
    }
    std::str::from_utf8(inner).ok()?.chars().next()
}
