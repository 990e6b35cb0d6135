//! Lexer (tokenizer) for the netlist DSL.

use crate::error::{OhmicError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text (quotes stripped for strings)
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Keyword, component id or bare word
    Identifier,
    /// A number, possibly with SI suffix and unit
    Number,
    /// Double-quoted string
    Str,
    /// Colon ':' between a component id and a terminal
    Colon,
    /// Equals sign '='
    Equals,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Characters accepted as an SI multiplier after a number.
fn is_si_suffix(ch: char) -> bool {
    matches!(ch, 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G')
}

/// Unit symbols tolerated after a number (`9V`, `220Ω`).
fn is_unit(ch: char) -> bool {
    matches!(ch, 'V' | 'A' | 'W' | 'Ω')
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    /// Last consumed character
    last: Option<char>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
            last: None,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let token = |kind: TokenKind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(&ch) = self.chars.peek() else {
            return Ok(token(TokenKind::Eof, String::new()));
        };

        let tok = match ch {
            '\n' => {
                self.advance();
                token(TokenKind::Newline, "\n".to_string())
            }
            ':' => {
                self.advance();
                token(TokenKind::Colon, ":".to_string())
            }
            '=' => {
                self.advance();
                token(TokenKind::Equals, "=".to_string())
            }
            '"' => {
                self.advance();
                let text = self.read_string(line, column)?;
                token(TokenKind::Str, text)
            }
            '#' => {
                // `#` glued to a previous token, as in `color=#ff0000`
                self.advance();
                let mut text = String::from("#");
                text.push_str(&self.read_identifier());
                token(TokenKind::Identifier, text)
            }
            '-' | '+' | '.' | '0'..='9' => token(TokenKind::Number, self.read_number()),
            _ if ch.is_alphabetic() || ch == '_' => token(TokenKind::Identifier, self.read_identifier()),
            _ => {
                return Err(OhmicError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(tok)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.last = Some(ch);
        Some(ch)
    }

    /// Consume the next character if it satisfies `pred`.
    fn advance_if(&mut self, pred: impl Fn(char) -> bool) -> Option<char> {
        match self.chars.peek() {
            Some(&ch) if pred(ch) => self.advance(),
            _ => None,
        }
    }

    /// `;` always starts a comment; `#` only at line start or after whitespace.
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            let after_space = self.last.map_or(true, char::is_whitespace);
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == ';' || (ch == '#' && after_space) {
                // Comment runs to end of line
                while self.advance_if(|c| c != '\n').is_some() {}
            } else {
                break;
            }
        }
    }

    /// Identifiers may contain `-` after the first character (`resistor-1`).
    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(ch) = self.advance_if(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            text.push(ch);
        }
        text
    }

    fn read_string(&mut self, line: usize, column: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(text),
                Some('\n') | None => {
                    return Err(OhmicError::lexer(line, column, "unterminated string"));
                }
                Some(ch) => text.push(ch),
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        if let Some(sign) = self.advance_if(|c| c == '-' || c == '+') {
            text.push(sign);
        }

        while let Some(ch) = self.advance_if(|c| c.is_ascii_digit()) {
            text.push(ch);
        }

        if let Some(dot) = self.advance_if(|c| c == '.') {
            text.push(dot);
            while let Some(ch) = self.advance_if(|c| c.is_ascii_digit()) {
                text.push(ch);
            }
        }

        if let Some(e) = self.advance_if(|c| c == 'e' || c == 'E') {
            text.push(e);
            if let Some(sign) = self.advance_if(|c| c == '-' || c == '+') {
                text.push(sign);
            }
            while let Some(ch) = self.advance_if(|c| c.is_ascii_digit()) {
                text.push(ch);
            }
        }

        if let Some(suffix) = self.advance_if(is_si_suffix) {
            text.push(suffix);
        }
        if let Some(unit) = self.advance_if(is_unit) {
            text.push(unit);
        }

        text
    }
}

/// Parse a number string with optional SI suffix and unit symbol.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix(is_unit).unwrap_or(text);
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = match text.chars().last() {
        Some(last) if is_si_suffix(last) => {
            let mult = match last {
                'p' => 1e-12,
                'n' => 1e-9,
                'u' | 'µ' => 1e-6,
                'm' => 1e-3,
                'k' | 'K' => 1e3,
                'M' => 1e6,
                _ => 1e9,
            };
            (&text[..text.len() - last.len_utf8()], mult)
        }
        _ => (text, 1.0),
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            out.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return out;
            }
        }
    }

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("1M").unwrap(), 1_000_000.0);
        assert_relative_eq!(parse_value("2.2").unwrap(), 2.2);
        assert_relative_eq!(parse_value("1e-3").unwrap(), 1e-3);
        assert_relative_eq!(parse_value("9V").unwrap(), 9.0);
        assert_relative_eq!(parse_value("4.7kΩ").unwrap(), 4700.0);
        assert!(parse_value("V").is_none());
        assert!(parse_value("-").is_none());
    }

    #[test]
    fn test_lexer_component_line() {
        let input = "resistor R1 10k";
        let mut lexer = Lexer::new(input);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "resistor");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "R1");
        assert_eq!(tok.column, 10);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "10k");
    }

    #[test]
    fn test_lexer_wire_line() {
        assert_eq!(
            kinds("wire B1:right R1:left\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Colon,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_strings_and_comments() {
        let mut lexer = Lexer::new("led D1 label=\"Status LED\" # trailing\n");
        let texts: Vec<String> = std::iter::from_fn(|| {
            let tok = lexer.next_token().unwrap();
            (tok.kind != TokenKind::Eof).then_some(tok.text)
        })
        .collect();
        assert_eq!(texts, vec!["led", "D1", "label", "=", "Status LED", "\n"]);
    }

    fn first_error(input: &str) -> Option<OhmicError> {
        let mut lexer = Lexer::new(input);
        loop {
            match lexer.next_token() {
                Ok(tok) if tok.kind == TokenKind::Eof => return None,
                Ok(_) => {}
                Err(e) => return Some(e),
            }
        }
    }

    #[test]
    fn test_lexer_errors_carry_position() {
        match first_error("battery B1 9\nbulb L1 @") {
            Some(OhmicError::LexerError { line, column, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, 9);
            }
            other => panic!("expected lexer error, got {:?}", other),
        }
        assert!(matches!(
            first_error("label=\"open"),
            Some(OhmicError::LexerError { .. })
        ));
        assert!(first_error("battery B1 9 # ok @ here").is_none());
    }

    #[test]
    fn test_lexer_hex_color_is_not_a_comment() {
        let mut lexer = Lexer::new("# header
led D1 220 color=#ff0000 # note
");
        let texts: Vec<String> = std::iter::from_fn(|| {
            let tok = lexer.next_token().unwrap();
            (tok.kind != TokenKind::Eof).then_some(tok.text)
        })
        .collect();
        assert_eq!(
            texts,
            vec!["\n", "led", "D1", "220", "color", "=", "#ff0000", "\n"]
        );

        let mut lexer = Lexer::new("color=#ff0000");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.column, 7);
    }
}
