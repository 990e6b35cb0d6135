//! Parser for the netlist DSL.

use std::collections::BTreeMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::circuit::{Terminal, TerminalRef};
use crate::error::{OhmicError, Result};

/// Parser for netlist DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match self.current.kind {
                TokenKind::Identifier if self.current.text.eq_ignore_ascii_case(WIRE_KEYWORD) => {
                    let wire = self.parse_wire()?;
                    ast.wires.push(wire);
                }
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(OhmicError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(OhmicError::parse(
                        self.current.line,
                        format!("unexpected trailing token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(OhmicError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn at_line_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof)
    }

    /// A component id: any identifier, or a bare number such as `1`.
    fn expect_id(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(OhmicError::parse(
                self.current.line,
                format!("expected component id, got {:?}", self.current.kind),
            )),
        }
    }

    fn parse_value_token(&mut self) -> Result<ParamValue> {
        let tok = self.current.clone();
        let value = match tok.kind {
            TokenKind::Number => ParamValue::Number(parse_value(&tok.text).ok_or_else(|| {
                OhmicError::parse(tok.line, format!("invalid number: {}", tok.text))
            })?),
            TokenKind::Identifier | TokenKind::Str => ParamValue::Word(tok.text),
            _ => {
                return Err(OhmicError::parse(
                    tok.line,
                    format!("expected a value, got {:?}", tok.kind),
                ));
            }
        };
        self.advance()?;
        Ok(value)
    }

    fn parse_terminal(&mut self) -> Result<TerminalRef> {
        let line = self.current.line;
        let id = self.expect_id()?;
        self.expect(TokenKind::Colon)?;
        let name = self.expect(TokenKind::Identifier)?.text;
        let terminal = Terminal::from_name(&name).ok_or_else(|| {
            OhmicError::parse(line, format!("unknown terminal '{}' (expected left or right)", name))
        })?;
        Ok(TerminalRef::new(id, terminal))
    }

    fn parse_wire(&mut self) -> Result<WireDef> {
        let line = self.current.line;
        self.advance()?;
        let from = self.parse_terminal()?;
        let to = self.parse_terminal()?;
        Ok(WireDef { from, to, line })
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let keyword = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let kind = kind_from_keyword(&keyword).ok_or_else(|| OhmicError::UnknownComponentType {
            component_type: keyword.clone(),
            line,
        })?;
        let id = self.expect_id()?;

        let mut value = None;
        let mut params = BTreeMap::new();

        while !self.at_line_end() {
            let tok = self.current.clone();
            let parsed = self.parse_value_token()?;

            // key=value
            if self.current.kind == TokenKind::Equals {
                self.advance()?;
                if tok.kind != TokenKind::Identifier {
                    return Err(OhmicError::parse(
                        line,
                        format!("invalid parameter name {:?}", tok.text),
                    ));
                }
                let param = self.parse_value_token()?;
                params.insert(tok.text.to_lowercase(), param);
                continue;
            }

            if value.is_some() || !params.is_empty() {
                return Err(OhmicError::invalid_component(
                    &id,
                    line,
                    format!("unexpected value '{}'", parsed),
                ));
            }
            value = Some(parsed);
        }

        Ok(ComponentDef {
            kind,
            id,
            value,
            params,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;
    use crate::dsl::parse;

    #[test]
    fn test_parse_component() {
        let ast = parse("resistor R1 10k").unwrap();
        assert_eq!(ast.components.len(), 1);
        let r1 = &ast.components[0];
        assert_eq!(r1.kind, ComponentKind::Resistor);
        assert_eq!(r1.id, "R1");
        assert_eq!(r1.value, Some(ParamValue::Number(10_000.0)));
        assert_eq!(r1.line, 1);
    }

    #[test]
    fn test_parse_params() {
        let ast = parse("led D1 220 color=red label=\"Power on\"").unwrap();
        let d1 = &ast.components[0];
        assert_eq!(d1.params["color"], ParamValue::Word("red".into()));
        assert_eq!(d1.params["label"], ParamValue::Word("Power on".into()));

        let ast = parse("switch S1 state=off").unwrap();
        assert_eq!(ast.components[0].value, None);
        assert_eq!(ast.components[0].params["state"].as_state(), Some(false));
    }

    #[test]
    fn test_parse_wire() {
        let ast = parse("battery B1 9\nwire B1:right B1:LEFT\n").unwrap();
        assert_eq!(ast.wires.len(), 1);
        assert_eq!(ast.wires[0].from, TerminalRef::right("B1"));
        assert_eq!(ast.wires[0].to, TerminalRef::left("B1"));
        assert_eq!(ast.wires[0].line, 2);
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# A lone bulb\n\nbulb L1 50 ; inline comment style\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.components.len(), 1);
        assert_eq!(ast.components[0].line, 3);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse("capacitor C1 10u"),
            Err(OhmicError::UnknownComponentType { line: 1, .. })
        ));
        assert!(matches!(
            parse("resistor R1 10k 20k"),
            Err(OhmicError::InvalidComponent { .. })
        ));
        assert!(matches!(
            parse("battery B1 9\nwire B1:top B1:left"),
            Err(OhmicError::ParseError { line: 2, .. })
        ));
        assert!(matches!(parse("wire B1 B2"), Err(OhmicError::ParseError { .. })));
        assert!(matches!(parse("= 4"), Err(OhmicError::ParseError { .. })));
    }
}
