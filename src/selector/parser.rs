use crate::selector::ast::{
    AttrOp, AttributeSelector, Combinator, ComplexSelector, Compound, SelectorList,
};
use crate::selector::errors::SelectorError;

/// Parse a selector list such as `slot[name='blah'], div > p`.
///
/// Positions in errors are character offsets into `input`.
pub fn parse(input: &str) -> Result<SelectorList, SelectorError> {
    if input.trim().is_empty() {
        return Err(SelectorError::Empty);
    }
    Parser::new(input).selector_list()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    /// Skip whitespace, reporting whether any was skipped.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(ch) => SelectorError::UnexpectedChar {
                ch,
                position: self.pos,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), SelectorError> {
        if self.peek() == Some(wanted) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn selector_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.complex()?);
            self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };

            if combinator != Combinator::Descendant {
                let position = self.pos;
                self.pos += 1;
                self.skip_ws();
                if matches!(self.peek(), None | Some(',')) {
                    return Err(SelectorError::DanglingCombinator { position });
                }
            }

            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        if self.peek() == Some('*') {
            self.pos += 1;
        } else if self.peek().is_some_and(is_ident_start) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.ids.push(self.ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_ws();
        let name = self.ident()?;
        self.skip_ws();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector { name, test: None });
            }
            Some('=') => {
                self.pos += 1;
                AttrOp::Equals
            }
            Some(ch @ ('~' | '|' | '^' | '$' | '*')) => {
                self.pos += 1;
                self.expect('=')?;
                match ch {
                    '~' => AttrOp::Includes,
                    '|' => AttrOp::DashMatch,
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    _ => AttrOp::Substring,
                }
            }
            _ => return Err(self.unexpected()),
        };

        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.string(quote)?,
            _ => self.bare_value()?,
        };
        self.skip_ws();
        self.expect(']')?;

        Ok(AttributeSelector {
            name,
            test: Some((op, value)),
        })
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        if !self.peek().is_some_and(is_ident_start) {
            return Err(self.unexpected());
        }
        let mut ident = String::new();
        while let Some(ch) = self.peek().filter(|&c| is_ident_char(c)) {
            ident.push(ch);
            self.pos += 1;
        }
        Ok(ident)
    }

    /// Unquoted attribute value; unlike an identifier it may start with a digit.
    fn bare_value(&mut self) -> Result<String, SelectorError> {
        let mut value = String::new();
        while let Some(ch) = self.peek().filter(|&c| is_ident_char(c)) {
            value.push(ch);
            self.pos += 1;
        }
        if value.is_empty() {
            return Err(self.unexpected());
        }
        Ok(value)
    }

    fn string(&mut self, quote: char) -> Result<String, SelectorError> {
        let position = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(SelectorError::UnterminatedString { position }),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(SelectorError::UnterminatedString { position }),
                },
                Some(ch) if ch == quote => return Ok(value),
                Some(ch) => value.push(ch),
            }
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '-' || !ch.is_ascii()
}

fn is_ident_char(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}
