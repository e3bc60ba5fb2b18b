//! Turtle-subset parser.
//!
//! Supported: `@prefix` declarations, prefixed names, `<absolute-iri>`
//! terms, the `a` keyword, `;` predicate lists and `,` object lists,
//! integer/boolean/string literals, and `#` comments. Blank nodes,
//! collections, and datatype/language tags are outside the subset the
//! loaders need.

use parajudica_core::{Sid, TermValue};
use std::collections::HashMap;

use crate::error::{Result, TurtleError};
use crate::sink::TripleSink;

/// Parse a Turtle document, emitting prefixes and triples to the sink.
pub fn parse(input: &str, sink: &mut impl TripleSink) -> Result<()> {
    Parser::new(input, sink).run()
}

/// Object-position parse result: a node reference or a literal.
enum Object {
    Node(Sid),
    Literal(TermValue),
}

struct Parser<'a, S: TripleSink> {
    input: &'a str,
    pos: usize,
    prefixes: HashMap<String, String>,
    sink: &'a mut S,
}

impl<'a, S: TripleSink> Parser<'a, S> {
    fn new(input: &'a str, sink: &'a mut S) -> Self {
        Self {
            input,
            pos: 0,
            prefixes: HashMap::new(),
            sink,
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            self.skip_trivia();
            if self.at_end() {
                return Ok(());
            }
            if self.peek() == Some('@') {
                self.parse_prefix_declaration()?;
            } else {
                self.parse_statement()?;
            }
        }
    }

    // === statement parsing ===

    fn parse_prefix_declaration(&mut self) -> Result<()> {
        self.expect_word("@prefix")?;
        self.skip_trivia();
        let label = self.read_until(':')?;
        self.expect_char(':')?;
        self.skip_trivia();
        let iri = self.parse_iri_ref()?;
        self.skip_trivia();
        self.expect_char('.')?;
        self.sink.prefix(&label, &iri);
        self.prefixes.insert(label, iri);
        Ok(())
    }

    /// `subject (predicate object-list) (';' predicate object-list)* '.'`
    fn parse_statement(&mut self) -> Result<()> {
        let subject = self.parse_node()?;
        loop {
            self.skip_trivia();
            let predicate = self.parse_predicate()?;
            loop {
                self.skip_trivia();
                let object = self.parse_object()?;
                let value = match object {
                    Object::Node(sid) => TermValue::Ref(sid),
                    Object::Literal(value) => value,
                };
                self.sink.triple(subject.clone(), predicate.clone(), value);
                self.skip_trivia();
                if self.peek() == Some(',') {
                    self.advance();
                } else {
                    break;
                }
            }
            match self.peek() {
                Some(';') => {
                    self.advance();
                    self.skip_trivia();
                    // Tolerate a dangling ';' before '.'
                    if self.peek() == Some('.') {
                        self.advance();
                        return Ok(());
                    }
                }
                Some('.') => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    return Err(TurtleError::parse(
                        self.pos,
                        "expected ';', ',' or '.' after object",
                    ))
                }
            }
        }
    }

    // === term parsing ===

    fn parse_predicate(&mut self) -> Result<Sid> {
        if self.peek() == Some('a') && self.peek_is_bare_a() {
            self.advance();
            return Ok(Sid::new(
                parajudica_vocab::namespaces::RDF,
                parajudica_vocab::predicates::RDF_TYPE,
            ));
        }
        self.parse_node()
    }

    fn parse_node(&mut self) -> Result<Sid> {
        self.skip_trivia();
        match self.peek() {
            Some('<') => {
                let position = self.pos;
                let iri = self.parse_iri_ref()?;
                self.resolve_iri(&iri, position)
            }
            Some(_) => self.parse_prefixed_name(),
            None => Err(TurtleError::parse(self.pos, "expected a node")),
        }
    }

    fn parse_object(&mut self) -> Result<Object> {
        self.skip_trivia();
        match self.peek() {
            Some('"') => Ok(Object::Literal(self.parse_string_literal()?)),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                Ok(Object::Literal(self.parse_integer()?))
            }
            Some(_) if self.looking_at_word("true") => {
                self.expect_word("true")?;
                Ok(Object::Literal(TermValue::Boolean(true)))
            }
            Some(_) if self.looking_at_word("false") => {
                self.expect_word("false")?;
                Ok(Object::Literal(TermValue::Boolean(false)))
            }
            Some(_) => Ok(Object::Node(self.parse_node()?)),
            None => Err(TurtleError::parse(self.pos, "expected an object")),
        }
    }

    fn parse_prefixed_name(&mut self) -> Result<Sid> {
        let position = self.pos;
        let word = self.read_name_token();
        let Some((label, local)) = word.split_once(':') else {
            return Err(TurtleError::parse(
                position,
                format!("expected prefixed name, found {word:?}"),
            ));
        };
        let iri = match self.prefixes.get(label) {
            Some(iri) => format!("{iri}{local}"),
            None => {
                // Fall back to the registered prefix labels, so files can
                // use pj:/sdc:/... without declaring them.
                let registered = parajudica_vocab::registered_namespaces()
                    .iter()
                    .find(|(_, l, _)| *l == label)
                    .map(|(_, _, iri)| *iri)
                    .ok_or_else(|| TurtleError::UndefinedPrefix(label.to_string()))?;
                format!("{registered}{local}")
            }
        };
        self.resolve_iri(&iri, position)
    }

    fn resolve_iri(&self, iri: &str, _position: usize) -> Result<Sid> {
        match parajudica_vocab::split_iri(iri) {
            Some((code, local)) => Ok(Sid::new(code, local)),
            None => Err(TurtleError::UnregisteredNamespace(iri.to_string())),
        }
    }

    fn parse_iri_ref(&mut self) -> Result<String> {
        self.expect_char('<')?;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '>' {
                let iri = self.input[start..self.pos].to_string();
                self.advance();
                return Ok(iri);
            }
            self.advance();
        }
        Err(TurtleError::parse(start, "unterminated IRI reference"))
    }

    fn parse_string_literal(&mut self) -> Result<TermValue> {
        self.expect_char('"')?;
        let mut value = String::new();
        while let Some(c) = self.peek() {
            self.advance();
            match c {
                '"' => return Ok(TermValue::string(value)),
                '\\' => match self.peek() {
                    Some('n') => {
                        value.push('\n');
                        self.advance();
                    }
                    Some('t') => {
                        value.push('\t');
                        self.advance();
                    }
                    Some(escaped @ ('"' | '\\')) => {
                        value.push(escaped);
                        self.advance();
                    }
                    other => {
                        return Err(TurtleError::parse(
                            self.pos,
                            format!("invalid escape {other:?}"),
                        ))
                    }
                },
                other => value.push(other),
            }
        }
        Err(TurtleError::parse(self.pos, "unterminated string literal"))
    }

    fn parse_integer(&mut self) -> Result<TermValue> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.input[start..self.pos]
            .parse::<i64>()
            .map(TermValue::Long)
            .map_err(|_| TurtleError::parse(start, "invalid integer literal"))
    }

    // === low-level scanning ===

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => self.advance(),
                Some('#') => {
                    while let Some(c) = self.peek() {
                        self.advance();
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// True when the next token is exactly the bare keyword `a`.
    fn peek_is_bare_a(&self) -> bool {
        let rest = &self.input[self.pos..];
        rest.starts_with('a')
            && rest[1..]
                .chars()
                .next()
                .map(|c| c.is_whitespace())
                .unwrap_or(false)
    }

    fn looking_at_word(&self, word: &str) -> bool {
        let rest = &self.input[self.pos..];
        rest.starts_with(word)
            && rest[word.len()..]
                .chars()
                .next()
                .map(|c| !c.is_alphanumeric() && c != ':')
                .unwrap_or(true)
    }

    fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.input[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(())
        } else {
            Err(TurtleError::parse(self.pos, format!("expected {word:?}")))
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(TurtleError::parse(
                self.pos,
                format!("expected {expected:?}"),
            ))
        }
    }

    fn read_until(&mut self, stop: char) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == stop {
                return Ok(self.input[start..self.pos].trim().to_string());
            }
            self.advance();
        }
        Err(TurtleError::parse(start, format!("expected {stop:?}")))
    }

    /// Read a prefixed-name token: up to whitespace or a structural char.
    fn read_name_token(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ';' | ',' | '<' | '>' | '"' | '#') {
                break;
            }
            // A '.' ends the token only when followed by trivia (statement
            // terminator), so local names like "v1.2" survive.
            if c == '.' {
                let after = self.input[self.pos + 1..].chars().next();
                if after.map(|c| c.is_whitespace()).unwrap_or(true) {
                    break;
                }
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }
}
