//! Placeholder templates in task `run` strings.
//!
//! # Syntax
//!
//! - `{{arg()}}`, `{{arg(name="file", default="a.txt")}}` - next positional argument
//! - `{{flag(name="force")}}` - `true`/`false` depending on `--force`
//! - `{{option(name="user", default="me")}}` - value of `--user=<v>` or `--user <v>`
//! - `{{env.HOME}}` - environment variable
//! - `{{config_root}}` - directory of the config file declaring the task
//! - `\{{` - literal `{{`
//!
//! Keyword values may be double- or single-quoted, or bare words.

use std::collections::BTreeSet;
use thiserror::Error;

/// An `arg()` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgRef {
    pub name: Option<String>,
    pub default: Option<String>,
}

/// A `flag(name=...)` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRef {
    pub name: String,
    pub default: Option<String>,
}

/// An `option(name=...)` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRef {
    pub name: String,
    pub default: Option<String>,
}

/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text.
    Literal(String),
    Arg(ArgRef),
    Flag(FlagRef),
    Option(OptionRef),
    /// `env.NAME`
    Env(String),
    /// `config_root`
    ConfigRoot,
}

/// Template parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

/// A parsed `run` template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse a template string.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Parser::new(input).parse()
    }

    /// Nodes in source order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Names used by `flag(...)` placeholders.
    pub fn flag_names(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Flag(f) => Some(f.name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names used by `option(...)` placeholders.
    pub fn option_names(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .filter_map(|n| match n {
                Node::Option(o) => Some(o.name.as_str()),
                _ => None,
            })
            .collect()
    }
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

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            offset: self.pos,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", c)))
        }
    }

    fn parse(mut self) -> Result<Template, ParseError> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            if self.starts_with("\\{{") {
                literal.push_str("{{");
                self.pos += 3;
            } else if self.starts_with("{{") {
                if !literal.is_empty() {
                    nodes.push(Node::Literal(std::mem::take(&mut literal)));
                }
                self.pos += 2;
                nodes.push(self.placeholder()?);
            } else {
                literal.push(c);
                self.pos += 1;
            }
        }

        if !literal.is_empty() {
            nodes.push(Node::Literal(literal));
        }
        Ok(Template { nodes })
    }

    /// Parse the inside of `{{ ... }}`, consuming the closing braces.
    fn placeholder(&mut self) -> Result<Node, ParseError> {
        self.skip_whitespace();
        let ident = self.identifier()?;
        self.skip_whitespace();

        let node = if self.peek() == Some('(') {
            self.pos += 1;
            let kwargs = self.kwargs()?;
            self.call(&ident, kwargs)?
        } else if ident == "config_root" {
            Node::ConfigRoot
        } else if let Some(var) = ident.strip_prefix("env.") {
            if var.is_empty() {
                return Err(self.error("missing variable name after 'env.'"));
            }
            Node::Env(var.to_string())
        } else {
            return Err(self.error(format!("unknown variable '{}'", ident)));
        };

        self.skip_whitespace();
        if !self.starts_with("}}") {
            return Err(self.error("expected '}}'"));
        }
        self.pos += 2;
        Ok(node)
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Parse `key=value, ...)` after the opening parenthesis.
    fn kwargs(&mut self) -> Result<Vec<(String, String)>, ParseError> {
        let mut kwargs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some(')') {
                self.pos += 1;
                return Ok(kwargs);
            }
            let key = self.identifier()?;
            self.expect('=')?;
            self.skip_whitespace();
            let value = self.value()?;
            kwargs.push((key, value));

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {}
                Some(_) => return Err(self.error("expected ',' or ')'")),
                None => return Err(self.error("unterminated argument list")),
            }
        }
    }

    fn value(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.peek() {
                        None => return Err(self.error("unterminated string")),
                        Some('\\') if quote == '"' => {
                            self.pos += 1;
                            match self.peek() {
                                Some('n') => value.push('\n'),
                                Some('t') => value.push('\t'),
                                Some(c) => value.push(c),
                                None => return Err(self.error("unterminated string")),
                            }
                            self.pos += 1;
                        }
                        Some(c) if c == quote => {
                            self.pos += 1;
                            return Ok(value);
                        }
                        Some(c) => {
                            value.push(c);
                            self.pos += 1;
                        }
                    }
                }
            }
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
                {
                    self.pos += 1;
                }
                if start == self.pos {
                    return Err(self.error("expected a value"));
                }
                Ok(self.chars[start..self.pos].iter().collect())
            }
        }
    }

    fn call(&self, function: &str, kwargs: Vec<(String, String)>) -> Result<Node, ParseError> {
        let mut name = None;
        let mut default = None;
        for (key, value) in kwargs {
            match key.as_str() {
                "name" => name = Some(value),
                "default" => default = Some(value),
                "help" => {}
                other => {
                    return Err(self.error(format!(
                        "unknown argument '{}' for {}()",
                        other, function
                    )))
                }
            }
        }

        let require_name = |name: Option<String>| {
            name.filter(|n| !n.is_empty())
                .ok_or_else(|| self.error(format!("{}() requires name=\"...\"", function)))
        };

        match function {
            "arg" => Ok(Node::Arg(ArgRef { name, default })),
            "flag" => Ok(Node::Flag(FlagRef {
                name: require_name(name)?,
                default,
            })),
            "option" => Ok(Node::Option(OptionRef {
                name: require_name(name)?,
                default,
            })),
            other => Err(self.error(format!("unknown function '{}'", other))),
        }
    }
}
