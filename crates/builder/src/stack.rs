//! The shared parse stack build rules operate on.

use cepflow_functions::Function;

use crate::error::{BuildError, BuildResult};

/// One slot of the parse stack: a raw token, or an already built function.
#[derive(Debug, Clone)]
pub enum StackItem {
    Token(String),
    Function(Box<dyn Function>),
}

impl PartialEq for StackItem {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StackItem::Token(a), StackItem::Token(b)) => a == b,
            (StackItem::Function(a), StackItem::Function(b)) => a.equals(b.as_ref()),
            _ => false,
        }
    }
}

impl core::fmt::Display for StackItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StackItem::Token(token) => write!(f, "token {token:?}"),
            StackItem::Function(function) => write!(f, "function {function}"),
        }
    }
}

/// Stack of tokens and partial results.
///
/// Pops are kind-checked: asking for a function when a token is on top (or
/// the other way round) fails and leaves the stack as it was.
#[derive(Debug, Clone, Default)]
pub struct ParseStack {
    items: Vec<StackItem>,
}

impl ParseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn peek(&self) -> Option<&StackItem> {
        self.items.last()
    }

    /// Whether the top of the stack is exactly `token`.
    pub fn top_is_token(&self, token: &str) -> bool {
        matches!(self.peek(), Some(StackItem::Token(t)) if t == token)
    }

    pub fn push(&mut self, item: StackItem) {
        self.items.push(item);
    }

    pub fn push_token(&mut self, token: impl Into<String>) {
        self.items.push(StackItem::Token(token.into()));
    }

    pub fn push_function(&mut self, function: impl Function) {
        self.items.push(StackItem::Function(Box::new(function)));
    }

    pub fn push_boxed(&mut self, function: Box<dyn Function>) {
        self.items.push(StackItem::Function(function));
    }

    pub fn pop(&mut self) -> BuildResult<StackItem> {
        self.items.pop().ok_or_else(|| BuildError::underflow("any item"))
    }

    pub fn pop_function(&mut self) -> BuildResult<Box<dyn Function>> {
        match self.items.pop() {
            Some(StackItem::Function(function)) => Ok(function),
            Some(item) => {
                let err = BuildError::unexpected("a function", &item);
                self.items.push(item);
                Err(err)
            }
            None => Err(BuildError::underflow("a function")),
        }
    }

    pub fn pop_token(&mut self) -> BuildResult<String> {
        match self.items.pop() {
            Some(StackItem::Token(token)) => Ok(token),
            Some(item) => {
                let err = BuildError::unexpected("a token", &item);
                self.items.push(item);
                Err(err)
            }
            None => Err(BuildError::underflow("a token")),
        }
    }

    /// Pop a token, failing unless it is exactly `expected`.
    pub fn expect_token(&mut self, expected: &str) -> BuildResult<()> {
        if self.top_is_token(expected) {
            self.items.pop();
            return Ok(());
        }
        match self.peek() {
            Some(found) => Err(BuildError::unexpected(format!("{expected:?}"), found)),
            None => Err(BuildError::underflow(format!("{expected:?}"))),
        }
    }
}
