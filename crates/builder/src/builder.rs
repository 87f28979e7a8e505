use cepflow_functions::Function;

use crate::error::{BuildError, BuildResult};
use crate::registry::BuilderRegistry;
use crate::stack::{ParseStack, StackItem};

/// One action of the driving parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Push a raw token.
    Shift(String),
    /// Run the rule registered for a symbol.
    Reduce(String),
}

impl BuildStep {
    pub fn shift(token: impl Into<String>) -> Self {
        Self::Shift(token.into())
    }

    pub fn reduce(symbol: impl Into<String>) -> Self {
        Self::Reduce(symbol.into())
    }
}

/// Assembles function trees from shift/reduce actions.
///
/// A tokenizer/parser shifts tokens and calls [`reduce`](Self::reduce) each
/// time it recognises a production. Any failure aborts construction: the stack
/// is cleared and no partial tree can be recovered.
#[derive(Debug)]
pub struct ExpressionBuilder {
    registry: BuilderRegistry,
    stack: ParseStack,
}

impl Default for ExpressionBuilder {
    fn default() -> Self {
        Self::new(BuilderRegistry::standard())
    }
}

impl ExpressionBuilder {
    pub fn new(registry: BuilderRegistry) -> Self {
        Self {
            registry,
            stack: ParseStack::new(),
        }
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BuilderRegistry {
        &mut self.registry
    }

    pub fn stack(&self) -> &ParseStack {
        &self.stack
    }

    pub fn shift(&mut self, token: impl Into<String>) -> &mut Self {
        self.stack.push_token(token);
        self
    }

    /// Push an already built function, e.g. one produced by another builder.
    pub fn shift_function(&mut self, function: impl Function) -> &mut Self {
        self.stack.push_function(function);
        self
    }

    /// Run the rule registered for `symbol` against the stack.
    pub fn reduce(&mut self, symbol: &str) -> BuildResult<()> {
        let Some(rule) = self.registry.rule(symbol) else {
            self.stack.clear();
            return Err(BuildError::UnknownSymbol(symbol.to_string()));
        };

        let outcome = rule(&mut self.stack).and_then(|()| match self.stack.peek() {
            Some(StackItem::Function(_)) => Ok(()),
            Some(other) => Err(BuildError::unexpected("a function after reduction", other)),
            None => Err(BuildError::underflow("a function after reduction")),
        });

        outcome.map_err(|source| {
            tracing::debug!(symbol, error = %source, "reduction failed; aborting build");
            self.stack.clear();
            BuildError::Reduce {
                symbol: symbol.to_string(),
                source: Box::new(source),
            }
        })
    }

    /// Take the finished tree; exactly one function must remain.
    pub fn finish(&mut self) -> BuildResult<Box<dyn Function>> {
        let remaining = self.stack.len();
        if remaining > 1 {
            self.stack.clear();
            return Err(BuildError::Incomplete { remaining });
        }
        match self.stack.pop() {
            Ok(StackItem::Function(function)) => Ok(function),
            Ok(item) => Err(BuildError::unexpected("a function", &item)),
            Err(_) => Err(BuildError::Empty),
        }
    }

    /// Replay `steps` from an empty stack and return the result.
    pub fn build(&mut self, steps: impl IntoIterator<Item = BuildStep>) -> BuildResult<Box<dyn Function>> {
        self.stack.clear();
        for step in steps {
            match step {
                BuildStep::Shift(token) => {
                    self.shift(token);
                }
                BuildStep::Reduce(symbol) => self.reduce(&symbol)?,
            }
        }
        self.finish()
    }
}
