//! Symbol → build rule mapping.

use std::collections::HashMap;

use cepflow_functions::{
    ADDITION, AND, EQUALS, IF_THEN_ELSE, MULTIPLICATION, NEGATION, OR, SQUARE_ROOT,
};

use crate::error::BuildResult;
use crate::rules;
use crate::stack::ParseStack;

pub type BuildRule = Box<dyn Fn(&mut ParseStack) -> BuildResult<()> + Send + Sync>;

/// Rules keyed by the grammar symbol whose reduction triggers them.
///
/// This is the only coupling between the builder and a concrete grammar: a
/// parser for another syntax registers its own symbols.
#[derive(Default)]
pub struct BuilderRegistry {
    rules: HashMap<String, BuildRule>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard rules:
    ///
    /// | symbol | production |
    /// |---|---|
    /// | `literal` | `token` |
    /// | `placeholder` | `$0`, `$name` |
    /// | `()` | `( f )` |
    /// | `+` `×` `*` `=` `∧` `∨` | `a op b` |
    /// | `√` `¬` | `op a`, `op ( a )` |
    /// | `if` | `if ( c , a , b )` |
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register("literal", rules::literal)
            .register("placeholder", rules::placeholder)
            .register("()", rules::group)
            .register("+", rules::infix("+", ADDITION))
            .register("×", rules::infix("×", MULTIPLICATION))
            .register("*", rules::infix("*", MULTIPLICATION))
            .register("=", rules::infix("=", EQUALS))
            .register("∧", rules::infix("∧", AND))
            .register("∨", rules::infix("∨", OR))
            .register("√", rules::prefix("√", SQUARE_ROOT))
            .register("¬", rules::prefix("¬", NEGATION))
            .register("if", rules::call("if", IF_THEN_ELSE));
        registry
    }

    /// Register `rule` for `symbol`, replacing any previous rule.
    pub fn register(
        &mut self,
        symbol: impl Into<String>,
        rule: impl Fn(&mut ParseStack) -> BuildResult<()> + Send + Sync + 'static,
    ) -> &mut Self {
        let symbol = symbol.into();
        if self.rules.insert(symbol.clone(), Box::new(rule)).is_some() {
            tracing::debug!(%symbol, "replaced build rule");
        }
        self
    }

    pub fn rule(&self, symbol: &str) -> Option<&BuildRule> {
        self.rules.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Registered symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }
}

impl core::fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BuilderRegistry")
            .field("symbols", &self.symbols())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_operators() {
        let registry = BuilderRegistry::standard();
        for symbol in ["literal", "placeholder", "()", "+", "*", "×", "√", "¬", "if", "=", "∧", "∨"] {
            assert!(registry.contains(symbol), "{symbol}");
        }
        assert!(!registry.contains("-"));
    }

    #[test]
    fn custom_rules_can_be_added() {
        let mut registry = BuilderRegistry::new();
        registry.register("nop", |_: &mut ParseStack| Ok(()));
        assert_eq!(registry.symbols(), vec!["nop"]);
    }
}
