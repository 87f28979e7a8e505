//! Standard build rules.
//!
//! Each rule pops exactly what its production consumed (its own tokens and
//! its argument sub-results) and pushes exactly one function. Rules only look
//! at the top of the stack, so they work whatever order the driving parser
//! shifts tokens in.

use cepflow_core::Value;
use cepflow_functions::{ArgumentPlaceholder, Constant, ContextPlaceholder, Function, FunctionTree};

use crate::error::{BuildError, BuildResult};
use crate::stack::ParseStack;

/// `token` → `Constant`.
///
/// Accepts `null`, `true`/`false`, integers, floats and double-quoted text.
pub fn literal(stack: &mut ParseStack) -> BuildResult<()> {
    let token = stack.pop_token()?;
    let value = parse_literal(&token).ok_or(BuildError::Malformed(token))?;
    stack.push_function(Constant::new(value));
    Ok(())
}

fn parse_literal(token: &str) -> Option<Value> {
    match token {
        "null" => return Some(Value::Null),
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }
    if let Some(text) = token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return Some(Value::from(text));
    }
    if let Ok(n) = token.parse::<i64>() {
        return Some(Value::Int(n));
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

/// `$N` → argument placeholder, `$name` → context placeholder.
pub fn placeholder(stack: &mut ParseStack) -> BuildResult<()> {
    let token = stack.pop_token()?;
    let Some(name) = token.strip_prefix('$').filter(|n| !n.is_empty()) else {
        return Err(BuildError::Malformed(token));
    };
    match name.parse::<usize>() {
        Ok(index) => stack.push_function(ArgumentPlaceholder::new(index)),
        Err(_) => stack.push_function(ContextPlaceholder::new(name)),
    }
    Ok(())
}

/// `( f )` → `f`.
pub fn group(stack: &mut ParseStack) -> BuildResult<()> {
    stack.expect_token(")")?;
    let inner = stack.pop_function()?;
    stack.expect_token("(")?;
    stack.push_boxed(inner);
    Ok(())
}

/// `left symbol right` → `op(left, right)`.
pub fn infix<F>(symbol: &'static str, op: F) -> impl Fn(&mut ParseStack) -> BuildResult<()> + Send + Sync
where
    F: Function + Clone + Sync,
{
    move |stack: &mut ParseStack| {
        let right = stack.pop_function()?;
        stack.expect_token(symbol)?;
        let left = stack.pop_function()?;
        let tree = FunctionTree::from_boxed(Box::new(op.clone()), vec![left, right])?;
        stack.push_function(tree);
        Ok(())
    }
}

/// `symbol arg` or `symbol ( arg )` → `op(arg)`.
pub fn prefix<F>(symbol: &'static str, op: F) -> impl Fn(&mut ParseStack) -> BuildResult<()> + Send + Sync
where
    F: Function + Clone + Sync,
{
    move |stack: &mut ParseStack| {
        let argument = if stack.top_is_token(")") {
            stack.expect_token(")")?;
            let argument = stack.pop_function()?;
            stack.expect_token("(")?;
            argument
        } else {
            stack.pop_function()?
        };
        stack.expect_token(symbol)?;
        let tree = FunctionTree::from_boxed(Box::new(op.clone()), vec![argument])?;
        stack.push_function(tree);
        Ok(())
    }
}

/// `name ( a1 , ... , an )` → `op(a1, ..., an)`, with `n` the input arity of `op`.
pub fn call<F>(name: &'static str, op: F) -> impl Fn(&mut ParseStack) -> BuildResult<()> + Send + Sync
where
    F: Function + Clone + Sync,
{
    let arity = op.input_arity();
    move |stack: &mut ParseStack| {
        stack.expect_token(")")?;
        let mut arguments = Vec::with_capacity(arity);
        for position in (0..arity).rev() {
            arguments.push(stack.pop_function()?);
            if position > 0 {
                stack.expect_token(",")?;
            }
        }
        arguments.reverse();
        stack.expect_token("(")?;
        stack.expect_token(name)?;
        let tree = FunctionTree::from_boxed(Box::new(op.clone()), arguments)?;
        stack.push_function(tree);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepflow_functions::{ADDITION, IF_THEN_ELSE, SQUARE_ROOT};
    use proptest::prelude::*;

    fn top(stack: &mut ParseStack) -> String {
        stack.pop_function().unwrap().to_string()
    }

    #[test]
    fn literals_cover_every_scalar_kind() {
        for (token, expected) in [
            ("null", Value::Null),
            ("true", Value::Bool(true)),
            ("-12", Value::Int(-12)),
            ("2.5", Value::Float(2.5)),
            ("\"a b\"", Value::from("a b")),
        ] {
            assert_eq!(parse_literal(token), Some(expected), "{token}");
        }
        assert_eq!(parse_literal("abc"), None);
        assert_eq!(parse_literal("inf"), None);
    }

    #[test]
    fn malformed_literal_is_reported() {
        let mut stack = ParseStack::new();
        stack.push_token("3x");
        assert_eq!(literal(&mut stack), Err(BuildError::Malformed("3x".into())));
    }

    #[test]
    fn placeholders_by_index_or_name() {
        let mut stack = ParseStack::new();
        stack.push_token("$1");
        placeholder(&mut stack).unwrap();
        assert_eq!(top(&mut stack), "$1");

        stack.push_token("$total");
        placeholder(&mut stack).unwrap();
        assert_eq!(top(&mut stack), "$total");

        stack.push_token("$");
        assert!(placeholder(&mut stack).is_err());
    }

    #[test]
    fn prefix_accepts_optional_parentheses() {
        let rule = prefix("√", SQUARE_ROOT);
        let mut stack = ParseStack::new();
        stack.push_token("√");
        stack.push_function(Constant::new(4));
        rule(&mut stack).unwrap();
        assert_eq!(stack.len(), 1);

        stack.clear();
        for token in ["√", "("] {
            stack.push_token(token);
        }
        stack.push_function(Constant::new(4));
        stack.push_token(")");
        rule(&mut stack).unwrap();
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn infix_consumes_operands_and_symbol() {
        let rule = infix("+", ADDITION);
        let mut stack = ParseStack::new();
        stack.push_function(Constant::new(1));
        stack.push_token("+");
        stack.push_function(Constant::new(2));
        rule(&mut stack).unwrap();
        assert_eq!(top(&mut stack), "1 + 2");
        assert!(stack.is_empty());
    }

    #[test]
    fn call_checks_separators() {
        let rule = call("if", IF_THEN_ELSE);
        let mut stack = ParseStack::new();
        for token in ["if", "("] {
            stack.push_token(token);
        }
        stack.push_function(Constant::new(true));
        stack.push_token(",");
        stack.push_function(Constant::new(1));
        stack.push_token(";");
        stack.push_function(Constant::new(2));
        stack.push_token(")");
        let err = rule(&mut stack).unwrap_err();
        assert!(matches!(err, BuildError::UnexpectedItem { .. }));
    }

    proptest! {
        /// Property: any integer token builds a constant evaluating to that integer.
        #[test]
        fn integer_tokens_become_constants(n in any::<i64>()) {
            let mut stack = ParseStack::new();
            stack.push_token(n.to_string());
            literal(&mut stack).unwrap();
            let mut constant = stack.pop_function().unwrap();
            prop_assert_eq!(constant.evaluate(&[], None).unwrap(), vec![Value::Int(n)]);
        }
    }
}
