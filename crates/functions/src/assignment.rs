use cepflow_core::{Context, FunctionResult, Value};

use crate::function::{Function, single_output};

/// `name := f`: evaluates `f` on the current inputs and stores the result in
/// a context.
///
/// This is how per-event streaming state ("let x = expr") is realised: a
/// processor runs its assignments after each evaluation against its own
/// [`Context`].
#[derive(Debug, Clone)]
pub struct ContextAssignment {
    name: String,
    value: Box<dyn Function>,
}

impl ContextAssignment {
    pub fn new(name: impl Into<String>, value: impl Function) -> Self {
        Self {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_function(&self) -> &dyn Function {
        self.value.as_ref()
    }

    /// Evaluate the value function on `inputs` and write the result to
    /// `context`, returning the stored value.
    ///
    /// The value function sees `context` too, so `x := $x + 1` works.
    pub fn assign(&mut self, inputs: &[Value], context: &mut Context) -> FunctionResult<Value> {
        let value = single_output(self.value.as_mut(), inputs, Some(&mut *context))?;
        context.put(self.name.clone(), value.clone());
        Ok(value)
    }
}

impl PartialEq for ContextAssignment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value.equals(other.value.as_ref())
    }
}

impl core::fmt::Display for ContextAssignment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} := {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ADDITION, ArgumentPlaceholder, Constant, ContextPlaceholder, FunctionTree};

    #[test]
    fn writes_constant_into_context() {
        let mut ca = ContextAssignment::new("a", Constant::new(6));
        let mut c = Context::new();
        ca.assign(&[], &mut c).unwrap();
        assert_eq!(c.get("a"), Some(&Value::Int(6)));
        assert_eq!(ca.to_string(), "a := 6");
    }

    #[test]
    fn equality_covers_name_and_value_function() {
        let a = ContextAssignment::new("a", Constant::new(6));
        assert_eq!(a, a.clone());
        assert_ne!(a, ContextAssignment::new("b", Constant::new(6)));
        assert_ne!(a, ContextAssignment::new("a", Constant::new(7)));
    }

    #[test]
    fn accumulates_through_its_own_binding() {
        let increment =
            FunctionTree::binary(ADDITION, ContextPlaceholder::new("total"), ArgumentPlaceholder::new(0))
                .unwrap();
        let mut ca = ContextAssignment::new("total", increment);
        let mut c = Context::new();
        c.put("total", 0);
        for v in [1, 2, 3] {
            ca.assign(&[Value::Int(v)], &mut c).unwrap();
        }
        assert_eq!(c.get("total"), Some(&Value::Int(6)));
    }

    #[test]
    fn failed_evaluation_leaves_context_untouched() {
        let bad = FunctionTree::binary(ADDITION, Constant::new("x"), ArgumentPlaceholder::new(0)).unwrap();
        let mut ca = ContextAssignment::new("a", bad);
        let mut c = Context::new();
        assert!(ca.assign(&[Value::Int(1)], &mut c).is_err());
        assert!(!c.contains("a"));
    }
}
