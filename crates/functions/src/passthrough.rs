use cepflow_core::{Context, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation};

/// A named function whose arity, types and evaluation all come from an
/// inner function.
///
/// Lets a composite tree be packaged under its own name: the inner function
/// does the work while rendering shows only the name.
#[derive(Debug, Clone)]
pub struct PassthroughFunction {
    name: String,
    inner: Box<dyn Function>,
}

impl PassthroughFunction {
    pub fn new(name: impl Into<String>, inner: impl Function) -> Self {
        Self::from_boxed(name, Box::new(inner))
    }

    pub fn from_boxed(name: impl Into<String>, inner: Box<dyn Function>) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn function(&self) -> &dyn Function {
        self.inner.as_ref()
    }
}

impl PartialEq for PassthroughFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.inner.equals(other.inner.as_ref())
    }
}

impl Function for PassthroughFunction {
    fn input_arity(&self) -> usize {
        self.inner.input_arity()
    }

    fn output_arity(&self) -> usize {
        self.inner.output_arity()
    }

    fn input_types_for(&self, position: usize) -> TypeSet {
        self.inner.input_types_for(position)
    }

    fn output_type_for(&self, position: usize) -> ValueType {
        self.inner.output_type_for(position)
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        self.inner.evaluate_fast(inputs, context)
    }

    fn evaluate(
        &mut self,
        inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        self.inner.evaluate(inputs, context)
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn notation(&self) -> Notation {
        Notation::Prefix
    }

    fn argument_demand(&self) -> usize {
        self.inner.argument_demand()
    }

    fn argument_types_for(&self, index: usize) -> Option<TypeSet> {
        self.inner.argument_types_for(index)
    }

    crate::function_identity!();
}

impl core::fmt::Display for PassthroughFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdentityFunction;

    #[test]
    fn delegates_to_inner_function() {
        let id = IdentityFunction::new(1);
        let mut ptf = PassthroughFunction::new("echo", IdentityFunction::new(1));
        assert!(ptf.function().equals(&id));
        assert_eq!(ptf.input_arity(), id.input_arity());
        assert_eq!(ptf.output_arity(), id.output_arity());
        assert_eq!(ptf.output_type_for(0), id.output_type_for(0));
        assert!(ptf.input_types_for(0).is_any());
        assert_eq!(ptf.evaluate(&[Value::Int(6)], None).unwrap(), vec![Value::Int(6)]);

        let mut c = Context::new();
        assert_eq!(
            ptf.evaluate(&[Value::Int(6)], Some(&mut c)).unwrap(),
            vec![Value::Int(6)]
        );
        assert_eq!(ptf.to_string(), "echo");
    }

    #[test]
    fn equality_covers_name_and_inner() {
        let a = PassthroughFunction::new("echo", IdentityFunction::new(1));
        assert!(a.equals(&PassthroughFunction::new("echo", IdentityFunction::new(1))));
        assert!(!a.equals(&PassthroughFunction::new("echo", IdentityFunction::new(2))));
        assert!(!a.equals(&PassthroughFunction::new("copy", IdentityFunction::new(1))));
    }
}
