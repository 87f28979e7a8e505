//! The `Function` contract shared by leaves and trees.
//!
//! A function declares an input arity `m`, an output arity `n`, and for each
//! position a set of acceptable runtime types. Evaluation maps `m` inputs (plus
//! an optional [`Context`]) to `n` outputs.
//!
//! Two entry points exist:
//!
//! - [`Function::evaluate`] checks arity and input types, then evaluates.
//! - [`Function::evaluate_fast`] skips the checks. Use it in hot loops where the
//!   caller already guarantees conformance; it must still fail (never panic) on
//!   inputs it cannot handle.
//!
//! The catalogue is open: anything implementing the trait can be placed in a
//! [`FunctionTree`](crate::FunctionTree) or wrapped by a processor.

use std::any::Any;
use std::fmt;

use cepflow_core::{Context, FunctionError, FunctionResult, TypeSet, Value, ValueType};

/// How a function renders itself inside a tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notation {
    /// A bare symbol with no arguments (`3`, `$0`, `$x`).
    Symbol,
    /// `f(a, b)`.
    Prefix,
    /// `a f b`; parenthesised when nested in another infix node.
    Infix,
}

pub trait Function: fmt::Debug + fmt::Display + Send + 'static {
    fn input_arity(&self) -> usize;

    fn output_arity(&self) -> usize;

    /// Runtime types acceptable at input `position`.
    fn input_types_for(&self, position: usize) -> TypeSet;

    /// Runtime type produced at output `position`.
    fn output_type_for(&self, position: usize) -> ValueType;

    /// Evaluate without arity or type validation.
    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>>;

    /// Validate `inputs` against the declared contract, then evaluate.
    fn evaluate(
        &mut self,
        inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        check_inputs(&*self, inputs)?;
        let outputs = self.evaluate_fast(inputs, context)?;
        check_outputs(&*self, &outputs)?;
        Ok(outputs)
    }

    /// Value-independent copy. Stateful functions start over with fresh state.
    fn duplicate(&self) -> Box<dyn Function>;

    /// Clear accumulated state. No-op for stateless functions.
    fn reset(&mut self) {}

    fn notation(&self) -> Notation {
        Notation::Prefix
    }

    /// Number of call arguments this function reads from an enclosing call.
    ///
    /// Equals the input arity except for placeholders, which read an argument
    /// of the enclosing tree without declaring an input of their own.
    fn argument_demand(&self) -> usize {
        self.input_arity()
    }

    /// Type set required for call argument `index` by this function, if it
    /// reads that argument.
    fn argument_types_for(&self, index: usize) -> Option<TypeSet> {
        (index < self.input_arity()).then(|| self.input_types_for(index))
    }

    fn as_any(&self) -> &dyn Any;

    /// Structural equality: same concrete kind, same construction parameters.
    fn equals(&self, other: &dyn Function) -> bool;
}

/// Implements `as_any` and `equals` for a function type that is `PartialEq`.
#[macro_export]
macro_rules! function_identity {
    () => {
        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn equals(&self, other: &dyn $crate::Function) -> bool {
            other
                .as_any()
                .downcast_ref::<Self>()
                .is_some_and(|other| other == self)
        }
    };
}

impl PartialEq for dyn Function {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Clone for Box<dyn Function> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

/// Check arity and per-position input types.
pub fn check_inputs<F: Function + ?Sized>(function: &F, inputs: &[Value]) -> FunctionResult<()> {
    let arity = function.input_arity();
    if inputs.len() != arity {
        return Err(FunctionError::invalid_argument(format!(
            "{function} expects {arity} input(s), got {}",
            inputs.len()
        )));
    }
    for (position, value) in inputs.iter().enumerate() {
        let accepted = function.input_types_for(position);
        if !accepted.accepts(value) {
            return Err(FunctionError::invalid_argument(format!(
                "{function} expects {accepted} at position {position}, got {}",
                value.value_type()
            )));
        }
    }
    Ok(())
}

fn check_outputs<F: Function + ?Sized>(function: &F, outputs: &[Value]) -> FunctionResult<()> {
    let arity = function.output_arity();
    if outputs.len() != arity {
        return Err(FunctionError::evaluation(format!(
            "{function} declares {arity} output(s) but produced {}",
            outputs.len()
        )));
    }
    Ok(())
}

/// Fetch input `position`, failing instead of panicking when it is missing.
pub(crate) fn input(inputs: &[Value], position: usize) -> FunctionResult<&Value> {
    inputs.get(position).ok_or_else(|| {
        FunctionError::invalid_argument(format!("missing input at position {position}"))
    })
}

/// Evaluate a function expected to produce exactly one output.
pub(crate) fn single_output(
    function: &mut dyn Function,
    inputs: &[Value],
    context: Option<&mut Context>,
) -> FunctionResult<Value> {
    let mut outputs = function.evaluate_fast(inputs, context)?;
    match outputs.len() {
        1 => Ok(outputs.swap_remove(0)),
        n => Err(FunctionError::evaluation(format!(
            "{function} produced {n} outputs where one was expected"
        ))),
    }
}
