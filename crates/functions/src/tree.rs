//! Composite functions.
//!
//! A [`FunctionTree`] evaluates each child against the call arguments, collects
//! their single outputs in order, then evaluates the root on that list. Children
//! may be leaves or other trees; the tree owns them exclusively, so
//! duplication is a full deep copy.

use cepflow_core::{Context, FunctionError, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation, single_output};
use crate::placeholder::ArgumentPlaceholder;

#[derive(Debug, Clone)]
pub struct FunctionTree {
    root: Box<dyn Function>,
    children: Vec<Box<dyn Function>>,
}

impl FunctionTree {
    /// Build a tree, checking that the shape matches the root's contract.
    ///
    /// There must be exactly one child per root input, and every child must
    /// produce a single output.
    pub fn new(root: impl Function, children: Vec<Box<dyn Function>>) -> FunctionResult<Self> {
        Self::from_boxed(Box::new(root), children)
    }

    pub fn from_boxed(
        root: Box<dyn Function>,
        children: Vec<Box<dyn Function>>,
    ) -> FunctionResult<Self> {
        if children.len() != root.input_arity() {
            return Err(FunctionError::invalid_argument(format!(
                "{root} takes {} argument(s), tree has {} child(ren)",
                root.input_arity(),
                children.len()
            )));
        }
        if let Some(child) = children.iter().find(|c| c.output_arity() != 1) {
            return Err(FunctionError::invalid_argument(format!(
                "child {child} of {root} has {} outputs, expected 1",
                child.output_arity()
            )));
        }
        Ok(Self { root, children })
    }

    pub fn unary(root: impl Function, arg: impl Function) -> FunctionResult<Self> {
        Self::new(root, vec![Box::new(arg)])
    }

    pub fn binary(root: impl Function, left: impl Function, right: impl Function) -> FunctionResult<Self> {
        Self::new(root, vec![Box::new(left), Box::new(right)])
    }

    pub fn root(&self) -> &dyn Function {
        self.root.as_ref()
    }

    pub fn children(&self) -> &[Box<dyn Function>] {
        &self.children
    }

    fn evaluate_children(
        &mut self,
        inputs: &[Value],
        mut context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        let mut arguments = Vec::with_capacity(self.children.len());
        for child in &mut self.children {
            arguments.push(single_output(child.as_mut(), inputs, context.as_deref_mut())?);
        }
        Ok(arguments)
    }
}

impl PartialEq for FunctionTree {
    fn eq(&self, other: &Self) -> bool {
        self.root.equals(other.root.as_ref())
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.equals(b.as_ref()))
    }
}

impl Function for FunctionTree {
    /// Number of call arguments read by the placeholders in this tree.
    fn input_arity(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.argument_demand())
            .max()
            .unwrap_or(0)
    }

    fn output_arity(&self) -> usize {
        self.root.output_arity()
    }

    fn input_types_for(&self, position: usize) -> TypeSet {
        self.argument_types_for(position)
            .unwrap_or_else(TypeSet::any)
    }

    fn output_type_for(&self, position: usize) -> ValueType {
        self.root.output_type_for(position)
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        mut context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        let arguments = self.evaluate_children(inputs, context.as_deref_mut())?;
        self.root.evaluate_fast(&arguments, context)
    }

    /// Children run on the fast path (they see the whole argument list); the
    /// root is checked against the values they produced.
    fn evaluate(
        &mut self,
        inputs: &[Value],
        mut context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        crate::function::check_inputs(&*self, inputs)?;
        let arguments = self.evaluate_children(inputs, context.as_deref_mut())?;
        self.root.evaluate(&arguments, context)
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn reset(&mut self) {
        self.root.reset();
        for child in &mut self.children {
            child.reset();
        }
    }

    fn notation(&self) -> Notation {
        self.root.notation()
    }

    fn argument_types_for(&self, index: usize) -> Option<TypeSet> {
        let mut required: Option<TypeSet> = None;
        for (position, child) in self.children.iter().enumerate() {
            let demanded = match child.as_any().downcast_ref::<ArgumentPlaceholder>() {
                Some(p) if p.index() == index => Some(self.root.input_types_for(position)),
                Some(_) => None,
                None => child.argument_types_for(index),
            };
            if let Some(types) = demanded {
                required = Some(match required {
                    Some(current) => current.narrow(&types),
                    None => types,
                });
            }
        }
        required
    }

    crate::function_identity!();
}

impl core::fmt::Display for FunctionTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.root.notation(), self.children.as_slice()) {
            (Notation::Symbol, _) => write!(f, "{}", self.root),
            (Notation::Infix, [left, right]) => {
                write_operand(f, left.as_ref())?;
                write!(f, " {} ", self.root)?;
                write_operand(f, right.as_ref())
            }
            (_, children) => {
                write!(f, "{}(", self.root)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

fn write_operand(f: &mut core::fmt::Formatter<'_>, operand: &dyn Function) -> core::fmt::Result {
    let nested_infix = operand.notation() == Notation::Infix
        && operand.as_any().downcast_ref::<FunctionTree>().is_some();
    if nested_infix {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}
