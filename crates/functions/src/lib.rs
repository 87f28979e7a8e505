//! `cepflow-functions`: typed, composable functions over event values.
//!
//! - [`Function`] is the open contract every leaf implements.
//! - [`FunctionTree`] composes functions; children run before the root.
//! - Leaves: [`Constant`], [`IdentityFunction`], [`ArgumentPlaceholder`],
//!   [`ContextPlaceholder`], [`PassthroughFunction`], [`IfThenElse`],
//!   [`Equals`], the [`UnaryFunction`]/[`BinaryFunction`] wrappers and the
//!   arithmetic and boolean operations built on them.
//! - [`CumulativeFunction`] is the only stateful leaf (a running fold).
//! - [`ContextAssignment`] writes evaluation results into a [`Context`](cepflow_core::Context).
//!
//! Stateless leaves are unit or small value types exposed as `const`
//! instances (`ADDITION`, `IF_THEN_ELSE`, ...); copying them costs nothing.

pub mod assignment;
pub mod binary;
pub mod booleans;
pub mod conditional;
pub mod constant;
pub mod cumulative;
pub mod equals;
pub mod function;
pub mod identity;
pub mod json;
pub mod numbers;
pub mod passthrough;
pub mod placeholder;
pub mod tree;
pub mod unary;

pub use assignment::ContextAssignment;
pub use binary::{BinaryFunction, BinaryOperation};
pub use booleans::{AND, And, NEGATION, Negation, OR, Or, parse_bool_value};
pub use conditional::{IF_THEN_ELSE, IfThenElse};
pub use constant::Constant;
pub use cumulative::CumulativeFunction;
pub use equals::{EQUALS, Equals, values_equal};
pub use function::{Function, Notation, check_inputs};
pub use identity::IdentityFunction;
pub use json::{JSON_PARSING, JsonParsing, ParseJson};
pub use numbers::{ADDITION, Addition, MULTIPLICATION, Multiplication, SQUARE_ROOT, SquareRoot};
pub use passthrough::PassthroughFunction;
pub use placeholder::{ArgumentPlaceholder, ContextPlaceholder};
pub use tree::FunctionTree;
pub use unary::{UnaryFunction, UnaryOperation};
